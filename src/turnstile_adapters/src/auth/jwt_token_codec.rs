use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use turnstile_core::{TokenCodec, TokenError, TokenKind, UserId};
use uuid::Uuid;

#[derive(Clone)]
pub struct JwtAuthConfig {
    pub jwt_secret: Secret<String>,
    pub token_ttl_in_seconds: i64,
}

impl JwtAuthConfig {
    pub fn as_bytes(&self) -> &[u8] {
        self.jwt_secret.expose_secret().as_bytes()
    }
}

/// HS256 token codec with one secret/TTL pair per token kind.
#[derive(Clone)]
pub struct JwtTokenCodec {
    access: JwtAuthConfig,
    refresh: JwtAuthConfig,
}

impl JwtTokenCodec {
    pub fn new(access: JwtAuthConfig, refresh: JwtAuthConfig) -> Self {
        Self { access, refresh }
    }

    fn config(&self, kind: TokenKind) -> &JwtAuthConfig {
        match kind {
            TokenKind::Access => &self.access,
            TokenKind::Refresh => &self.refresh,
        }
    }
}

impl TokenCodec for JwtTokenCodec {
    fn mint(&self, user_id: &UserId, kind: TokenKind) -> Result<String, TokenError> {
        let config = self.config(kind);
        generate_token(user_id, config.token_ttl_in_seconds, config.as_bytes())
    }

    fn verify(&self, token: &str, kind: TokenKind) -> Result<UserId, TokenError> {
        let claims = validate_token(token, self.config(kind).as_bytes())?;
        UserId::parse(&claims.sub).map_err(|_| TokenError::Malformed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub jti: String,
    pub iat: usize,
    pub exp: usize,
}

// Create a signed token for the user that expires `token_ttl_seconds` from now
pub fn generate_token(
    user_id: &UserId,
    token_ttl_seconds: i64,
    secret: &[u8],
) -> Result<String, TokenError> {
    let delta = chrono::Duration::try_seconds(token_ttl_seconds).ok_or(
        TokenError::UnexpectedError("Failed to create token duration".to_string()),
    )?;

    let now = Utc::now();
    let exp = now
        .checked_add_signed(delta)
        .ok_or(TokenError::UnexpectedError(
            "Duration out of range".to_string(),
        ))?
        .timestamp();

    let exp: usize = exp
        .try_into()
        .map_err(|_| TokenError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;
    let iat: usize = now
        .timestamp()
        .try_into()
        .map_err(|_| TokenError::UnexpectedError("Failed to cast i64 to usize".to_string()))?;

    let claims = Claims {
        sub: user_id.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat,
        exp,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret))
        .map_err(|e| TokenError::UnexpectedError(e.to_string()))
}

// Decode the token, checking its signature first and then its expiry with no leeway
pub fn validate_token(token: &str, secret: &[u8]) -> Result<Claims, TokenError> {
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            _ => TokenError::Malformed,
        })
}
