use std::fmt;

use turnstile_core::{
    CredentialHasher, LoginIdentifier, Password, PasswordHashError, TokenCodec, TokenError,
    TokenKind, UserAccount, UserId, UserStore, UserStoreError,
};

/// Error types for session operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("User not found")]
    UserNotFound,
    #[error("Password incorrect")]
    BadCredential,
    #[error("Unauthorized request")]
    Unauthorized,
    #[error("Invalid token")]
    InvalidToken,
    #[error("Token has expired")]
    Expired,
    #[error("Refresh token is expired or used")]
    TokenReused,
    #[error("Failed to generate tokens: {0}")]
    TokenIssueError(TokenError),
    #[error("User store error: {0}")]
    UserStoreError(UserStoreError),
    #[error("{0}")]
    PasswordHashError(#[from] PasswordHashError),
}

impl From<UserStoreError> for SessionError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => SessionError::UserNotFound,
            other => SessionError::UserStoreError(other),
        }
    }
}

/// A freshly minted access/refresh pair whose refresh half is already persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokens")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Owns the per-user session state machine.
///
/// A user is logged out while the store holds no refresh token for them, and
/// active while it holds one. Every login and every refresh replaces the stored
/// token, so at most one refresh token per user is ever accepted. No session
/// state is kept in process; the store is the single source of truth.
#[derive(Clone)]
pub struct SessionManager<U, C, H> {
    user_store: U,
    token_codec: C,
    hasher: H,
}

impl<U, C, H> SessionManager<U, C, H>
where
    U: UserStore,
    C: TokenCodec,
    H: CredentialHasher,
{
    pub fn new(user_store: U, token_codec: C, hasher: H) -> Self {
        Self {
            user_store,
            token_codec,
            hasher,
        }
    }

    pub fn user_store(&self) -> &U {
        &self.user_store
    }

    /// Look up the account by username or email and check the password against its hash.
    #[tracing::instrument(name = "SessionManager::authenticate", skip(self, password))]
    pub async fn authenticate(
        &self,
        identifier: &LoginIdentifier,
        password: &Password,
    ) -> Result<UserAccount, SessionError> {
        if identifier.is_unmatchable() {
            return Err(SessionError::UserNotFound);
        }

        let user = self.user_store.find_by_identifier(identifier).await?;

        if !self.hasher.verify(password, &user.password_hash).await? {
            tracing::debug!(user_id = %user.id, "password mismatch");
            return Err(SessionError::BadCredential);
        }

        Ok(user)
    }

    /// Mint a new pair and make its refresh token the only valid one for the user.
    ///
    /// If persisting the refresh token fails nothing is returned and the
    /// previously stored token stays valid.
    #[tracing::instrument(name = "SessionManager::issue_session", skip(self))]
    pub async fn issue_session(&self, user_id: &UserId) -> Result<SessionTokens, SessionError> {
        let tokens = self.mint_pair(user_id)?;

        self.user_store
            .set_refresh_token(user_id, Some(tokens.refresh_token.clone()))
            .await?;

        Ok(tokens)
    }

    /// Exchange the current refresh token for a new pair.
    ///
    /// The presented token must verify under the refresh secret, belong to an
    /// existing user, and be exactly the token stored for that user. The
    /// replacement is written with a compare-and-swap on the presented token,
    /// so of two concurrent refreshes with the same token only one succeeds.
    #[tracing::instrument(name = "SessionManager::refresh", skip_all)]
    pub async fn refresh(&self, presented: Option<&str>) -> Result<SessionTokens, SessionError> {
        let presented = presented
            .filter(|token| !token.trim().is_empty())
            .ok_or(SessionError::Unauthorized)?;

        let user_id = self
            .token_codec
            .verify(presented, TokenKind::Refresh)
            .map_err(rejected_token)?;

        let user = match self.user_store.find_by_id(&user_id).await {
            Ok(user) => user,
            Err(UserStoreError::UserNotFound) => return Err(SessionError::InvalidToken),
            Err(e) => return Err(e.into()),
        };

        if !user.has_active_session() {
            tracing::info!(user_id = %user_id, "refresh attempted without an active session");
            return Err(SessionError::Unauthorized);
        }

        if !user.holds_refresh_token(presented) {
            tracing::warn!(user_id = %user_id, "superseded refresh token presented");
            return Err(SessionError::TokenReused);
        }

        let tokens = self.mint_pair(&user_id)?;

        self.user_store
            .rotate_refresh_token(&user_id, presented, tokens.refresh_token.clone())
            .await
            .map_err(|e| match e {
                UserStoreError::RefreshTokenMismatch => {
                    tracing::warn!(user_id = %user_id, "refresh token rotated concurrently");
                    SessionError::TokenReused
                }
                UserStoreError::UserNotFound => SessionError::InvalidToken,
                other => SessionError::UserStoreError(other),
            })?;

        Ok(tokens)
    }

    /// Resolve the user behind an access token.
    #[tracing::instrument(name = "SessionManager::authorize", skip_all)]
    pub async fn authorize(&self, access_token: Option<&str>) -> Result<UserAccount, SessionError> {
        let access_token = access_token
            .filter(|token| !token.trim().is_empty())
            .ok_or(SessionError::Unauthorized)?;

        let user_id = self
            .token_codec
            .verify(access_token, TokenKind::Access)
            .map_err(rejected_token)?;

        match self.user_store.find_by_id(&user_id).await {
            Ok(user) => Ok(user),
            Err(UserStoreError::UserNotFound) => Err(SessionError::InvalidToken),
            Err(e) => Err(e.into()),
        }
    }

    /// Clear the stored refresh token. Terminating a logged-out user is a no-op.
    #[tracing::instrument(name = "SessionManager::terminate", skip(self))]
    pub async fn terminate(&self, user_id: &UserId) -> Result<(), SessionError> {
        match self.user_store.set_refresh_token(user_id, None).await {
            Ok(()) => Ok(()),
            Err(UserStoreError::UserNotFound) => {
                tracing::debug!(user_id = %user_id, "terminate for unknown user ignored");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the password hash after verifying the old password.
    ///
    /// Outstanding refresh tokens stay valid.
    #[tracing::instrument(
        name = "SessionManager::change_credential",
        skip(self, old_password, new_password)
    )]
    pub async fn change_credential(
        &self,
        user_id: &UserId,
        old_password: &Password,
        new_password: &Password,
    ) -> Result<(), SessionError> {
        let user = self.user_store.find_by_id(user_id).await?;

        if !self.hasher.verify(old_password, &user.password_hash).await? {
            return Err(SessionError::BadCredential);
        }

        let new_hash = self.hasher.hash(new_password).await?;
        self.user_store.set_password_hash(user_id, new_hash).await?;

        Ok(())
    }

    fn mint_pair(&self, user_id: &UserId) -> Result<SessionTokens, SessionError> {
        let access_token = self
            .token_codec
            .mint(user_id, TokenKind::Access)
            .map_err(SessionError::TokenIssueError)?;
        let refresh_token = self
            .token_codec
            .mint(user_id, TokenKind::Refresh)
            .map_err(SessionError::TokenIssueError)?;

        Ok(SessionTokens {
            access_token,
            refresh_token,
        })
    }
}

fn rejected_token(error: TokenError) -> SessionError {
    match error {
        TokenError::Expired => SessionError::Expired,
        TokenError::Malformed | TokenError::InvalidSignature => SessionError::InvalidToken,
        TokenError::UnexpectedError(e) => {
            tracing::error!(error = %e, "token verification failed unexpectedly");
            SessionError::InvalidToken
        }
    }
}
