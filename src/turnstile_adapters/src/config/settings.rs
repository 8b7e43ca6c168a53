use axum::http::HeaderValue;
use config::{Config, ConfigError, File};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::constants::{defaults, env, prod};
use crate::auth::JwtAuthConfig;

/// Service configuration, layered from defaults, `config/base.json`,
/// `config/{APP_ENVIRONMENT}.json` and finally the environment.
#[derive(Debug, Clone, Deserialize)]
pub struct UserServiceSetting {
    pub application: ApplicationSetting,
    pub auth: AuthSetting,
    pub postgres: PostgresSetting,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSetting {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSetting {
    pub access_token: TokenSetting,
    pub refresh_token: TokenSetting,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenSetting {
    pub secret: Secret<String>,
    pub time_to_live: i64,
}

impl TokenSetting {
    pub fn jwt_config(&self) -> JwtAuthConfig {
        JwtAuthConfig {
            jwt_secret: self.secret.clone(),
            token_ttl_in_seconds: self.time_to_live,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSetting {
    pub url: Secret<String>,
    pub max_connections: u32,
}

/// Comma separated list of origins allowed to make credentialed requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "String")]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0
            .iter()
            .any(|allowed| allowed.as_bytes() == origin.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for AllowedOrigins {
    fn from(value: String) -> Self {
        Self(
            value
                .split(',')
                .map(|origin| origin.trim().trim_end_matches('/'))
                .filter(|origin| !origin.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }
}

impl UserServiceSetting {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| defaults::ENVIRONMENT.to_owned());

        let settings: Self = Config::builder()
            .set_default("application.address", prod::APP_ADDRESS)?
            .set_default(
                "auth.access_token.time_to_live",
                defaults::ACCESS_TOKEN_TTL_SECONDS,
            )?
            .set_default(
                "auth.refresh_token.time_to_live",
                defaults::REFRESH_TOKEN_TTL_SECONDS,
            )?
            .set_default("postgres.max_connections", defaults::POSTGRES_MAX_CONNECTIONS)?
            .add_source(File::with_name("config/base").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .set_override_option("application.address", env_var(env::APP_ADDRESS_ENV_VAR))?
            .set_override_option(
                "auth.access_token.secret",
                env_var(env::ACCESS_TOKEN_SECRET_ENV_VAR),
            )?
            .set_override_option(
                "auth.access_token.time_to_live",
                env_var(env::ACCESS_TOKEN_EXPIRY_ENV_VAR),
            )?
            .set_override_option(
                "auth.refresh_token.secret",
                env_var(env::REFRESH_TOKEN_SECRET_ENV_VAR),
            )?
            .set_override_option(
                "auth.refresh_token.time_to_live",
                env_var(env::REFRESH_TOKEN_EXPIRY_ENV_VAR),
            )?
            .set_override_option("auth.allowed_origins", env_var(env::CORS_ORIGIN_ENV_VAR))?
            .set_override_option("postgres.url", env_var(env::DATABASE_URL_ENV_VAR))?
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (kind, token) in [
            ("access", &self.auth.access_token),
            ("refresh", &self.auth.refresh_token),
        ] {
            if token.secret.expose_secret().trim().is_empty() {
                return Err(ConfigError::Message(format!(
                    "{kind} token secret must not be empty"
                )));
            }
            if token.time_to_live <= 0 {
                return Err(ConfigError::Message(format!(
                    "{kind} token time to live must be positive"
                )));
            }
        }

        if self.auth.access_token.secret.expose_secret()
            == self.auth.refresh_token.secret.expose_secret()
        {
            return Err(ConfigError::Message(
                "access and refresh tokens must use different secrets".to_owned(),
            ));
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}
