pub mod env {
    pub const APP_ENVIRONMENT_ENV_VAR: &str = "APP_ENVIRONMENT";
    pub const APP_ADDRESS_ENV_VAR: &str = "APP_ADDRESS";
    pub const ACCESS_TOKEN_SECRET_ENV_VAR: &str = "ACCESS_TOKEN_SECRET";
    pub const ACCESS_TOKEN_EXPIRY_ENV_VAR: &str = "ACCESS_TOKEN_EXPIRY";
    pub const REFRESH_TOKEN_SECRET_ENV_VAR: &str = "REFRESH_TOKEN_SECRET";
    pub const REFRESH_TOKEN_EXPIRY_ENV_VAR: &str = "REFRESH_TOKEN_EXPIRY";
    pub const DATABASE_URL_ENV_VAR: &str = "DATABASE_URL";
    pub const CORS_ORIGIN_ENV_VAR: &str = "CORS_ORIGIN";
}

pub const ACCESS_TOKEN_COOKIE_NAME: &str = "accessToken";
pub const REFRESH_TOKEN_COOKIE_NAME: &str = "refreshToken";

pub const API_PREFIX: &str = "/api/v1/users";

pub mod defaults {
    pub const ENVIRONMENT: &str = "local";
    // 15 minutes
    pub const ACCESS_TOKEN_TTL_SECONDS: i64 = 15 * 60;
    // 10 days
    pub const REFRESH_TOKEN_TTL_SECONDS: i64 = 10 * 24 * 60 * 60;
    pub const POSTGRES_MAX_CONNECTIONS: i64 = 5;
}

pub mod prod {
    pub const APP_ADDRESS: &str = "0.0.0.0:8000";
}

pub mod test {
    pub const APP_ADDRESS: &str = "127.0.0.1:0";
}
