use secrecy::ExposeSecret;
use sqlx::{PgPool, migrate::MigrateError, postgres::PgPoolOptions};
use turnstile_adapters::{config::PostgresSetting, persistence::PostgresUserStore};

/// Owns the PostgreSQL pool for the lifetime of the process.
pub struct Database {
    pool: PgPool,
}

impl Database {
    #[tracing::instrument(name = "Connecting to PostgreSQL", skip_all)]
    pub async fn connect(settings: &PostgresSetting) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(settings.url.expose_secret())
            .await?;

        tracing::info!("Connected to PostgreSQL");
        Ok(Self { pool })
    }

    #[tracing::instrument(name = "Running migrations", skip_all)]
    pub async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!().run(&self.pool).await
    }

    pub fn user_store(&self) -> PostgresUserStore {
        PostgresUserStore::new(self.pool.clone())
    }

    pub async fn close(self) {
        self.pool.close().await;
        tracing::info!("PostgreSQL pool closed");
    }
}
