use color_eyre::eyre::Result;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use turnstile_adapters::config::UserServiceSetting;
use turnstile_service::{Database, UserService};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing()?;

    // Load configuration
    let config = UserServiceSetting::load()?;

    let database = match Database::connect(&config.postgres).await {
        Ok(database) => database,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            std::process::exit(1);
        }
    };
    database.migrate().await?;

    let user_service = UserService::new(database.user_store(), &config.auth);
    let allowed_origins = config.auth.allowed_origins.clone();

    let listener = tokio::net::TcpListener::bind(&config.application.address).await?;
    tracing::info!("Starting user service...");

    let served = user_service
        .run_standalone(listener, Some(allowed_origins))
        .await;

    database.close().await;
    served?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
