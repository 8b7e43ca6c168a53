use axum::{
    Router,
    http::{HeaderValue, Method, header, request},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use turnstile_adapters::{
    auth::JwtTokenCodec,
    config::{AllowedOrigins, AuthSetting, constants::API_PREFIX},
    http::{AppState, routes::user_routes},
};
use turnstile_core::UserStore;

use crate::telemetry::{make_span_with_request_id, on_request, on_response};

/// User account service exposing every account route under `/api/v1/users`
pub struct UserService {
    router: Router,
}

impl UserService {
    /// Create a new UserService over the given store
    ///
    /// # Arguments
    /// * `user_store` - Store for user records (must be Clone)
    /// * `auth` - Secrets and time to live for access and refresh tokens
    pub fn new<U>(user_store: U, auth: &AuthSetting) -> Self
    where
        U: UserStore + Clone + 'static,
    {
        let token_codec = JwtTokenCodec::new(
            auth.access_token.jwt_config(),
            auth.refresh_token.jwt_config(),
        );
        let state = AppState::new(user_store, token_codec);

        let router = Router::new().nest(API_PREFIX, user_routes(state));

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Convert the UserService into a router that can be mounted on another router
    ///
    /// # Arguments
    /// * `allowed_origins` - Optional list of allowed CORS origins
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins.filter(|origins| !origins.is_empty()) {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PATCH])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run the user service as a standalone server until ctrl-c or SIGTERM
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("User service listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
