use axum::{extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use turnstile_core::UserStore;

use crate::{
    auth::remove_session_cookies,
    http::{ApiError, ApiResponse, AppState, AuthenticatedUser},
};

#[tracing::instrument(name = "Logout", skip_all, fields(user_id = %user.id))]
pub async fn logout<U>(
    State(state): State<AppState<U>>,
    AuthenticatedUser(user): AuthenticatedUser,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    state.sessions.terminate(&user.id).await?;

    Ok((
        remove_session_cookies(jar),
        ApiResponse::ok(serde_json::json!({}), "User logged out"),
    ))
}
