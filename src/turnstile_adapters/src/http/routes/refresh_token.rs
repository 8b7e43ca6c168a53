use axum::{body::Bytes, extract::State, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use turnstile_core::UserStore;

use crate::{
    auth::{add_session_cookies, extract_token},
    config::constants::REFRESH_TOKEN_COOKIE_NAME,
    http::{ApiError, ApiResponse, AppState},
};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenData {
    pub access_token: String,
    pub refresh_token: String,
}

/// Rotates the session. The presented token comes from the `refreshToken`
/// cookie, falling back to a `refreshToken` field in an optional JSON body.
#[tracing::instrument(name = "Refresh token", skip_all)]
pub async fn refresh_token<U>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let presented = extract_token(&jar, REFRESH_TOKEN_COOKIE_NAME)
        .map(str::to_owned)
        .or_else(|| token_from_body(&body));

    let tokens = state.sessions.refresh(presented.as_deref()).await?;

    let jar = add_session_cookies(jar, &tokens.access_token, &tokens.refresh_token);
    let data = RefreshTokenData {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    };

    Ok((jar, ApiResponse::ok(data, "Access token refreshed")))
}

fn token_from_body(body: &[u8]) -> Option<String> {
    if body.is_empty() {
        return None;
    }
    serde_json::from_slice::<RefreshTokenRequest>(body)
        .ok()?
        .refresh_token
        .filter(|token| !token.trim().is_empty())
}
