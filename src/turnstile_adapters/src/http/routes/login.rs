use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::{CookieJar, WithRejection};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use turnstile_core::{LoginIdentifier, Password, UserProfile, UserStore};

use crate::{
    auth::add_session_cookies,
    http::{ApiError, ApiResponse, AppState},
};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<Secret<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    pub user: UserProfile,
    pub access_token: String,
    pub refresh_token: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U>(
    State(state): State<AppState<U>>,
    jar: CookieJar,
    WithRejection(Json(request), _): WithRejection<Json<LoginRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let identifier =
        LoginIdentifier::parse(request.username.as_deref(), request.email.as_deref())?;
    let password = request
        .password
        .ok_or_else(|| ApiError::BadRequest("Password is required".to_owned()))?;
    let password = Password::parse(password)?;

    let user = state.sessions.authenticate(&identifier, &password).await?;
    let tokens = state.sessions.issue_session(&user.id).await?;

    let jar = add_session_cookies(jar, &tokens.access_token, &tokens.refresh_token);
    let data = LoginData {
        user: user.profile(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    };

    Ok((jar, ApiResponse::ok(data, "User logged in successfully")))
}
