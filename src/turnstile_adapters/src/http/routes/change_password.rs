use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use secrecy::Secret;
use serde::Deserialize;
use turnstile_application::SessionError;
use turnstile_core::{Password, UserStore};

use crate::http::{ApiError, ApiResponse, AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: Option<Secret<String>>,
    pub new_password: Option<Secret<String>>,
}

#[tracing::instrument(name = "Change password", skip_all, fields(user_id = %user.id))]
pub async fn change_password<U>(
    State(state): State<AppState<U>>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(request), _): WithRejection<Json<ChangePasswordRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let (Some(old_password), Some(new_password)) = (request.old_password, request.new_password)
    else {
        return Err(ApiError::BadRequest(
            "Old and new password are required".to_owned(),
        ));
    };
    let old_password = Password::parse(old_password)?;
    let new_password = Password::parse(new_password)?;

    state
        .sessions
        .change_credential(&user.id, &old_password, &new_password)
        .await
        .map_err(|e| match e {
            SessionError::BadCredential => ApiError::BadRequest("Invalid old password".to_owned()),
            other => other.into(),
        })?;

    Ok(ApiResponse::ok(
        serde_json::json!({}),
        "Password changed successfully",
    ))
}
