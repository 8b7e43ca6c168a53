use axum::{Json, extract::State, response::IntoResponse};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use turnstile_core::{Email, FullName, ImageUrl, UserStore};

use super::required;
use crate::http::{ApiError, ApiResponse, AppState, AuthenticatedUser};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[serde(alias = "fullname")]
    pub full_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarRequest {
    pub avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverImageRequest {
    pub cover_image: Option<String>,
}

#[tracing::instrument(name = "Current user", skip_all, fields(user_id = %user.id))]
pub async fn current_user<U>(
    State(state): State<AppState<U>>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let profile = state.profiles.current_user(&user.id).await?;
    Ok(ApiResponse::ok(profile, "User fetched successfully"))
}

#[tracing::instrument(name = "Update account", skip_all, fields(user_id = %user.id))]
pub async fn update_account<U>(
    State(state): State<AppState<U>>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(request), _): WithRejection<Json<UpdateAccountRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let (Some(full_name), Some(email)) = (required(request.full_name), required(request.email))
    else {
        return Err(ApiError::BadRequest("All fields are required".to_owned()));
    };

    let profile = state
        .profiles
        .update_details(&user.id, FullName::parse(&full_name)?, Email::parse(&email)?)
        .await?;

    Ok(ApiResponse::ok(
        profile,
        "Account details updated successfully",
    ))
}

#[tracing::instrument(name = "Update avatar", skip_all, fields(user_id = %user.id))]
pub async fn update_avatar<U>(
    State(state): State<AppState<U>>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(request), _): WithRejection<Json<AvatarRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let avatar = required(request.avatar)
        .ok_or_else(|| ApiError::BadRequest("Avatar file is missing".to_owned()))?;

    let profile = state
        .profiles
        .update_avatar(&user.id, ImageUrl::parse(&avatar)?)
        .await?;

    Ok(ApiResponse::ok(profile, "Avatar image updated successfully"))
}

#[tracing::instrument(name = "Update cover image", skip_all, fields(user_id = %user.id))]
pub async fn update_cover_image<U>(
    State(state): State<AppState<U>>,
    AuthenticatedUser(user): AuthenticatedUser,
    WithRejection(Json(request), _): WithRejection<Json<CoverImageRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let cover_image = required(request.cover_image)
        .ok_or_else(|| ApiError::BadRequest("Cover image file is missing".to_owned()))?;

    let profile = state
        .profiles
        .update_cover_image(&user.id, ImageUrl::parse(&cover_image)?)
        .await?;

    Ok(ApiResponse::ok(profile, "Cover image updated successfully"))
}
