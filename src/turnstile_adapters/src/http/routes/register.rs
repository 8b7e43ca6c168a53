use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::WithRejection;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use turnstile_application::NewAccount;
use turnstile_core::{Email, FullName, ImageUrl, Password, UserStore, Username};

use super::required;
use crate::http::{ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(alias = "fullname")]
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub username: Option<String>,
    pub password: Option<Secret<String>>,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
}

impl RegisterRequest {
    fn into_new_account(self) -> Result<NewAccount, ApiError> {
        let password = self
            .password
            .filter(|p| !p.expose_secret().trim().is_empty());

        let (Some(full_name), Some(email), Some(username), Some(password)) = (
            required(self.full_name),
            required(self.email),
            required(self.username),
            password,
        ) else {
            return Err(ApiError::BadRequest("All fields are required".to_owned()));
        };

        Ok(NewAccount {
            username: Username::parse(&username)?,
            email: Email::parse(&email)?,
            full_name: FullName::parse(&full_name)?,
            password: Password::parse(password)?,
            avatar: optional_image(self.avatar)?,
            cover_image: optional_image(self.cover_image)?,
        })
    }
}

fn optional_image(value: Option<String>) -> Result<Option<ImageUrl>, ApiError> {
    Ok(required(value)
        .as_deref()
        .map(ImageUrl::parse)
        .transpose()?)
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U>(
    State(state): State<AppState<U>>,
    WithRejection(Json(request), _): WithRejection<Json<RegisterRequest>, ApiError>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let new_account = request.into_new_account()?;
    let profile = state.signup.execute(new_account).await?;

    Ok(ApiResponse::new(
        StatusCode::CREATED,
        profile,
        "User registered successfully",
    ))
}
