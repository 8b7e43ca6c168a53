use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;
use turnstile_application::{ProfileError, SessionError, SignupError};
use turnstile_core::{UserError, UserStoreError};

/// Every failure a route can surface, already mapped to its HTTP status.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Internal(String),
}

/// Error envelope: `{statusCode, message, success: false}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub status_code: u16,
    pub message: String,
    pub success: bool,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                "Something went wrong".to_owned()
            }
            ApiError::BadRequest(message)
            | ApiError::NotFound(message)
            | ApiError::Unauthorized(message)
            | ApiError::Conflict(message) => message,
        };

        let body = ErrorResponse {
            status_code: status.as_u16(),
            message,
            success: false,
        };
        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => {
                ApiError::Conflict("User with email or username already exists".to_owned())
            }
            UserStoreError::UserNotFound => ApiError::NotFound("User not found".to_owned()),
            UserStoreError::RefreshTokenMismatch => {
                ApiError::Unauthorized("Refresh token is expired or used".to_owned())
            }
            UserStoreError::UnexpectedError(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(error: SessionError) -> Self {
        match error {
            SessionError::UserNotFound => ApiError::NotFound("User does not exist".to_owned()),
            SessionError::BadCredential => ApiError::Unauthorized(error.to_string()),
            SessionError::Unauthorized
            | SessionError::InvalidToken
            | SessionError::Expired
            | SessionError::TokenReused => ApiError::Unauthorized(error.to_string()),
            SessionError::TokenIssueError(e) => ApiError::Internal(format!(
                "Something went wrong while generating refresh and access tokens: {e}"
            )),
            SessionError::UserStoreError(e) => e.into(),
            SessionError::PasswordHashError(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<SignupError> for ApiError {
    fn from(error: SignupError) -> Self {
        match error {
            SignupError::UserStoreError(e) => e.into(),
            SignupError::PasswordHashError(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<ProfileError> for ApiError {
    fn from(error: ProfileError) -> Self {
        match error {
            ProfileError::UserStoreError(e) => e.into(),
        }
    }
}
