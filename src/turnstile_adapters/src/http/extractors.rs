use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::CookieJar;
use turnstile_application::SessionError;
use turnstile_core::{UserAccount, UserStore};

use super::{error::ApiError, state::AppState};
use crate::{
    auth::{extract_bearer_token, extract_token},
    config::constants::ACCESS_TOKEN_COOKIE_NAME,
};

/// The user behind a valid access token, read from the `accessToken` cookie
/// or an `Authorization: Bearer` header.
pub struct AuthenticatedUser(pub UserAccount);

impl<U> FromRequestParts<AppState<U>> for AuthenticatedUser
where
    U: UserStore + Clone + 'static,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<U>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = extract_token(&jar, ACCESS_TOKEN_COOKIE_NAME)
            .or_else(|| extract_bearer_token(&parts.headers))
            .map(str::to_owned);

        match state.sessions.authorize(token.as_deref()).await {
            Ok(user) => Ok(Self(user)),
            Err(SessionError::Unauthorized) => {
                Err(ApiError::Unauthorized("Unauthorized request".to_owned()))
            }
            Err(
                SessionError::InvalidToken | SessionError::Expired | SessionError::UserNotFound,
            ) => Err(ApiError::Unauthorized("Invalid access token".to_owned())),
            Err(e) => Err(e.into()),
        }
    }
}
