use axum::http::{HeaderMap, header::AUTHORIZATION};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};

use crate::config::constants::{ACCESS_TOKEN_COOKIE_NAME, REFRESH_TOKEN_COOKIE_NAME};

pub fn create_auth_cookie(token: String, cookie_name: &'static str) -> Cookie<'static> {
    Cookie::build((cookie_name, token))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Same name and path as the auth cookie, with an empty value and `Max-Age=0`.
pub fn create_removal_cookie(cookie_name: &'static str) -> Cookie<'static> {
    let mut cookie = create_auth_cookie(String::new(), cookie_name);
    cookie.make_removal();
    cookie
}

pub fn add_session_cookies(jar: CookieJar, access_token: &str, refresh_token: &str) -> CookieJar {
    jar.add(create_auth_cookie(
        access_token.to_owned(),
        ACCESS_TOKEN_COOKIE_NAME,
    ))
    .add(create_auth_cookie(
        refresh_token.to_owned(),
        REFRESH_TOKEN_COOKIE_NAME,
    ))
}

// Added rather than removed so the clearing headers are sent even when the
// request carried no cookies
pub fn remove_session_cookies(jar: CookieJar) -> CookieJar {
    jar.add(create_removal_cookie(ACCESS_TOKEN_COOKIE_NAME))
        .add(create_removal_cookie(REFRESH_TOKEN_COOKIE_NAME))
}

/// Non-empty cookie value, if present.
pub fn extract_token<'a>(jar: &'a CookieJar, cookie_name: &str) -> Option<&'a str> {
    jar.get(cookie_name)
        .map(|cookie| cookie.value().trim())
        .filter(|value| !value.is_empty())
}

pub fn extract_bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
