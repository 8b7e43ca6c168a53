//! Axum route handlers for the user account API.

pub mod change_password;
pub mod login;
pub mod logout;
pub mod profile;
pub mod refresh_token;
pub mod register;

use axum::{
    Router,
    routing::{get, patch, post},
};
use turnstile_core::UserStore;

pub use change_password::change_password;
pub use login::login;
pub use logout::logout;
pub use profile::{current_user, update_account, update_avatar, update_cover_image};
pub use refresh_token::refresh_token;
pub use register::register;

use super::state::AppState;

/// All account routes, relative to the API prefix.
pub fn user_routes<U>(state: AppState<U>) -> Router
where
    U: UserStore + Clone + 'static,
{
    Router::new()
        .route("/register", post(register::<U>))
        .route("/login", post(login::<U>))
        .route("/logout", post(logout::<U>))
        .route("/refresh-token", post(refresh_token::<U>))
        .route("/change-password", post(change_password::<U>))
        .route("/current-user", get(current_user::<U>))
        .route("/update-account", patch(update_account::<U>))
        .route("/avatar", patch(update_avatar::<U>))
        .route("/cover-image", patch(update_cover_image::<U>))
        .with_state(state)
}

/// A required text field: present and not blank.
pub(crate) fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
