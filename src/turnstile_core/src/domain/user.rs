use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;
use thiserror::Error;

use super::{
    email::Email, full_name::FullName, image_url::ImageUrl, password::HashedPassword,
    user_id::UserId, username::Username,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Invalid username")]
    InvalidUsername,
    #[error("Password must not be empty")]
    InvalidPassword,
    #[error("Full name must not be empty")]
    InvalidFullName,
    #[error("Invalid image url")]
    InvalidImageUrl,
    #[error("Invalid user id")]
    InvalidUserId,
    #[error("Username or email is required")]
    MissingIdentifier,
}

/// The stored user record, including credentials.
///
/// `refresh_token` mirrors the single refresh token currently considered valid
/// for this user. `None` means the user has no active session.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub password_hash: HashedPassword,
    pub avatar: Option<ImageUrl>,
    pub cover_image: Option<ImageUrl>,
    pub refresh_token: Option<Secret<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserAccount {
    pub fn new(
        username: Username,
        email: Email,
        full_name: FullName,
        password_hash: HashedPassword,
        avatar: Option<ImageUrl>,
        cover_image: Option<ImageUrl>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            full_name,
            password_hash,
            avatar,
            cover_image,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Exact comparison against the stored refresh token.
    pub fn holds_refresh_token(&self, presented: &str) -> bool {
        self.refresh_token
            .as_ref()
            .is_some_and(|stored| stored.expose_secret() == presented)
    }

    pub fn has_active_session(&self) -> bool {
        self.refresh_token.is_some()
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(full_name) = update.full_name {
            self.full_name = full_name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(avatar) = update.avatar {
            self.avatar = Some(avatar);
        }
        if let Some(cover_image) = update.cover_image {
            self.cover_image = Some(cover_image);
        }
        self.updated_at = Utc::now();
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
            full_name: self.full_name.clone(),
            avatar: self.avatar.clone(),
            cover_image: self.cover_image.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The user record as it may be shown to clients: no password hash, no refresh token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub avatar: Option<ImageUrl>,
    pub cover_image: Option<ImageUrl>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update of the editable profile fields. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<FullName>,
    pub email: Option<Email>,
    pub avatar: Option<ImageUrl>,
    pub cover_image: Option<ImageUrl>,
}
