use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    login_identifier::LoginIdentifier,
    password::HashedPassword,
    user::{ProfileUpdate, UserAccount},
    user_id::UserId,
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User with email or username already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Stored refresh token does not match")]
    RefreshTokenMismatch,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            (self, other),
            (Self::UserAlreadyExists, Self::UserAlreadyExists)
                | (Self::UserNotFound, Self::UserNotFound)
                | (Self::RefreshTokenMismatch, Self::RefreshTokenMismatch)
                | (Self::UnexpectedError(_), Self::UnexpectedError(_))
        )
    }
}

/// Persistent record per user: credentials, profile and the current refresh token.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `UserAlreadyExists` if the username or email is taken.
    async fn add_user(&self, user: UserAccount) -> Result<(), UserStoreError>;

    async fn find_by_identifier(
        &self,
        identifier: &LoginIdentifier,
    ) -> Result<UserAccount, UserStoreError>;

    async fn find_by_id(&self, id: &UserId) -> Result<UserAccount, UserStoreError>;

    /// Unconditionally overwrites (or clears, with `None`) the stored refresh token.
    async fn set_refresh_token(
        &self,
        id: &UserId,
        refresh_token: Option<String>,
    ) -> Result<(), UserStoreError>;

    /// Replaces the stored refresh token only if it still equals `presented`.
    ///
    /// Fails with `RefreshTokenMismatch` when another writer got there first.
    async fn rotate_refresh_token(
        &self,
        id: &UserId,
        presented: &str,
        replacement: String,
    ) -> Result<(), UserStoreError>;

    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: HashedPassword,
    ) -> Result<(), UserStoreError>;

    /// Fails with `UserAlreadyExists` if the new email belongs to another account.
    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserAccount, UserStoreError>;
}
