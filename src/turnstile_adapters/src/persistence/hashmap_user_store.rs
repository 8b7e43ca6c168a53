use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use secrecy::Secret;
use turnstile_core::{
    HashedPassword, LoginIdentifier, ProfileUpdate, UserAccount, UserId, UserStore,
    UserStoreError,
};

/// In-memory user store for local runs and tests.
#[derive(Default, Clone)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<UserId, UserAccount>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self {
            users: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, user: UserAccount) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        if users
            .values()
            .any(|existing| existing.username == user.username || existing.email == user.email)
        {
            return Err(UserStoreError::UserAlreadyExists);
        }
        users.insert(user.id, user);
        Ok(())
    }

    async fn find_by_identifier(
        &self,
        identifier: &LoginIdentifier,
    ) -> Result<UserAccount, UserStoreError> {
        let users = self.users.read().await;
        users
            .values()
            .find(|user| identifier.matches_username(user))
            .or_else(|| users.values().find(|user| identifier.matches_email(user)))
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<UserAccount, UserStoreError> {
        let users = self.users.read().await;
        users.get(id).cloned().ok_or(UserStoreError::UserNotFound)
    }

    async fn set_refresh_token(
        &self,
        id: &UserId,
        refresh_token: Option<String>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;

        user.refresh_token = refresh_token.map(Secret::from);
        Ok(())
    }

    async fn rotate_refresh_token(
        &self,
        id: &UserId,
        presented: &str,
        replacement: String,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;

        if !user.holds_refresh_token(presented) {
            return Err(UserStoreError::RefreshTokenMismatch);
        }
        user.refresh_token = Some(Secret::from(replacement));
        Ok(())
    }

    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: HashedPassword,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;

        user.password_hash = password_hash;
        Ok(())
    }

    async fn update_profile(
        &self,
        id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserAccount, UserStoreError> {
        let mut users = self.users.write().await;
        if let Some(email) = &update.email {
            if users
                .values()
                .any(|other| &other.email == email && &other.id != id)
            {
                return Err(UserStoreError::UserAlreadyExists);
            }
        }
        let user = users.get_mut(id).ok_or(UserStoreError::UserNotFound)?;

        user.apply(update);
        Ok(user.clone())
    }
}
