use turnstile_core::{
    Email, FullName, ImageUrl, ProfileUpdate, UserId, UserProfile, UserStore, UserStoreError,
};

/// Error types for profile use case
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Profile use case - reads and edits the non-credential parts of an account
#[derive(Clone)]
pub struct ProfileUseCase<U> {
    user_store: U,
}

impl<U> ProfileUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ProfileUseCase::current_user", skip(self))]
    pub async fn current_user(&self, user_id: &UserId) -> Result<UserProfile, ProfileError> {
        let user = self.user_store.find_by_id(user_id).await?;
        Ok(user.profile())
    }

    #[tracing::instrument(name = "ProfileUseCase::update_details", skip(self))]
    pub async fn update_details(
        &self,
        user_id: &UserId,
        full_name: FullName,
        email: Email,
    ) -> Result<UserProfile, ProfileError> {
        let update = ProfileUpdate {
            full_name: Some(full_name),
            email: Some(email),
            ..Default::default()
        };
        self.apply(user_id, update).await
    }

    #[tracing::instrument(name = "ProfileUseCase::update_avatar", skip(self))]
    pub async fn update_avatar(
        &self,
        user_id: &UserId,
        avatar: ImageUrl,
    ) -> Result<UserProfile, ProfileError> {
        let update = ProfileUpdate {
            avatar: Some(avatar),
            ..Default::default()
        };
        self.apply(user_id, update).await
    }

    #[tracing::instrument(name = "ProfileUseCase::update_cover_image", skip(self))]
    pub async fn update_cover_image(
        &self,
        user_id: &UserId,
        cover_image: ImageUrl,
    ) -> Result<UserProfile, ProfileError> {
        let update = ProfileUpdate {
            cover_image: Some(cover_image),
            ..Default::default()
        };
        self.apply(user_id, update).await
    }

    async fn apply(
        &self,
        user_id: &UserId,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ProfileError> {
        let user = self.user_store.update_profile(user_id, update).await?;
        Ok(user.profile())
    }
}
