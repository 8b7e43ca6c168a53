use turnstile_core::{
    CredentialHasher, Email, FullName, ImageUrl, Password, PasswordHashError, UserAccount,
    UserProfile, UserStore, UserStoreError, Username,
};

/// Validated registration input
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: Username,
    pub email: Email,
    pub full_name: FullName,
    pub password: Password,
    pub avatar: Option<ImageUrl>,
    pub cover_image: Option<ImageUrl>,
}

/// Error types for signup use case
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("User store error: {0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("{0}")]
    PasswordHashError(#[from] PasswordHashError),
}

/// Signup use case - registers a new account
#[derive(Clone)]
pub struct SignupUseCase<U, H> {
    user_store: U,
    hasher: H,
}

impl<U, H> SignupUseCase<U, H>
where
    U: UserStore,
    H: CredentialHasher,
{
    pub fn new(user_store: U, hasher: H) -> Self {
        Self { user_store, hasher }
    }

    /// Execute the signup use case
    ///
    /// # Returns
    /// The sanitized profile of the created account, or `UserAlreadyExists`
    /// if the username or email is taken.
    #[tracing::instrument(name = "SignupUseCase::execute", skip(self, new_account), fields(username = %new_account.username))]
    pub async fn execute(&self, new_account: NewAccount) -> Result<UserProfile, SignupError> {
        let password_hash = self.hasher.hash(&new_account.password).await?;

        let user = UserAccount::new(
            new_account.username,
            new_account.email,
            new_account.full_name,
            password_hash,
            new_account.avatar,
            new_account.cover_image,
        );
        let profile = user.profile();

        self.user_store.add_user(user).await?;

        Ok(profile)
    }
}
