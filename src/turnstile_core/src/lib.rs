pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::Email,
    full_name::FullName,
    image_url::ImageUrl,
    login_identifier::LoginIdentifier,
    password::{HashedPassword, Password},
    user::{ProfileUpdate, UserAccount, UserError, UserProfile},
    user_id::UserId,
    username::Username,
};

pub use ports::{
    repositories::{UserStore, UserStoreError},
    services::{CredentialHasher, PasswordHashError, TokenCodec, TokenError, TokenKind},
};
