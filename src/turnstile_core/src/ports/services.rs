use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    password::{HashedPassword, Password},
    user_id::UserId,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Access,
    Refresh,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Access => f.write_str("access"),
            TokenKind::Refresh => f.write_str("refresh"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,
    #[error("Invalid token signature")]
    InvalidSignature,
    #[error("Token has expired")]
    Expired,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

/// Mints and verifies signed, time-bounded tokens carrying a user identifier.
///
/// Each [`TokenKind`] has its own signing secret and time to live. Verification
/// checks signature and expiry only; whether the user still exists is the
/// caller's concern.
pub trait TokenCodec: Send + Sync {
    fn mint(&self, user_id: &UserId, kind: TokenKind) -> Result<String, TokenError>;

    fn verify(&self, token: &str, kind: TokenKind) -> Result<UserId, TokenError>;
}

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(pub String);

/// One-way password hashing.
#[async_trait]
pub trait CredentialHasher: Send + Sync {
    async fn hash(&self, password: &Password) -> Result<HashedPassword, PasswordHashError>;

    /// `Ok(false)` on mismatch; `Err` only when the stored hash is unusable.
    async fn verify(
        &self,
        candidate: &Password,
        expected: &HashedPassword,
    ) -> Result<bool, PasswordHashError>;
}
