//! # Turnstile - User Account Service Library
//!
//! Facade crate that re-exports the public APIs of the user account service
//! components: registration, login and logout, access/refresh token rotation
//! with reuse detection, password change and profile updates.
//!
//! ## Structure
//!
//! - **Core domain types**: `Email`, `Username`, `Password`, `UserAccount`, etc.
//! - **Ports**: `UserStore`, `TokenCodec`, `CredentialHasher`
//! - **Use cases**: `SessionManager`, `SignupUseCase`, `ProfileUseCase`
//! - **Adapters**: `JwtTokenCodec`, `Argon2CredentialHasher`, `PostgresUserStore`, `HashMapUserStore`
//! - **Service**: `UserService` - The main entry point

// ============================================================================
// Core Domain Types
// ============================================================================

/// Core domain types and value objects
pub mod core {
    pub use turnstile_core::*;
}

pub use turnstile_core::{
    Email, FullName, HashedPassword, ImageUrl, LoginIdentifier, Password, ProfileUpdate,
    UserAccount, UserError, UserId, UserProfile, Username,
};

// ============================================================================
// Ports
// ============================================================================

pub use turnstile_core::{
    CredentialHasher, PasswordHashError, TokenCodec, TokenError, TokenKind, UserStore,
    UserStoreError,
};

// ============================================================================
// Use Cases (Application Layer)
// ============================================================================

/// Application use cases
pub mod use_cases {
    pub use turnstile_application::*;
}

pub use turnstile_application::{
    NewAccount, ProfileError, ProfileUseCase, SessionError, SessionManager, SessionTokens,
    SignupError, SignupUseCase,
};

// ============================================================================
// Adapters (Infrastructure)
// ============================================================================

/// Infrastructure adapters
pub mod adapters {
    /// HTTP routes, extractors and response envelopes
    pub mod http {
        pub use turnstile_adapters::http::*;
    }

    /// Persistence implementations
    pub mod persistence {
        pub use turnstile_adapters::persistence::*;
    }

    /// JWT codec and cookie helpers
    pub mod auth {
        pub use turnstile_adapters::auth::*;
    }

    /// Password hashing
    pub mod hashing {
        pub use turnstile_adapters::hashing::*;
    }

    /// Configuration
    pub mod config {
        pub use turnstile_adapters::config::*;
    }
}

pub use turnstile_adapters::{
    auth::JwtTokenCodec,
    hashing::Argon2CredentialHasher,
    persistence::{HashMapUserStore, PostgresUserStore},
};

// ============================================================================
// User Service (Main Entry Point)
// ============================================================================

pub use turnstile_service::{Database, UserService};

// ============================================================================
// Re-export common external dependencies
// ============================================================================

/// Re-export async-trait for implementing the port traits
pub use async_trait::async_trait;

/// Re-export secrecy for working with secrets
pub use secrecy::{ExposeSecret, Secret};
