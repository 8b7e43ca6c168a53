use turnstile_application::{ProfileUseCase, SessionManager, SignupUseCase};
use turnstile_core::UserStore;

use crate::{auth::JwtTokenCodec, hashing::Argon2CredentialHasher};

pub type Sessions<U> = SessionManager<U, JwtTokenCodec, Argon2CredentialHasher>;

/// Shared handler state. Every use case holds its own handle to the same store.
#[derive(Clone)]
pub struct AppState<U> {
    pub sessions: Sessions<U>,
    pub signup: SignupUseCase<U, Argon2CredentialHasher>,
    pub profiles: ProfileUseCase<U>,
}

impl<U> AppState<U>
where
    U: UserStore + Clone,
{
    pub fn new(user_store: U, token_codec: JwtTokenCodec) -> Self {
        Self {
            sessions: SessionManager::new(
                user_store.clone(),
                token_codec,
                Argon2CredentialHasher,
            ),
            signup: SignupUseCase::new(user_store.clone(), Argon2CredentialHasher),
            profiles: ProfileUseCase::new(user_store),
        }
    }
}
