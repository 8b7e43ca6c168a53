pub mod session_manager;
pub mod use_cases;

pub use session_manager::{SessionError, SessionManager, SessionTokens};
pub use use_cases::{
    profile::{ProfileError, ProfileUseCase},
    signup::{NewAccount, SignupError, SignupUseCase},
};
