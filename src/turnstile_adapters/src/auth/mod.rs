pub mod cookies;
pub mod jwt_token_codec;

pub use cookies::{
    add_session_cookies, create_auth_cookie, create_removal_cookie, extract_bearer_token,
    extract_token, remove_session_cookies,
};
pub use jwt_token_codec::{Claims, JwtAuthConfig, JwtTokenCodec, generate_token, validate_token};
