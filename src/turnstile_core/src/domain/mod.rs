pub mod email;
pub mod full_name;
pub mod image_url;
pub mod login_identifier;
pub mod password;
pub mod user;
pub mod user_id;
pub mod username;
