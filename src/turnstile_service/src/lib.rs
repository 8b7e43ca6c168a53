pub mod database;
pub mod telemetry;
pub mod user_service;

pub use database::Database;
pub use user_service::UserService;
