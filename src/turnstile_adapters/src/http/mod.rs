pub mod error;
pub mod extractors;
pub mod response;
pub mod routes;
pub mod state;

pub use error::{ApiError, ErrorResponse};
pub use extractors::AuthenticatedUser;
pub use response::ApiResponse;
pub use state::{AppState, Sessions};
