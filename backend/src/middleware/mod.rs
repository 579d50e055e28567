pub mod auth;
pub mod logging;

pub use auth::require_session;
pub use logging::{error_request, log_request, warn_request};
