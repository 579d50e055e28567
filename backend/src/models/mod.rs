use sqlx::SqlitePool;

use crate::config::Config;

pub mod account;
pub mod session_token;

pub use account::*;
pub use session_token::*;

/// Application state shared across all handlers and middleware
pub struct AppState {
    pub db: SqlitePool,
    pub config: Config,
}
