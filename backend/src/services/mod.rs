pub mod auth;
pub mod credential_store;
pub mod session;
