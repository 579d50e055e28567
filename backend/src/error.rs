use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Failures of the registration, login and session flows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Account already exists")]
    AccountAlreadyExists,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Authentication required")]
    Unauthenticated,
    #[error("Session is invalid or expired")]
    InvalidSession,
    #[error("Session not recognized")]
    SessionNotRecognized,
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] sqlx::Error),
    #[error("Password hashing failed")]
    HashingFailure,
    #[error("Token signing failed: {0}")]
    SigningFailure(#[from] jsonwebtoken::errors::Error),
    #[error("{0}")]
    Validation(String),
}

impl AuthError {
    /// Message safe to hand back to the client
    pub fn public_message(&self) -> String {
        match self {
            AuthError::StoreUnavailable(_)
            | AuthError::HashingFailure
            | AuthError::SigningFailure(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::AccountAlreadyExists => StatusCode::CONFLICT,
            AuthError::AccountNotFound => StatusCode::NOT_FOUND,
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::InvalidSession
            | AuthError::SessionNotRecognized => StatusCode::UNAUTHORIZED,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::StoreUnavailable(_)
            | AuthError::HashingFailure
            | AuthError::SigningFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Request failed: {:?}", self);
        }

        HttpResponse::build(status)
            .content_type("text/plain; charset=utf-8")
            .body(self.public_message())
    }
}
