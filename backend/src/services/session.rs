//! Registration, login and cookie-session authorization.
//!
//! A session is a pair of signed tokens. The access token is short-lived and
//! is checked by signature alone. The refresh token is long-lived and is only
//! honored while its string is present in the `tokens` table; a valid refresh
//! token is exchanged for a new access token whenever the access token is
//! absent, expired or otherwise invalid.

use sqlx::SqlitePool;

use crate::config::TokenSettings;
use crate::error::AuthError;
use crate::models::IssuanceContext;
use crate::services::auth::{self, Claims, IssuedToken, TokenKind};
use crate::services::credential_store::{self, StoreError};

/// Tokens handed to the client after a successful registration or login
#[derive(Debug, Clone)]
pub struct SessionGrant {
    pub access: IssuedToken,
    pub refresh: IssuedToken,
}

/// Outcome of a successful authorization
#[derive(Debug, Clone)]
pub struct Authorization {
    pub claims: Claims,
    /// Set when the access token was regenerated from the refresh token
    pub reissued: Option<IssuedToken>,
}

pub async fn register(
    pool: &SqlitePool,
    settings: &TokenSettings,
    email: &str,
    username: &str,
    password: &str,
) -> Result<SessionGrant, AuthError> {
    if credential_store::find_account_by_email(pool, email).await?.is_some() {
        return Err(AuthError::AccountAlreadyExists);
    }

    let password_hash = auth::hash_password(password)?;

    // The existence check above is not atomic with this insert; the unique
    // index on users.email settles concurrent registrations.
    match credential_store::insert_account(pool, email, username, &password_hash).await {
        Ok(_) => {}
        Err(StoreError::UniquenessViolation) => return Err(AuthError::AccountAlreadyExists),
        Err(StoreError::Unavailable(e)) => return Err(e.into()),
    }

    log::info!("Registered account {}", email);

    open_session(pool, settings, email, username, IssuanceContext::Registration).await
}

pub async fn login(
    pool: &SqlitePool,
    settings: &TokenSettings,
    email: &str,
    password: &str,
) -> Result<SessionGrant, AuthError> {
    let account = credential_store::find_account_by_email(pool, email)
        .await?
        .ok_or(AuthError::AccountNotFound)?;

    let password_hash = credential_store::find_password_hash(pool, email)
        .await?
        .ok_or(AuthError::AccountNotFound)?;

    if !auth::verify_password(password, &password_hash)? {
        log::warn!("Rejected login for {}: wrong password", email);
        return Err(AuthError::InvalidCredentials);
    }

    log::info!("Login for {}", email);

    open_session(pool, settings, email, &account.username, IssuanceContext::Login).await
}

async fn open_session(
    pool: &SqlitePool,
    settings: &TokenSettings,
    email: &str,
    username: &str,
    context: IssuanceContext,
) -> Result<SessionGrant, AuthError> {
    let access = auth::issue_token(email, username, TokenKind::Access, settings)?;
    let refresh = auth::issue_token(email, username, TokenKind::Refresh, settings)?;

    credential_store::insert_session_record(pool, email, &refresh.value, context).await?;

    Ok(SessionGrant { access, refresh })
}

/// Decide whether a request carrying the given cookies may reach a protected
/// resource.
pub async fn authorize(
    pool: &SqlitePool,
    settings: &TokenSettings,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
) -> Result<Authorization, AuthError> {
    let result = check_tokens(pool, settings, access_token, refresh_token).await;
    if let Err(ref e) = result {
        log::warn!("Denied protected access: {}", e);
    }
    result
}

async fn check_tokens(
    pool: &SqlitePool,
    settings: &TokenSettings,
    access_token: Option<&str>,
    refresh_token: Option<&str>,
) -> Result<Authorization, AuthError> {
    if access_token.is_none() && refresh_token.is_none() {
        return Err(AuthError::Unauthenticated);
    }

    if let Some(token) = access_token {
        if let Ok(claims) = auth::verify_token(token, &settings.secret, TokenKind::Access) {
            return Ok(Authorization { claims, reissued: None });
        }
    }

    let refresh_token = refresh_token.ok_or(AuthError::InvalidSession)?;
    let claims = auth::verify_token(refresh_token, &settings.secret, TokenKind::Refresh)?;

    let record = credential_store::find_session_record(pool, refresh_token)
        .await?
        .ok_or(AuthError::SessionNotRecognized)?;

    if record.email != claims.email {
        return Err(AuthError::SessionNotRecognized);
    }

    let access = auth::issue_token(&claims.email, &claims.username, TokenKind::Access, settings)?;
    log::info!(
        "Reissued access token for {} (session opened by {:?})",
        claims.email,
        record.context()
    );

    Ok(Authorization {
        claims: access.claims.clone(),
        reissued: Some(access),
    })
}
