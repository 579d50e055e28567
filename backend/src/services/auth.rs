use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TokenSettings;
use crate::error::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub username: String,
    pub kind: TokenKind,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// A signed token together with the claims it carries
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub value: String,
    pub claims: Claims,
    pub ttl: Duration,
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            log::error!("Password hashing error: {}", e);
            AuthError::HashingFailure
        })?;

    Ok(hash.to_string())
}

/// Compare a plaintext password against a stored PHC hash string.
///
/// A mismatch is `Ok(false)`; an unreadable stored hash is a hashing failure.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(stored_hash).map_err(|e| {
        log::error!("Stored password hash is malformed: {}", e);
        AuthError::HashingFailure
    })?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(password_hash::Error::Password) => Ok(false),
        Err(e) => {
            log::error!("Password verification error: {}", e);
            Err(AuthError::HashingFailure)
        }
    }
}

pub fn issue_token(
    email: &str,
    username: &str,
    kind: TokenKind,
    settings: &TokenSettings,
) -> Result<IssuedToken, AuthError> {
    let ttl = match kind {
        TokenKind::Access => settings.access_ttl,
        TokenKind::Refresh => settings.refresh_ttl,
    };
    sign_token(email, username, kind, &settings.secret, ttl)
}

fn sign_token(
    email: &str,
    username: &str,
    kind: TokenKind,
    secret: &str,
    ttl: Duration,
) -> Result<IssuedToken, AuthError> {
    let now = Utc::now();
    let exp = now + ttl;

    let claims = Claims {
        email: email.to_string(),
        username: username.to_string(),
        kind,
        jti: Uuid::new_v4().to_string(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    let value = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(IssuedToken { value, claims, ttl })
}

/// Check signature, expiry and kind of a token and return its claims.
pub fn verify_token(token: &str, secret: &str, expected: TokenKind) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        log::debug!("Token rejected: {}", e);
        AuthError::InvalidSession
    })?;

    if token_data.claims.kind != expected {
        log::debug!("Token rejected: expected {:?}, got {:?}", expected, token_data.claims.kind);
        return Err(AuthError::InvalidSession);
    }

    Ok(token_data.claims)
}

#[cfg(test)]
pub(crate) fn issue_expired_token(
    email: &str,
    username: &str,
    kind: TokenKind,
    secret: &str,
) -> IssuedToken {
    sign_token(email, username, kind, secret, Duration::seconds(-120)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(secret: &str) -> TokenSettings {
        TokenSettings {
            secret: secret.to_string(),
            access_ttl: Duration::seconds(20),
            refresh_ttl: Duration::days(7),
        }
    }

    #[test]
    fn test_issue_and_verify_token() {
        let issued = issue_token("a@x.com", "alice", TokenKind::Access, &settings("test-secret")).unwrap();
        let claims = verify_token(&issued.value, "test-secret", TokenKind::Access).unwrap();

        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims, issued.claims);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_token_lifetimes_follow_kind() {
        let settings = settings("test-secret");
        let access = issue_token("a@x.com", "alice", TokenKind::Access, &settings).unwrap();
        let refresh = issue_token("a@x.com", "alice", TokenKind::Refresh, &settings).unwrap();

        assert_eq!(access.ttl, Duration::seconds(20));
        assert_eq!(refresh.ttl, Duration::days(7));
        assert_eq!(access.claims.exp - access.claims.iat, 20);
        assert_eq!(refresh.claims.exp - refresh.claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn test_tokens_issued_together_are_distinct() {
        let settings = settings("test-secret");
        let first = issue_token("a@x.com", "alice", TokenKind::Refresh, &settings).unwrap();
        let second = issue_token("a@x.com", "alice", TokenKind::Refresh, &settings).unwrap();

        assert_ne!(first.value, second.value);
    }

    #[test]
    fn test_verify_token_invalid_secret() {
        let issued = issue_token("a@x.com", "alice", TokenKind::Access, &settings("secret1")).unwrap();

        let result = verify_token(&issued.value, "secret2", TokenKind::Access);
        assert!(matches!(result, Err(AuthError::InvalidSession)));
    }

    #[test]
    fn test_verify_token_wrong_kind() {
        let settings = settings("test-secret");
        let access = issue_token("a@x.com", "alice", TokenKind::Access, &settings).unwrap();
        let refresh = issue_token("a@x.com", "alice", TokenKind::Refresh, &settings).unwrap();

        assert!(verify_token(&access.value, "test-secret", TokenKind::Refresh).is_err());
        assert!(verify_token(&refresh.value, "test-secret", TokenKind::Access).is_err());
    }

    #[test]
    fn test_verify_token_expired() {
        let expired = issue_expired_token("a@x.com", "alice", TokenKind::Access, "test-secret");

        let result = verify_token(&expired.value, "test-secret", TokenKind::Access);
        assert!(matches!(result, Err(AuthError::InvalidSession)));
    }

    #[test]
    fn test_verify_token_garbage() {
        assert!(verify_token("not.a.jwt", "test-secret", TokenKind::Access).is_err());
    }

    #[test]
    fn test_password_hashing() {
        let hash = hash_password("test_password123").unwrap();

        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("test_password123", &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_password_hashes_are_salted() {
        let first = hash_password("pw1").unwrap();
        let second = hash_password("pw1").unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_verify_password_malformed_hash() {
        let result = verify_password("pw1", "plaintext-not-a-hash");
        assert!(matches!(result, Err(AuthError::HashingFailure)));
    }
}
