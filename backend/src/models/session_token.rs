use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;

/// How a session record came into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssuanceContext {
    Registration,
    Login,
}

impl IssuanceContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssuanceContext::Registration => "registration",
            IssuanceContext::Login => "login",
        }
    }
}

impl FromStr for IssuanceContext {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registration" => Ok(IssuanceContext::Registration),
            "login" => Ok(IssuanceContext::Login),
            _ => Err(()),
        }
    }
}

/// Database model for a persisted refresh token
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SessionTokenRow {
    pub id: String,
    pub email: String,
    pub refresh_token: String,
    pub issued_via: String,
    pub created_at: DateTime<Utc>,
}

impl SessionTokenRow {
    pub fn context(&self) -> Option<IssuanceContext> {
        IssuanceContext::from_str(&self.issued_via).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issuance_context_round_trip() {
        for context in [IssuanceContext::Registration, IssuanceContext::Login] {
            assert_eq!(IssuanceContext::from_str(context.as_str()), Ok(context));
        }
        assert!(IssuanceContext::from_str("sudo").is_err());
    }

    #[test]
    fn test_session_token_row_context() {
        let row = SessionTokenRow {
            id: "1".to_string(),
            email: "a@x.com".to_string(),
            refresh_token: "token".to_string(),
            issued_via: "login".to_string(),
            created_at: Utc::now(),
        };

        assert_eq!(row.context(), Some(IssuanceContext::Login));
    }
}
