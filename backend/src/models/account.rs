use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Database model for accounts, keyed by email.
///
/// The password hash is not part of this row; `find_password_hash` reads it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AccountRow {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_row_serializes_identity() {
        let row = AccountRow {
            id: "b7e4c1f2-0000-4000-8000-000000000001".to_string(),
            email: "a@x.com".to_string(),
            username: "alice".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&row).unwrap();

        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["username"], "alice");
        assert!(json.get("password_hash").is_none());
    }
}
