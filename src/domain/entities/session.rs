use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub token: String,
    /// Unix seconds
    pub expires_at: i64,
    pub created_at: String,
}

impl Session {
    pub fn new(user_id: String, token: String, duration_hours: i64) -> Self {
        let now = time::OffsetDateTime::now_utc().unix_timestamp();
        let expires_at = now.saturating_add(duration_hours.saturating_mul(3600));

        Self {
            id: Uuid::new_v4().to_string(),
            user_id,
            token,
            expires_at,
            created_at: super::timestamp_now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at <= time::OffsetDateTime::now_utc().unix_timestamp()
    }

    pub fn expires_at_rfc3339(&self) -> Result<String, time::error::Format> {
        // Unrepresentable timestamps format as the epoch
        let at = time::OffsetDateTime::from_unix_timestamp(self.expires_at)
            .unwrap_or(time::OffsetDateTime::UNIX_EPOCH);
        at.format(&time::format_description::well_known::Rfc3339)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_not_expired() {
        let session = Session::new("u1".into(), "tok".into(), 9);
        assert!(!session.is_expired());
    }

    #[test]
    fn test_zero_duration_session_is_expired() {
        let session = Session::new("u1".into(), "tok".into(), 0);
        assert!(session.is_expired());
    }

    #[test]
    fn test_huge_duration_saturates_instead_of_overflowing() {
        let session = Session::new("u1".into(), "tok".into(), i64::MAX);
        assert_eq!(session.expires_at, i64::MAX);
        assert!(!session.is_expired());
        assert_eq!(session.expires_at_rfc3339().unwrap(), "1970-01-01T00:00:00Z");
    }

    #[test]
    fn test_expiry_formats_as_rfc3339() {
        let mut session = Session::new("u1".into(), "tok".into(), 1);
        session.expires_at = 0;
        assert_eq!(session.expires_at_rfc3339().unwrap(), "1970-01-01T00:00:00Z");
    }
}
