pub mod commands;

pub use commands::*;

use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How long a login stays valid before reads treat it as absent.
const SESSION_TTL_HOURS: i64 = 8;

lazy_static! {
    static ref ACTIVE_SESSION: Arc<Mutex<Option<UserSession>>> = Arc::new(Mutex::new(None));
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Recruiter,
    Candidate,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Recruiter => "recruiter",
            Role::Candidate => "candidate",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "recruiter" => Some(Role::Recruiter),
            "candidate" => Some(Role::Candidate),
            _ => None,
        }
    }
}

/// The logged-in user, held in process memory only. Replaces the browser
/// sessionStorage blob with a typed shape and an explicit expiry policy.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct UserSession {
    pub role: Role,
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub company_name: Option<String>,
    pub logged_in_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl UserSession {
    pub fn new(
        role: Role,
        user_id: String,
        email: String,
        name: String,
        company_name: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            role,
            user_id,
            email,
            name,
            company_name,
            logged_in_at: now,
            expires_at: now + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }
}

pub fn store_session(session: UserSession) {
    *ACTIVE_SESSION.lock() = Some(session);
}

/// The current session, if one exists and has not expired. Expired
/// sessions are cleared on read.
pub fn active_session() -> Option<UserSession> {
    let mut slot = ACTIVE_SESSION.lock();
    match slot.as_ref() {
        Some(session) if session.is_expired() => {
            *slot = None;
            None
        }
        Some(session) => Some(session.clone()),
        None => None,
    }
}

pub fn clear_session() -> bool {
    ACTIVE_SESSION.lock().take().is_some()
}

/// The session, required to be present and of the given role.
pub fn require_role(role: Role) -> Result<UserSession, String> {
    match active_session() {
        Some(session) if session.role == role => Ok(session),
        Some(_) => Err(format!("This action requires a {} login", role.as_str())),
        None => Err("Not logged in".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The store is process-global; serialize the tests that touch it.
    static TEST_LOCK: Mutex<()> = Mutex::new(());

    fn sample(role: Role) -> UserSession {
        UserSession::new(
            role,
            "7".to_string(),
            "user@mail.com".to_string(),
            "Sam".to_string(),
            None,
        )
    }

    #[test]
    fn logout_clears_the_stored_session() {
        let _guard = TEST_LOCK.lock();
        store_session(sample(Role::Candidate));
        assert!(active_session().is_some());
        assert!(clear_session());
        assert!(active_session().is_none());
        assert!(!clear_session());
    }

    #[test]
    fn expired_session_reads_as_absent() {
        let _guard = TEST_LOCK.lock();
        let mut session = sample(Role::Recruiter);
        session.expires_at = Utc::now() - Duration::seconds(1);
        store_session(session);
        assert!(active_session().is_none());
        // the slot was cleared, not just skipped
        assert!(!clear_session());
    }

    #[test]
    fn require_role_rejects_the_other_role() {
        let _guard = TEST_LOCK.lock();
        store_session(sample(Role::Candidate));
        assert!(require_role(Role::Candidate).is_ok());
        assert!(require_role(Role::Recruiter).is_err());
        clear_session();
        assert_eq!(
            require_role(Role::Candidate).unwrap_err(),
            "Not logged in".to_string()
        );
    }

    #[test]
    fn role_round_trips_through_the_wire_form() {
        assert_eq!(Role::parse("recruiter"), Some(Role::Recruiter));
        assert_eq!(Role::parse("candidate"), Some(Role::Candidate));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::Recruiter.as_str(), "recruiter");
    }
}
