//! The persisted staff session.
//!
//! At most one session exists at a time. It is created at login, read back
//! at startup, and destroyed by logout, by any 401 response, or by its
//! fixed 24-hour TTL - there is no activity-based renewal. The lifecycle is
//! observable through a `watch` channel so consumers can drop back to the
//! anonymous state without a process restart.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use caphe_core::StaffRole;

use crate::storage::StorageService;

/// Fixed session lifetime: 24 hours from creation, not sliding.
pub const AUTH_TTL_HOURS: f64 = 24.0;

const AUTH_KEY: &str = "auth";

/// The staff member attached to a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffUser {
    pub username: String,
    pub role: StaffRole,
}

/// A client-held proof of authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: StaffUser,
    pub token: String,
    /// Unix milliseconds after which the session is invalid.
    pub expires_at: i64,
}

impl AuthSession {
    /// Build a session expiring [`AUTH_TTL_HOURS`] from now.
    #[must_use]
    pub fn new(user: StaffUser, token: impl Into<String>) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let ttl_ms = (AUTH_TTL_HOURS * 3_600_000.0) as i64;
        Self {
            user,
            token: token.into(),
            expires_at: chrono::Utc::now().timestamp_millis() + ttl_ms,
        }
    }

    /// True once the TTL has elapsed.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now().timestamp_millis() > self.expires_at
    }
}

/// The two session states. Transitions:
/// `Anonymous -> login -> Authenticated -> logout | 401 | expiry -> Anonymous`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Anonymous,
    Authenticated,
}

/// Repository for the single persisted session.
///
/// All reads and writes of the session record go through here - no other
/// code touches the underlying storage key.
#[derive(Debug, Clone)]
pub struct SessionStore {
    storage: StorageService,
    phase: Arc<watch::Sender<SessionPhase>>,
}

impl SessionStore {
    /// Create a session store over the given storage service.
    #[must_use]
    pub fn new(storage: StorageService) -> Self {
        let initial = if storage.get_item::<AuthSession>(AUTH_KEY).is_some() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        };
        let (phase, _) = watch::channel(initial);
        Self {
            storage,
            phase: Arc::new(phase),
        }
    }

    /// Persist a session. Returns `false` when the write failed, in which
    /// case the caller stays effectively anonymous across restarts.
    pub fn set_auth(&self, session: &AuthSession) -> bool {
        self.set_auth_with_ttl(session, AUTH_TTL_HOURS)
    }

    /// Persist a session with an explicit TTL (hours). Exists so expiry
    /// behavior can be exercised without waiting a day.
    pub fn set_auth_with_ttl(&self, session: &AuthSession, ttl_hours: f64) -> bool {
        let written = self.storage.set_item(AUTH_KEY, session, Some(ttl_hours));
        if written {
            self.phase.send_replace(SessionPhase::Authenticated);
        }
        written
    }

    /// Read the current session.
    ///
    /// An expired or corrupt record is evicted and reads as `None`; the
    /// published phase drops back to anonymous in that case.
    #[must_use]
    pub fn get_auth(&self) -> Option<AuthSession> {
        let session = self.storage.get_item::<AuthSession>(AUTH_KEY);

        // The storage envelope enforces the TTL, but a record written by an
        // older client may carry its own earlier expiry.
        let session = match session {
            Some(s) if s.is_expired() => {
                self.storage.remove_item(AUTH_KEY);
                None
            }
            other => other,
        };

        if session.is_none() {
            self.phase.send_replace(SessionPhase::Anonymous);
        }
        session
    }

    /// Destroy the session. Idempotent.
    pub fn remove_auth(&self) {
        self.storage.remove_item(AUTH_KEY);
        self.phase.send_replace(SessionPhase::Anonymous);
    }

    /// True when a live session exists.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.get_auth().is_some()
    }

    /// Observe session-phase transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionPhase> {
        self.phase.subscribe()
    }

    /// Current phase without touching storage.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        *self.phase.borrow()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_session_store(tag: &str) -> SessionStore {
        let dir = std::env::temp_dir().join(format!("caphe-session-{tag}-{}", uuid::Uuid::new_v4()));
        SessionStore::new(StorageService::new(dir, "caphe-admin-"))
    }

    fn staff() -> StaffUser {
        StaffUser {
            username: "admin@caphe.coffee".to_owned(),
            role: StaffRole::Admin,
        }
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let store = temp_session_store("roundtrip");
        let session = AuthSession::new(staff(), "abc123");

        assert!(store.set_auth(&session));
        let read = store.get_auth().unwrap();
        assert_eq!(read.user, session.user);
        assert_eq!(read.token, "abc123");
        assert_eq!(store.phase(), SessionPhase::Authenticated);
    }

    #[test]
    fn test_one_second_ttl_expires() {
        let store = temp_session_store("ttl");
        let session = AuthSession::new(staff(), "abc123");

        // 1-second TTL, then step past it.
        assert!(store.set_auth_with_ttl(&session, 1.0 / 3600.0));
        std::thread::sleep(std::time::Duration::from_secs(2));

        assert_eq!(store.get_auth(), None);
        assert_eq!(store.phase(), SessionPhase::Anonymous);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = temp_session_store("remove");
        store.remove_auth();
        store.remove_auth();
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_expired_value_record_is_evicted() {
        let store = temp_session_store("stale-value");
        let mut session = AuthSession::new(staff(), "abc123");
        session.expires_at = chrono::Utc::now().timestamp_millis() - 1_000;

        // Envelope TTL is still generous; the value-level expiry wins.
        assert!(store.set_auth(&session));
        assert_eq!(store.get_auth(), None);
    }

    #[test]
    fn test_phase_watch_sees_eviction() {
        let store = temp_session_store("watch");
        let rx = store.subscribe();

        assert!(store.set_auth(&AuthSession::new(staff(), "abc123")));
        assert_eq!(*rx.borrow(), SessionPhase::Authenticated);

        store.remove_auth();
        assert_eq!(*rx.borrow(), SessionPhase::Anonymous);
    }
}
