//! Process-wide session state.
//!
//! Holds the id of the currently signed-in user: empty at startup, written
//! once per successful sign-in, cleared on logout. Nothing here survives a
//! restart.

use std::sync::{Arc, Mutex, OnceLock};

static GLOBAL_SESSION: OnceLock<SessionStore> = OnceLock::new();

/// Cloneable handle to shared session state.
///
/// The running app uses the single [`SessionStore::global`] instance; hosts
/// that must not share state (tests) create their own with
/// [`SessionStore::new`].
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    current_user: Arc<Mutex<Option<i64>>>,
}

impl SessionStore {
    /// A fresh, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide store shared by every screen in the app.
    pub fn global() -> SessionStore {
        GLOBAL_SESSION.get_or_init(SessionStore::new).clone()
    }

    pub fn set_current_user(&self, id: i64) {
        *self.current_user.lock().unwrap() = Some(id);
        tracing::debug!("Session user set to id {}", id);
    }

    pub fn current_user_id(&self) -> Option<i64> {
        *self.current_user.lock().unwrap()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current_user_id().is_some()
    }

    /// Clear the session, typically on logout.
    pub fn clear(&self) {
        *self.current_user.lock().unwrap() = None;
        tracing::debug!("Session cleared");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_empty() {
        let session = SessionStore::new();
        assert_eq!(session.current_user_id(), None);
        assert!(!session.is_signed_in());
    }

    #[test]
    fn set_read_clear() {
        let session = SessionStore::new();
        session.set_current_user(42);
        assert_eq!(session.current_user_id(), Some(42));
        assert!(session.is_signed_in());

        session.clear();
        assert_eq!(session.current_user_id(), None);
    }

    #[test]
    fn clones_share_state() {
        let session = SessionStore::new();
        let other = session.clone();
        session.set_current_user(7);
        assert_eq!(other.current_user_id(), Some(7));
    }
}
