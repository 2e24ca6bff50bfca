//! Session context and the session gate.
//!
//! The session is an explicit value passed into every handler rather than
//! ambient global state. Page-level code calls [`require_session`] before any
//! data access and halts on `Unauthorized`.

use uuid::Uuid;

use vendia_shared::{AppError, AppResult};

/// Opaque per-request session context.
///
/// Carries the authenticated user id, if any. Lifetime and expiry are owned
/// by whatever issued the session (the JWT layer in the HTTP API).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<Uuid>,
}

impl Session {
    /// Creates a session for an authenticated user.
    #[must_use]
    pub const fn authenticated(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
        }
    }

    /// Creates an anonymous (unauthenticated) session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user_id: None }
    }

    /// Returns the authenticated user id, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }
}

/// Returns the authenticated user id or `Unauthorized`.
///
/// Callers must stop processing on error and surface a login prompt; all
/// tenant-scoped reads downstream require the returned id.
pub fn require_session(session: &Session) -> AppResult<Uuid> {
    session
        .user_id()
        .ok_or_else(|| AppError::Unauthorized("login required".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authenticated_session_passes_gate() {
        let user_id = Uuid::new_v4();
        let session = Session::authenticated(user_id);

        assert_eq!(require_session(&session).unwrap(), user_id);
    }

    #[test]
    fn test_anonymous_session_is_rejected() {
        let result = require_session(&Session::anonymous());
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_default_session_is_anonymous() {
        assert_eq!(Session::default(), Session::anonymous());
    }
}
