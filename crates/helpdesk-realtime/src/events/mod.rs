//! Authentication events and their dispatch.
//!
//! The auth subsystem reports logins and logouts as [`AuthEvent`]s. The
//! [`AuthEventDispatcher`] hands each event to every registered listener
//! in order, inside the caller's task.

pub mod dispatcher;

use serde::{Deserialize, Serialize};

use helpdesk_entity::user::User;

pub use dispatcher::{AuthEventDispatcher, AuthEventListener};

/// Notifications emitted by the authentication subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthEvent {
    /// A user authenticated.
    Login {
        /// The authenticated user.
        user: User,
        /// Name of the guard that authenticated the user.
        #[serde(default = "default_guard")]
        guard: String,
        /// Whether a "remember me" session was requested.
        #[serde(default)]
        remember: bool,
    },
    /// A user signed out.
    Logout {
        /// The user signing out.
        user: User,
        /// Name of the guard the user signed out of.
        #[serde(default = "default_guard")]
        guard: String,
    },
}

impl AuthEvent {
    /// Build a login event on the default guard.
    pub fn login(user: User) -> Self {
        Self::Login {
            user,
            guard: default_guard(),
            remember: false,
        }
    }

    /// Build a logout event on the default guard.
    pub fn logout(user: User) -> Self {
        Self::Logout {
            user,
            guard: default_guard(),
        }
    }

    /// The acting user.
    pub fn user(&self) -> &User {
        match self {
            Self::Login { user, .. } | Self::Logout { user, .. } => user,
        }
    }

    /// Short event kind for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Login { .. } => "login",
            Self::Logout { .. } => "logout",
        }
    }
}

fn default_guard() -> String {
    "web".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_deserialize_minimal_login() {
        let id = Uuid::new_v4();
        let raw = serde_json::json!({
            "type": "login",
            "user": { "id": id, "name": "Grace" }
        });

        let event: AuthEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.kind(), "login");
        assert_eq!(event.user().id, id);
        match event {
            AuthEvent::Login { guard, remember, .. } => {
                assert_eq!(guard, "web");
                assert!(!remember);
            }
            AuthEvent::Logout { .. } => panic!("expected login"),
        }
    }

    #[test]
    fn test_logout_with_id_only_user() {
        let id = Uuid::new_v4();
        let raw = serde_json::json!({ "type": "logout", "user": { "id": id } });

        let event: AuthEvent = serde_json::from_value(raw).unwrap();
        assert_eq!(event.kind(), "logout");
        assert_eq!(event.user().id, id);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        let raw = serde_json::json!({
            "type": "password_reset",
            "user": { "id": Uuid::new_v4(), "name": "Grace" }
        });
        assert!(serde_json::from_value::<AuthEvent>(raw).is_err());
    }
}
