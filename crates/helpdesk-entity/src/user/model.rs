//! User entity model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An authenticated helpdesk user.
///
/// The record is owned by the authentication subsystem; presence tracking
/// only reads the identifier and uses the name in announcements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name. Empty when the auth subsystem only sends the id.
    #[serde(default)]
    pub name: String,
    /// Email address (optional).
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    /// Create a user reference without an email.
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            email: None,
        }
    }
}
