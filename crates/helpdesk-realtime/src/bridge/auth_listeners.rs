//! Login/logout listeners that drive the presence tracker.

use std::sync::Arc;

use async_trait::async_trait;

use helpdesk_core::result::AppResult;

use crate::events::{AuthEvent, AuthEventDispatcher, AuthEventListener};
use crate::presence::PresenceTracker;

/// Marks users online when they log in.
#[derive(Debug)]
pub struct LoginListener {
    tracker: Arc<PresenceTracker>,
}

impl LoginListener {
    /// Create a login listener.
    pub fn new(tracker: Arc<PresenceTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl AuthEventListener for LoginListener {
    fn name(&self) -> &'static str {
        "presence.login"
    }

    async fn handle(&self, event: &AuthEvent) -> AppResult<()> {
        match event {
            AuthEvent::Login { user, .. } => self.tracker.set_user_online(user).await,
            AuthEvent::Logout { .. } => Ok(()),
        }
    }
}

/// Marks users offline when they log out.
#[derive(Debug)]
pub struct LogoutListener {
    tracker: Arc<PresenceTracker>,
}

impl LogoutListener {
    /// Create a logout listener.
    pub fn new(tracker: Arc<PresenceTracker>) -> Self {
        Self { tracker }
    }
}

#[async_trait]
impl AuthEventListener for LogoutListener {
    fn name(&self) -> &'static str {
        "presence.logout"
    }

    async fn handle(&self, event: &AuthEvent) -> AppResult<()> {
        match event {
            AuthEvent::Logout { user, .. } => self.tracker.set_user_offline(user).await,
            AuthEvent::Login { .. } => Ok(()),
        }
    }
}

/// Registers both presence listeners on a dispatcher.
pub fn register_presence_listeners(
    dispatcher: &mut AuthEventDispatcher,
    tracker: Arc<PresenceTracker>,
) {
    dispatcher.listen(Arc::new(LoginListener::new(Arc::clone(&tracker))));
    dispatcher.listen(Arc::new(LogoutListener::new(tracker)));
}
