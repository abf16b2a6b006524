//! Synchronous auth event dispatch.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use helpdesk_core::result::AppResult;

use super::AuthEvent;

/// A handler for authentication events.
#[async_trait]
pub trait AuthEventListener: Send + Sync + std::fmt::Debug {
    /// Listener name for logging.
    fn name(&self) -> &'static str;

    /// Handle one event. Errors abort the remaining dispatch.
    async fn handle(&self, event: &AuthEvent) -> AppResult<()>;
}

/// Delivers auth events to listeners in registration order.
#[derive(Debug, Default, Clone)]
pub struct AuthEventDispatcher {
    listeners: Vec<Arc<dyn AuthEventListener>>,
}

impl AuthEventDispatcher {
    /// Create a dispatcher with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn listen(&mut self, listener: Arc<dyn AuthEventListener>) {
        debug!(listener = listener.name(), "Registered auth event listener");
        self.listeners.push(listener);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Deliver an event. The first listener error is returned unchanged.
    pub async fn dispatch(&self, event: &AuthEvent) -> AppResult<()> {
        debug!(
            event = event.kind(),
            user_id = %event.user().id,
            listeners = self.listeners.len(),
            "Dispatching auth event"
        );

        for listener in &self.listeners {
            listener.handle(event).await?;
        }
        Ok(())
    }
}
