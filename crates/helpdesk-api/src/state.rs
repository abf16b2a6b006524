//! Shared application state passed to all handlers.

use std::sync::Arc;

use helpdesk_core::config::AppConfig;
use helpdesk_database::store::PresenceStore;
use helpdesk_realtime::bridge::register_presence_listeners;
use helpdesk_realtime::{
    AuthEventDispatcher, FanoutBroadcaster, MemoryPubSub, PresenceBroadcaster, PresenceTracker,
    RemoteBroadcast,
};

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Presence tracker.
    pub tracker: Arc<PresenceTracker>,
    /// Auth event dispatcher with the presence listeners registered.
    pub dispatcher: Arc<AuthEventDispatcher>,
    /// In-process presence channels.
    pub pubsub: Arc<MemoryPubSub>,
    /// Local + remote announcement path.
    pub broadcaster: Arc<FanoutBroadcaster>,
}

impl AppState {
    /// Wire the tracker, listeners and broadcasters over a store.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn PresenceStore>,
        remote: RemoteBroadcast,
    ) -> Self {
        let pubsub = Arc::new(MemoryPubSub::new(config.broadcast.channel_buffer_size));
        let broadcaster = Arc::new(FanoutBroadcaster::new(Arc::clone(&pubsub), remote));
        let tracker = Arc::new(PresenceTracker::new(
            store,
            Arc::clone(&broadcaster) as Arc<dyn PresenceBroadcaster>,
        ));

        let mut dispatcher = AuthEventDispatcher::new();
        register_presence_listeners(&mut dispatcher, Arc::clone(&tracker));

        Self {
            config: Arc::new(config),
            tracker,
            dispatcher: Arc::new(dispatcher),
            pubsub,
            broadcaster,
        }
    }
}
