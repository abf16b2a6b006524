//! Client for the managed realtime broadcast service.

pub mod connection;
pub mod events_api;
pub mod protocol;

pub use connection::{BroadcastClient, RemoteBroadcast, bootstrap, endpoint_url};
pub use events_api::EventsApi;
