//! # helpdesk-database
//!
//! PostgreSQL connection management, migrations and the presence store
//! implementations (PostgreSQL and in-memory).

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryPresenceStore;
pub use repositories::PresenceRepository;
pub use store::PresenceStore;
