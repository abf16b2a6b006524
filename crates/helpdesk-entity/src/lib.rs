//! # helpdesk-entity
//!
//! Domain entity models. Database entities derive `sqlx::FromRow`.

pub mod presence;
pub mod user;

pub use presence::PresenceState;
pub use user::User;
