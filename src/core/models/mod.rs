//! Identity models
//!
//! These are read-only snapshots handed to the engine by its caller. Loading
//! and persisting them is the caller's concern.

pub mod tenant;
pub mod user;

pub use tenant::Tenant;
pub use user::User;
