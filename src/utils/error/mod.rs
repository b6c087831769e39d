//! Error handling for the permission engine
//!
//! The pure engine operations (flatten, merge, authorize, project) never fail.
//! Errors only surface from startup work: schema and configuration loading,
//! document parsing at the edges, and role management conflicts.

mod helpers;
mod types;

pub use types::{RbacError, Result};
