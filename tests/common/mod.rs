//! Common test utilities for tenant-rbac
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::fixtures::{RoleFactory, TenantFixture};
//!
//! #[test]
//! fn my_test() {
//!     let fixture = TenantFixture::new();
//!     let role = RoleFactory::from_json(fixture.tenant.id, "Sales", serde_json::json!({}));
//!     // ...
//! }
//! ```

pub mod fixtures;

pub use fixtures::{RoleFactory, TenantFixture, UserFactory};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
