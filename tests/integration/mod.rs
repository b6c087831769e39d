//! Integration tests for tenant-rbac
//!
//! These tests drive the public API the way a request pipeline would.

pub mod config_tests;
pub mod engine_tests;
