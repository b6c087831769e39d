//! Core identity records consumed by the permission engine

pub mod models;
