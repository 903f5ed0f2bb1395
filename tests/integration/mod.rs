//! Integration tests for items-rs
//!
//! These tests drive the crate through its public API only.

pub mod api_tests;
pub mod batch_tests;
pub mod config_tests;
pub mod database_tests;
