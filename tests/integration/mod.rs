//! Integration tests for clubhouse
//!
//! These tests exercise real stores and the full HTTP stack without mocking.

pub mod config_tests;
pub mod http_tests;
pub mod role_store_tests;
