//! Unit tests for pdpkg
//!
//! These tests use mocked fpm implementations and temporary checkouts;
//! they run fast and never spawn a real packaging tool.

mod plan_properties;
