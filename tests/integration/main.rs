//! Integration test suite entry point.

mod client_tests;
#[path = "../common/mod.rs"]
mod common;
mod session_flow_tests;
