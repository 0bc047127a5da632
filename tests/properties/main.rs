//! Property test suite entry point.

mod cascade_tests;
mod search_session_tests;
