//! Integration tests for the dev gateway.
//!
//! The proxy tests spin up a mock upstream static server and a dev proxy
//! in the same process and assert on what a browser client would observe.

pub mod harness_test;
pub mod upstream_test;
