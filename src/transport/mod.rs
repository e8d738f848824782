//! # Transports
//!
//! The live HTTP transport. Tests use
//! [`MockTransport`](contract_harness::mock::MockTransport) instead.

pub mod http;

pub use http::HttpTransport;
