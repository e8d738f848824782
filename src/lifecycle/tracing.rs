//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//! Log lines use the compact format and hide the module prefix (`with_target(false)`).
//!
//! ## What Gets Traced
//!
//! - **Activation**: which resource a scenario switched to
//! - **Requests**: method, path and status of every request, inside a span named after
//!   the resource client operation
//! - **Failed checks**: schema diagnostics, condition violations and pagination
//!   mismatches, at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Requests and failed checks
//! RUST_LOG=info cargo run
//!
//! # Request bodies and response sizes as well
//! RUST_LOG=debug cargo run
//!
//! # Only the HTTP transport
//! RUST_LOG=spacex_api_contract::transport=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a query scenario reads:
//!
//! ```text
//! INFO Resource activated resource=Launches
//! INFO execute: Response captured descriptor=QueryByBody(..) resource=Launches status=200
//! WARN Condition failed report=3 of 10 items violate `success` $eq true: [2] = false [5] = false [9] = false
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
