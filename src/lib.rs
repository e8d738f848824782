#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # SpaceX API Contract Tests
//!
//! > **Black-box contract checks for the public SpaceX v4 REST API.**
//!
//! This crate binds the generic [`contract_harness`] engine to one concrete API: the
//! resources it exposes, the structure of every document it returns, and an HTTP
//! transport that reaches it.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One client, a table of resources
//! There is no `LaunchesClient` or `RocketsClient`. Every resource is a row in the
//! [`resources`] table (path, supported operations, schema reference) and the
//! harness drives all of them through the same generic client. Adding a resource
//! is one enum variant and one schema.
//!
//! ### Shared shapes
//! Rockets, Dragons and pads repeat the same measurements (`mass`, `thrust`,
//! `length`, `isp`). Schemas are assembled from one library of shapes in
//! [`schemas::shapes`] instead of being written out per resource.
//!
//! ### Explicit scenario state
//! The active client and the last query live in a
//! [`ScenarioContext`](contract_harness::ScenarioContext) that each step receives.
//! There is no global state, so scenarios can run side by side.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`contract_harness`])
//! Registry, generic client, response capsule, schema validator, condition evaluator
//! and pagination verifier. Knows nothing about SpaceX.
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: Builds the registries and the transport once and hands out a fresh
//!   scenario context per scenario.
//! - **Key items**: [`ContractSystem`](lifecycle::ContractSystem),
//!   [`setup_tracing`](lifecycle::tracing::setup_tracing).
//!
//! ### 3. The API Description ([`resources`], [`schemas`])
//! - **Role**: Which resources exist and what their documents look like.
//! - **Key items**: [`Resource`](resources::Resource),
//!   [`default_schemas`](schemas::default_schemas).
//!
//! ### 4. The Wire ([`transport`], [`config`])
//! - **Role**: `reqwest`-based transport configured from the environment.
//! - **Key items**: [`HttpTransport`](transport::HttpTransport),
//!   [`HarnessConfig`](config::HarnessConfig).
//!
//! ## 🚀 Quick Start
//!
//! ### Running the Demo
//!
//! ```bash
//! # Smoke scenario against the live API
//! RUST_LOG=info cargo run
//!
//! # Against a local copy of the API
//! SPACEX_API_BASE_URL=http://localhost:6673 cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```
//!
//! The test suite runs entirely against
//! [`MockTransport`](contract_harness::mock::MockTransport) and needs no network.

pub mod config;
pub mod lifecycle;
pub mod resources;
pub mod schemas;
pub mod transport;

pub use contract_harness;
