//! # Contract Harness
//!
//! This crate provides the building blocks for black-box contract testing of a
//! resource-oriented JSON API. A scenario activates one resource, issues requests
//! against it, and checks what came back: the structure of the body, properties of
//! every returned item, and the arithmetic of paginated envelopes.
//!
//! ## Architecture Overview
//!
//! The harness separates concerns into four layers:
//!
//! 1. **Description Layer** ([`ResourceConfig`], [`ClientRegistry`]) - Which resources
//!    exist, where they live, and which operations they offer
//! 2. **Request Layer** ([`ResourceClient`], [`Transport`]) - Issues requests and keeps
//!    the latest response in a single-slot [`ResponseCapsule`]
//! 3. **Check Layer** ([`schema`], [`condition`], [`pagination`], [`result_set`],
//!    [`formats`]) - Pure predicates with field-attributable diagnostics
//! 4. **Scenario Layer** ([`ScenarioContext`]) - Threads the active client and the last
//!    query through a sequence of steps
//!
//! The harness knows nothing about a particular API. Resource tables, schemas and
//! the HTTP transport are supplied by the caller.
//!
//! ## One Client, Many Resources
//!
//! There is no client type per resource. A [`ResourceClient`] is built from a
//! [`ResourceConfig`] record (base path, capability set, id format, schema
//! reference). Asking it for an operation outside the capability set fails with
//! [`ClientError::UnsupportedOperation`] before anything is sent:
//!
//! ```rust
//! use contract_harness::{ClientError, ClientRegistry, ResourceConfig};
//! use contract_harness::mock::MockTransport;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = ClientRegistry::new()
//!         .with(ResourceConfig::singleton("Company", "company"));
//!     let mock = MockTransport::new();
//!
//!     let mut client = registry.activate("company", Arc::new(mock.clone())).unwrap();
//!     let err = client.query(r#"{"query":{}}"#).await.unwrap_err();
//!     assert!(matches!(err, ClientError::UnsupportedOperation { .. }));
//!     assert!(mock.requests().is_empty());
//! }
//! ```
//!
//! ## Writing a Scenario
//!
//! ```rust
//! use contract_harness::{ClientRegistry, ResourceConfig, ScenarioContext, SchemaRegistry, Shape};
//! use contract_harness::mock::MockTransport;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let registry = ClientRegistry::new().with(ResourceConfig::collection("Ships", "ships"));
//!     let schemas = SchemaRegistry::new().with(
//!         "ships",
//!         Shape::object([("name", Shape::string()), ("active", Shape::boolean())]),
//!     );
//!     let mock = MockTransport::new();
//!     mock.expect_post("ships/query").return_json(
//!         200,
//!         json!({"docs": [{"name": "GO Quest", "active": true}], "totalDocs": 1,
//!                "offset": 0, "limit": 10, "totalPages": 1, "page": 1, "pagingCounter": 1,
//!                "hasPrevPage": false, "hasNextPage": false, "prevPage": null, "nextPage": null}),
//!     );
//!
//!     let mut ctx =
//!         ScenarioContext::new(Arc::new(registry), Arc::new(schemas), Arc::new(mock.clone()));
//!     ctx.activate("Ships").unwrap();
//!     ctx.query(json!({"query": {"active": true}})).await.unwrap();
//!
//!     ctx.assert_status(200).unwrap();
//!     ctx.assert_schema(None).unwrap();
//!     ctx.assert_condition("active", "", "true").unwrap();
//!     ctx.assert_query_filter().unwrap();
//!     mock.verify();
//! }
//! ```
//!
//! ## Error Taxonomy
//!
//! Every step returns [`HarnessError`], and [`HarnessError::kind`] tells the
//! categories apart:
//!
//! - **Configuration** - unknown resource, unknown schema, unsupported operator
//! - **Precondition** - reading the capsule before a request, checking a filter
//!   before a query
//! - **UnsupportedOperation** - the resource does not offer the operation
//! - **Validation** - the system under test answered with the wrong thing
//! - **Transport** - the system under test was unreachable or unreadable
//!
//! Nothing is retried. A failed request is a failed step.
//!
//! ## Testing
//!
//! The [`mock`] module provides [`MockTransport`](mock::MockTransport), an in-memory
//! [`Transport`] with queued expectations and a request journal, so scenario logic
//! can be tested without a network.

pub mod capsule;
pub mod client;
pub mod condition;
pub mod context;
pub mod error;
pub mod formats;
pub mod mock;
pub mod pagination;
pub mod query;
pub mod registry;
pub mod resource;
pub mod result_set;
pub mod schema;
pub mod transport;

// Re-export core types for convenience
pub use capsule::ResponseCapsule;
pub use client::{RequestDescriptor, ResourceClient};
pub use condition::{coerce_literal, evaluate, Condition, ConditionReport, Operator};
pub use context::ScenarioContext;
pub use error::{
    CapsuleError, ClientError, ConditionError, ContextError, ErrorKind, HarnessError,
    RegistryError, SchemaError, TransportError,
};
pub use pagination::{Envelope, PaginationCheck, PaginationMismatch};
pub use query::{QueryBody, QueryOptions, RequestBody};
pub use registry::ClientRegistry;
pub use resource::{Capabilities, IdFormat, Operation, ResourceConfig, ResourceName};
pub use result_set::SortOrder;
pub use schema::{Schema, SchemaRegistry, Shape, ValidationOutcome};
pub use transport::{CapturedResponse, Method, RequestOptions, Transport, TransportRequest};
