//! # Harness Errors
//!
//! This module defines the error types used throughout the contract harness.
//! Each concern (transport, capsule, client, registry, schema, condition, context)
//! owns a small enum, and [`HarnessError`] aggregates them for the scenario layer.
//!
//! Errors fall into the categories described by [`ErrorKind`]. A configuration error
//! means the test itself is malformed; a transport error means the system under test
//! could not be reached or answered with something unreadable; a validation error
//! means it answered with the wrong thing.

use crate::resource::{Operation, ResourceName};

/// Failures raised by a [`Transport`](crate::transport::Transport) implementation.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request failed: {0}")]
    Network(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Failed to read response: {0}")]
    Body(String),
}

/// Errors raised when reading the [`ResponseCapsule`](crate::capsule::ResponseCapsule).
#[derive(Debug, thiserror::Error)]
pub enum CapsuleError {
    #[error("No response available: no request has been made on this client")]
    NoResponse,
    #[error("Response body is empty (status {status})")]
    EmptyBody { status: u16 },
    #[error("Response body is not valid JSON (status {status}): {source}")]
    InvalidJson {
        status: u16,
        source: serde_json::Error,
    },
}

/// Errors raised by a [`ResourceClient`](crate::client::ResourceClient).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Operation `{operation}` is not supported for resource `{resource}`")]
    UnsupportedOperation {
        resource: ResourceName,
        operation: Operation,
    },
    #[error("Failed to serialize request body: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors raised by the [`ClientRegistry`](crate::registry::ClientRegistry).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Resource not found: `{0}` is not registered")]
    ResourceNotFound(String),
}

/// Errors raised by the [`SchemaRegistry`](crate::schema::SchemaRegistry).
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Unknown schema reference: `{0}`")]
    UnknownSchema(String),
}

/// Errors raised by the condition evaluator.
#[derive(Debug, thiserror::Error)]
pub enum ConditionError {
    #[error("Unsupported operator: `{0}`")]
    UnsupportedOperator(String),
    #[error("Operator `{operator}` cannot take expected value {expected}")]
    InvalidExpected { operator: String, expected: String },
    #[error("Body is not a result set: expected an array, an object, or an envelope with `docs`")]
    NotAResultSet,
}

/// Errors raised by the [`ScenarioContext`](crate::context::ScenarioContext) when a step
/// runs before the state it depends on exists.
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("Not initialized: no resource has been activated")]
    NoActiveResource,
    #[error("Not initialized: no query has been issued on the active resource")]
    NoQuery,
}

/// The category of a [`HarnessError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The test is malformed (unknown resource, schema or operator).
    Configuration,
    /// A step ran before the state it reads was initialized.
    Precondition,
    /// The active resource does not offer the requested operation.
    UnsupportedOperation,
    /// The system under test answered with the wrong shape or values.
    Validation,
    /// The system under test was unreachable or returned an unreadable body.
    Transport,
}

/// Top-level error for scenario steps.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error(transparent)]
    Capsule(#[from] CapsuleError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Condition(#[from] ConditionError),
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl HarnessError {
    /// Classifies the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            HarnessError::Registry(_) | HarnessError::Schema(_) => ErrorKind::Configuration,
            HarnessError::Client(ClientError::UnsupportedOperation { .. }) => {
                ErrorKind::UnsupportedOperation
            }
            HarnessError::Client(ClientError::Serialize(_)) => ErrorKind::Configuration,
            HarnessError::Client(ClientError::Transport(_)) => ErrorKind::Transport,
            HarnessError::Capsule(CapsuleError::NoResponse) => ErrorKind::Precondition,
            HarnessError::Capsule(_) => ErrorKind::Transport,
            HarnessError::Condition(ConditionError::NotAResultSet) => ErrorKind::Validation,
            HarnessError::Condition(_) => ErrorKind::Configuration,
            HarnessError::Context(_) => ErrorKind::Precondition,
            HarnessError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Returns `true` for errors that indicate a malformed test rather than a
    /// failure of the system under test.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Configuration | ErrorKind::Precondition
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_follow_taxonomy() {
        let err = HarnessError::from(RegistryError::ResourceNotFound("Moons".into()));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.is_fatal());

        let err = HarnessError::from(CapsuleError::NoResponse);
        assert_eq!(err.kind(), ErrorKind::Precondition);

        let err = HarnessError::from(CapsuleError::EmptyBody { status: 204 });
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(!err.is_fatal());

        let err = HarnessError::from(ClientError::UnsupportedOperation {
            resource: ResourceName::new("Company"),
            operation: Operation::Query,
        });
        assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
        assert_eq!(
            err.to_string(),
            "Operation `query` is not supported for resource `Company`"
        );

        let err = HarnessError::from(ConditionError::UnsupportedOperator("$between".into()));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(err.to_string(), "Unsupported operator: `$between`");
    }
}
