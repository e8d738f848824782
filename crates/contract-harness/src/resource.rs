//! # Resource Configuration
//!
//! A resource is described by data, not by a subtype. [`ResourceConfig`] carries
//! everything the generic [`ResourceClient`](crate::client::ResourceClient) needs to
//! speak to one collection of the target API: its base path, the set of operations
//! it supports, and the format its identifiers follow.
//!
//! ```rust
//! use contract_harness::resource::{Capabilities, Operation, ResourceConfig};
//!
//! let launches = ResourceConfig::collection("Launches", "launches");
//! assert!(launches.supports(Operation::Query));
//!
//! let company = ResourceConfig::singleton("Company", "company");
//! assert!(!company.supports(Operation::ById));
//! assert_eq!(company.capabilities, Capabilities::singleton());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{self, Display};

/// Name of a resource as used by scenarios (e.g. `"Launches"`).
///
/// Names compare exactly; registries look them up through [`ResourceName::key`],
/// which ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceName(String);

impl ResourceName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lookup key: the trimmed, lowercased name.
    pub fn key(&self) -> String {
        self.0.trim().to_ascii_lowercase()
    }
}

impl Display for ResourceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ResourceName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// An operation a resource client can perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operation {
    List,
    ById,
    Query,
    Options,
    Delete,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::List,
        Operation::ById,
        Operation::Query,
        Operation::Options,
        Operation::Delete,
    ];
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Operation::List => "list",
            Operation::ById => "byId",
            Operation::Query => "query",
            Operation::Options => "options",
            Operation::Delete => "delete",
        };
        f.write_str(label)
    }
}

/// The set of operations a resource supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities(BTreeSet<Operation>);

impl Capabilities {
    pub fn new(operations: impl IntoIterator<Item = Operation>) -> Self {
        Self(operations.into_iter().collect())
    }

    /// Every operation: list, by-id, query, options and delete.
    pub fn collection() -> Self {
        Self::new(Operation::ALL)
    }

    /// A single-document resource: list and options only.
    pub fn singleton() -> Self {
        Self::new([Operation::List, Operation::Options])
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.0.contains(&operation)
    }

    pub fn with(mut self, operation: Operation) -> Self {
        self.0.insert(operation);
        self
    }

    pub fn without(mut self, operation: Operation) -> Self {
        self.0.remove(&operation);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = Operation> + '_ {
        self.0.iter().copied()
    }
}

/// Identifier format accepted by a resource.
///
/// The client never rejects an id on format grounds (scenarios deliberately send
/// malformed ids to exercise 404 handling); schemas and callers use this to judge ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdFormat {
    /// 24 hexadecimal characters.
    #[default]
    ObjectId,
    /// Any non-empty string.
    Any,
}

impl IdFormat {
    pub fn accepts(&self, id: &str) -> bool {
        match self {
            IdFormat::ObjectId => is_object_id(id),
            IdFormat::Any => !id.is_empty(),
        }
    }
}

/// Returns `true` when `id` is a 24-character hexadecimal object id.
pub fn is_object_id(id: &str) -> bool {
    id.len() == 24 && id.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Everything the generic client needs to know about one resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceConfig {
    pub name: ResourceName,
    /// Collection path relative to the transport root, without slashes (e.g. `launches`).
    pub base_path: String,
    pub capabilities: Capabilities,
    pub id_format: IdFormat,
    /// Schema used by default when validating this resource's responses.
    pub schema_ref: String,
}

impl ResourceConfig {
    /// A collection resource supporting every operation.
    pub fn collection(name: impl Into<ResourceName>, base_path: impl Into<String>) -> Self {
        Self::with_capabilities(name, base_path, Capabilities::collection())
    }

    /// A single-document resource (no by-id, query or delete).
    pub fn singleton(name: impl Into<ResourceName>, base_path: impl Into<String>) -> Self {
        Self::with_capabilities(name, base_path, Capabilities::singleton())
    }

    pub fn with_capabilities(
        name: impl Into<ResourceName>,
        base_path: impl Into<String>,
        capabilities: Capabilities,
    ) -> Self {
        let name = name.into();
        let schema_ref = name.key();
        Self {
            name,
            base_path: base_path.into().trim_matches('/').to_string(),
            capabilities,
            id_format: IdFormat::default(),
            schema_ref,
        }
    }

    pub fn id_format(mut self, id_format: IdFormat) -> Self {
        self.id_format = id_format;
        self
    }

    pub fn schema_ref(mut self, schema_ref: impl Into<String>) -> Self {
        self.schema_ref = schema_ref.into();
        self
    }

    pub fn supports(&self, operation: Operation) -> bool {
        self.capabilities.supports(operation)
    }

    pub fn list_path(&self) -> String {
        self.base_path.clone()
    }

    pub fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.base_path, id)
    }

    pub fn query_path(&self) -> String {
        format!("{}/query", self.base_path)
    }
}
