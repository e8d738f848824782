//! # Client Registry
//!
//! Maps resource names to the configuration used to construct their client.
//! Activation only builds a [`ResourceClient`]; it performs no network I/O.

use crate::client::ResourceClient;
use crate::error::RegistryError;
use crate::resource::{ResourceConfig, ResourceName};
use crate::transport::Transport;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct ClientRegistry {
    resources: HashMap<String, Arc<ResourceConfig>>,
}

impl ClientRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) a resource.
    pub fn register(&mut self, config: ResourceConfig) -> &mut Self {
        self.resources.insert(config.name.key(), Arc::new(config));
        self
    }

    /// Builder form of [`register`](Self::register).
    pub fn with(mut self, config: ResourceConfig) -> Self {
        self.register(config);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resources.contains_key(&ResourceName::new(name).key())
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<ResourceName> {
        let mut names: Vec<_> = self.resources.values().map(|c| c.name.clone()).collect();
        names.sort();
        names
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<ResourceConfig>, RegistryError> {
        self.resources
            .get(&ResourceName::new(name).key())
            .cloned()
            .ok_or_else(|| RegistryError::ResourceNotFound(name.to_string()))
    }

    /// Builds a fresh client for `name` bound to `transport`.
    pub fn activate(
        &self,
        name: &str,
        transport: Arc<dyn Transport>,
    ) -> Result<ResourceClient, RegistryError> {
        let config = self.resolve(name)?;
        debug!(resource = %config.name, "Activating resource");
        Ok(ResourceClient::new(config, transport))
    }
}
