use crate::config::{ConfigError, HarnessConfig};
use crate::resources::default_registry;
use crate::schemas::default_schemas;
use crate::transport::HttpTransport;
use contract_harness::{
    ClientRegistry, ScenarioContext, SchemaRegistry, Transport, TransportError,
};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Failed to create transport: {0}")]
    Transport(#[from] TransportError),
}

/// Wires the resource table, the schemas and a transport together.
///
/// `ContractSystem` is responsible for:
/// - **Configuration**: reading where the API lives
/// - **Dependency Wiring**: handing the same registries and transport to every scenario
/// - **Isolation**: each call to [`scenario`](Self::scenario) returns a fresh
///   [`ScenarioContext`] with no active resource
///
/// # Example
///
/// ```ignore
/// let system = ContractSystem::from_env()?;
/// let mut ctx = system.scenario();
/// ctx.activate("Launches")?;
/// ctx.get(None).await?;
/// ctx.assert_schema(None)?;
/// ```
#[derive(Clone)]
pub struct ContractSystem {
    registry: Arc<ClientRegistry>,
    schemas: Arc<SchemaRegistry>,
    transport: Arc<dyn Transport>,
}

impl ContractSystem {
    /// A system talking to the API described by the environment.
    pub fn from_env() -> Result<Self, SetupError> {
        Self::new(&HarnessConfig::from_env()?)
    }

    pub fn new(config: &HarnessConfig) -> Result<Self, SetupError> {
        let transport = HttpTransport::new(config)?;
        info!(
            api_root = transport.api_root(),
            timeout_secs = config.timeout,
            "Contract system ready"
        );
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// A system using `transport`, typically a
    /// [`MockTransport`](contract_harness::mock::MockTransport) in tests.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            registry: Arc::new(default_registry()),
            schemas: Arc::new(default_schemas()),
            transport,
        }
    }

    pub fn registry(&self) -> &ClientRegistry {
        &self.registry
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }

    /// A fresh context for one scenario.
    pub fn scenario(&self) -> ScenarioContext {
        ScenarioContext::new(
            Arc::clone(&self.registry),
            Arc::clone(&self.schemas),
            Arc::clone(&self.transport),
        )
    }
}

impl std::fmt::Debug for ContractSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractSystem")
            .field("resources", &self.registry.names())
            .field("schemas", &self.schemas.len())
            .finish_non_exhaustive()
    }
}
