pub mod contract_system;
pub mod tracing;

pub use contract_system::{ContractSystem, SetupError};
