//! # Resource Table
//!
//! The resources the v4 API exposes. Every collection resource offers list, by-id,
//! query, options and delete (delete is auth-guarded upstream, so an anonymous call
//! is expected to be refused). `company` and `roadster` are single documents and
//! offer only list and options.

use contract_harness::{ClientRegistry, ResourceConfig};
use std::fmt::{self, Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Capsules,
    Company,
    Cores,
    Crew,
    Dragons,
    History,
    Landpads,
    Launches,
    Launchpads,
    Payloads,
    Roadster,
    Rockets,
    Ships,
    Starlink,
}

impl Resource {
    pub const ALL: [Resource; 14] = [
        Resource::Capsules,
        Resource::Company,
        Resource::Cores,
        Resource::Crew,
        Resource::Dragons,
        Resource::History,
        Resource::Landpads,
        Resource::Launches,
        Resource::Launchpads,
        Resource::Payloads,
        Resource::Roadster,
        Resource::Rockets,
        Resource::Ships,
        Resource::Starlink,
    ];

    /// The name scenarios activate the resource by.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Capsules => "Capsules",
            Resource::Company => "Company",
            Resource::Cores => "Cores",
            Resource::Crew => "Crew",
            Resource::Dragons => "Dragons",
            Resource::History => "History",
            Resource::Landpads => "Landpads",
            Resource::Launches => "Launches",
            Resource::Launchpads => "Launchpads",
            Resource::Payloads => "Payloads",
            Resource::Roadster => "Roadster",
            Resource::Rockets => "Rockets",
            Resource::Ships => "Ships",
            Resource::Starlink => "Starlink",
        }
    }

    /// Collection path below the API root.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Capsules => "capsules",
            Resource::Company => "company",
            Resource::Cores => "cores",
            Resource::Crew => "crew",
            Resource::Dragons => "dragons",
            Resource::History => "history",
            Resource::Landpads => "landpads",
            Resource::Launches => "launches",
            Resource::Launchpads => "launchpads",
            Resource::Payloads => "payloads",
            Resource::Roadster => "roadster",
            Resource::Rockets => "rockets",
            Resource::Ships => "ships",
            Resource::Starlink => "starlink",
        }
    }

    pub fn is_singleton(&self) -> bool {
        matches!(self, Resource::Company | Resource::Roadster)
    }

    pub fn config(&self) -> ResourceConfig {
        if self.is_singleton() {
            ResourceConfig::singleton(self.name(), self.path())
        } else {
            ResourceConfig::collection(self.name(), self.path())
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A registry holding every resource in [`Resource::ALL`].
pub fn default_registry() -> ClientRegistry {
    Resource::ALL
        .iter()
        .fold(ClientRegistry::new(), |registry, resource| {
            registry.with(resource.config())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_harness::Operation;

    #[test]
    fn test_registry_covers_every_resource() {
        let registry = default_registry();
        assert_eq!(registry.len(), Resource::ALL.len());
        for resource in Resource::ALL {
            let config = registry.resolve(resource.name()).unwrap();
            assert_eq!(config.base_path, resource.path());
            assert_eq!(config.schema_ref, resource.path());
        }
    }

    #[test]
    fn test_singletons_offer_list_and_options_only() {
        let registry = default_registry();
        let company = registry.resolve("company").unwrap();
        assert!(company.supports(Operation::List));
        assert!(company.supports(Operation::Options));
        for operation in [Operation::ById, Operation::Query, Operation::Delete] {
            assert!(!company.supports(operation));
        }

        let launches = registry.resolve("LAUNCHES").unwrap();
        for operation in Operation::ALL {
            assert!(launches.supports(operation));
        }
    }
}
