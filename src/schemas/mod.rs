//! # Resource Schemas
//!
//! One item schema per resource, built from the shared pieces in [`shapes`].
//! Schemas describe a single document; the validator applies them to arrays and
//! paginated envelopes on its own.
//!
//! Every schema is registered under the schema reference of its resource, so
//! `validate(None)` on an active resource picks the right one.

pub mod launches;
pub mod org;
pub mod shapes;
pub mod vehicles;

use crate::resources::Resource;
use contract_harness::{SchemaRegistry, Shape};

/// The item schema of `resource`.
pub fn schema_for(resource: Resource) -> Shape {
    match resource {
        Resource::Capsules => vehicles::capsule(),
        Resource::Company => org::company(),
        Resource::Cores => vehicles::core(),
        Resource::Crew => org::crew_member(),
        Resource::Dragons => vehicles::dragon(),
        Resource::History => org::history_event(),
        Resource::Landpads => launches::landpad(),
        Resource::Launches => launches::launch(),
        Resource::Launchpads => launches::launchpad(),
        Resource::Payloads => launches::payload(),
        Resource::Roadster => vehicles::roadster(),
        Resource::Rockets => vehicles::rocket(),
        Resource::Ships => vehicles::ship(),
        Resource::Starlink => org::starlink_satellite(),
    }
}

/// A schema registry covering every resource.
pub fn default_schemas() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    for resource in Resource::ALL {
        registry.register(&resource.config().schema_ref, schema_for(resource));
    }
    registry
}
