pub mod api;
pub mod cli;
pub mod domain;
pub mod infra;
pub mod server;
pub mod services;

// Make test_support available for integration tests
pub mod test_support;

pub use domain::{
    ContainerRecord, ContainerRuntime, RuntimeError, SortOrder, TerminationOutcome, ViewRecord,
};
pub use infra::{CliRuntime, Settings};
pub use services::{DiscoveryService, TerminationService};
