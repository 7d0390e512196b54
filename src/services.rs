mod discovery_service;
mod termination_service;

pub use discovery_service::{DiscoveryService, matches_family, project, select_host_port};
pub use termination_service::TerminationService;
