use super::{ContainerRecord, RuntimeError};
use async_trait::async_trait;
use std::fmt::Debug;

/// Trait for container runtime operations.
///
/// Every call is a single attempt against the live runtime; retry policy belongs to callers.
#[async_trait]
pub trait ContainerRuntime: Send + Sync + Debug {
    /// List all currently running containers with their port attributes
    async fn list_running_containers(&self) -> Result<Vec<ContainerRecord>, RuntimeError>;

    /// Send a kill signal (not a graceful stop) to a container
    async fn kill_container(&self, id: &str) -> Result<(), RuntimeError>;
}
