use crate::domain::{ContainerRuntime, TerminationOutcome};
use std::sync::Arc;
use tracing::{info, warn};

/// Kills containers by identifier and reports the result as a value.
pub struct TerminationService {
    runtime: Arc<dyn ContainerRuntime>,
}

impl TerminationService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self { runtime }
    }

    /// Never fails: every runtime error becomes an unsuccessful outcome.
    pub async fn kill(&self, id: &str) -> TerminationOutcome {
        match self.runtime.kill_container(id).await {
            Ok(()) => {
                info!(id, "container killed");
                TerminationOutcome::killed(id)
            }
            Err(e) => {
                warn!(id, error = %e, "failed to kill container");
                TerminationOutcome::failed(e.to_string())
            }
        }
    }
}
