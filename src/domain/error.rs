use thiserror::Error;

/// Failures surfaced by a [`ContainerRuntime`](super::ContainerRuntime).
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("container runtime unavailable: {0}")]
    RuntimeUnavailable(String),

    #[error("no such container: {0}")]
    ContainerNotFound(String),

    /// A port-binding entry that is present but not shaped as expected.
    /// Discovery treats it as "no usable binding".
    #[error("malformed port data for {port}: {reason}")]
    MalformedPortData { port: String, reason: String },

    #[error("{command} failed ({status}): {stderr}")]
    Command {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("unexpected runtime output: {0}")]
    InvalidOutput(String),
}

impl RuntimeError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, RuntimeError::RuntimeUnavailable(_))
    }
}
