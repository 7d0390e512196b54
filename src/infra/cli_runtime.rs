use super::inspect::{self, InspectedContainer};
use crate::domain::{ContainerRecord, ContainerRuntime, RuntimeError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

pub const DEFAULT_RUNTIME_BINARY: &str = "docker";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

const UNAVAILABLE_MARKERS: &[&str] = &[
    "cannot connect to the docker daemon",
    "is the docker daemon running",
    "error during connect",
    "connection refused",
    "unable to connect to podman",
    "permission denied while trying to connect",
];

const NOT_FOUND_MARKERS: &[&str] = &[
    "no such container",
    "no such object",
    "no container with name or id",
];

/// Talks to the container runtime through its CLI (`docker` or `podman`).
///
/// Each call spawns one process bounded by `timeout`; the child is killed if the
/// deadline passes.
#[derive(Debug, Clone)]
pub struct CliRuntime {
    binary: String,
    timeout: Duration,
}

impl CliRuntime {
    pub fn new(binary: impl Into<String>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    async fn run(&self, args: &[&str]) -> Result<Output, RuntimeError> {
        let label = self.label(args);
        debug!(command = %label, "running runtime command");

        let mut cmd = Command::new(&self.binary);
        cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(RuntimeError::RuntimeUnavailable(format!(
                "could not run {}: {e}",
                self.binary
            ))),
            Err(_) => Err(RuntimeError::RuntimeUnavailable(format!(
                "{label} timed out after {}s",
                self.timeout.as_secs_f32()
            ))),
        }
    }

    fn label(&self, args: &[&str]) -> String {
        let verb: Vec<&str> = args
            .iter()
            .take_while(|arg| !arg.starts_with('-'))
            .take(2)
            .copied()
            .collect();
        format!("{} {}", self.binary, verb.join(" "))
    }

    fn failure(&self, args: &[&str], output: &Output, target: Option<&str>) -> RuntimeError {
        classify_failure(
            &self.label(args),
            &output.status.to_string(),
            &String::from_utf8_lossy(&output.stderr),
            target,
        )
    }

    async fn running_ids(&self) -> Result<Vec<String>, RuntimeError> {
        let args = ["ps", "-q", "--no-trunc"];
        let output = self.run(&args).await?;
        if !output.status.success() {
            return Err(self.failure(&args, &output, None));
        }
        Ok(inspect::parse_id_list(&output.stdout))
    }

    async fn inspect_containers(
        &self,
        ids: &[String],
    ) -> Result<Vec<InspectedContainer>, RuntimeError> {
        let mut args = vec!["inspect", "--type", "container"];
        args.extend(ids.iter().map(String::as_str));

        let output = self.run(&args).await?;
        if output.status.success() {
            return inspect::parse_containers(&output.stdout);
        }

        // A container that stopped after `ps` makes inspect exit non-zero while the
        // survivors are still printed.
        let error = self.failure(&args, &output, None);
        if error.is_unavailable() {
            return Err(error);
        }
        match inspect::parse_containers(&output.stdout) {
            Ok(containers) => {
                warn!(error = %error, "some containers vanished during discovery");
                Ok(containers)
            }
            Err(_) => Err(error),
        }
    }

    async fn image_tags(&self, containers: &[InspectedContainer]) -> HashMap<String, Vec<String>> {
        let mut image_ids: Vec<&str> = Vec::new();
        for container in containers {
            let image = container.image.as_str();
            if !image.is_empty() && !image_ids.contains(&image) {
                image_ids.push(image);
            }
        }
        if image_ids.is_empty() {
            return HashMap::new();
        }

        let mut args = vec!["image", "inspect"];
        args.extend(image_ids);

        let output = match self.run(&args).await {
            Ok(output) => output,
            Err(e) => {
                warn!(error = %e, "image tags unavailable, matching on names only");
                return HashMap::new();
            }
        };
        if !output.status.success() {
            warn!(error = %self.failure(&args, &output, None), "image inspect failed");
        }

        match inspect::parse_images(&output.stdout) {
            Ok(images) => inspect::tags_by_image(images),
            Err(e) => {
                warn!(error = %e, "could not parse image tags");
                HashMap::new()
            }
        }
    }
}

impl Default for CliRuntime {
    fn default() -> Self {
        Self::new(DEFAULT_RUNTIME_BINARY, DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl ContainerRuntime for CliRuntime {
    async fn list_running_containers(&self) -> Result<Vec<ContainerRecord>, RuntimeError> {
        let ids = self.running_ids().await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let containers = self.inspect_containers(&ids).await?;
        let tags = self.image_tags(&containers).await;

        Ok(containers
            .into_iter()
            .map(|container| container.into_record(&tags))
            .collect())
    }

    async fn kill_container(&self, id: &str) -> Result<(), RuntimeError> {
        validate_identifier(id)?;

        let args = ["kill", "--", id];
        let output = self.run(&args).await?;
        if output.status.success() {
            return Ok(());
        }
        Err(self.failure(&args, &output, Some(id)))
    }
}

/// Rejects identifiers that could never name a container (or could be read as a flag).
pub fn validate_identifier(id: &str) -> Result<(), RuntimeError> {
    let valid = !id.is_empty()
        && !id.starts_with('-')
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));

    if valid {
        Ok(())
    } else {
        Err(RuntimeError::ContainerNotFound(id.to_string()))
    }
}

/// Maps a failed CLI invocation onto the runtime error kinds.
pub fn classify_failure(
    command: &str,
    status: &str,
    stderr: &str,
    target: Option<&str>,
) -> RuntimeError {
    let lowered = stderr.to_lowercase();
    let message = stderr.trim().to_string();

    if UNAVAILABLE_MARKERS.iter().any(|m| lowered.contains(m)) {
        return RuntimeError::RuntimeUnavailable(message);
    }
    if NOT_FOUND_MARKERS.iter().any(|m| lowered.contains(m)) {
        return RuntimeError::ContainerNotFound(target.map(str::to_string).unwrap_or(message));
    }

    RuntimeError::Command {
        command: command.to_string(),
        status: status.to_string(),
        stderr: message,
    }
}
