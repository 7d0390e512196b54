use crate::domain::{ContainerRecord, ContainerRuntime, RuntimeError};
use async_trait::async_trait;
use std::sync::RwLock;

/// Error a [`MockRuntime`] should produce for a failing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockFailure {
    Unavailable,
    NotFound,
    Command,
}

/// In-memory runtime: a list of "running" containers plus a log of calls.
///
/// Kill removes the container, so a following listing no longer reports it.
#[derive(Debug, Default)]
pub struct MockRuntime {
    containers: RwLock<Vec<ContainerRecord>>,
    commands: RwLock<Vec<String>>,
    fail_on: RwLock<Option<(String, MockFailure)>>,
}

impl MockRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_container(&self, container: ContainerRecord) {
        self.containers.write().unwrap().push(container);
    }

    /// Makes `operation` (`"list"` or `"kill"`) fail with `failure`
    pub fn set_fail_on(&self, operation: &str, failure: MockFailure) {
        *self.fail_on.write().unwrap() = Some((operation.to_string(), failure));
    }

    pub fn clear_failure(&self) {
        *self.fail_on.write().unwrap() = None;
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.read().unwrap().clone()
    }

    /// Matches by full id, id prefix or name, the way the real runtimes resolve references
    pub fn container_exists(&self, reference: &str) -> bool {
        self.containers
            .read()
            .unwrap()
            .iter()
            .any(|c| references(c, reference))
    }

    fn record_command(&self, cmd: &str) {
        self.commands.write().unwrap().push(cmd.to_string());
    }

    fn check_fail(&self, operation: &str, target: &str) -> Result<(), RuntimeError> {
        let fail_on = self.fail_on.read().unwrap();
        match fail_on.as_ref() {
            Some((op, failure)) if op == operation => Err(match failure {
                MockFailure::Unavailable => {
                    RuntimeError::RuntimeUnavailable("mock runtime offline".to_string())
                }
                MockFailure::NotFound => RuntimeError::ContainerNotFound(target.to_string()),
                MockFailure::Command => RuntimeError::Command {
                    command: format!("mock {operation}"),
                    status: "exit status: 1".to_string(),
                    stderr: format!("Mock failure on: {operation}"),
                },
            }),
            _ => Ok(()),
        }
    }
}

fn references(container: &ContainerRecord, reference: &str) -> bool {
    !reference.is_empty() && (container.id.starts_with(reference) || container.name == reference)
}

#[async_trait]
impl ContainerRuntime for MockRuntime {
    async fn list_running_containers(&self) -> Result<Vec<ContainerRecord>, RuntimeError> {
        self.record_command("list");
        self.check_fail("list", "")?;
        Ok(self.containers.read().unwrap().clone())
    }

    async fn kill_container(&self, id: &str) -> Result<(), RuntimeError> {
        self.record_command(&format!("kill:{id}"));
        self.check_fail("kill", id)?;

        let mut containers = self.containers.write().unwrap();
        let before = containers.len();
        containers.retain(|c| !references(c, id));

        if containers.len() == before {
            return Err(RuntimeError::ContainerNotFound(id.to_string()));
        }
        Ok(())
    }
}
