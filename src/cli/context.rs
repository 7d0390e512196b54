use crate::api::AppState;
use crate::domain::{ContainerRuntime, SortOrder};
use crate::infra::config::{AppConfig, Settings};
use crate::infra::CliRuntime;
use crate::services::{DiscoveryService, TerminationService};
use clap::Args;
use std::sync::Arc;

/// How to reach the container runtime. Global to every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct RuntimeArgs {
    /// Runtime CLI to drive (docker, podman, or a path)
    #[arg(long = "runtime", env = "NEKO_VIEWER_RUNTIME", global = true)]
    pub binary: Option<String>,
    /// Timeout for each runtime call, in seconds
    #[arg(long, env = "NEKO_VIEWER_TIMEOUT_SECS", global = true)]
    pub timeout_secs: Option<u64>,
}

impl RuntimeArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(binary) = &self.binary {
            config.runtime.binary = Some(binary.clone());
        }
        if let Some(secs) = self.timeout_secs {
            config.runtime.timeout_secs = Some(secs);
        }
    }
}

#[derive(Args, Debug, Default, Clone)]
pub struct DiscoveryArgs {
    /// Substring matched against container names and image tags
    #[arg(long, env = "NEKO_VIEWER_FILTER")]
    pub filter: Option<String>,
    /// Ordering of the result
    #[arg(long, value_enum)]
    pub sort: Option<SortOrder>,
}

impl DiscoveryArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(filter) = &self.filter {
            config.discovery.filter = Some(filter.clone());
        }
        if let Some(sort) = self.sort {
            config.discovery.sort = Some(sort);
        }
    }
}

/// Services wired for one process, built from resolved settings.
pub struct Services {
    pub settings: Settings,
    pub discovery: Arc<DiscoveryService>,
    pub termination: Arc<TerminationService>,
}

impl Services {
    pub fn from_settings(settings: Settings) -> Self {
        let runtime = Arc::new(CliRuntime::new(
            settings.runtime_binary.clone(),
            settings.timeout,
        ));
        Self::with_runtime(settings, runtime)
    }

    pub fn with_runtime(settings: Settings, runtime: Arc<dyn ContainerRuntime>) -> Self {
        let discovery = DiscoveryService::new(runtime.clone())
            .with_filter(settings.filter.clone())
            .with_sort(settings.sort);
        let termination = TerminationService::new(runtime);

        Self {
            settings,
            discovery: Arc::new(discovery),
            termination: Arc::new(termination),
        }
    }

    pub fn app_state(&self) -> Arc<AppState> {
        Arc::new(AppState::new(
            self.discovery.clone(),
            self.termination.clone(),
        ))
    }
}
