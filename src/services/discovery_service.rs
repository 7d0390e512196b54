use crate::domain::{
    ContainerRecord, ContainerRuntime, PortMapping, RuntimeError, SortOrder, ViewRecord,
};
use crate::infra::config::DEFAULT_FILTER;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Finds running containers of one family and projects them into view records.
///
/// Holds no state between calls: every discovery is a fresh runtime snapshot.
pub struct DiscoveryService {
    runtime: Arc<dyn ContainerRuntime>,
    filter: String,
    sort: SortOrder,
}

impl DiscoveryService {
    pub fn new(runtime: Arc<dyn ContainerRuntime>) -> Self {
        Self {
            runtime,
            filter: DEFAULT_FILTER.to_string(),
            sort: SortOrder::default(),
        }
    }

    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    /// Discovers with the configured family filter
    pub async fn discover_default(&self) -> Result<Vec<ViewRecord>, RuntimeError> {
        self.discover(&self.filter).await
    }

    /// Runtime errors are not swallowed here; the caller decides how to surface them.
    pub async fn discover(&self, name_filter: &str) -> Result<Vec<ViewRecord>, RuntimeError> {
        let containers = self.runtime.list_running_containers().await?;
        let mut views = project(&containers, name_filter);
        self.sort.apply(&mut views);

        info!(
            filter = name_filter,
            running = containers.len(),
            matched = views.len(),
            "discovered containers"
        );
        Ok(views)
    }
}

/// Filters, deduplicates and projects a runtime listing.
pub fn project(containers: &[ContainerRecord], name_filter: &str) -> Vec<ViewRecord> {
    let needle = name_filter.to_lowercase();
    let mut seen = HashSet::new();
    let mut views = Vec::new();

    for container in containers {
        if !matches_family(container, &needle) {
            continue;
        }

        let id = container.short_id();
        if !seen.insert(id.to_string()) {
            debug!(id, name = %container.name, "skipping duplicate container");
            continue;
        }

        match select_host_port(&container.ports) {
            Some(port) => views.push(ViewRecord::new(&container.name, id, port)),
            None => debug!(id, name = %container.name, "no published host port, skipping"),
        }
    }

    views
}

/// `needle` must already be lowercased.
pub fn matches_family(container: &ContainerRecord, needle: &str) -> bool {
    container.name.to_lowercase().contains(needle)
        || container
            .image_tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

/// Picks the host port that represents a container.
///
/// Mappings are scanned in runtime order and the first one holding a usable binding wins;
/// later mappings are ignored. A binding counts as usable only when its `HostPort` is present
/// and non-blank, so a mapping like `8080/tcp -> ["", "9003"]` yields `9003` and a mapping
/// whose bindings are all blank is skipped like an unbound one.
pub fn select_host_port(ports: &[PortMapping]) -> Option<&str> {
    ports
        .iter()
        .find_map(|mapping| mapping.bindings.iter().find_map(|b| b.usable_port()))
}
