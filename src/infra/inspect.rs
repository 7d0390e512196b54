//! Parsing of `inspect` payloads emitted by docker/podman.
//!
//! Both runtimes print a JSON array of objects. Only the fields needed for discovery are
//! modelled; everything else is ignored.

use crate::domain::{ContainerRecord, HostBinding, PortMapping, RuntimeError};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tracing::debug;

const UNTAGGED: &str = "<none>:<none>";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InspectedContainer {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub network_settings: Option<NetworkSettings>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkSettings {
    /// Kept as a raw map so malformed entries degrade per entry instead of failing the
    /// whole payload. `serde_json` is built with `preserve_order`, so iteration follows
    /// the runtime's own ordering.
    #[serde(default)]
    pub ports: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InspectedImage {
    pub id: String,
    #[serde(default)]
    pub repo_tags: Option<Vec<String>>,
}

pub fn parse_id_list(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_containers(stdout: &[u8]) -> Result<Vec<InspectedContainer>, RuntimeError> {
    parse_array(stdout, "container inspect")
}

pub fn parse_images(stdout: &[u8]) -> Result<Vec<InspectedImage>, RuntimeError> {
    parse_array(stdout, "image inspect")
}

fn parse_array<T: DeserializeOwned>(
    stdout: &[u8],
    what: &str,
) -> Result<Vec<T>, RuntimeError> {
    let text = String::from_utf8_lossy(stdout);
    let text = text.trim();
    // Some runtimes print nothing at all when every target vanished.
    if text.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(text).map_err(|e| RuntimeError::InvalidOutput(format!("{what}: {e}")))
}

/// Image id -> repository tags, with untagged placeholders removed.
pub fn tags_by_image(images: Vec<InspectedImage>) -> HashMap<String, Vec<String>> {
    images
        .into_iter()
        .map(|image| {
            let tags = image
                .repo_tags
                .unwrap_or_default()
                .into_iter()
                .filter(|tag| tag != UNTAGGED)
                .collect();
            (normalize_image_id(&image.id).to_string(), tags)
        })
        .collect()
}

/// Docker reports `sha256:<hex>`, podman reports the bare hex.
pub fn normalize_image_id(id: &str) -> &str {
    id.strip_prefix("sha256:").unwrap_or(id)
}

/// Parses one port-map entry. `null` means "exposed but not published".
pub fn parse_bindings(port: &str, value: &Value) -> Result<Vec<HostBinding>, RuntimeError> {
    let malformed = |reason: &str| RuntimeError::MalformedPortData {
        port: port.to_string(),
        reason: reason.to_string(),
    };

    let entries = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(entries) => entries,
        _ => return Err(malformed("binding list is not an array")),
    };

    entries
        .iter()
        .map(|entry| {
            let object = entry
                .as_object()
                .ok_or_else(|| malformed("binding is not an object"))?;
            Ok(HostBinding {
                host_port: string_field(object, "HostPort"),
            })
        })
        .collect()
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl InspectedContainer {
    pub fn into_record(self, tags: &HashMap<String, Vec<String>>) -> ContainerRecord {
        let name = self.name.strip_prefix('/').unwrap_or(&self.name).to_string();
        let image_tags = tags
            .get(normalize_image_id(&self.image))
            .cloned()
            .unwrap_or_default();

        let ports = self
            .network_settings
            .and_then(|settings| settings.ports)
            .unwrap_or_default()
            .into_iter()
            .map(|(port, value)| match parse_bindings(&port, &value) {
                Ok(bindings) => PortMapping::new(port, bindings),
                Err(e) => {
                    debug!(container = %name, error = %e, "ignoring unusable port entry");
                    PortMapping::unbound(port)
                }
            })
            .collect();

        ContainerRecord {
            id: self.id,
            name,
            image_tags,
            ports,
        }
    }
}
