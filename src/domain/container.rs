/// Length of the abbreviated identifier shown to operators and used for dedup.
pub const SHORT_ID_LEN: usize = 12;

/// A single host-side binding of a container port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostBinding {
    pub host_port: Option<String>,
}

impl HostBinding {
    pub fn new(host_port: impl Into<String>) -> Self {
        Self {
            host_port: Some(host_port.into()),
        }
    }

    /// Host port, if present and non-blank
    pub fn usable_port(&self) -> Option<&str> {
        self.host_port
            .as_deref()
            .map(str::trim)
            .filter(|port| !port.is_empty())
    }
}

/// One entry of the runtime's port map, e.g. `8080/tcp -> [0.0.0.0:9001]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortMapping {
    pub container_port: String,
    pub bindings: Vec<HostBinding>,
}

impl PortMapping {
    pub fn new(container_port: impl Into<String>, bindings: Vec<HostBinding>) -> Self {
        Self {
            container_port: container_port.into(),
            bindings,
        }
    }

    pub fn unbound(container_port: impl Into<String>) -> Self {
        Self::new(container_port, Vec::new())
    }
}

/// Running container as reported by the runtime. Read-only snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerRecord {
    pub id: String,
    pub name: String,
    pub image_tags: Vec<String>,
    /// Port map in the order the runtime reported it
    pub ports: Vec<PortMapping>,
}

impl ContainerRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image_tags: Vec::new(),
            ports: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.image_tags.push(tag.into());
        self
    }

    pub fn with_port(mut self, mapping: PortMapping) -> Self {
        self.ports.push(mapping);
        self
    }

    pub fn short_id(&self) -> &str {
        short_id(&self.id)
    }
}

/// Abbreviates a full container id (`sha256:` prefix dropped, first 12 chars kept).
pub fn short_id(id: &str) -> &str {
    let id = id.strip_prefix("sha256:").unwrap_or(id);
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_id_truncates_full_ids() {
        let record = ContainerRecord::new(
            "4f2a9c1d7e8b0a1b2c3d4e5f60718293a4b5c6d7e8f9",
            "neko-1",
        );
        assert_eq!(record.short_id(), "4f2a9c1d7e8b");
    }

    #[test]
    fn short_id_keeps_already_short_ids() {
        assert_eq!(short_id("abc123"), "abc123");
        assert_eq!(short_id("sha256:0123456789abcdef"), "0123456789ab");
    }

    #[test]
    fn blank_host_port_is_not_usable() {
        assert_eq!(HostBinding::new("9001").usable_port(), Some("9001"));
        assert_eq!(HostBinding::new("  ").usable_port(), None);
        assert_eq!(HostBinding::default().usable_port(), None);
    }
}
