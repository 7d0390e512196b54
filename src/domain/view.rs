use serde::{Deserialize, Serialize};

/// What the presentation layer renders for one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewRecord {
    pub name: String,
    pub id: String,
    pub port: String,
    pub url: String,
}

impl ViewRecord {
    pub fn new(name: impl Into<String>, id: impl Into<String>, port: impl Into<String>) -> Self {
        let port = port.into();
        Self {
            name: name.into(),
            id: id.into(),
            url: access_url(&port),
            port,
        }
    }
}

pub fn access_url(port: &str) -> String {
    format!("http://localhost:{port}")
}

/// Result of a kill request. Always produced, never an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminationOutcome {
    pub success: bool,
    pub message: String,
}

impl TerminationOutcome {
    pub fn killed(id: &str) -> Self {
        Self {
            success: true,
            message: format!("Container {id} killed"),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Post-projection ordering of the view list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Keep whatever order the runtime listed containers in
    #[default]
    Runtime,
    Name,
    Id,
}

impl SortOrder {
    pub fn apply(self, views: &mut [ViewRecord]) {
        match self {
            SortOrder::Runtime => {}
            SortOrder::Name => views.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id))),
            SortOrder::Id => views.sort_by(|a, b| a.id.cmp(&b.id)),
        }
    }
}
