use super::{DiscoveryArgs, Services};
use crate::infra::config::AppConfig;
use crate::server;
use anyhow::Result;
use clap::Args;
use tracing::info;

#[derive(Args, Debug, Default, Clone)]
pub struct ServeOptions {
    /// Address to listen on
    #[arg(long, env = "NEKO_VIEWER_HOST")]
    pub host: Option<String>,
    /// Port to listen on (default: 8731)
    #[arg(long, short, env = "NEKO_VIEWER_PORT")]
    pub port: Option<u16>,
    #[command(flatten)]
    pub discovery: DiscoveryArgs,
}

impl ServeOptions {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = Some(host.clone());
        }
        if let Some(port) = self.port {
            config.server.port = Some(port);
        }
        self.discovery.apply(config);
    }
}

pub async fn run(options: ServeOptions, mut config: AppConfig) -> Result<()> {
    options.apply(&mut config);
    let services = Services::from_settings(config.resolve()?);
    let settings = &services.settings;

    info!(
        filter = %settings.filter,
        runtime = %settings.runtime_binary,
        "Serving containers on http://{}",
        settings.bind_address()
    );

    server::serve(&settings.bind_address(), services.app_state()).await
}
