use super::Services;
use crate::infra::config::AppConfig;
use anyhow::{Result, bail};
use clap::Args;

#[derive(Args, Debug, Clone)]
pub struct KillOptions {
    /// Container id (short or full) or name
    pub id: String,
}

pub async fn run(options: KillOptions, config: AppConfig) -> Result<()> {
    let services = Services::from_settings(config.resolve()?);
    let outcome = services.termination.kill(&options.id).await;

    if !outcome.success {
        bail!("{}", outcome.message);
    }
    println!("{}", outcome.message);
    Ok(())
}
