use super::{DiscoveryArgs, Services};
use crate::domain::ViewRecord;
use crate::infra::config::AppConfig;
use anyhow::{Context, Result};
use clap::Args;

#[derive(Args, Debug, Default, Clone)]
pub struct ListOptions {
    #[command(flatten)]
    pub discovery: DiscoveryArgs,
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ListOptions, mut config: AppConfig) -> Result<()> {
    options.discovery.apply(&mut config);
    let services = Services::from_settings(config.resolve()?);

    let views = services
        .discovery
        .discover_default()
        .await
        .context("listing containers")?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&views)?);
    } else {
        print!("{}", render_table(&views));
    }
    Ok(())
}

pub fn render_table(views: &[ViewRecord]) -> String {
    if views.is_empty() {
        return "No matching containers running\n".to_string();
    }

    let width = views
        .iter()
        .map(|v| v.name.len())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:<width$}  {:<12}  {:<5}  URL\n", "NAME", "ID", "PORT");
    for view in views {
        out.push_str(&format!(
            "{:<width$}  {:<12}  {:<5}  {}\n",
            view.name, view.id, view.port, view.url
        ));
    }
    out
}
