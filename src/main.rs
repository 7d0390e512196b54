use anyhow::Result;
use clap::{Parser, Subcommand};
use neko_viewer::cli::{self, KillOptions, ListOptions, RuntimeArgs, ServeOptions};
use neko_viewer::infra::config::{default_config_dir, load_app_config};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "neko-viewer",
    version,
    about = "Shows running neko containers as embedded views and lets you kill them",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    /// Configuration directory (default: ~/.config/neko-viewer)
    #[arg(
        long,
        env = "NEKO_VIEWER_CONFIG_DIR",
        default_value_os_t = default_config_dir(),
        global = true
    )]
    config_dir: PathBuf,

    /// Emit logs as JSON
    #[arg(long, env = "NEKO_VIEWER_LOG_JSON", global = true)]
    log_json: bool,

    #[command(flatten)]
    runtime: RuntimeArgs,

    /// Serve options used when no subcommand is given
    #[command(flatten)]
    serve: ServeOptions,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web page and API (default)
    Serve(ServeOptions),
    /// Print the containers that would be shown
    List(ListOptions),
    /// Kill a container by id
    Kill(KillOptions),
    /// Write a default neko-viewer.toml into the config directory
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_json);

    let command = args.command.unwrap_or(Commands::Serve(args.serve));

    if let Commands::Init = command {
        return cli::setup::install(&args.config_dir);
    }

    let mut config = load_app_config(&args.config_dir)?;
    args.runtime.apply(&mut config);

    match command {
        Commands::Serve(options) => cli::serve::run(options, config).await,
        Commands::List(options) => cli::list::run(options, config).await,
        Commands::Kill(options) => cli::kill::run(options, config).await,
        Commands::Init => Ok(()),
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bare_invocation_keeps_serve_flags() {
        let args =
            Cli::try_parse_from(["neko-viewer", "--port", "18999", "--filter", "kasm"]).unwrap();

        assert!(args.command.is_none());
        assert_eq!(args.serve.port, Some(18999));
        assert_eq!(args.serve.discovery.filter.as_deref(), Some("kasm"));
    }

    #[test]
    fn test_bare_invocation_reads_serve_env() {
        unsafe {
            std::env::set_var("NEKO_VIEWER_HOST", "127.0.0.1");
        }
        let parsed = Cli::try_parse_from(["neko-viewer"]);
        unsafe {
            std::env::remove_var("NEKO_VIEWER_HOST");
        }

        let args = parsed.unwrap();
        assert!(args.command.is_none());
        assert_eq!(args.serve.host.as_deref(), Some("127.0.0.1"));
    }

    #[test]
    fn test_global_flags_follow_the_subcommand() {
        let args = Cli::try_parse_from([
            "neko-viewer",
            "list",
            "--config-dir",
            "/tmp/neko-viewer-test",
            "--runtime",
            "podman",
        ])
        .unwrap();

        assert!(matches!(args.command, Some(Commands::List(_))));
        assert_eq!(args.config_dir, PathBuf::from("/tmp/neko-viewer-test"));
        assert_eq!(args.runtime.binary.as_deref(), Some("podman"));
    }

    #[test]
    fn test_serve_subcommand_still_parses() {
        let args = Cli::try_parse_from(["neko-viewer", "serve", "--port", "9100"]).unwrap();

        match args.command {
            Some(Commands::Serve(options)) => assert_eq!(options.port, Some(9100)),
            _ => panic!("expected serve subcommand"),
        }
    }
}
