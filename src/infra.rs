pub mod cli_runtime;
pub mod config;
pub mod inspect;

pub use cli_runtime::CliRuntime;
pub use config::{AppConfig, Settings};
