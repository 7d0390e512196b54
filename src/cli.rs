pub mod context;
pub mod kill;
pub mod list;
pub mod serve;
pub mod setup;

pub use context::{DiscoveryArgs, RuntimeArgs, Services};
pub use kill::KillOptions;
pub use list::ListOptions;
pub use serve::ServeOptions;
