mod container;
mod error;
pub mod traits;
mod view;

pub use container::{ContainerRecord, HostBinding, PortMapping, SHORT_ID_LEN, short_id};
pub use error::RuntimeError;
pub use traits::ContainerRuntime;
pub use view::{SortOrder, TerminationOutcome, ViewRecord, access_url};
