pub mod config;
pub mod driver;
pub mod error;
pub mod nws;
pub mod poller;
pub mod record;

pub use config::StationConfig;
pub use driver::{NwsConfEditor, NwsDriver, confeditor_loader, loader};
pub use error::{ConfigError, FetchError};
pub use record::{NormalizedRecord, UnitSystem};
