//! The surface a weewx-style host framework loads.

use std::collections::HashMap;

use futures_util::stream::Stream;
use log::info;

use crate::config::StationConfig;
use crate::error::{ConfigError, FetchError};
use crate::nws::NwsClient;
use crate::poller::Poller;
use crate::record::NormalizedRecord;

/// Section of the host configuration this driver reads.
pub const DRIVER_NAME: &str = "NWS";
pub const DRIVER_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Identifier the host uses to select this driver.
pub const DRIVER_MODULE: &str = "user.nws";
pub const HARDWARE_NAME: &str = "National Weather Service";

const DEFAULT_STANZA: &str = "
[NWS]
    # Airport code of station to collect from
    icao = KLAF

    # Time zone the station reports in
    timezone = America/Indiana/Indianapolis

    # The driver to use:
    driver = user.nws
";

/// Host configuration: section name to key/value pairs.
pub type ConfigDict = HashMap<String, HashMap<String, String>>;

/// Builds the driver from the `[NWS]` section of the host configuration.
pub fn loader(config_dict: &ConfigDict) -> Result<NwsDriver, ConfigError> {
    let section = config_dict
        .get(DRIVER_NAME)
        .ok_or(ConfigError::MissingSection(DRIVER_NAME))?;

    match section.get("driver") {
        Some(driver) if !driver.trim().is_empty() => {}
        _ => return Err(ConfigError::MissingKey("driver")),
    }

    NwsDriver::new(StationConfig::from_map(section)?)
}

#[derive(Debug, Clone)]
pub struct NwsDriver {
    config: StationConfig,
    client: NwsClient,
}

impl NwsDriver {
    pub fn new(config: StationConfig) -> Result<Self, ConfigError> {
        let client = NwsClient::new(&config)?;

        info!(
            "{DRIVER_NAME} driver {DRIVER_VERSION} polling {} every {}s",
            config.icao,
            config.poll_interval.as_secs()
        );

        Ok(Self { config, client })
    }

    pub fn hardware_name(&self) -> &'static str {
        HARDWARE_NAME
    }

    pub fn config(&self) -> &StationConfig {
        &self.config
    }

    pub fn client(&self) -> &NwsClient {
        &self.client
    }

    /// Starts a fresh poll loop. Each call begins with no remembered timestamp.
    pub fn loop_packets(&self) -> impl Stream<Item = Result<NormalizedRecord, FetchError>> + use<> {
        Poller::new(self.client.clone(), &self.config).into_stream()
    }
}

/// First-time setup support for the host's configuration tooling.
#[derive(Debug, Default, Clone, Copy)]
pub struct NwsConfEditor;

impl NwsConfEditor {
    pub fn default_stanza(&self) -> &'static str {
        DEFAULT_STANZA
    }
}

pub fn confeditor_loader() -> NwsConfEditor {
    NwsConfEditor
}
