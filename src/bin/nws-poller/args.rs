use std::time::Duration;

use chrono_tz::Tz;
use clap::Parser;
use nws_observations::config::{self, StationConfig};

/// Polls the latest observation of an NWS station and prints each new record.
#[derive(Debug, Parser)]
pub struct Args {
    /// Station to poll
    #[arg(long, default_value = config::DEFAULT_ICAO, value_parser = config::parse_icao)]
    pub icao: String,

    #[arg(long, default_value = "America/Indiana/Indianapolis")]
    pub timezone: Tz,

    /// Seconds between polls while waiting for a new observation
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_interval: u64,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    #[arg(long, default_value = config::DEFAULT_API_URL)]
    pub api_url: String,

    /// Stop after this many records
    #[arg(long)]
    pub count: Option<usize>,

    /// Print records as JSON packets
    #[arg(long)]
    pub json: bool,

    /// Fetch a single field (or `timestamp`) once and exit
    #[arg(long, conflicts_with_all = ["count", "json"])]
    pub field: Option<String>,

    /// Print the default configuration stanza and exit
    #[arg(long)]
    pub print_stanza: bool,
}

impl Args {
    pub fn station_config(&self) -> StationConfig {
        StationConfig {
            icao: self.icao.clone(),
            timezone: self.timezone,
            poll_interval: Duration::from_secs(self.poll_interval),
            request_timeout: Duration::from_secs(self.timeout),
            api_url: self.api_url.clone(),
        }
    }
}
