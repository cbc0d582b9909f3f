use chrono_tz::Tz;
use log::debug;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::config::StationConfig;
use crate::error::FetchError;
use crate::nws::{FieldValue, Observation, Query};

// api.weather.gov refuses requests without a User-Agent.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

const GEO_JSON: &str = "application/geo+json";

/// Fetches the latest observation of a single station.
///
/// Every call is a fresh round trip; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct NwsClient {
    client: reqwest::Client,
    url: String,
    timezone: Tz,
}

impl NwsClient {
    pub fn new(config: &StationConfig) -> reqwest::Result<Self> {
        let url = config.latest_observation_url();

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GEO_JSON));

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            url,
            timezone: config.timezone,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Performs one GET and parses the body.
    pub async fn latest(&self) -> Result<Observation, FetchError> {
        debug!("fetching {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| self.request_error(source))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: self.url.clone(),
                status,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| self.request_error(source))?;

        Observation::from_json(&body)
    }

    /// Looks up a single canonical field, or `timestamp`, in a fresh observation.
    ///
    /// The timestamp comes back as whole epoch seconds.
    pub async fn fetch_field(&self, name: &str) -> Result<FieldValue, FetchError> {
        let query: Query = name.parse()?;
        let observation = self.latest().await?;

        match query {
            Query::Measurement(field) => observation.value(field).map(FieldValue::Number),
            Query::Timestamp => observation
                .timestamp(self.timezone)
                .map(|ts| FieldValue::Timestamp(ts.timestamp())),
        }
    }

    fn request_error(&self, source: reqwest::Error) -> FetchError {
        FetchError::Request {
            url: self.url.clone(),
            source,
        }
    }
}
