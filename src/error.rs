use reqwest::StatusCode;

/// Failure to obtain a usable observation from the upstream API.
///
/// Null sensor values are not errors; they surface as `None` in the record.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status from {url}: {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to parse observation body")]
    Json(#[from] serde_json::Error),

    #[error("observation body has no `properties` object")]
    MissingProperties,

    #[error("observation is missing property `{0}`")]
    MissingField(&'static str),

    #[error("invalid observation timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("unknown observation field: {0}")]
    UnknownField(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing configuration section [{0}]")]
    MissingSection(&'static str),

    #[error("missing configuration key: {0}")]
    MissingKey(&'static str),

    #[error("invalid ICAO station code: {0:?}")]
    InvalidIcao(String),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },

    #[error("failed to build HTTP client")]
    HttpClient(#[from] reqwest::Error),
}
