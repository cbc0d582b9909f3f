use std::fmt;
use std::str::FromStr;

use crate::error::FetchError;

/// Canonical measurement names emitted in every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    OutTemp,
    Barometer,
    Pressure,
    WindSpeed,
    WindDir,
    WindGust,
    OutHumidity,
    Dewpoint,
    Windchill,
    Heatindex,
    Rain,
}

impl Field {
    /// Emission order of a record.
    pub const ALL: [Field; 11] = [
        Field::OutTemp,
        Field::Barometer,
        Field::Pressure,
        Field::WindSpeed,
        Field::WindDir,
        Field::WindGust,
        Field::OutHumidity,
        Field::Dewpoint,
        Field::Windchill,
        Field::Heatindex,
        Field::Rain,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::OutTemp => "outTemp",
            Field::Barometer => "barometer",
            Field::Pressure => "pressure",
            Field::WindSpeed => "windSpeed",
            Field::WindDir => "windDir",
            Field::WindGust => "windGust",
            Field::OutHumidity => "outHumidity",
            Field::Dewpoint => "dewpoint",
            Field::Windchill => "windchill",
            Field::Heatindex => "heatindex",
            Field::Rain => "rain",
        }
    }

    /// Property name under `properties` in the api.weather.gov response.
    pub fn upstream_name(&self) -> &'static str {
        match self {
            Field::OutTemp => "temperature",
            Field::Barometer => "barometricPressure",
            Field::Pressure => "seaLevelPressure",
            Field::WindSpeed => "windSpeed",
            Field::WindDir => "windDirection",
            Field::WindGust => "windGust",
            Field::OutHumidity => "relativeHumidity",
            Field::Dewpoint => "dewpoint",
            Field::Windchill => "windChill",
            Field::Heatindex => "heatIndex",
            Field::Rain => "precipitationLastHour",
        }
    }

    /// Applies the unit conversion for this field to a raw upstream number.
    pub fn convert(&self, raw: f64) -> f64 {
        match self {
            // Pa to mbar
            Field::Barometer | Field::Pressure => raw / 100.0,
            Field::Rain => raw * 100.0,
            _ => raw,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| FetchError::UnknownField(s.to_string()))
    }
}

/// Anything `fetch_field` can be asked for: a measurement or the observation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Query {
    Measurement(Field),
    Timestamp,
}

impl FromStr for Query {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timestamp" => Ok(Query::Timestamp),
            _ => s.parse().map(Query::Measurement),
        }
    }
}

/// Result of a single-field lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Number(Option<f64>),
    Timestamp(i64),
}
