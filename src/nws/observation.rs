use chrono::DateTime;
use chrono_tz::Tz;
use log::trace;
use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::nws::Field;

const TIMESTAMP_PROPERTY: &str = "timestamp";

/// The `properties` object of a `/observations/latest` response.
#[derive(Debug, Clone)]
pub struct Observation {
    properties: Map<String, Value>,
}

impl Observation {
    pub fn from_json(body: &str) -> Result<Self, FetchError> {
        let document: Value = serde_json::from_str(body)?;

        let Value::Object(mut document) = document else {
            return Err(FetchError::MissingProperties);
        };

        match document.remove("properties") {
            Some(Value::Object(properties)) => Ok(Self { properties }),
            _ => Err(FetchError::MissingProperties),
        }
    }

    /// Converted value of `field`.
    ///
    /// A property whose `value` is null, absent or not a number is a sensor that
    /// is not reporting and yields `None`. A property that is missing entirely
    /// means the response does not have the expected shape and is an error.
    pub fn value(&self, field: Field) -> Result<Option<f64>, FetchError> {
        let name = field.upstream_name();
        let property = self
            .properties
            .get(name)
            .ok_or(FetchError::MissingField(name))?;

        let raw = property.get("value").and_then(Value::as_f64);
        if raw.is_none() {
            trace!("{name} is not reporting: {property}");
        }

        Ok(raw.map(|v| field.convert(v)))
    }

    /// Observation time converted to `timezone`.
    pub fn timestamp(&self, timezone: Tz) -> Result<DateTime<Tz>, FetchError> {
        let raw = self
            .properties
            .get(TIMESTAMP_PROPERTY)
            .ok_or(FetchError::MissingField(TIMESTAMP_PROPERTY))?;

        let raw = raw
            .as_str()
            .ok_or_else(|| FetchError::InvalidTimestamp(raw.to_string()))?;

        let observed_at = DateTime::parse_from_rfc3339(raw)
            .map_err(|e| FetchError::InvalidTimestamp(format!("{raw}: {e}")))?;

        Ok(observed_at.with_timezone(&timezone))
    }
}

#[cfg(test)]
mod tests {
    use chrono_tz::America::Indiana::Indianapolis;
    use serde_json::json;

    use super::*;

    fn observation(properties: Value) -> Observation {
        Observation::from_json(&json!({ "properties": properties }).to_string()).unwrap()
    }

    #[test]
    fn non_numeric_values_are_none() {
        let obs = observation(json!({
            "temperature": { "value": null },
            "windSpeed": {},
            "windDirection": { "value": "N" },
            "relativeHumidity": null,
        }));

        assert_eq!(obs.value(Field::OutTemp).unwrap(), None);
        assert_eq!(obs.value(Field::WindSpeed).unwrap(), None);
        assert_eq!(obs.value(Field::WindDir).unwrap(), None);
        assert_eq!(obs.value(Field::OutHumidity).unwrap(), None);
    }

    #[test]
    fn missing_outer_key_is_an_error() {
        let obs = observation(json!({ "temperature": { "value": 1.0 } }));

        let err = obs.value(Field::Dewpoint).unwrap_err();
        assert!(matches!(err, FetchError::MissingField("dewpoint")));
    }

    #[test]
    fn integer_values_are_numeric() {
        let obs = observation(json!({
            "barometricPressure": { "value": 101325 },
            "precipitationLastHour": { "value": 0 },
        }));

        assert_eq!(obs.value(Field::Barometer).unwrap(), Some(1013.25));
        assert_eq!(obs.value(Field::Rain).unwrap(), Some(0.0));
    }

    #[test]
    fn timestamp_is_converted_to_station_zone() {
        let obs = observation(json!({ "timestamp": "2023-01-01T12:00:00+00:00" }));

        let ts = obs.timestamp(Indianapolis).unwrap();
        assert_eq!(ts.timestamp(), 1_672_574_400);
        assert_eq!(ts.format("%H:%M %Z").to_string(), "07:00 EST");
    }

    #[test]
    fn bad_timestamps_are_errors() {
        let missing = observation(json!({}));
        assert!(matches!(
            missing.timestamp(Indianapolis),
            Err(FetchError::MissingField("timestamp"))
        ));

        let garbage = observation(json!({ "timestamp": "yesterday" }));
        assert!(matches!(
            garbage.timestamp(Indianapolis),
            Err(FetchError::InvalidTimestamp(_))
        ));

        let number = observation(json!({ "timestamp": 1672574400 }));
        assert!(matches!(
            number.timestamp(Indianapolis),
            Err(FetchError::InvalidTimestamp(_))
        ));
    }

    #[test]
    fn body_must_have_properties() {
        assert!(matches!(
            Observation::from_json("{\"type\": \"Feature\"}"),
            Err(FetchError::MissingProperties)
        ));
        assert!(matches!(
            Observation::from_json("[1, 2]"),
            Err(FetchError::MissingProperties)
        ));
        assert!(matches!(
            Observation::from_json("<html>"),
            Err(FetchError::Json(_))
        ));
    }
}
