use std::fmt;

use chrono::DateTime;
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::FetchError;
use crate::nws::{Field, Observation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitSystem {
    Metric,
}

impl UnitSystem {
    /// The host framework's numeric code for this unit system.
    pub fn code(&self) -> u8 {
        match self {
            UnitSystem::Metric => 0x10,
        }
    }
}

/// One emitted set of measurements, all taken from the same observation.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub date_time: DateTime<Tz>,

    pub unit_system: UnitSystem,

    values: IndexMap<Field, Option<f64>>,
}

impl NormalizedRecord {
    pub fn from_observation(observation: &Observation, timezone: Tz) -> Result<Self, FetchError> {
        let date_time = observation.timestamp(timezone)?;

        let values: IndexMap<Field, Option<f64>> = Field::ALL
            .into_iter()
            .map(|field| Ok((field, observation.value(field)?)))
            .collect::<Result<_, FetchError>>()?;

        Ok(Self {
            date_time,
            unit_system: UnitSystem::Metric,
            values,
        })
    }

    /// Observation time as whole epoch seconds.
    pub fn date_time(&self) -> i64 {
        self.date_time.timestamp()
    }

    pub fn get(&self, field: Field) -> Option<f64> {
        self.values.get(&field).copied().flatten()
    }

    /// Every canonical field in emission order, including those not reporting.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Option<f64>)> + '_ {
        self.values.iter().map(|(field, value)| (*field, *value))
    }
}

impl Serialize for NormalizedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 2))?;
        map.serialize_entry("dateTime", &self.date_time())?;
        map.serialize_entry("usUnits", &self.unit_system.code())?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.as_str(), &value)?;
        }
        map.end()
    }
}

impl fmt::Display for NormalizedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({})",
            self.date_time.format("%Y-%m-%d %H:%M:%S %Z"),
            self.date_time()
        )?;
        for (field, value) in self.iter() {
            match value {
                Some(v) => write!(f, " {field}={v}")?,
                None => write!(f, " {field}=None")?,
            }
        }
        Ok(())
    }
}
