//! Turns repeated observation fetches into a stream of distinct records.
//!
//! The poller is a two-phase state machine. In the emit phase it fetches an
//! observation and returns a record straight away. In the wait phase every
//! tick re-fetches the observation and only returns a record once the upstream
//! timestamp moves past the one last emitted. [`Poller::tick`] never sleeps;
//! the pacing lives in [`Poller::next_record`], so the state machine can be
//! driven by hand or under a paused tokio clock.

use std::future::Future;
use std::time::Duration;

use chrono::DateTime;
use chrono_tz::Tz;
use futures_util::stream::{self, Stream};
use log::{debug, info};
use tokio::time::sleep;

use crate::config::StationConfig;
use crate::error::FetchError;
use crate::nws::{NwsClient, Observation};
use crate::record::NormalizedRecord;

/// Where the poller gets its observations from.
pub trait ObservationSource {
    fn latest(&self) -> impl Future<Output = Result<Observation, FetchError>> + Send;
}

impl ObservationSource for NwsClient {
    async fn latest(&self) -> Result<Observation, FetchError> {
        NwsClient::latest(self).await
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Emit,
    Wait { last_updated: DateTime<Tz> },
}

#[derive(Debug)]
pub struct Poller<S> {
    source: S,
    timezone: Tz,
    poll_interval: Duration,
    phase: Phase,
}

impl<S: ObservationSource> Poller<S> {
    pub fn new(source: S, config: &StationConfig) -> Self {
        Self {
            source,
            timezone: config.timezone,
            poll_interval: config.poll_interval,
            phase: Phase::Emit,
        }
    }

    /// Timestamp of the last emitted record, if any.
    pub fn last_updated(&self) -> Option<DateTime<Tz>> {
        match self.phase {
            Phase::Emit => None,
            Phase::Wait { last_updated } => Some(last_updated),
        }
    }

    /// How long to wait before the next tick.
    pub fn delay(&self) -> Option<Duration> {
        match self.phase {
            Phase::Emit => None,
            Phase::Wait { .. } => Some(self.poll_interval),
        }
    }

    /// Performs exactly one fetch and returns a record if it is new.
    pub async fn tick(&mut self) -> Result<Option<NormalizedRecord>, FetchError> {
        let observation = self.source.latest().await?;

        if let Phase::Wait { last_updated } = self.phase {
            let observed_at = observation.timestamp(self.timezone)?;
            if observed_at == last_updated {
                debug!("observation unchanged since {last_updated}");
                return Ok(None);
            }
        }

        let record = NormalizedRecord::from_observation(&observation, self.timezone)?;
        info!("new observation at {}", record.date_time);

        self.phase = Phase::Wait {
            last_updated: record.date_time,
        };

        Ok(Some(record))
    }

    /// Waits for and returns the next record with a new timestamp.
    pub async fn next_record(&mut self) -> Result<NormalizedRecord, FetchError> {
        loop {
            if let Some(delay) = self.delay() {
                sleep(delay).await;
            }

            if let Some(record) = self.tick().await? {
                return Ok(record);
            }
        }
    }

    /// Endless stream of records. The stream ends after the first error.
    pub fn into_stream(self) -> impl Stream<Item = Result<NormalizedRecord, FetchError>> {
        stream::unfold(Some(self), |state| async move {
            let mut poller = state?;
            match poller.next_record().await {
                Ok(record) => Some((Ok(record), Some(poller))),
                Err(e) => Some((Err(e), None)),
            }
        })
    }
}
