//! Batch jobs: fetch one endpoint family, flatten it and persist the result.
//!
//! Jobs walk their identifiers one at a time with a pause between requests.
//! A failure for one identifier is logged and skipped; a failed top-level
//! listing or any store error ends the job.

pub mod commentary;
pub mod live;
pub mod player_stats;
pub mod players;
pub mod rankings;
pub mod recent;
pub mod schedules;
pub mod series;
pub mod team_results;
pub mod top_stats;
pub mod venue_matches;
pub mod venues;

use serde_json::Value;
use std::fmt::Display;
use std::thread;
use std::time::Duration;
use tracing::warn;

use crate::error::FetchError;
use crate::http::ApiClient;

/// What every job needs besides the store.
pub struct JobContext {
    pub api: ApiClient,
    pub delay: Duration,
}

impl JobContext {
    pub fn new(api: ApiClient, delay: Duration) -> Self {
        Self { api, delay }
    }

    /// Sleeps for the configured inter-request delay.
    pub fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }

    /// Fetches one per-identifier payload. Failures are logged with the
    /// identifier and stage, then swallowed.
    pub fn fetch_or_skip(&self, path: &str, label: &str, stage: &str, id: i64) -> Option<Value> {
        skip_on_error(self.api.get_json(path, &[], label), stage, id)
    }
}

/// Collapses a per-identifier result into `Some` or a logged skip.
pub(crate) fn skip_on_error<T>(result: Result<T, FetchError>, stage: &str, id: impl Display) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("{stage} for {id} skipped: {e}");
            None
        }
    }
}
