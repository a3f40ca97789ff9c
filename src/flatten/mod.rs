//! Payload-to-record flattening, one module per endpoint family.
//!
//! Flatteners are pure: they take a JSON fragment plus the ids already known
//! to the caller and return records, never touching the network or the store.

pub mod commentary;
pub mod live_match;
pub mod match_list;
pub mod player;
pub mod rankings;
pub mod scorecard;
pub mod series;
pub mod top_stats;
pub mod venue;

use chrono::Local;

/// Wall-clock stamp written into `fetched_at` / `updated_at` columns.
pub fn fetched_at() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
