use anyhow::{Context, Result};
use tracing::info;

use crate::connect_duck_db::Store;
use crate::flatten::fetched_at;
use crate::flatten::match_list::flatten_recent_matches;
use crate::jobs::JobContext;

pub const RECENT_MATCHES: &str = "matches/v1/recent";

/// Rebuilds `recent_matches` from the recent results list.
pub fn run(ctx: &JobContext, store: &mut Store) -> Result<()> {
    let data = ctx
        .api
        .get_json(RECENT_MATCHES, &[], "recent matches")
        .context("failed to fetch recent matches")?;

    let rows = flatten_recent_matches(&data, &fetched_at());
    info!("{} recent matches", rows.len());
    store.write(rows)?;
    Ok(())
}
