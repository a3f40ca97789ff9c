use anyhow::{Context, Result};
use tracing::info;

use crate::connect_duck_db::Store;
use crate::flatten::fetched_at;
use crate::flatten::match_list::flatten_schedules;
use crate::jobs::JobContext;

pub const UPCOMING_MATCHES: &str = "matches/v1/upcoming";

/// Rebuilds `schedules` from the upcoming matches list.
pub fn run(ctx: &JobContext, store: &mut Store) -> Result<()> {
    let data = ctx
        .api
        .get_json(UPCOMING_MATCHES, &[], "upcoming matches")
        .context("failed to fetch upcoming matches")?;

    let rows = flatten_schedules(&data, &fetched_at());
    info!("Fetched {} upcoming matches", rows.len());
    store.write(rows)?;
    Ok(())
}
