use anyhow::Result;
use tracing::info;

use crate::connect_duck_db::Store;
use crate::flatten::match_list::flatten_venue_matches;
use crate::jobs::JobContext;

/// Upserts `venue_matches` with the match history of every id in `venue_ids`.
pub fn run(ctx: &JobContext, store: &mut Store, venue_ids: &[i64]) -> Result<()> {
    let mut rows = Vec::new();

    for &venue_id in venue_ids {
        let path = format!("venues/v1/{venue_id}/matches");
        let label = format!("matches at venue {venue_id}");
        if let Some(data) = ctx.fetch_or_skip(&path, &label, "venue matches", venue_id) {
            let matches = flatten_venue_matches(&data, venue_id);
            info!("Venue {venue_id}: {} matches", matches.len());
            rows.extend(matches);
        }
        ctx.pause();
    }

    store.write(rows)?;
    Ok(())
}
