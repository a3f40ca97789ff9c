use anyhow::Result;
use tracing::{info, warn};

use crate::connect_duck_db::Store;
use crate::flatten::commentary::flatten_match_commentary;
use crate::jobs::JobContext;

/// Builds `match_commentary` from the match centre header and commentary
/// feed of every id in `match_ids`.
pub fn run(ctx: &JobContext, store: &mut Store, match_ids: &[i64]) -> Result<()> {
    let mut rows = Vec::new();

    for &match_id in match_ids {
        let info = ctx.fetch_or_skip(
            &format!("mcenter/v1/{match_id}"),
            &format!("match info {match_id}"),
            "match info",
            match_id,
        );
        ctx.pause();
        let Some(info) = info else { continue };

        let feed = ctx.fetch_or_skip(
            &format!("mcenter/v1/{match_id}/comm"),
            &format!("commentary for match {match_id}"),
            "commentary",
            match_id,
        );
        ctx.pause();
        let Some(feed) = feed else { continue };

        let lines = flatten_match_commentary(match_id, &info, &feed);
        if lines.is_empty() {
            warn!("No commentary lines for match {match_id}");
        } else {
            info!("Match {match_id}: {} commentary lines", lines.len());
        }
        rows.extend(lines);
    }

    store.write(rows)?;
    Ok(())
}
