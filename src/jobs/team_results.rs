use anyhow::Result;
use tracing::{info, warn};

use crate::connect_duck_db::Store;
use crate::flatten::fetched_at;
use crate::flatten::match_list::flatten_team_results;
use crate::jobs::JobContext;

/// Rebuilds `team_results` from the results list of every id in `team_ids`.
pub fn run(ctx: &JobContext, store: &mut Store, team_ids: &[i64]) -> Result<()> {
    let mut rows = Vec::new();
    let stamp = fetched_at();

    for &team_id in team_ids {
        let path = format!("teams/v1/{team_id}/results");
        let label = format!("results for team {team_id}");
        if let Some(data) = ctx.fetch_or_skip(&path, &label, "team results", team_id) {
            let results = flatten_team_results(&data, team_id, &stamp);
            if results.is_empty() {
                warn!("No matches in the results of team {team_id}");
            } else {
                info!("Team {team_id}: {} matches", results.len());
            }
            rows.extend(results);
        }
        ctx.pause();
    }

    store.write(rows)?;
    Ok(())
}
