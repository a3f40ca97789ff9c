use anyhow::Result;
use tracing::{info, warn};

use crate::connect_duck_db::Store;
use crate::extract::pick_text;
use crate::fields;
use crate::flatten::fetched_at;
use crate::flatten::player::{flatten_player_stats, StatTable};
use crate::jobs::{skip_on_error, JobContext};

/// Rebuilds `player_stats` from the batting and bowling career tables of
/// every id in `player_ids`.
///
/// The profile request must succeed for a player to be stored; a missing
/// batting or bowling table only leaves that half of the row at zero.
pub fn run(ctx: &JobContext, store: &mut Store, player_ids: &[i64]) -> Result<()> {
    let mut rows = Vec::new();
    let stamp = fetched_at();

    for &player_id in player_ids {
        let profile = ctx.fetch_or_skip(
            &format!("stats/v1/player/{player_id}"),
            &format!("player {player_id}"),
            "player profile",
            player_id,
        );
        let table = |kind: &str| {
            let result = ctx.api.get_json(
                &format!("stats/v1/player/{player_id}/{kind}"),
                &[],
                &format!("{kind} stats {player_id}"),
            );
            skip_on_error(result, kind, player_id)
                .map(|data| StatTable::parse(&data))
                .unwrap_or_default()
        };
        let batting = table("batting");
        let bowling = table("bowling");
        ctx.pause();

        let Some(profile) = profile else { continue };
        let name = pick_text(&profile, fields::NAME);

        let stats = flatten_player_stats(player_id, name.as_deref(), &batting, &bowling, &stamp);
        if stats.is_empty() {
            warn!("No stats available for player {player_id}");
            continue;
        }
        let summary: Vec<String> = stats
            .iter()
            .map(|row| format!("{}: {} runs, {} wickets", row.format_type, row.runs, row.wickets))
            .collect();
        info!("{}: {}", name.as_deref().unwrap_or("Unknown"), summary.join(", "));
        rows.extend(stats);
    }

    store.write(rows)?;
    Ok(())
}
