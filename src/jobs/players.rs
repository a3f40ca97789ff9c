use anyhow::Result;
use tracing::{info, warn};

use crate::connect_duck_db::Store;
use crate::flatten::player::flatten_profile;
use crate::jobs::JobContext;

/// Upserts `player_info` for every id in `player_ids`.
pub fn run(ctx: &JobContext, store: &mut Store, player_ids: &[i64]) -> Result<()> {
    let mut profiles = Vec::new();

    for &player_id in player_ids {
        let path = format!("stats/v1/player/{player_id}");
        let label = format!("player {player_id}");
        if let Some(data) = ctx.fetch_or_skip(&path, &label, "player profile", player_id) {
            match flatten_profile(&data, player_id) {
                Some(profile) => {
                    info!("Fetched profile {player_id}");
                    profiles.push(profile);
                }
                None => warn!("Player {player_id} returned an empty profile"),
            }
        }
        ctx.pause();
    }

    store.write(profiles)?;
    Ok(())
}
