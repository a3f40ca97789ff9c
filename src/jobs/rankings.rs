use anyhow::Result;
use tracing::info;

use crate::connect_duck_db::Store;
use crate::flatten::rankings::{
    flatten_player_rankings, flatten_team_standings, RANKING_CATEGORIES, RANKING_FORMATS,
    STANDING_MATCH_TYPES,
};
use crate::http::require;
use crate::jobs::{skip_on_error, JobContext};

/// Upserts `icc_rankings` for every category and format, and
/// `team_standings` for every match type.
pub fn run(ctx: &JobContext, store: &mut Store) -> Result<()> {
    let mut players = Vec::new();
    for category in RANKING_CATEGORIES {
        for format in RANKING_FORMATS {
            let path = format!("stats/v1/rankings/{category}");
            let label = format!("{category} rankings {format}");
            let result = ctx
                .api
                .get_json(&path, &[("formatType", format.to_string())], &label)
                .and_then(|data| {
                    require(&data, "rank", &ctx.api.url(&path))?;
                    Ok(flatten_player_rankings(&data, category, format))
                });
            if let Some(rows) = skip_on_error(result, "rankings", &label) {
                info!("{label}: {} players", rows.len());
                players.extend(rows);
            }
            ctx.pause();
        }
    }

    let mut standings = Vec::new();
    for &match_type in STANDING_MATCH_TYPES {
        let path = format!("stats/v1/iccstanding/team/matchtype/{match_type}");
        let result = ctx
            .api
            .get_json(&path, &[], &format!("team standings {match_type}"))
            .and_then(|data| {
                require(&data, "values", &ctx.api.url(&path))?;
                Ok(flatten_team_standings(&data, match_type))
            });
        if let Some(rows) = skip_on_error(result, "team standings", match_type) {
            info!("Match type {match_type}: {} teams", rows.len());
            standings.extend(rows);
        }
        ctx.pause();
    }

    store.write(players)?;
    store.write(standings)?;
    Ok(())
}
