use serde_json::Value;

use crate::extract::{pick_int, pick_list, pick_text, to_float, to_int};
use crate::fields;
use crate::models::{PlayerRankingRecord, TeamStandingRecord};

/// Ranking categories served by `stats/v1/rankings/{category}`.
pub const RANKING_CATEGORIES: &[&str] = &["batsmen", "bowlers", "allrounders"];
/// `formatType` values accepted by the rankings endpoint.
pub const RANKING_FORMATS: &[&str] = &["test", "odi", "t20"];
/// Match types of the ICC standings endpoint: 1 Test, 2 ODI, 3 T20.
pub const STANDING_MATCH_TYPES: &[i64] = &[1, 2, 3];

/// Entries of the `rank` list. Players without an id are skipped.
pub fn flatten_player_rankings(data: &Value, category: &str, format: &str) -> Vec<PlayerRankingRecord> {
    pick_list(data, &["rank"])
        .iter()
        .filter_map(|player| {
            Some(PlayerRankingRecord {
                category: category.to_string(),
                format_type: format.to_string(),
                player_id: pick_int(player, fields::PLAYER_ID)?,
                player_rank: pick_int(player, fields::RANK),
                player_name: pick_text(player, fields::NAME),
                country: pick_text(player, fields::COUNTRY),
                rating: pick_int(player, fields::RATING),
                points: pick_int(player, fields::POINTS),
            })
        })
        .collect()
}

/// Standings rows are `{ "value": [rank, flag, team, pct] }`. Rows without a
/// numeric rank are skipped.
pub fn flatten_team_standings(data: &Value, match_type: i64) -> Vec<TeamStandingRecord> {
    pick_list(data, &["values"])
        .iter()
        .filter_map(|row| {
            let cells = pick_list(row, &["value"]);
            let [rank, flag, team, pct, ..] = cells else {
                return None;
            };
            Some(TeamStandingRecord {
                match_type,
                team_rank: to_int(rank)?,
                flag: to_int(flag),
                team: team.as_str().map(str::to_string),
                pct: to_float(pct),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn player_rankings() {
        let data = json!({ "rank": [
            { "id": "8019", "rank": "1", "name": "Joe Root", "country": "England", "rating": "895", "points": "895" },
            { "rank": "2", "name": "Missing Id" },
            { "id": 1413, "rank": 3, "name": "Virat Kohli", "country": "India" }
        ]});
        let rows = flatten_player_rankings(&data, "batsmen", "test");
        assert_eq!(rows.len(), 2);
        assert_eq!((rows[0].player_id, rows[0].player_rank, rows[0].rating), (8019, Some(1), Some(895)));
        assert_eq!(rows[1].rating, None);
        assert_eq!(rows[1].category, "batsmen");
    }

    #[test]
    fn team_standings_rows() {
        let data = json!({ "values": [
            { "value": ["1", "172115", "South Africa", "69.44"] },
            { "value": ["2", "172116", "Australia"] },
            { "value": ["x", "1", "Nobody", "0"] }
        ]});
        let rows = flatten_team_standings(&data, 1);
        assert_eq!(rows.len(), 1);
        let top = &rows[0];
        assert_eq!((top.match_type, top.team_rank, top.flag), (1, 1, Some(172115)));
        assert_eq!(top.team.as_deref(), Some("South Africa"));
        assert_eq!(top.pct, Some(69.44));
    }
}
