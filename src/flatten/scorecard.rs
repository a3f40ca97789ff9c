use serde_json::Value;
use std::collections::HashMap;

use crate::derive::{is_adjacent, BattingLine};
use crate::extract::{pick, pick_float, pick_int, pick_list, pick_object, pick_text, to_int};
use crate::fields;
use crate::models::{BatsmanRecord, BowlerRecord, PartnershipRecord};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScorecardRows {
    pub batsmen: Vec<BatsmanRecord>,
    pub bowlers: Vec<BowlerRecord>,
    pub partnerships: Vec<PartnershipRecord>,
}

/// Shared context for every row of one innings.
#[derive(Debug, Clone, Copy)]
pub struct InningsContext<'a> {
    pub match_id: i64,
    pub innings_id: Option<i64>,
    pub team_name: Option<&'a str>,
}

/// The innings array of a scorecard response, under whichever key it uses.
pub fn innings_list(scorecard: &Value) -> &[Value] {
    pick_list(scorecard, fields::SCORECARD)
}

/// Batting, bowling and partnership rows for every innings of a scorecard.
///
/// Batting positions follow the order of the API's batting card; the
/// partnership adjacency flag is derived from those positions.
pub fn flatten_scorecard(scorecard: &Value, match_id: i64, fetched_at: &str) -> ScorecardRows {
    let mut rows = ScorecardRows::default();

    for innings in innings_list(scorecard) {
        let team_name = pick_text(innings, fields::BAT_TEAM_NAME);
        let ctx = InningsContext {
            match_id,
            innings_id: pick_int(innings, fields::INNINGS_ID),
            team_name: team_name.as_deref(),
        };

        let mut positions: HashMap<i64, i64> = HashMap::new();
        for (index, card) in pick_list(innings, fields::BATSMEN).iter().enumerate() {
            let batsman = flatten_batsman(card, &ctx, index as i64 + 1);
            if let Some(id) = batsman.batsman_id {
                positions.insert(id, batsman.batting_position);
            }
            rows.batsmen.push(batsman);
        }

        rows.bowlers.extend(
            pick_list(innings, fields::BOWLERS)
                .iter()
                .map(|card| flatten_bowler(card, &ctx)),
        );

        rows.partnerships.extend(
            partnership_list(innings)
                .iter()
                .enumerate()
                .map(|(index, raw)| flatten_partnership(raw, &ctx, index as i64 + 1, &positions, fetched_at)),
        );
    }

    rows
}

pub fn flatten_batsman(card: &Value, ctx: &InningsContext<'_>, position: i64) -> BatsmanRecord {
    BatsmanRecord {
        match_id: ctx.match_id,
        innings_id: ctx.innings_id,
        team_name: ctx.team_name.map(str::to_string),
        batsman_id: pick_int(card, fields::BATSMAN_ID),
        batsman_name: pick_text(card, fields::BATSMAN_NAME),
        batting_position: position,
        runs: pick_int(card, fields::RUNS),
        balls_faced: pick_int(card, fields::BALLS),
        fours: pick_int(card, fields::FOURS),
        sixes: pick_int(card, fields::SIXES),
        strike_rate: pick_float(card, fields::STRIKE_RATE),
        out_desc: pick_text(card, fields::OUT_DESC),
    }
}

pub fn flatten_bowler(card: &Value, ctx: &InningsContext<'_>) -> BowlerRecord {
    BowlerRecord {
        match_id: ctx.match_id,
        innings_id: ctx.innings_id,
        team_name: ctx.team_name.map(str::to_string),
        bowler_id: pick_int(card, fields::BOWLER_ID),
        bowler_name: pick_text(card, fields::BOWLER_NAME),
        overs: pick_float(card, fields::OVERS),
        maidens: pick_int(card, fields::MAIDENS),
        runs_conceded: pick_int(card, fields::RUNS),
        wickets: pick_int(card, fields::WICKETS),
        economy: pick_float(card, fields::ECONOMY),
        no_balls: Some(pick_int(card, fields::NO_BALLS).unwrap_or(0)),
        wides: Some(pick_int(card, fields::WIDES).unwrap_or(0)),
    }
}

/// Partnerships sit under `partnership.partnership`, or directly under
/// `partnership` on some payloads.
fn partnership_list(innings: &Value) -> &[Value] {
    match pick(innings, &["partnership"]) {
        Some(Value::Array(items)) => items.as_slice(),
        Some(nested @ Value::Object(_)) => pick_list(nested, &["partnership"]),
        _ => &[],
    }
}

pub fn flatten_partnership(
    raw: &Value,
    ctx: &InningsContext<'_>,
    number: i64,
    positions: &HashMap<i64, i64>,
    fetched_at: &str,
) -> PartnershipRecord {
    let bat1_id = pick_int(raw, &["bat1id", "bat1Id"]);
    let bat2_id = pick_int(raw, &["bat2id", "bat2Id"]);
    let bat1_position = bat1_id.and_then(|id| positions.get(&id).copied());
    let bat2_position = bat2_id.and_then(|id| positions.get(&id).copied());

    PartnershipRecord {
        match_id: ctx.match_id,
        innings_id: ctx.innings_id,
        team_name: ctx.team_name.map(str::to_string),
        partnership_number: number,
        bat1_id,
        bat1_name: pick_text(raw, &["bat1name", "bat1Name"]),
        bat1_runs: pick_int(raw, &["bat1runs", "bat1Runs"]),
        bat1_balls: pick_int(raw, &["bat1balls", "bat1Balls"]),
        bat1_fours: pick_int(raw, &["bat1fours", "bat1Fours"]),
        bat1_sixes: pick_int(raw, &["bat1sixes", "bat1Sixes"]),
        bat1_position,
        bat2_id,
        bat2_name: pick_text(raw, &["bat2name", "bat2Name"]),
        bat2_runs: pick_int(raw, &["bat2runs", "bat2Runs"]),
        bat2_balls: pick_int(raw, &["bat2balls", "bat2Balls"]),
        bat2_fours: pick_int(raw, &["bat2fours", "bat2Fours"]),
        bat2_sixes: pick_int(raw, &["bat2sixes", "bat2Sixes"]),
        bat2_position,
        total_runs: pick_int(raw, &["totalruns", "totalRuns"]),
        total_balls: pick_int(raw, &["totalballs", "totalBalls"]),
        is_adjacent: is_adjacent(bat1_position, bat2_position),
        fetched_at: fetched_at.to_string(),
    }
}

/// Runs and balls per batsman, for strike-rate aggregation.
///
/// Reads the current `batsman` card list and the older
/// `batTeamDetails.batsmenData` map keyed by player id. Lines without an id
/// or with garbled runs/balls are skipped; missing runs/balls count as zero.
pub fn batting_lines(scorecard: &Value) -> Vec<BattingLine> {
    let mut lines = Vec::new();

    for innings in innings_list(scorecard) {
        for card in pick_list(innings, fields::BATSMEN) {
            if let Some(id) = pick_int(card, fields::BATSMAN_ID) {
                lines.extend(batting_line(id, card));
            }
        }

        let legacy = pick_object(innings, fields::BAT_TEAM_DETAILS)
            .and_then(|details| pick(details, fields::BATSMEN_DATA))
            .and_then(Value::as_object);
        for (key, card) in legacy.into_iter().flatten() {
            let id = key
                .parse::<i64>()
                .ok()
                .or_else(|| pick(card, &["batId"]).and_then(to_int));
            if let Some(id) = id {
                lines.extend(batting_line(id, card));
            }
        }
    }

    lines
}

fn batting_line(player_id: i64, card: &Value) -> Option<BattingLine> {
    let count = |keys: fields::Keys| match pick(card, keys) {
        None => Some(0),
        Some(raw) => to_int(raw),
    };
    Some(BattingLine {
        player_id,
        name: pick_text(card, fields::BATSMAN_NAME),
        runs: count(fields::RUNS)?,
        balls: count(fields::BALLS)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scorecard() -> Value {
        json!({
            "scorecard": [{
                "inningsid": 1,
                "batteamname": "India",
                "batsman": [
                    { "id": 11, "name": "Opener A", "runs": "45", "balls": 40, "strkrate": "112.5" },
                    { "id": 12, "name": "Opener B", "runs": 10, "balls": 12 },
                    { "id": 13, "name": "No3", "runs": 0, "balls": 1, "outdec": "c X b Y" },
                    { "name": "Unknown", "runs": 3 },
                    { "id": 15, "name": "No5", "runs": 7, "balls": 9 }
                ],
                "bowler": [
                    { "id": 21, "name": "Quick", "overs": "10", "maidens": 1, "runs": 40, "wickets": "2", "economy": "4.0" }
                ],
                "partnership": { "partnership": [
                    { "bat1id": 11, "bat1name": "Opener A", "bat2id": 12, "bat2name": "Opener B", "totalruns": 50, "totalballs": 44 },
                    { "bat1id": 13, "bat2id": 15, "totalruns": "4" },
                    { "bat1id": 11, "bat2id": 99 }
                ]}
            }],
            "ismatchcomplete": true
        })
    }

    #[test]
    fn batsmen_get_enumeration_positions() {
        let rows = flatten_scorecard(&scorecard(), 900, "now");
        let positions: Vec<i64> = rows.batsmen.iter().map(|b| b.batting_position).collect();
        assert_eq!(positions, [1, 2, 3, 4, 5]);
        assert_eq!(rows.batsmen[0].runs, Some(45));
        assert_eq!(rows.batsmen[0].strike_rate, Some(112.5));
        assert_eq!(rows.batsmen[3].batsman_id, None);
        assert!(rows.batsmen.iter().all(|b| b.match_id == 900 && b.innings_id == Some(1)));
        assert_eq!(rows.batsmen[2].out_desc.as_deref(), Some("c X b Y"));
    }

    #[test]
    fn bowlers_are_coerced() {
        let rows = flatten_scorecard(&scorecard(), 900, "now");
        let bowler = &rows.bowlers[0];
        assert_eq!(bowler.overs, Some(10.0));
        assert_eq!(bowler.wickets, Some(2));
        assert_eq!(bowler.economy, Some(4.0));
        assert_eq!((bowler.no_balls, bowler.wides), (Some(0), Some(0)));
        assert_eq!(bowler.team_name.as_deref(), Some("India"));
    }

    #[test]
    fn partnership_adjacency() {
        let rows = flatten_scorecard(&scorecard(), 900, "now");
        let p = &rows.partnerships;
        assert_eq!(p.len(), 3);
        assert_eq!((p[0].bat1_position, p[0].bat2_position, p[0].is_adjacent), (Some(1), Some(2), Some(true)));
        // positions 3 and 5
        assert_eq!(p[1].is_adjacent, None);
        assert_eq!(p[1].total_runs, Some(4));
        // partner never appeared on the card
        assert_eq!((p[2].bat2_position, p[2].is_adjacent), (None, None));
        assert_eq!(p[2].partnership_number, 3);
    }

    #[test]
    fn camel_case_layout() {
        let data = json!({ "scoreCard": [{
            "inningsId": 2,
            "batTeamName": "Australia",
            "batCardList": [{ "batId": 5, "batName": "Camel", "runs": 12, "strikeRate": 80 }],
            "bowlCardList": [{ "bowlId": 6, "bowlName": "Spin", "noballs": "1" }]
        }]});
        let rows = flatten_scorecard(&data, 1, "now");
        assert_eq!(rows.batsmen[0].batsman_id, Some(5));
        assert_eq!(rows.batsmen[0].strike_rate, Some(80.0));
        assert_eq!(rows.bowlers[0].bowler_name.as_deref(), Some("Spin"));
        assert_eq!(rows.bowlers[0].no_balls, Some(1));
        assert!(rows.partnerships.is_empty());
    }

    #[test]
    fn missing_scorecard_yields_nothing() {
        assert_eq!(flatten_scorecard(&json!({}), 1, "now"), ScorecardRows::default());
    }

    #[test]
    fn batting_lines_cover_both_layouts() {
        let legacy = json!({ "scoreCard": [{
            "batTeamDetails": { "batsmenData": {
                "bat_1": { "batId": 8, "batName": "Legacy", "runs": 20, "balls": 10 },
                "77": { "batName": "Keyed", "runs": "5" },
                "bat_3": { "batName": "Nobody", "runs": 1, "balls": 1 },
                "bat_4": { "batId": 9, "runs": "lots", "balls": 4 }
            }}
        }]});
        let mut lines = batting_lines(&legacy);
        lines.sort_by_key(|line| line.player_id);
        assert_eq!(lines.len(), 2);
        assert_eq!((lines[0].player_id, lines[0].runs, lines[0].balls), (8, 20, 10));
        assert_eq!((lines[1].player_id, lines[1].runs, lines[1].balls), (77, 5, 0));

        let current = batting_lines(&scorecard());
        assert_eq!(current.len(), 4);
        assert_eq!(current[0].runs, 45);
    }
}
