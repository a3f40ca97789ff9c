use serde_json::Value;

use crate::extract::{as_text, pick_int, pick_list, pick_text};
use crate::fields;
use crate::models::{PlayerProfileRecord, PlayerStatsRecord};

/// Profile row from `stats/v1/player/{id}`. The id in the payload wins over
/// the one requested; a payload without a name is treated as empty.
pub fn flatten_profile(data: &Value, requested_id: i64) -> Option<PlayerProfileRecord> {
    let player_name = pick_text(data, fields::NAME)?;
    Some(PlayerProfileRecord {
        player_id: pick_int(data, fields::PLAYER_ID).unwrap_or(requested_id),
        player_name: Some(player_name),
        role: pick_text(data, fields::ROLE),
        dob: pick_text(data, fields::DOB),
        birth_place: pick_text(data, fields::BIRTH_PLACE),
        country: pick_text(data, fields::INTL_TEAM),
        batting_style: pick_text(data, fields::BAT_STYLE),
        bowling_style: pick_text(data, fields::BOWL_STYLE),
        major_teams: pick_text(data, fields::TEAMS),
    })
}

/// A career table as served by the batting and bowling endpoints: one
/// column per format, one row per statistic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StatTable {
    pub formats: Vec<String>,
    /// `(statistic, per-format cells)`; the statistic name is lowercased
    pub rows: Vec<(String, Vec<String>)>,
}

impl StatTable {
    /// `headers` is `["ROWHEADER", "Test", "ODI", ...]`; each `values`
    /// entry is `{ "values": ["Runs", "1200", "800", ...] }`. Rows shorter
    /// than the header are dropped.
    pub fn parse(data: &Value) -> Self {
        let formats: Vec<String> = pick_list(data, &["headers"])
            .iter()
            .skip(1)
            .filter_map(as_text)
            .filter(|header| !header.eq_ignore_ascii_case("ROWHEADER"))
            .collect();

        let rows = pick_list(data, &["values"])
            .iter()
            .filter_map(|row| {
                let cells: Vec<String> = pick_list(row, &["values"])
                    .iter()
                    .map(|cell| as_text(cell).unwrap_or_default())
                    .collect();
                if cells.len() <= formats.len() {
                    return None;
                }
                let mut cells = cells.into_iter();
                let stat = cells.next()?.to_lowercase();
                Some((stat, cells.collect()))
            })
            .collect();

        Self { formats, rows }
    }

    fn cells(&self) -> impl Iterator<Item = (&str, &str, &str)> + '_ {
        self.rows.iter().flat_map(move |(stat, values)| {
            self.formats
                .iter()
                .zip(values)
                .map(move |(format, value)| (format.as_str(), stat.as_str(), value.as_str()))
        })
    }
}

fn count(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}

fn rate(value: &str) -> f64 {
    value.trim().parse().unwrap_or(0.0)
}

/// Merges the batting and bowling tables into one row per format, in the
/// order the formats first appear.
pub fn flatten_player_stats(
    player_id: i64,
    player_name: Option<&str>,
    batting: &StatTable,
    bowling: &StatTable,
    updated_at: &str,
) -> Vec<PlayerStatsRecord> {
    let mut rows: Vec<PlayerStatsRecord> = Vec::new();

    let row_for = |rows: &mut Vec<PlayerStatsRecord>, format: &str| -> usize {
        if let Some(index) = rows.iter().position(|row| row.format_type == format) {
            return index;
        }
        rows.push(PlayerStatsRecord {
            player_id,
            player_name: player_name.map(str::to_string),
            format_type: format.to_string(),
            highest: "0".to_string(),
            best_bowling: "0/0".to_string(),
            updated_at: updated_at.to_string(),
            ..PlayerStatsRecord::default()
        });
        rows.len() - 1
    };

    for format in batting.formats.iter().chain(&bowling.formats) {
        row_for(&mut rows, format.as_str());
    }

    for (format, stat, value) in batting.cells() {
        let index = row_for(&mut rows, format);
        let row = &mut rows[index];
        match stat {
            "matches" => row.matches = count(value),
            "innings" => row.innings = count(value),
            "runs" => row.runs = count(value),
            "balls" => row.balls = count(value),
            "highest" => row.highest = value.to_string(),
            "average" => row.average = rate(value),
            "sr" => row.strike_rate = rate(value),
            "not out" => row.not_out = count(value),
            "fours" => row.fours = count(value),
            "sixes" => row.sixes = count(value),
            "ducks" => row.ducks = count(value),
            "50s" => row.fifties = count(value),
            "100s" => row.hundreds = count(value),
            "200s" => row.two_hundreds = count(value),
            "300s" => row.three_hundreds = count(value),
            "400s" => row.four_hundreds = count(value),
            _ => {}
        }
    }

    for (format, stat, value) in bowling.cells() {
        let index = row_for(&mut rows, format);
        let row = &mut rows[index];
        match stat {
            "wickets" => row.wickets = count(value),
            "avg" => row.bowling_average = rate(value),
            "sr" => row.bowling_strike_rate = rate(value),
            "eco" => row.economy_rate = rate(value),
            "balls" => row.overs_bowled = balls_to_overs(count(value)),
            "maidens" => row.maidens = count(value),
            "runs" => row.runs_conceded = count(value),
            "bbi" if value == "-/-" => row.best_bowling = "0/0".to_string(),
            "bbi" => row.best_bowling = value.to_string(),
            "5w" => row.five_wickets = count(value),
            "10w" => row.ten_wickets = count(value),
            _ => {}
        }
    }

    rows
}

/// Decimal overs rounded to one place, e.g. 100 balls is 16.7.
pub fn balls_to_overs(balls: i64) -> f64 {
    (balls as f64 / 6.0 * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_uses_payload_fields() {
        let data = json!({
            "id": "1413",
            "name": "Virat Kohli",
            "role": "Batsman",
            "DoBFormat": "November 05, 1988",
            "birthPlace": "Delhi",
            "intlTeam": "India",
            "bat": "Right Handed Bat",
            "bowl": "Right-arm medium",
            "teams": "India, Royal Challengers Bengaluru"
        });
        let profile = flatten_profile(&data, 99).unwrap();
        assert_eq!(profile.player_id, 1413);
        assert_eq!(profile.country.as_deref(), Some("India"));
        assert_eq!(profile.batting_style.as_deref(), Some("Right Handed Bat"));
        assert_eq!(profile.major_teams.as_deref(), Some("India, Royal Challengers Bengaluru"));
    }

    #[test]
    fn profile_falls_back_to_requested_id() {
        let profile = flatten_profile(&json!({ "name": "No Id" }), 576).unwrap();
        assert_eq!(profile.player_id, 576);
        assert!(flatten_profile(&json!({ "id": 5 }), 5).is_none());
    }

    fn batting() -> Value {
        json!({
            "headers": ["ROWHEADER", "Test", "ODI", "T20"],
            "values": [
                { "values": ["Matches", "113", "292", "125"] },
                { "values": ["Runs", "8848", "13848", "4188"] },
                { "values": ["Highest", "254", "183", "122"] },
                { "values": ["Average", "49.15", "58.18", "48.69"] },
                { "values": ["SR", "55.57", "93.54", "137.04"] },
                { "values": ["50s", "30", "72", "38"] },
                { "values": ["Truncated", "1"] }
            ]
        })
    }

    fn bowling() -> Value {
        json!({
            "headers": ["ROWHEADER", "Test", "ODI", "T20", "IPL"],
            "values": [
                { "values": ["Balls", "175", "641", "152", "251"] },
                { "values": ["Wickets", "0", "5", "4", "4"] },
                { "values": ["Avg", "-", "166.25", "51.0", "92.5"] },
                { "values": ["BBI", "-/-", "1/15", "1/13", "2/25"] }
            ]
        })
    }

    #[test]
    fn stat_table_drops_short_rows() {
        let table = StatTable::parse(&batting());
        assert_eq!(table.formats, ["Test", "ODI", "T20"]);
        assert_eq!(table.rows.len(), 6);
        assert_eq!(table.rows[0].0, "matches");
    }

    #[test]
    fn pivots_one_row_per_format() {
        let rows = flatten_player_stats(
            1413,
            Some("Virat Kohli"),
            &StatTable::parse(&batting()),
            &StatTable::parse(&bowling()),
            "now",
        );
        let formats: Vec<&str> = rows.iter().map(|r| r.format_type.as_str()).collect();
        assert_eq!(formats, ["Test", "ODI", "T20", "IPL"]);

        let test = &rows[0];
        assert_eq!((test.matches, test.runs), (113, 8848));
        assert_eq!(test.highest, "254");
        assert_eq!(test.strike_rate, 55.57);
        assert_eq!(test.fifties, 30);
        assert_eq!(test.best_bowling, "0/0");
        assert_eq!(test.bowling_average, 0.0);
        assert_eq!(test.overs_bowled, 29.2);

        let ipl = &rows[3];
        assert_eq!(ipl.runs, 0);
        assert_eq!(ipl.highest, "0");
        assert_eq!(ipl.wickets, 4);
        assert_eq!(ipl.best_bowling, "2/25");
    }

    #[test]
    fn empty_tables_yield_no_rows() {
        let empty = StatTable::parse(&json!({}));
        assert!(flatten_player_stats(1, None, &empty, &empty, "now").is_empty());
    }

    #[test]
    fn overs_round_to_one_place() {
        assert_eq!(balls_to_overs(100), 16.7);
        assert_eq!(balls_to_overs(0), 0.0);
        assert_eq!(balls_to_overs(6), 1.0);
    }
}
