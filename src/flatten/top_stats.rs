use serde_json::Value;
use std::collections::BTreeMap;

use crate::extract::{as_text, pick_list};
use crate::models::{YearlyBattingRecord, YearlyBowlingRecord};

pub const MOST_RUNS: &str = "mostRuns";
pub const MOST_WICKETS: &str = "mostWickets";

/// Leaderboard rows are positional: `[id, name, matches, innings|overs,
/// runs|wickets, average, ...]`, all rendered as strings.
fn leaderboard_rows(data: &Value) -> impl Iterator<Item = Vec<String>> + '_ {
    pick_list(data, &["values"]).iter().filter_map(|row| {
        let cells: Vec<String> = pick_list(row, &["values"])
            .iter()
            .map(|cell| as_text(cell).unwrap_or_default())
            .collect();
        (cells.len() >= 6).then_some(cells)
    })
}

fn whole(cell: &str) -> Option<i64> {
    if cell.is_empty() || !cell.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cell.parse().ok()
}

fn decimal(cell: &str) -> Option<f64> {
    cell.trim().parse().ok().filter(|value: &f64| value.is_finite())
}

/// Leaders without a numeric player id are dropped.
pub fn parse_batting_leaders(data: &Value, year: i64, format: &str, fetched_at: &str) -> Vec<YearlyBattingRecord> {
    leaderboard_rows(data)
        .filter_map(|cells| {
            Some(YearlyBattingRecord {
                year,
                format: format.to_string(),
                stats_type: MOST_RUNS.to_string(),
                player_id: whole(&cells[0])?,
                player_name: Some(cells[1].clone()).filter(|name| !name.is_empty()),
                matches: whole(&cells[2]),
                innings: whole(&cells[3]),
                runs: whole(&cells[4]),
                average: decimal(&cells[5]),
                strike_rate: None,
                fetched_at: fetched_at.to_string(),
            })
        })
        .collect()
}

pub fn parse_bowling_leaders(data: &Value, year: i64, format: &str, fetched_at: &str) -> Vec<YearlyBowlingRecord> {
    leaderboard_rows(data)
        .filter_map(|cells| {
            Some(YearlyBowlingRecord {
                year,
                format: format.to_string(),
                stats_type: MOST_WICKETS.to_string(),
                player_id: whole(&cells[0])?,
                player_name: Some(cells[1].clone()).filter(|name| !name.is_empty()),
                matches: whole(&cells[2]),
                overs: decimal(&cells[3]),
                wickets: whole(&cells[4]),
                average: decimal(&cells[5]),
                fetched_at: fetched_at.to_string(),
            })
        })
        .collect()
}

/// Ids of the `limit` highest run scorers, ties kept in leaderboard order.
pub fn top_run_scorers(records: &[YearlyBattingRecord], limit: usize) -> Vec<i64> {
    let mut ranked: Vec<&YearlyBattingRecord> = records.iter().collect();
    ranked.sort_by_key(|record| std::cmp::Reverse(record.runs.unwrap_or(0)));
    ranked.into_iter().take(limit).map(|record| record.player_id).collect()
}

/// Sets `strike_rate` on every record whose player has one. Returns how many
/// records were updated.
pub fn apply_strike_rates(records: &mut [YearlyBattingRecord], rates: &BTreeMap<i64, f64>) -> usize {
    let mut matched = 0;
    for record in records.iter_mut() {
        if let Some(rate) = rates.get(&record.player_id) {
            record.strike_rate = Some(*rate);
            matched += 1;
        }
    }
    matched
}
