//! Fields computed from flattened records rather than read off the payload.

use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::OnceLock;

/// `Some(true)` when both batting positions are known and consecutive.
///
/// Any other combination is unknown, never `false`.
pub fn is_adjacent(first: Option<i64>, second: Option<i64>) -> Option<bool> {
    match (first, second) {
        (Some(a), Some(b)) if (a - b).abs() == 1 => Some(true),
        _ => None,
    }
}

fn runs_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(\d+)\s+runs?").expect("static pattern compiles"))
}

/// Best-effort runs scored off one delivery.
///
/// `FOUR` and `SIX` events are authoritative. Otherwise the first
/// "`<n>` run(s)" phrase in the text is used, which miscounts lines that
/// mention extras or over totals alongside the runs off the bat.
pub fn infer_runs(event_type: Option<&str>, text: &str) -> i64 {
    match event_type.map(str::trim) {
        Some("FOUR") => return 4,
        Some("SIX") => return 6,
        _ => {}
    }

    if let Some(runs) = runs_pattern()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<i64>().ok())
    {
        return runs;
    }

    // "no run" and anything unrecognised both count as a dot ball
    0
}

/// One batsman's line from a single innings.
#[derive(Debug, Clone, PartialEq)]
pub struct BattingLine {
    pub player_id: i64,
    pub name: Option<String>,
    pub runs: i64,
    pub balls: i64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BattingTotals {
    pub name: Option<String>,
    pub runs: i64,
    pub balls: i64,
    pub innings: i64,
}

/// Accumulates runs and balls for a fixed set of players over many scorecards.
#[derive(Debug, Default)]
pub struct StrikeRateTally {
    targets: HashSet<i64>,
    totals: BTreeMap<i64, BattingTotals>,
    scorecards: usize,
}

impl StrikeRateTally {
    pub fn new(targets: impl IntoIterator<Item = i64>) -> Self {
        Self {
            targets: targets.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Folds in every line of one scorecard. Lines for other players are ignored.
    pub fn add_scorecard(&mut self, lines: &[BattingLine]) {
        self.scorecards += 1;
        for line in lines {
            if !self.targets.contains(&line.player_id) {
                continue;
            }
            let totals = self.totals.entry(line.player_id).or_default();
            totals.runs += line.runs;
            totals.balls += line.balls;
            if line.balls > 0 {
                totals.innings += 1;
            }
            if totals.name.is_none() {
                totals.name = line.name.clone();
            }
        }
    }

    pub fn scorecards(&self) -> usize {
        self.scorecards
    }

    pub fn totals(&self) -> &BTreeMap<i64, BattingTotals> {
        &self.totals
    }

    /// Runs per hundred balls, rounded to two places. Players who never faced
    /// a ball are left out entirely.
    pub fn strike_rates(&self) -> BTreeMap<i64, f64> {
        self.totals
            .iter()
            .filter(|(_, totals)| totals.balls > 0)
            .map(|(id, totals)| {
                let rate = totals.runs as f64 / totals.balls as f64 * 100.0;
                (*id, round2(rate))
            })
            .collect()
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
