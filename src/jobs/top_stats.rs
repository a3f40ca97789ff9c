use anyhow::Result;
use serde_json::Value;
use std::ops::RangeInclusive;
use tracing::{debug, error, info, warn};

use crate::config::{format_name, MAX_MATCHES_TO_FETCH, SR_PLAYER_LIMIT};
use crate::connect_duck_db::Store;
use crate::derive::{BattingLine, StrikeRateTally};
use crate::error::FetchError;
use crate::flatten::fetched_at;
use crate::flatten::live_match::live_matches;
use crate::flatten::scorecard::batting_lines;
use crate::flatten::top_stats::{
    apply_strike_rates, parse_batting_leaders, parse_bowling_leaders, top_run_scorers, MOST_RUNS,
    MOST_WICKETS,
};
use crate::jobs::recent::RECENT_MATCHES;
use crate::jobs::JobContext;

#[derive(Debug, Clone)]
pub struct TopStatsOptions {
    pub years: RangeInclusive<i64>,
    pub formats: Vec<u8>,
    pub strike_rates: bool,
}

impl Default for TopStatsOptions {
    fn default() -> Self {
        Self { years: 2020..=2025, formats: vec![0], strike_rates: true }
    }
}

/// One leaderboard request. A 500 means the board does not exist for that
/// year and format, which is not worth more than a warning.
fn fetch_board(
    ctx: &JobContext,
    stats_type: &str,
    year: i64,
    format: u8,
    format_label: &str,
) -> Option<Value> {
    let query = [("statsType", stats_type.to_string()), ("year", year.to_string())];
    let label = format!("{stats_type} {year} {format_label}");
    match ctx.api.get_json(&format!("stats/v1/topstats/{format}"), &query, &label) {
        Ok(body) => Some(body),
        Err(FetchError::Status { status: 500, .. }) => {
            warn!("{stats_type} not available for {year}/{format_label}");
            None
        }
        Err(e) => {
            error!("Error fetching {stats_type} for {year}: {e}");
            None
        }
    }
}

/// Ids of recent matches, newest first, capped at `limit`. An unavailable
/// list yields no ids.
pub fn recent_match_ids(ctx: &JobContext, limit: usize) -> Vec<i64> {
    match ctx.api.get_json(RECENT_MATCHES, &[], "recent matches") {
        Ok(data) => live_matches(&data)
            .iter()
            .filter_map(|entry| entry.match_id())
            .take(limit)
            .collect(),
        Err(e) => {
            warn!("Could not fetch recent matches: {e}");
            Vec::new()
        }
    }
}

/// Scorecards of recent matches, fetched at most once per run and reused for
/// every leaderboard.
#[derive(Debug, Default)]
struct ScorecardCache {
    loaded: bool,
    scorecards: Vec<Vec<BattingLine>>,
}

impl ScorecardCache {
    fn batting(&mut self, ctx: &JobContext) -> &[Vec<BattingLine>] {
        if !self.loaded {
            self.loaded = true;
            let ids = recent_match_ids(ctx, MAX_MATCHES_TO_FETCH);
            info!("Processing {} recent matches for strike rates", ids.len());
            for (index, match_id) in ids.iter().enumerate() {
                if index > 0 && index % 10 == 0 {
                    info!("  Progress: {index}/{} matches processed", ids.len());
                }
                let path = format!("mcenter/v1/{match_id}/scard");
                match ctx.api.get_json(&path, &[], &format!("scorecard for match {match_id}")) {
                    Ok(scard) => self.scorecards.push(batting_lines(&scard)),
                    Err(e) => debug!("Could not fetch scorecard for match {match_id}: {e}"),
                }
                ctx.pause();
            }
            info!("Fetched {} scorecards", self.scorecards.len());
        }
        &self.scorecards
    }
}

pub fn run(ctx: &JobContext, store: &mut Store, options: &TopStatsOptions) -> Result<()> {
    let mut batting = Vec::new();
    let mut bowling = Vec::new();
    let mut cache = ScorecardCache::default();

    for year in options.years.clone() {
        for &format in &options.formats {
            let Some(format_label) = format_name(format) else {
                warn!("Unknown format code {format}, skipped");
                continue;
            };
            let stamp = fetched_at();
            info!("Year {year}, format {format_label}");

            if let Some(board) = fetch_board(ctx, MOST_RUNS, year, format, format_label) {
                let mut records = parse_batting_leaders(&board, year, format_label, &stamp);
                info!("  {} batting records", records.len());

                let targets = top_run_scorers(&records, SR_PLAYER_LIMIT);
                if options.strike_rates && !targets.is_empty() {
                    let mut tally = StrikeRateTally::new(targets);
                    for lines in cache.batting(ctx) {
                        tally.add_scorecard(lines);
                    }
                    let rates = tally.strike_rates();
                    let matched = apply_strike_rates(&mut records, &rates);
                    if matched > 0 {
                        info!("  Strike rates added for {matched} players");
                    } else {
                        warn!("  Could not match any strike rates");
                    }
                }
                batting.extend(records);
            }
            ctx.pause();

            if let Some(board) = fetch_board(ctx, MOST_WICKETS, year, format, format_label) {
                let records = parse_bowling_leaders(&board, year, format_label, &stamp);
                info!("  {} bowling records", records.len());
                bowling.extend(records);
            }
            ctx.pause();
        }
    }

    let with_rate = batting.iter().filter(|r| r.strike_rate.is_some()).count();
    info!("Strike rates on {with_rate}/{} batting records", batting.len());

    store.write(batting)?;
    store.write(bowling)?;
    Ok(())
}
