//! Match listings that are stored one row per match: recent results,
//! upcoming fixtures, a team's results and a venue's match history.

use serde_json::Value;

use crate::extract::{pick_int, pick_object, pick_text};
use crate::fields::{self, Keys};
use crate::flatten::live_match::{live_matches, match_details, LiveMatch};
use crate::flatten::series::format_millis;
use crate::models::{RecentMatchRecord, ScheduleRecord, TeamResultRecord, VenueMatchRecord};

/// List key of `teams/v1/{id}/results`.
pub const TEAM_RESULTS_LIST: &str = "teamMatchesData";
/// List key of `venues/v1/{id}/matches`.
pub const VENUE_MATCHES_LIST: &str = "matchDetails";

/// Latest innings of one side as `runs/wickets (overs ov)`. Missing parts
/// render as `-`.
pub fn score_summary(score: Option<&Value>, team: Keys) -> Option<String> {
    let innings = score.and_then(|score| pick_object(score, team))?.as_object()?;
    let latest = innings.values().filter(|inns| inns.is_object()).last()?;
    let part = |keys: Keys| pick_text(latest, keys).unwrap_or_else(|| "-".to_string());
    Some(format!(
        "{}/{} ({} ov)",
        part(fields::RUNS),
        part(fields::WICKETS),
        part(fields::OVERS)
    ))
}

fn team_name(info: &Value, role: &str) -> Option<String> {
    info.get(role).and_then(|team| pick_text(team, fields::TEAM_NAME))
}

fn millis(info: &Value, keys: Keys) -> Option<String> {
    pick_int(info, keys).and_then(format_millis)
}

fn venue(info: &Value) -> Option<&Value> {
    pick_object(info, fields::VENUE_INFO)
}

/// `ground, city`, or whichever of the two is known.
fn venue_label(info: &Value) -> Option<String> {
    let venue = venue(info)?;
    let parts: Vec<String> = [fields::GROUND, fields::CITY]
        .into_iter()
        .filter_map(|keys| pick_text(venue, keys))
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}

pub fn flatten_recent_match(entry: &LiveMatch<'_>, fetched_at: &str) -> Option<RecentMatchRecord> {
    let info = entry.info;
    Some(RecentMatchRecord {
        match_id: entry.match_id()?,
        match_type: entry.match_type.map(str::to_string),
        series_name: entry.series_name(),
        match_desc: pick_text(info, fields::MATCH_DESC),
        team1: team_name(info, "team1"),
        team2: team_name(info, "team2"),
        team1_score: score_summary(entry.score, fields::TEAM1_SCORE),
        team2_score: score_summary(entry.score, fields::TEAM2_SCORE),
        venue: venue_label(info),
        start_time: millis(info, fields::START_DATE),
        status: pick_text(info, fields::STATUS),
        fetched_at: fetched_at.to_string(),
    })
}

/// Rows of `matches/v1/recent`. Entries without a match id are dropped.
pub fn flatten_recent_matches(data: &Value, fetched_at: &str) -> Vec<RecentMatchRecord> {
    live_matches(data)
        .iter()
        .filter_map(|entry| flatten_recent_match(entry, fetched_at))
        .collect()
}

/// Rows of `matches/v1/upcoming`.
pub fn flatten_schedules(data: &Value, fetched_at: &str) -> Vec<ScheduleRecord> {
    live_matches(data)
        .iter()
        .filter_map(|entry| {
            let info = entry.info;
            let venue = venue(info);
            Some(ScheduleRecord {
                match_id: entry.match_id()?,
                match_type: entry.match_type.map(str::to_string),
                series_name: entry.series_name(),
                match_desc: pick_text(info, fields::MATCH_DESC),
                match_format: pick_text(info, fields::MATCH_FORMAT),
                start_time: millis(info, fields::START_DATE),
                team1: team_name(info, "team1"),
                team2: team_name(info, "team2"),
                venue: venue.and_then(|v| pick_text(v, fields::GROUND)),
                city: venue.and_then(|v| pick_text(v, fields::CITY)),
                status: pick_text(info, fields::STATUS),
                fetched_at: fetched_at.to_string(),
            })
        })
        .collect()
}

/// Rows of `teams/v1/{team_id}/results`.
pub fn flatten_team_results(data: &Value, team_id: i64, fetched_at: &str) -> Vec<TeamResultRecord> {
    match_details(data, TEAM_RESULTS_LIST)
        .iter()
        .filter_map(|entry| {
            let info = entry.info;
            Some(TeamResultRecord {
                team_id,
                match_id: entry.match_id()?,
                series_name: entry.series_name(),
                match_desc: pick_text(info, fields::MATCH_DESC),
                match_format: pick_text(info, fields::MATCH_FORMAT),
                team1: team_name(info, "team1"),
                team2: team_name(info, "team2"),
                team1_score: score_summary(entry.score, fields::TEAM1_SCORE),
                team2_score: score_summary(entry.score, fields::TEAM2_SCORE),
                start_time: millis(info, fields::START_DATE),
                status: pick_text(info, fields::STATUS),
                fetched_at: fetched_at.to_string(),
            })
        })
        .collect()
}

/// Rows of `venues/v1/{venue_id}/matches`. The venue id falls back to the
/// requested one when a match omits its venue block.
pub fn flatten_venue_matches(data: &Value, venue_id: i64) -> Vec<VenueMatchRecord> {
    match_details(data, VENUE_MATCHES_LIST)
        .iter()
        .filter_map(|entry| {
            let info = entry.info;
            let venue = venue(info);
            Some(VenueMatchRecord {
                match_id: entry.match_id()?,
                venue_id: venue.and_then(|v| pick_int(v, &["id"])).unwrap_or(venue_id),
                series_id: entry.series_id(),
                series_name: entry.series_name(),
                match_desc: pick_text(info, fields::MATCH_DESC),
                match_format: pick_text(info, fields::MATCH_FORMAT),
                start_time: millis(info, fields::START_DATE),
                end_time: millis(info, fields::END_DATE),
                team1: team_name(info, "team1"),
                team2: team_name(info, "team2"),
                venue_name: venue.and_then(|v| pick_text(v, fields::GROUND)),
                city: venue.and_then(|v| pick_text(v, fields::CITY)),
                country: venue.and_then(|v| pick_text(v, fields::COUNTRY)),
            })
        })
        .collect()
}
