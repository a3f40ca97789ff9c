use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

use crate::extract::{as_text, pick, pick_list, pick_text, to_int};
use crate::fields;
use crate::models::VenueProfileRecord;

fn capacity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d[\d,]*").expect("static pattern compiles"))
}

/// Seating capacity from free text such as `"90,000"` or `"approx 24,000 seats"`.
pub fn parse_capacity(raw: &Value) -> Option<i64> {
    match raw {
        Value::String(text) => capacity_pattern()
            .find(text)
            .and_then(|m| m.as_str().replace(',', "").parse().ok()),
        other => to_int(other),
    }
}

/// Historical aggregates from `stats/v1/venue/{id}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueStats {
    pub total_matches: Option<i64>,
    pub matches_won_batting_first: Option<i64>,
    pub matches_won_bowling_first: Option<i64>,
    pub avg_first_inns: Option<i64>,
    pub avg_second_inns: Option<i64>,
    pub highest_total: Option<String>,
    pub lowest_total: Option<String>,
    pub highest_chased: Option<String>,
    pub lowest_defended: Option<String>,
}

/// Reads the `venueStats` key/value list. Keys are matched by substring,
/// case-insensitively; unparseable counts are stored as zero.
pub fn parse_venue_stats(data: &Value) -> VenueStats {
    let mut stats = VenueStats::default();

    for entry in pick_list(data, fields::VENUE_STATS) {
        let key = pick_text(entry, &["key"]).unwrap_or_default().to_lowercase();
        let value = pick(entry, &["value"]).and_then(as_text).unwrap_or_default();
        let count = || Some(value.trim().parse().unwrap_or(0));

        if key.contains("total matches") {
            stats.total_matches = count();
        } else if key.contains("matches won batting first") {
            stats.matches_won_batting_first = count();
        } else if key.contains("matches won bowling first") {
            stats.matches_won_bowling_first = count();
        } else if key.contains("avg. scores recorded") {
            // "1st inns-310\n2nd inns-337\n3rd inns-337\n4th inns-159"
            for line in value.lines() {
                let average = line.split('-').nth(1).and_then(|n| n.trim().parse().ok());
                if line.contains("1st inns-") {
                    stats.avg_first_inns = average;
                } else if line.contains("2nd inns-") {
                    stats.avg_second_inns = average;
                }
            }
        } else if key.contains("highest total recorded") {
            stats.highest_total = Some(value);
        } else if key.contains("lowest total recorded") {
            stats.lowest_total = Some(value);
        } else if key.contains("highest score chased") {
            stats.highest_chased = Some(value);
        } else if key.contains("lowest score defended") {
            stats.lowest_defended = Some(value);
        }
    }

    stats
}

/// Merges the venue profile with its stats. Missing ground names are
/// stored as `Unknown`.
pub fn flatten_venue_profile(venue_id: i64, basic: &Value, stats: VenueStats) -> VenueProfileRecord {
    VenueProfileRecord {
        venue_id,
        venue_name: Some(pick_text(basic, fields::GROUND).unwrap_or_else(|| "Unknown".to_string())),
        city: pick_text(basic, fields::CITY),
        country: pick_text(basic, fields::COUNTRY),
        timezone: pick_text(basic, fields::TIMEZONE),
        capacity: pick(basic, fields::CAPACITY).and_then(parse_capacity),
        ends: pick_text(basic, fields::ENDS),
        home_team: pick_text(basic, fields::HOME_TEAM),
        image_url: pick_text(basic, fields::IMAGE_URL),
        total_matches: stats.total_matches,
        matches_won_batting_first: stats.matches_won_batting_first,
        matches_won_bowling_first: stats.matches_won_bowling_first,
        avg_first_inns: stats.avg_first_inns,
        avg_second_inns: stats.avg_second_inns,
        highest_total: stats.highest_total,
        lowest_total: stats.lowest_total,
        highest_chased: stats.highest_chased,
        lowest_defended: stats.lowest_defended,
    }
}
