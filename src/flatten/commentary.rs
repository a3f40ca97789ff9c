use serde_json::Value;

use crate::derive::infer_runs;
use crate::extract::{is_present, pick, pick_float, pick_int, pick_list, pick_object, pick_text};
use crate::fields;
use crate::models::{CommentaryRecord, MatchCommentaryRecord};

/// The commentary lines of a feed, unwrapped from their list entries.
///
/// Entries wrap the line in a `commentary` object; bare lines are accepted
/// when they carry commentary text themselves. Anything else (ads, empty
/// wrappers) is skipped.
pub fn commentary_items(feed: &Value) -> Vec<&Value> {
    pick_list(feed, fields::COMMENTARY_LIST)
        .iter()
        .filter_map(|entry| match entry.get("commentary") {
            Some(line) if is_present(line) => Some(line),
            Some(_) => None,
            None => pick(entry, fields::COMM_TEXT).map(|_| entry),
        })
        .collect()
}

/// The ball-level fields shared by both commentary tables.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentaryLine {
    pub innings_id: Option<i64>,
    pub innings_name: Option<String>,
    pub over_number: Option<f64>,
    pub ball_number: Option<i64>,
    pub timestamp: Option<i64>,
    pub event_type: Option<String>,
    pub text: String,
    pub runs_scored: i64,
    pub bat_team_score: Option<i64>,
}

pub fn flatten_commentary_line(line: &Value) -> CommentaryLine {
    let text = pick_text(line, fields::COMM_TEXT).unwrap_or_default();
    let event_type = pick_text(line, fields::EVENT_TYPE);
    let runs_scored = infer_runs(event_type.as_deref(), &text);

    CommentaryLine {
        innings_id: pick_int(line, fields::INNINGS_ID),
        innings_name: pick_text(line, fields::INNINGS_NAME),
        over_number: pick_float(line, fields::OVER_NUMBER),
        ball_number: pick_int(line, fields::BALL_NUMBER),
        timestamp: pick_int(line, fields::TIMESTAMP),
        event_type,
        text,
        runs_scored,
        bat_team_score: pick_int(line, fields::BAT_TEAM_SCORE),
    }
}

/// Rows for `live_commentary` from one match's commentary feed.
pub fn flatten_live_commentary(feed: &Value, match_id: i64, fetched_at: &str) -> Vec<CommentaryRecord> {
    commentary_items(feed)
        .into_iter()
        .map(|raw| {
            let line = flatten_commentary_line(raw);
            CommentaryRecord {
                match_id,
                innings: line.innings_id,
                over_number: line.over_number,
                ball_number: line.ball_number,
                timestamp: line.timestamp,
                event_type: line.event_type,
                commentary_text: line.text,
                runs_scored: line.runs_scored,
                bat_team_score: line.bat_team_score,
                toss_winner: pick_text(raw, fields::TOSS_WINNER_NAME),
                fetched_at: fetched_at.to_string(),
            }
        })
        .collect()
}

/// Match-level columns repeated on every `match_commentary` row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentaryHeader {
    pub series_id: Option<i64>,
    pub series_name: Option<String>,
    pub match_desc: Option<String>,
    pub format: Option<String>,
    pub state: Option<String>,
    pub status: Option<String>,
    pub team1_id: Option<i64>,
    pub team1_name: Option<String>,
    pub team2_id: Option<i64>,
    pub team2_name: Option<String>,
    pub toss_winner_id: Option<i64>,
    pub toss_winner_name: Option<String>,
    pub toss_decision: Option<String>,
    pub winning_team_id: Option<i64>,
}

/// Reads the match centre response. The header block sits under
/// `matchInfo` or `matchheaders`; a response without either is read as the
/// header itself.
pub fn flatten_commentary_header(info: &Value) -> CommentaryHeader {
    let header = pick_object(info, fields::MATCH_HEADER).unwrap_or(info);
    let team = |side: &str| header.get(side).filter(|team| is_present(team));
    let team_id = |side: &str| team(side).and_then(|t| pick_int(t, fields::HEADER_TEAM_ID));
    let team_name = |side: &str| team(side).and_then(|t| pick_text(t, fields::HEADER_TEAM_NAME));
    let toss = pick_object(header, fields::TOSS_RESULTS);

    CommentaryHeader {
        series_id: pick_int(header, fields::SERIES_ID),
        series_name: pick_text(header, fields::SERIES_NAME),
        match_desc: pick_text(header, fields::MATCH_DESC),
        format: pick_text(header, fields::MATCH_FORMAT),
        state: pick_text(header, fields::STATE),
        status: pick_text(header, fields::STATUS),
        team1_id: team_id("team1"),
        team1_name: team_name("team1"),
        team2_id: team_id("team2"),
        team2_name: team_name("team2"),
        toss_winner_id: toss.and_then(|t| pick_int(t, fields::TOSS_WINNER_ID)),
        toss_winner_name: toss.and_then(|t| pick_text(t, fields::TOSS_WINNER_NAME)),
        toss_decision: toss.and_then(|t| pick_text(t, fields::TOSS_DECISION)),
        winning_team_id: pick_int(header, fields::WINNING_TEAM_ID),
    }
}

/// Rows for `match_commentary`: every line of `feed` joined with the match
/// centre header in `info`.
pub fn flatten_match_commentary(match_id: i64, info: &Value, feed: &Value) -> Vec<MatchCommentaryRecord> {
    let header = flatten_commentary_header(info);

    commentary_items(feed)
        .into_iter()
        .map(|raw| {
            let line = flatten_commentary_line(raw);
            let header = header.clone();
            MatchCommentaryRecord {
                match_id,
                series_id: header.series_id,
                series_name: header.series_name,
                match_desc: header.match_desc,
                format: header.format,
                state: header.state,
                status: header.status,
                team1_id: header.team1_id,
                team1_name: header.team1_name,
                team2_id: header.team2_id,
                team2_name: header.team2_name,
                toss_winner_id: header.toss_winner_id,
                toss_winner_name: header.toss_winner_name,
                toss_decision: header.toss_decision,
                winning_team_id: header.winning_team_id,
                innings_id: line.innings_id,
                innings_name: line.innings_name,
                over_number: line.over_number,
                ball_number: line.ball_number,
                event_type: line.event_type,
                commentary_text: line.text,
                runs_scored: line.runs_scored,
                timestamp: line.timestamp,
                bat_team_score: line.bat_team_score,
            }
        })
        .collect()
}
