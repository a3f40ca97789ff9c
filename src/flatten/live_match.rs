use serde_json::Value;

use crate::extract::{
    is_present, pick, pick_bool, pick_float, pick_int, pick_list, pick_object, pick_text,
};
use crate::fields;
use crate::models::{
    InningsScore, MatchRecord, OfficialRecord, ScorecardMetaRecord, SeriesRecord, TeamRecord,
    VenueRecord,
};

/// A match entry of the live/recent list together with its score block,
/// when the payload carried one.
#[derive(Debug, Clone, Copy)]
pub struct LiveMatch<'a> {
    pub info: &'a Value,
    pub score: Option<&'a Value>,
    /// `matchType` of the enclosing group (International, League, ...).
    pub match_type: Option<&'a str>,
    /// The series wrapper or details map the match was listed under.
    pub group: Option<&'a Value>,
}

impl<'a> LiveMatch<'a> {
    fn from_entry(entry: &'a Value) -> Self {
        match entry.get("matchInfo") {
            Some(info) => Self { info, score: entry.get("matchScore"), match_type: None, group: None },
            None => Self { info: entry, score: None, match_type: None, group: None },
        }
    }

    fn within(mut self, match_type: Option<&'a str>, group: &'a Value) -> Self {
        self.match_type = match_type;
        self.group = Some(group);
        self
    }

    pub fn match_id(&self) -> Option<i64> {
        pick_int(self.info, fields::MATCH_ID)
    }

    /// Series name from the match itself, else from its group.
    pub fn series_name(&self) -> Option<String> {
        pick_text(self.info, fields::SERIES_NAME)
            .or_else(|| self.group.and_then(|group| pick_text(group, fields::GROUP_SERIES_NAME)))
    }

    pub fn series_id(&self) -> Option<i64> {
        pick_int(self.info, fields::SERIES_ID)
            .or_else(|| self.group.and_then(|group| pick_int(group, fields::SERIES_ID)))
    }
}

/// Every match in a live, recent or upcoming matches payload.
///
/// Accepts the nested `typeMatches -> seriesMatches -> seriesAdWrapper`
/// layout, a bare array, or an object with a flat `matches` array.
pub fn live_matches(data: &Value) -> Vec<LiveMatch<'_>> {
    if let Some(entries) = data.as_array() {
        return entries.iter().map(LiveMatch::from_entry).collect();
    }

    if let Some(type_matches) = data.get("typeMatches").and_then(Value::as_array) {
        let mut matches = Vec::new();
        for type_match in type_matches {
            let match_type = type_match.get("matchType").and_then(Value::as_str);
            let wrappers = pick_list(type_match, &["seriesMatches"])
                .iter()
                .filter_map(|series| series.get("seriesAdWrapper"));
            for wrapper in wrappers {
                matches.extend(
                    pick_list(wrapper, &["matches"])
                        .iter()
                        .map(|entry| LiveMatch::from_entry(entry).within(match_type, wrapper)),
                );
            }
        }
        return matches;
    }

    data.get("matches")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(LiveMatch::from_entry).collect())
        .unwrap_or_default()
}

/// Matches grouped by series under `<list_key>[].matchDetailsMap.match`, the
/// layout of the team results and venue matches endpoints.
pub fn match_details<'a>(data: &'a Value, list_key: &str) -> Vec<LiveMatch<'a>> {
    data.get(list_key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|detail| detail.get("matchDetailsMap"))
        .flat_map(|map| {
            pick_list(map, &["match"])
                .iter()
                .filter(|entry| entry.get("matchInfo").is_some_and(is_present))
                .map(move |entry| LiveMatch::from_entry(entry).within(None, map))
        })
        .collect()
}

/// Everything derivable from one match header without further requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchHeader {
    pub info: MatchRecord,
    pub venue: Option<VenueRecord>,
    pub teams: Vec<TeamRecord>,
    pub officials: Vec<OfficialRecord>,
    pub series: Option<SeriesRecord>,
}

/// `None` when the entry has no match id.
pub fn flatten_header(entry: &LiveMatch<'_>, fetched_at: &str) -> Option<MatchHeader> {
    let info = flatten_match(entry)?;
    let match_id = info.match_id;
    let raw = entry.info;

    let venue = pick_object(raw, fields::VENUE_INFO).and_then(|venue| flatten_venue(venue, match_id));

    let teams = ["team1", "team2"]
        .iter()
        .filter_map(|role| raw.get(*role).and_then(|team| flatten_team(team, match_id, role)))
        .collect();

    let officials = ["umpire1", "umpire2", "umpire3", "referee"]
        .iter()
        .filter_map(|role| raw.get(*role).and_then(|person| flatten_official(person, match_id, role)))
        .collect();

    let series = flatten_series(raw, match_id, fetched_at);

    Some(MatchHeader { info, venue, teams, officials, series })
}

pub fn flatten_match(entry: &LiveMatch<'_>) -> Option<MatchRecord> {
    let raw = entry.info;
    let match_id = entry.match_id()?;

    let mut record = MatchRecord {
        match_id,
        series_id: pick_int(raw, fields::SERIES_ID),
        series_name: pick_text(raw, fields::SERIES_NAME),
        match_desc: pick_text(raw, fields::MATCH_DESC),
        match_format: pick_text(raw, fields::MATCH_FORMAT),
        state: pick_text(raw, fields::STATE),
        status: pick_text(raw, fields::STATUS),
        curr_bat_team_id: pick_int(raw, fields::CURR_BAT_TEAM_ID),
        toss_status: pick_text(raw, fields::TOSS_STATUS),
        ..MatchRecord::default()
    };

    if let Some(score) = entry.score {
        for (team, keys) in [(1u8, fields::TEAM1_SCORE), (2u8, fields::TEAM2_SCORE)] {
            let Some(team_score) = pick(score, keys) else { continue };
            for (innings, keys) in [(1u8, fields::INNINGS1), (2u8, fields::INNINGS2)] {
                record.set_innings(team, innings, flatten_innings(pick(team_score, keys)));
            }
        }
    }

    Some(record)
}

/// Innings that have not been batted yet come back with every field unset.
pub fn flatten_innings(innings: Option<&Value>) -> InningsScore {
    match innings.filter(|value| is_present(value)) {
        Some(raw) => InningsScore {
            runs: pick_int(raw, fields::RUNS),
            wickets: pick_int(raw, fields::WICKETS),
            overs: pick_float(raw, fields::OVERS),
            declared: Some(pick_bool(raw, fields::DECLARED).unwrap_or(false)),
        },
        None => InningsScore::default(),
    }
}

pub fn flatten_venue(venue: &Value, match_id: i64) -> Option<VenueRecord> {
    if !is_present(venue) {
        return None;
    }
    Some(VenueRecord {
        match_id,
        venue_id: pick_int(venue, &["id"]),
        ground: pick_text(venue, fields::GROUND),
        city: pick_text(venue, fields::CITY),
        country: pick_text(venue, fields::COUNTRY),
        timezone: pick_text(venue, fields::TIMEZONE),
        latitude: pick_text(venue, fields::LATITUDE),
        longitude: pick_text(venue, fields::LONGITUDE),
    })
}

pub fn flatten_team(team: &Value, match_id: i64, role: &str) -> Option<TeamRecord> {
    if !is_present(team) {
        return None;
    }
    Some(TeamRecord {
        match_id,
        team_role: role.to_string(),
        team_id: pick_int(team, fields::TEAM_ID),
        team_name: pick_text(team, fields::TEAM_NAME),
        team_sname: pick_text(team, fields::TEAM_SHORT_NAME),
    })
}

pub fn flatten_official(official: &Value, match_id: i64, role: &str) -> Option<OfficialRecord> {
    let official_id = pick_int(official, &["id"]).filter(|id| *id != 0)?;
    Some(OfficialRecord {
        match_id,
        role: role.to_string(),
        official_id,
        name: pick_text(official, fields::NAME),
        country: pick_text(official, fields::COUNTRY),
    })
}

pub fn flatten_series(raw: &Value, match_id: i64, fetched_at: &str) -> Option<SeriesRecord> {
    let series_id = pick_int(raw, fields::SERIES_ID)?;
    Some(SeriesRecord {
        series_id,
        series_name: pick_text(raw, fields::SERIES_NAME),
        match_type: pick_text(raw, fields::MATCH_TYPE),
        series_type: pick_text(raw, fields::SERIES_TYPE),
        match_id,
        series_start_dt: pick_text(raw, fields::SERIES_START),
        series_end_dt: pick_text(raw, fields::SERIES_END),
        fetched_at: fetched_at.to_string(),
    })
}

/// Completion flag and status line from a scorecard response.
pub fn flatten_scorecard_meta(scorecard: &Value, match_id: i64) -> Option<ScorecardMetaRecord> {
    if !is_present(scorecard) {
        return None;
    }
    Some(ScorecardMetaRecord {
        match_id,
        is_match_complete: pick_bool(scorecard, fields::MATCH_COMPLETE).unwrap_or(false),
        match_status: pick_text(scorecard, fields::STATUS),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested_payload() -> Value {
        json!({
            "typeMatches": [{
                "matchType": "International",
                "seriesMatches": [
                    { "adDetail": { "name": "ad" } },
                    { "seriesAdWrapper": {
                        "seriesId": 7,
                        "matches": [{
                            "matchInfo": {
                                "matchId": 101,
                                "seriesId": 7,
                                "seriesName": "Border-Gavaskar Trophy",
                                "matchFormat": "TEST",
                                "state": "In Progress",
                                "status": "Day 2: Stumps",
                                "team1": { "teamId": 2, "teamName": "India", "teamSName": "IND" },
                                "team2": { "teamId": 4, "teamName": "Australia", "teamSName": "AUS" },
                                "venueInfo": { "id": 11, "ground": "MCG", "city": "Melbourne", "timezone": "+11:00" },
                                "umpire1": { "id": 9001, "name": "Umpire One", "country": "ENG" },
                                "umpire2": { "name": "No Id" },
                                "referee": { "id": 9003, "name": "Ref" }
                            },
                            "matchScore": {
                                "team1Score": { "inngs1": { "runs": "369", "wickets": 10, "overs": "119.3", "isDeclared": false } },
                                "team2Score": { "inngs1": { "runs": 474, "wickets": "10", "overs": 122.4 } }
                            }
                        }]
                    }}
                ]
            }]
        })
    }

    #[test]
    fn walks_nested_layout() {
        let data = nested_payload();
        let matches = live_matches(&data);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_id(), Some(101));
        assert!(matches[0].score.is_some());
    }

    #[test]
    fn accepts_flat_layouts() {
        let array = json!([{ "matchid": 1 }, { "matchId": 2 }]);
        assert_eq!(live_matches(&array).len(), 2);
        let flat = json!({ "matches": [{ "matchInfo": { "matchId": 3 } }] });
        assert_eq!(live_matches(&flat)[0].match_id(), Some(3));
        assert!(live_matches(&json!({ "unexpected": true })).is_empty());
    }

    #[test]
    fn header_flattens_all_entities() {
        let data = nested_payload();
        let entry = live_matches(&data)[0];
        let header = flatten_header(&entry, "2024-12-27 10:00:00").unwrap();

        assert_eq!(header.info.match_id, 101);
        assert_eq!(header.info.team1_inngs1_runs, Some(369));
        assert_eq!(header.info.team1_inngs1_overs, Some(119.3));
        assert_eq!(header.info.team1_inngs1_declared, Some(false));
        assert_eq!(header.info.team2_inngs1_wickets, Some(10));
        assert_eq!(header.info.team2_inngs2_runs, None);
        assert_eq!(header.info.team2_inngs2_declared, None);

        let venue = header.venue.unwrap();
        assert_eq!((venue.venue_id, venue.ground.as_deref()), (Some(11), Some("MCG")));

        assert_eq!(header.teams.len(), 2);
        assert_eq!(header.teams[1].team_sname.as_deref(), Some("AUS"));

        let roles: Vec<&str> = header.officials.iter().map(|o| o.role.as_str()).collect();
        assert_eq!(roles, ["umpire1", "referee"]);

        let series = header.series.unwrap();
        assert_eq!((series.series_id, series.match_id), (7, 101));
    }

    #[test]
    fn team_without_id_keeps_its_name() {
        let team = json!({ "teamName": "India" });
        let record = flatten_team(&team, 55, "team1").unwrap();
        assert_eq!(record.team_name.as_deref(), Some("India"));
        assert_eq!(record.team_id, None);
        assert!(flatten_team(&json!({}), 55, "team2").is_none());
    }

    #[test]
    fn nested_entries_keep_their_group() {
        let data = nested_payload();
        let entry = live_matches(&data)[0];
        assert_eq!(entry.match_type, Some("International"));
        assert_eq!(entry.group.and_then(|group| group.get("seriesId")), Some(&json!(7)));
        assert_eq!(entry.series_name().as_deref(), Some("Border-Gavaskar Trophy"));
    }

    #[test]
    fn details_maps_supply_series_fields() {
        let data = json!({ "matchDetails": [
            { "matchDetailsMap": {
                "key": "Asia Cup 2023",
                "seriesId": 6732,
                "match": [
                    { "matchInfo": { "matchId": 75470, "matchDesc": "Final" } },
                    { "matchInfo": {} }
                ]
            }},
            { "adDetail": { "name": "ad" } }
        ]});
        let entries = match_details(&data, "matchDetails");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].match_id(), Some(75470));
        assert_eq!(entries[0].series_name().as_deref(), Some("Asia Cup 2023"));
        assert_eq!(entries[0].series_id(), Some(6732));
        assert!(match_details(&json!({}), "matchDetails").is_empty());
    }

    #[test]
    fn entry_without_match_id_is_dropped() {
        let entry = json!({ "seriesName": "Orphan" });
        assert!(flatten_header(&LiveMatch::from_entry(&entry), "now").is_none());
    }

    #[test]
    fn scorecard_meta_defaults_incomplete() {
        let meta = flatten_scorecard_meta(&json!({ "status": "Live" }), 5).unwrap();
        assert!(!meta.is_match_complete);
        assert_eq!(meta.match_status.as_deref(), Some("Live"));
        let done = flatten_scorecard_meta(&json!({ "ismatchcomplete": true }), 5).unwrap();
        assert!(done.is_match_complete);
    }
}
