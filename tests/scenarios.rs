// tests/scenarios.rs
//
// Payload fragments flattened and written to an in-memory store, checked
// through SQL.
use duckdb::params;
use serde_json::json;

use cricbuzz_loader::connect_duck_db::Store;
use cricbuzz_loader::flatten::commentary::flatten_live_commentary;
use cricbuzz_loader::flatten::live_match::{flatten_header, live_matches};
use cricbuzz_loader::flatten::scorecard::flatten_scorecard;

const STAMP: &str = "2024-12-27 10:00:00";

#[test]
fn team_without_id_is_still_recorded() {
    let data = json!([{
        "matchInfo": {
            "matchId": 555,
            "team1": { "teamName": "India" },
            "team2": { "teamId": 4, "teamName": "Australia" }
        }
    }]);
    let entries = live_matches(&data);
    let header = flatten_header(&entries[0], STAMP).unwrap();

    let mut store = Store::open_in_memory().unwrap();
    assert_eq!(store.write(header.teams).unwrap(), 2);

    let (name, id): (Option<String>, Option<i64>) = store
        .connection()
        .query_row(
            "SELECT team_name, team_id FROM live_teams WHERE team_role = ?",
            params!["team1"],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(name.as_deref(), Some("India"));
    assert_eq!(id, None);
}

#[test]
fn batsman_strings_become_numbers() {
    let card = json!({ "scorecard": [{
        "inningsid": 1,
        "batsman": [{ "id": 123, "name": "X", "runs": "45", "strkrate": "102.3" }]
    }]});
    let rows = flatten_scorecard(&card, 77, STAMP);

    let mut store = Store::open_in_memory().unwrap();
    store.write(rows.batsmen).unwrap();

    let (runs, rate): (i64, f64) = store
        .connection()
        .query_row(
            "SELECT runs, strike_rate FROM live_batting_stats WHERE batsman_id = 123",
            params![],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(runs, 45);
    assert_eq!(rate, 102.3);
}

#[test]
fn partnership_two_places_apart_is_not_adjacent() {
    let card = json!({ "scorecard": [{
        "inningsid": 1,
        "batsman": [
            { "id": 1, "runs": 0 },
            { "id": 2, "runs": 0 },
            { "id": 3, "runs": 20 },
            { "id": 4, "runs": 0 },
            { "id": 5, "runs": 11 }
        ],
        "partnership": [
            { "bat1id": 3, "bat2id": 5, "totalruns": 31 },
            { "bat1id": 1, "bat2id": 2, "totalruns": 0 }
        ]
    }]});
    let rows = flatten_scorecard(&card, 78, STAMP);

    let mut store = Store::open_in_memory().unwrap();
    store.write(rows.partnerships).unwrap();

    let adjacent = |bat1: i64| -> Option<bool> {
        store
            .connection()
            .query_row(
                "SELECT is_adjacent FROM live_partnerships WHERE bat1_id = ?",
                params![bat1],
                |row| row.get(0),
            )
            .unwrap()
    };
    assert_eq!(adjacent(3), None);
    assert_eq!(adjacent(1), Some(true));
}

#[test]
fn six_event_wins_over_text() {
    let feed = json!({ "comwrapper": [{ "commentary": {
        "inningsid": 2,
        "ballnbr": 87,
        "timestamp": 1_700_000_000_000_i64,
        "eventtype": "SIX",
        "commtxt": "huge hit for 6 runs"
    }}]});
    let rows = flatten_live_commentary(&feed, 79, STAMP);

    let mut store = Store::open_in_memory().unwrap();
    store.write(rows).unwrap();

    let runs: i64 = store
        .connection()
        .query_row("SELECT runs_scored FROM live_commentary", params![], |row| row.get(0))
        .unwrap();
    assert_eq!(runs, 6);
}

#[test]
fn reloading_the_same_match_does_not_duplicate() {
    let card = json!({ "scorecard": [{
        "inningsid": 1,
        "batsman": [{ "id": 9, "runs": 4 }, { "id": 9, "runs": 8 }]
    }]});

    let mut store = Store::open_in_memory().unwrap();
    for _ in 0..2 {
        store.write(flatten_scorecard(&card, 80, STAMP).batsmen).unwrap();
    }
    assert_eq!(store.row_count("live_batting_stats").unwrap(), 1);

    let runs: i64 = store
        .connection()
        .query_row("SELECT runs FROM live_batting_stats", params![], |row| row.get(0))
        .unwrap();
    assert_eq!(runs, 8);
}
