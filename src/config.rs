use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_HOST: &str = "cricbuzz-cricket.p.rapidapi.com";
pub const DEFAULT_DB_PATH: &str = "cricbuzz.duckdb";
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 500;
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Recent scorecards scanned when aggregating strike rates.
pub const MAX_MATCHES_TO_FETCH: usize = 30;
/// Leading run scorers per leaderboard that get a strike rate.
pub const SR_PLAYER_LIMIT: usize = 15;

/// Leaderboard format codes accepted by the top-stats endpoint.
pub const MATCH_FORMATS: &[(u8, &str)] = &[(0, "All"), (1, "Test"), (2, "ODI"), (3, "T20I"), (4, "T20")];

pub fn format_name(code: u8) -> Option<&'static str> {
    MATCH_FORMATS
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, name)| *name)
}

pub const COMMENTARY_MATCH_IDS: &[i64] = &[
    113289, 113274, 113262, 113280, 113271, 113670, 113658, 113676, 113661, 133858, 133864,
    133869, 119852, 135101, 135090, 135096, 135079,
];

pub const PLAYER_PROFILE_IDS: &[i64] = &[
    8733, 576, 11808, 13940, 13866, 1413, 7915, 9428, 10896, 14504, 11813, 10636, 9129, 8257,
    14701, 9647, 11195, 12086, 587, 8683, 10945, 8808, 10744, 14691, 8271, 10276, 10808, 9311,
    10551, 14726, 8292, 13217, 24729, 14659, 10754, 12926,
];

pub const PLAYER_STATS_IDS: &[i64] = &[
    25, 104, 1413, 38, 102, 101, 35, 213, 29, 576, 27, 265, 247, 240, 105, 34, 36, 370, 3864, 3531,
];

/// Team whose results are loaded when no ids are given (India).
pub const TEAM_RESULT_IDS: &[i64] = &[2];

pub const VENUE_IDS: &[i64] = &[
    50, 80, 11, 154, 380, 81, 485, 27, 851, 76, 51, 511, 87, 31, 335, 512, 40,
];

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub key: String,
    pub host: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            host: DEFAULT_API_HOST.to_string(),
            base_url: base_url.into(),
            timeout: REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api: ApiConfig,
    pub db_path: PathBuf,
    pub request_delay: Duration,
}

impl Config {
    /// Reads the process environment. Call `dotenv().ok()` first to pick up a
    /// local `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Database location alone, for commands that never call the API.
    pub fn db_path_from_env() -> PathBuf {
        Self::db_path_from_lookup(|name| env::var(name).ok())
    }

    pub fn db_path_from_lookup<F>(lookup: F) -> PathBuf
    where
        F: Fn(&str) -> Option<String>,
    {
        lookup("CRICBUZZ_DB_PATH")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH))
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let key = get("RAPIDAPI_KEY").ok_or(ConfigError::Missing("RAPIDAPI_KEY"))?;
        let host = get("CRICBUZZ_API_HOST").unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        let base_url = get("CRICBUZZ_API_BASE").unwrap_or_else(|| format!("https://{host}"));

        let delay_ms = match get("CRICBUZZ_REQUEST_DELAY_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| ConfigError::Invalid {
                name: "CRICBUZZ_REQUEST_DELAY_MS",
                value: raw,
            })?,
            None => DEFAULT_REQUEST_DELAY_MS,
        };

        Ok(Self {
            api: ApiConfig {
                key,
                host,
                base_url: base_url.trim_end_matches('/').to_string(),
                timeout: REQUEST_TIMEOUT,
            },
            db_path: Self::db_path_from_lookup(&lookup),
            request_delay: Duration::from_millis(delay_ms),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_fill_everything_but_the_key() {
        let config = Config::from_lookup(lookup(&[("RAPIDAPI_KEY", "secret")])).unwrap();
        assert_eq!(config.api.key, "secret");
        assert_eq!(config.api.host, DEFAULT_API_HOST);
        assert_eq!(config.api.base_url, format!("https://{DEFAULT_API_HOST}"));
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_PATH));
        assert_eq!(config.request_delay, Duration::from_millis(500));
    }

    #[test]
    fn missing_key_is_an_error() {
        let err = Config::from_lookup(lookup(&[("RAPIDAPI_KEY", "  ")])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("RAPIDAPI_KEY")));
    }

    #[test]
    fn overrides_are_honoured() {
        let config = Config::from_lookup(lookup(&[
            ("RAPIDAPI_KEY", "k"),
            ("CRICBUZZ_API_BASE", "http://127.0.0.1:1234/"),
            ("CRICBUZZ_DB_PATH", "/tmp/x.duckdb"),
            ("CRICBUZZ_REQUEST_DELAY_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.api.base_url, "http://127.0.0.1:1234");
        assert_eq!(config.request_delay, Duration::ZERO);

        let bad = Config::from_lookup(lookup(&[("RAPIDAPI_KEY", "k"), ("CRICBUZZ_REQUEST_DELAY_MS", "soon")]));
        assert!(matches!(bad, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn db_path_needs_no_key() {
        assert_eq!(Config::db_path_from_lookup(lookup(&[])), PathBuf::from(DEFAULT_DB_PATH));
        let path = Config::db_path_from_lookup(lookup(&[("CRICBUZZ_DB_PATH", "/data/cricket.duckdb")]));
        assert_eq!(path, PathBuf::from("/data/cricket.duckdb"));
    }

    #[test]
    fn format_codes_resolve() {
        assert_eq!(format_name(2), Some("ODI"));
        assert_eq!(format_name(9), None);
    }
}
