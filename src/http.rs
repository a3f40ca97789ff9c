use chrono::Local;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::ApiConfig;
use crate::error::FetchError;

/// Transport-level retry for transient failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub backoff: Duration,
    pub statuses: &'static [u16],
}

impl RetryPolicy {
    pub const RETRYABLE: &'static [u16] = &[429, 500, 502, 503, 504];

    /// Three retries, 0.5s doubling each time.
    pub fn standard() -> Self {
        Self {
            retries: 3,
            backoff: Duration::from_millis(500),
            statuses: Self::RETRYABLE,
        }
    }

    pub fn none() -> Self {
        Self {
            retries: 0,
            backoff: Duration::ZERO,
            statuses: &[],
        }
    }

    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

/// Builds the blocking client every job shares: API key headers and a timeout.
pub fn build_client(api: &ApiConfig) -> Result<Client, FetchError> {
    let mut headers = HeaderMap::new();
    let key = HeaderValue::from_str(&api.key).map_err(|e| FetchError::Client(e.to_string()))?;
    let host = HeaderValue::from_str(&api.host).map_err(|e| FetchError::Client(e.to_string()))?;
    headers.insert("x-rapidapi-key", key);
    headers.insert("x-rapidapi-host", host);

    Client::builder()
        .default_headers(headers)
        .timeout(api.timeout)
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
    dump_dir: Option<PathBuf>,
}

impl ApiClient {
    pub fn new(api: &ApiConfig, retry: RetryPolicy) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(api)?,
            base_url: api.base_url.trim_end_matches('/').to_string(),
            retry,
            dump_dir: None,
        })
    }

    /// Saves every successful payload as pretty JSON under `dir`.
    pub fn with_dump_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dump_dir = Some(dir.into());
        self
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// GETs `path` relative to the API base and decodes the body as JSON.
    pub fn get_json(&self, path: &str, query: &[(&str, String)], label: &str) -> Result<Value, FetchError> {
        let url = self.url(path);
        let mut attempt = 0;

        let response = loop {
            let result = self.client.get(&url).query(query).send();
            let retryable = match &result {
                Ok(response) => self.retry.statuses.contains(&response.status().as_u16()),
                Err(e) => e.is_timeout() || e.is_connect(),
            };

            if retryable && attempt < self.retry.retries {
                let wait = self.retry.delay_for(attempt);
                attempt += 1;
                match &result {
                    Ok(response) => warn!("{label}: HTTP {} - retry {attempt} in {wait:?}", response.status()),
                    Err(e) => warn!("{label}: {e} - retry {attempt} in {wait:?}"),
                }
                thread::sleep(wait);
                continue;
            }

            break result.map_err(|source| FetchError::Network { url: url.clone(), source })?;
        };

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url, status: status.as_u16() });
        }

        let body: Value = response
            .json()
            .map_err(|source| FetchError::Decode { url: url.clone(), source })?;
        info!("Fetched {label}");

        if let Some(dir) = &self.dump_dir {
            self.dump(dir, label, &body);
        }
        Ok(body)
    }

    fn dump(&self, dir: &Path, label: &str, body: &Value) {
        let name = format!(
            "{}_{}.json",
            label.replace(&[' ', '/'][..], "_"),
            Local::now().format("%Y%m%d_%H%M%S%3f")
        );
        let path = dir.join(name);
        let written = fs::create_dir_all(dir).and_then(|_| {
            let pretty = serde_json::to_string_pretty(body).unwrap_or_default();
            fs::write(&path, pretty)
        });
        match written {
            Ok(()) => debug!("Saved debug response to {}", path.display()),
            Err(e) => warn!("Could not save debug response to {}: {e}", path.display()),
        }
    }
}

/// The value under a required top-level key, or `MissingKey`.
pub fn require<'a>(body: &'a Value, key: &str, url: &str) -> Result<&'a Value, FetchError> {
    body.get(key).filter(|v| !v.is_null()).ok_or_else(|| FetchError::MissingKey {
        url: url.to_string(),
        key: key.to_string(),
    })
}
