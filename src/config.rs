use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_API_URL: &str = "https://api.airtable.com/v0";
pub const DEFAULT_LOG_FILE: &str = "remote-todos.log";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the remote record store, read once at start-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub base_id: String,
    pub table_name: String,
    pub token: String,
    pub request_timeout: Duration,
    pub log_file: String,
}

impl Config {
    /// Reads `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{key} must be set"))
        };
        let request_timeout = match lookup("TODO_REQUEST_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(raw.trim().parse().with_context(|| format!("invalid TODO_REQUEST_TIMEOUT_SECS: {raw}"))?),
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };
        Ok(Self {
            api_url: lookup("AIRTABLE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            base_id: required("AIRTABLE_BASE_ID")?,
            table_name: required("AIRTABLE_TABLE_NAME")?,
            token: required("AIRTABLE_TOKEN")?,
            request_timeout,
            log_file: lookup("TODO_LOG_FILE").unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        })
    }

    /// Collection endpoint: `<api_url>/<base_id>/<table_name>`, segments percent-encoded.
    pub fn endpoint(&self) -> Result<reqwest::Url> {
        let mut url = reqwest::Url::parse(&self.api_url).with_context(|| format!("invalid AIRTABLE_API_URL: {}", self.api_url))?;
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("AIRTABLE_API_URL cannot be a base: {}", self.api_url))?
            .pop_if_empty()
            .push(&self.base_id)
            .push(&self.table_name);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_and_endpoint() {
        let config = Config::from_lookup(lookup(&[
            ("AIRTABLE_BASE_ID", "appXYZ"),
            ("AIRTABLE_TABLE_NAME", "Todos List"),
            ("AIRTABLE_TOKEN", "pat123"),
        ]))
        .unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
        assert_eq!(config.endpoint().unwrap().as_str(), "https://api.airtable.com/v0/appXYZ/Todos%20List");
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::from_lookup(lookup(&[("AIRTABLE_BASE_ID", "a"), ("AIRTABLE_TABLE_NAME", "b")])).unwrap_err();
        assert!(err.to_string().contains("AIRTABLE_TOKEN"));
    }

    #[test]
    fn bad_timeout_is_an_error() {
        let result = Config::from_lookup(lookup(&[
            ("AIRTABLE_BASE_ID", "a"),
            ("AIRTABLE_TABLE_NAME", "b"),
            ("AIRTABLE_TOKEN", "c"),
            ("TODO_REQUEST_TIMEOUT_SECS", "soon"),
        ]));
        assert!(result.is_err());
    }
}
