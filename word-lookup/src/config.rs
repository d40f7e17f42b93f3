//! Settings read from the environment (and a `.env` file when present).
//!
//! - `DICTIONARY_API_URL` - base of the entries endpoint
//!   (default: `https://api.dictionaryapi.dev/api/v2/entries/en/`)
//! - `LOG_FORMAT` - `text` or `json` (default: `text`)
//! - `RUST_LOG` - tracing filter (default: `error`)

use std::{env, str::FromStr};

use anyhow::{bail, Context, Result};

pub const DEFAULT_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";
/// Failed lookups are already on screen, so only errors are logged unless `RUST_LOG` asks.
pub const DEFAULT_LOG_FILTER: &str = "error";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => bail!("unknown log format {other:?}, expected `text` or `json`"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // a missing .env is the normal case
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("DICTIONARY_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let log_format = match lookup("LOG_FORMAT") {
            Some(format) => format.parse().context("invalid LOG_FORMAT")?,
            None => LogFormat::default(),
        };
        Ok(Self {
            api_url,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn variables_override_defaults() {
        let config = config(&[
            ("DICTIONARY_API_URL", "http://localhost:8080/entries/"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/entries/");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn blank_api_url_falls_back() {
        let config = config(&[("DICTIONARY_API_URL", "  ")]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(config(&[("LOG_FORMAT", "xml")]).is_err());
    }
}
