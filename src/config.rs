use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{QuizError, Result};
use crate::retry::RetryConfig;

pub const DEFAULT_API_URL: &str = "https://the-trivia-api.com/api/questions";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub record_path: PathBuf,
    pub retry: RetryConfig,
    pub request_timeout: Duration,
}

impl Config {
    /// Reads `TRIVIA_*` variables; call `dotenv` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = RetryConfig::default();

        let api_url = lookup("TRIVIA_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let record_path = lookup("TRIVIA_RECORD_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(default_record_path);

        let max_attempts = parse_or(&lookup, "TRIVIA_RETRY_ATTEMPTS", defaults.max_attempts)?;
        if max_attempts == 0 {
            return Err(QuizError::Config(
                "TRIVIA_RETRY_ATTEMPTS must be at least 1".to_string(),
            ));
        }
        let delay = Duration::from_secs(parse_or(
            &lookup,
            "TRIVIA_RETRY_DELAY_SECS",
            defaults.delay.as_secs(),
        )?);
        let request_timeout = Duration::from_secs(parse_or(
            &lookup,
            "TRIVIA_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        )?);

        Ok(Self {
            api_url,
            record_path,
            retry: RetryConfig {
                max_attempts,
                delay,
            },
            request_timeout,
        })
    }
}

fn default_record_path() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join("rust-trivia").join("record.json"))
        .unwrap_or_else(|| PathBuf::from("record.json"))
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| QuizError::Config(format!("{} has an invalid value: {:?}", key, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.retry.max_attempts, 6);
        assert_eq!(config.retry.delay, Duration::from_secs(3));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.record_path.ends_with("record.json"));
    }

    #[test]
    fn variables_override_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("TRIVIA_API_URL", "http://localhost:8080/questions"),
            ("TRIVIA_RECORD_PATH", "/tmp/trivia/best.json"),
            ("TRIVIA_RETRY_ATTEMPTS", "2"),
            ("TRIVIA_RETRY_DELAY_SECS", " 0 "),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "http://localhost:8080/questions");
        assert_eq!(config.record_path, PathBuf::from("/tmp/trivia/best.json"));
        assert_eq!(config.retry.max_attempts, 2);
        assert_eq!(config.retry.delay, Duration::ZERO);
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let result = Config::from_lookup(lookup_from(&[("TRIVIA_RETRY_ATTEMPTS", "many")]));
        assert!(matches!(result, Err(QuizError::Config(_))));

        let result = Config::from_lookup(lookup_from(&[("TRIVIA_RETRY_ATTEMPTS", "0")]));
        assert!(matches!(result, Err(QuizError::Config(_))));
    }
}
