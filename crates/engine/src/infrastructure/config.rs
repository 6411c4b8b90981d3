//! Runtime configuration read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ROLODEX_TOTAL_ROUNDS` | 5 |
//! | `ROLODEX_CORRECT_ADVANCE_MS` | 1200 |
//! | `ROLODEX_INCORRECT_CLEAR_MS` | 700 |
//! | `ROLODEX_CONTACTS_PATH` | `contacts.json` |
//! | `ROLODEX_FILTER_PATH` | `filter.json` |
//! | `ROLODEX_SEED` | unset (system randomness) |
//!
//! A variable that is present but malformed is an error rather than a silent
//! fallback to the default.

use std::path::PathBuf;
use std::time::Duration;

use rolodex_domain::{DomainError, SessionSettings};
use rolodex_domain::value_objects::{
    DEFAULT_CORRECT_ADVANCE, DEFAULT_INCORRECT_CLEAR, DEFAULT_TOTAL_ROUNDS,
};

pub const ENV_TOTAL_ROUNDS: &str = "ROLODEX_TOTAL_ROUNDS";
pub const ENV_CORRECT_ADVANCE_MS: &str = "ROLODEX_CORRECT_ADVANCE_MS";
pub const ENV_INCORRECT_CLEAR_MS: &str = "ROLODEX_INCORRECT_CLEAR_MS";
pub const ENV_CONTACTS_PATH: &str = "ROLODEX_CONTACTS_PATH";
pub const ENV_FILTER_PATH: &str = "ROLODEX_FILTER_PATH";
pub const ENV_SEED: &str = "ROLODEX_SEED";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} must be a non-negative integer in range, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("Invalid session settings: {0}")]
    Settings(#[from] DomainError),
}

#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub settings: SessionSettings,
    pub contacts_path: PathBuf,
    pub filter_path: PathBuf,
    pub seed: Option<u64>,
}

impl QuizConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let total_rounds = match parse_number(&lookup, ENV_TOTAL_ROUNDS)? {
            Some(n) => u32::try_from(n).map_err(|_| ConfigError::InvalidNumber {
                key: ENV_TOTAL_ROUNDS,
                value: n.to_string(),
            })?,
            None => DEFAULT_TOTAL_ROUNDS,
        };
        let correct_advance = parse_number(&lookup, ENV_CORRECT_ADVANCE_MS)?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_CORRECT_ADVANCE);
        let incorrect_clear = parse_number(&lookup, ENV_INCORRECT_CLEAR_MS)?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_INCORRECT_CLEAR);

        let settings = SessionSettings::new(total_rounds, correct_advance, incorrect_clear)?;

        Ok(Self {
            settings,
            contacts_path: lookup(ENV_CONTACTS_PATH)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("contacts.json")),
            filter_path: lookup(ENV_FILTER_PATH)
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("filter.json")),
            seed: parse_number(&lookup, ENV_SEED)?,
        })
    }
}

fn parse_number<F>(lookup: &F, key: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
    }
}
