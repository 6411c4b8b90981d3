//! Session settings - round count and feedback delays fixed at session start

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Default number of rounds in one session.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 5;

/// Default delay between a correct answer and the next round.
pub const DEFAULT_CORRECT_ADVANCE: Duration = Duration::from_millis(1200);

/// Default delay before incorrect-answer feedback is cleared.
pub const DEFAULT_INCORRECT_CLEAR: Duration = Duration::from_millis(700);

/// Settings captured when a session starts.
///
/// # Invariants
///
/// - `total_rounds >= 1`
/// - `incorrect_clear < correct_advance`
///
/// Deserialization goes through [`SessionSettings::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSettings {
    total_rounds: u32,
    correct_advance: Duration,
    incorrect_clear: Duration,
}

impl SessionSettings {
    pub fn new(
        total_rounds: u32,
        correct_advance: Duration,
        incorrect_clear: Duration,
    ) -> Result<Self, DomainError> {
        if total_rounds == 0 {
            return Err(DomainError::validation(
                "A session needs at least one round",
            ));
        }
        if incorrect_clear >= correct_advance {
            return Err(DomainError::validation(format!(
                "Incorrect-answer delay ({}ms) must be shorter than the advance delay ({}ms)",
                incorrect_clear.as_millis(),
                correct_advance.as_millis()
            )));
        }
        Ok(Self {
            total_rounds,
            correct_advance,
            incorrect_clear,
        })
    }

    pub fn total_rounds(&self) -> u32 {
        self.total_rounds
    }

    pub fn correct_advance(&self) -> Duration {
        self.correct_advance
    }

    pub fn incorrect_clear(&self) -> Duration {
        self.incorrect_clear
    }
}

impl<'de> Deserialize<'de> for SessionSettings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Raw {
            total_rounds: u32,
            correct_advance: Duration,
            incorrect_clear: Duration,
        }

        let raw = Raw::deserialize(deserializer)?;
        SessionSettings::new(raw.total_rounds, raw.correct_advance, raw.incorrect_clear)
            .map_err(serde::de::Error::custom)
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            correct_advance: DEFAULT_CORRECT_ADVANCE,
            incorrect_clear: DEFAULT_INCORRECT_CLEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let defaults = SessionSettings::default();
        let rebuilt = SessionSettings::new(
            defaults.total_rounds(),
            defaults.correct_advance(),
            defaults.incorrect_clear(),
        );
        assert_eq!(rebuilt, Ok(defaults));
    }

    #[test]
    fn rejects_zero_rounds() {
        let result = SessionSettings::new(0, Duration::from_secs(1), Duration::from_millis(500));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn incorrect_delay_must_be_shorter() {
        let result = SessionSettings::new(5, Duration::from_millis(500), Duration::from_millis(500));
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }

    #[test]
    fn deserialization_enforces_invariants() {
        let json = serde_json::to_string(&SessionSettings::default()).expect("serializable");
        let parsed: SessionSettings = serde_json::from_str(&json).expect("valid settings json");
        assert_eq!(parsed, SessionSettings::default());

        let zero_rounds = r#"{
            "totalRounds": 0,
            "correctAdvance": {"secs": 1, "nanos": 0},
            "incorrectClear": {"secs": 0, "nanos": 500000000}
        }"#;
        assert!(serde_json::from_str::<SessionSettings>(zero_rounds).is_err());

        let slow_clear = r#"{
            "totalRounds": 5,
            "correctAdvance": {"secs": 0, "nanos": 1},
            "incorrectClear": {"secs": 5, "nanos": 0}
        }"#;
        assert!(serde_json::from_str::<SessionSettings>(slow_clear).is_err());
    }
}
