//! Session-complete event handed to hosts for display or logging

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Final result of a completed quiz session
///
/// Rounds only advance on a correct answer, so `score == total_rounds` for
/// every completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub score: u32,
    pub total_rounds: u32,
    pub completed_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn summary_round_trips_through_json() {
        let summary = SessionSummary {
            session_id: Uuid::nil(),
            score: 5,
            total_rounds: 5,
            completed_at: Utc.timestamp_opt(1_700_000_000, 0).single().expect("valid timestamp"),
        };
        let json = serde_json::to_string(&summary).expect("serializable");
        assert!(json.contains("\"totalRounds\":5"));
        let back: SessionSummary = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, summary);
    }
}
