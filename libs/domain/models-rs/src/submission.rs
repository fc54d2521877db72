// [libs/domain/models-rs/src/submission.rs]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored only on accepted submissions — spec.md §3/§4.6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagSubmission {
    pub id: i64,
    pub submitter_team_id: i64,
    pub target_team_id: i64,
    pub round_id: i64,
    pub flag_value: String,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub submitted_at: DateTime<Utc>,
}

/// Result of the Submission Engine's four-step algorithm (spec.md §4.6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_team_id: Option<i64>,
}

impl SubmissionOutcome {
    pub fn rejected(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), target_team_id: None }
    }

    pub fn accepted(target_team_id: i64) -> Self {
        Self {
            success: true,
            message: "Flag accepted".to_string(),
            target_team_id: Some(target_team_id),
        }
    }
}
