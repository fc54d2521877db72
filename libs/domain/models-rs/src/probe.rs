// [libs/domain/models-rs/src/probe.rs]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only row. The effective status of (team, round) is the row with
/// the greatest `checked_at` — spec.md §3/§4.4.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceProbe {
    pub id: i64,
    pub team_id: i64,
    pub round_id: i64,
    pub is_up: bool,
    pub response_time: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub checked_at: DateTime<Utc>,
}
