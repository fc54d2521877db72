// [libs/domain/models-rs/src/score.rs]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rewritten idempotently each time the Scoring Engine runs for a round.
/// Unique on `(team_id, round_id)` — spec.md §3/§4.5.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub team_id: i64,
    pub round_id: i64,
    pub sla: f64,
    pub defense: f64,
    pub attack: f64,
    pub total: f64,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub calculated_at: DateTime<Utc>,
}

/// Rounds to 2 decimal places the way the original Python's `round(x, 2)`
/// does, so the literal fixtures in spec.md §8 reproduce exactly.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One row of the aggregated scoreboard: totals across all closed rounds,
/// plus the team's `is_up` status for the current round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreboardEntry {
    pub team_id: i64,
    pub sla: f64,
    pub defense: f64,
    pub attack: f64,
    pub total: f64,
    pub is_up: bool,
}
