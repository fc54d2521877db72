// [libs/domain/models-rs/src/round.rs]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a `Round`. At most one row carries `Active` at any
/// instant (spec.md §3 invariant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundStatus {
    Active,
    Closed,
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::Active => "active",
            RoundStatus::Closed => "closed",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "closed" => RoundStatus::Closed,
            _ => RoundStatus::Active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Round {
    pub id: i64,
    pub round_number: i64,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub start_time: DateTime<Utc>,
    #[serde(serialize_with = "crate::timestamp::option::serialize")]
    pub end_time: Option<DateTime<Utc>>,
    pub status: RoundStatus,
}
