// [libs/domain/models-rs/src/flag.rs]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The three vulnerability classes the vulnerable service exposes, one flag
/// minted per (team, round, vuln type) — spec.md §3/§4.3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VulnType {
    Monitor,
    Logs,
    Download,
}

impl VulnType {
    pub const ALL: [VulnType; 3] = [VulnType::Monitor, VulnType::Logs, VulnType::Download];

    pub fn as_str(&self) -> &'static str {
        match self {
            VulnType::Monitor => "monitor",
            VulnType::Logs => "logs",
            VulnType::Download => "download",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "monitor" => Some(VulnType::Monitor),
            "logs" => Some(VulnType::Logs),
            "download" => Some(VulnType::Download),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub id: i64,
    pub team_id: i64,
    pub round_id: i64,
    pub value: String,
    pub vuln_type: VulnType,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}
