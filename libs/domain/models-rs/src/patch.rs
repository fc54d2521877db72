// [libs/domain/models-rs/src/patch.rs]
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata for a team's uploaded patch file, read from the filesystem at
/// query time — spec.md §4.7. Not a database row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatchRecord {
    pub team_id: i64,
    pub team_name: String,
    pub size_bytes: u64,
    #[serde(serialize_with = "crate::timestamp::serialize")]
    pub modified_at: DateTime<Utc>,
}
