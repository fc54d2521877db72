// [libs/domain/models-rs/src/team.rs]
use serde::{Deserialize, Serialize};

/// A competing team, loaded once from configuration at boot.
///
/// Teams are never mutated after init except by re-registration with the
/// same `id` (upsert) — see `spec.md` §3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub name: String,
    pub host: String,
    pub port: u16,
}
