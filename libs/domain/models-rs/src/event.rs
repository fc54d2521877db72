// [libs/domain/models-rs/src/event.rs]
use serde::{Deserialize, Serialize};

/// Typed payloads fanned out by the Event Broadcaster (spec.md §4.10).
/// Serialized to JSON with an internal `event` tag so WebSocket observers
/// can dispatch on a single field without peeking at the payload shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Connected,
    RoundStarted {
        round_number: i64,
        phase: &'static str,
        duration_seconds: u64,
    },
    PhaseChanged {
        phase: &'static str,
        duration_seconds: u64,
    },
    ServiceStatusUpdated {
        statuses: Vec<TeamStatus>,
    },
    ScoreboardUpdated,
    FlagCaptured {
        attacker_team_id: i64,
        victim_team_id: i64,
        round_number: i64,
    },
    GameStarted,
    GameStopped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamStatus {
    pub team_id: i64,
    pub is_up: bool,
}
