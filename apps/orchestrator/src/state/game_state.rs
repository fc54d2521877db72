// [apps/orchestrator/src/state/game_state.rs]
/*!
 * APARATO: GAME STATE (V1.0)
 * CLASIFICACION: PROCESS STATE (ESTRATO L2)
 * RESPONSABILIDAD: ESTADO MUTABLE DEL CICLO DE JUEGO, EXCLUSIVO DEL SCHEDULER
 */

use std::sync::atomic::{AtomicBool, AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Sub-phase of the current round (spec.md §3, §4.9). `Idle` before the
/// first round and between an admin stop and the next start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Patching,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Patching => "patching",
        }
    }
}

/// Process-local, not persisted across restarts (spec.md §3). Mutated only
/// by the Round Scheduler; API workers read primitive fields racily for
/// display, which is an accepted tradeoff per spec.md §5.
pub struct GameState {
    pub started: Arc<AtomicBool>,
    /// Guards against two scheduler workers running concurrently — the
    /// single-slot guard of spec.md §5/§9.
    pub scheduler_running: Arc<AtomicBool>,
    pub current_round: Arc<AtomicI64>,
    pub round_id: Arc<AtomicI64>,
    pub phase: Arc<RwLock<Phase>>,
    /// Unix epoch seconds; 0 means no deadline set.
    pub phase_deadline: Arc<AtomicU64>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            started: Arc::new(AtomicBool::new(false)),
            scheduler_running: Arc::new(AtomicBool::new(false)),
            current_round: Arc::new(AtomicI64::new(0)),
            round_id: Arc::new(AtomicI64::new(0)),
            phase: Arc::new(RwLock::new(Phase::Idle)),
            phase_deadline: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Rejects a second concurrent scheduler start (spec.md §5 Cancellation).
    pub fn try_claim_scheduler_slot(&self) -> bool {
        self.scheduler_running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    pub fn release_scheduler_slot(&self) {
        self.scheduler_running.store(false, Ordering::SeqCst);
    }

    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    pub async fn remaining_seconds(&self) -> u64 {
        let deadline = self.phase_deadline.load(Ordering::SeqCst);
        if deadline == 0 {
            return 0;
        }
        let now = chrono::Utc::now().timestamp() as u64;
        deadline.saturating_sub(now)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for GameState {
    fn clone(&self) -> Self {
        Self {
            started: self.started.clone(),
            scheduler_running: self.scheduler_running.clone(),
            current_round: self.current_round.clone(),
            round_id: self.round_id.clone(),
            phase: self.phase.clone(),
            phase_deadline: self.phase_deadline.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// spec.md §8 scenario (e): a second concurrent scheduler start is
    /// rejected by the single-slot guard.
    #[test]
    fn second_scheduler_slot_claim_is_rejected() {
        let game = GameState::new();
        assert!(game.try_claim_scheduler_slot());
        assert!(!game.try_claim_scheduler_slot());

        game.release_scheduler_slot();
        assert!(game.try_claim_scheduler_slot());
    }
}
