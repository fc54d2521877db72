// [apps/orchestrator/src/services/event_bus.rs]
/*!
 * APARATO: EVENT BUS SERVICE (V1.0)
 * CLASIFICACION: APPLICATION SERVICE (ESTRATO L4)
 * RESPONSABILIDAD: DIFUSION DE EVENTOS TIPADOS A OBSERVADORES EN VIVO
 */

use adctf_domain_models::GameEvent;
use tokio::sync::broadcast;
use tracing::trace;

const CHANNEL_CAPACITY: usize = 1024;

/// Fan-out of `GameEvent`s to every live WebSocket observer. Delivery is
/// best-effort, at-most-once; observers reconnect at will and receive no
/// history replay (spec.md §4.10).
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.sender.subscribe()
    }

    /// Dispatch never blocks. Zero subscribers is the common case between
    /// rounds; the teacher's EventBus discards silently in that case too.
    pub fn publish(&self, event: GameEvent) {
        match self.sender.send(event) {
            Ok(subscriber_count) => {
                trace!("📡 [EVENT_BUS]: dispatched to {} observers", subscriber_count);
            }
            Err(_) => {
                trace!("💤 [EVENT_BUS]: no active observers, signal discarded");
            }
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
