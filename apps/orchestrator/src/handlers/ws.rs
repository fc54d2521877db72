// [apps/orchestrator/src/handlers/ws.rs]
/*!
 * APARATO: EVENT SOCKET HANDLER (V1.0)
 * CLASIFICACION: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: NEGOCIACION Y BOMBEO DE EVENTOS A OBSERVADORES EN VIVO
 */

use crate::state::AppState;
use adctf_domain_models::GameEvent;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures::stream::StreamExt;
use tokio::time::{interval, Duration};
use tracing::{debug, warn};

const KEEPALIVE_INTERVAL_SECONDS: u64 = 25;

/// Upgrades to a WebSocket and fans out every `GameEvent` to the new
/// observer, best-effort and at-most-once; no history replay (spec.md §4.10).
pub async fn handler(upgrade: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    upgrade.on_upgrade(move |socket| run(socket, state))
}

async fn run(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let mut events = state.events.subscribe();

    let connected = serde_json::to_string(&GameEvent::Connected).expect("GameEvent always serializes");
    if sender.send(Message::Text(connected)).await.is_err() {
        return;
    }

    let mut keepalive = interval(Duration::from_secs(KEEPALIVE_INTERVAL_SECONDS));

    let mut incoming = tokio::spawn(async move {
        while let Some(frame) = receiver.next().await {
            match frame {
                Ok(Message::Close(_)) | Err(_) => break,
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            _ = keepalive.tick() => {
                if sender.send(Message::Ping(Vec::new())).await.is_err() {
                    break;
                }
            }
            received = events.recv() => {
                match received {
                    Ok(event) => {
                        let payload = serde_json::to_string(&event).expect("GameEvent always serializes");
                        if sender.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!("🐢 [EVENT_SOCKET]: observer lagged, skipped {} events", skipped);
                    }
                    Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                }
            }
            _ = &mut incoming => {
                debug!("🔌 [EVENT_SOCKET]: observer closed the connection");
                break;
            }
        }
    }

    incoming.abort();
}
