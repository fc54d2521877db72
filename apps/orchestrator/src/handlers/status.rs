// [apps/orchestrator/src/handlers/status.rs]
/*!
 * APARATO: STATUS HANDLER (V1.0)
 * RESPONSABILIDAD: FOTOGRAFIA DEL ESTADO DE JUEGO Y FASE ACTUAL
 */

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde_json::{json, Value};
use std::sync::atomic::Ordering;

pub async fn status(State(state): State<AppState>) -> Json<Value> {
    let phase = *state.game.phase.read().await;
    let remaining_seconds = state.game.remaining_seconds().await;

    Json(json!({
        "started": state.game.is_started(),
        "current_round": state.game.current_round.load(Ordering::SeqCst),
        "phase": phase.as_str(),
        "remaining_seconds": remaining_seconds,
    }))
}
