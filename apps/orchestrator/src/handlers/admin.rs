// [apps/orchestrator/src/handlers/admin.rs]
/*!
 * APARATO: ADMIN HANDLERS (V1.0)
 * CLASIFICACION: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: RESUMEN DE DIAGNOSTICO DEL ESTADO ACTUAL DEL TORNEO
 */

use crate::error::ApiError;
use crate::handlers::{authenticate, require_admin};
use crate::state::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use std::sync::atomic::Ordering;

/// `GET /api/admin/logs` — human-readable summary strings about the
/// scheduler, current round and registered teams (spec.md §6).
pub async fn logs(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Vec<String>>, ApiError> {
    require_admin(authenticate(&state, &headers))?;

    let mut lines = Vec::new();

    let phase = *state.game.phase.read().await;
    lines.push(format!(
        "scheduler: started={} phase={} current_round={}",
        state.game.is_started(),
        phase.as_str(),
        state.game.current_round.load(Ordering::SeqCst),
    ));

    match state.store.get_current_round().await? {
        Some(round) => lines.push(format!(
            "active round: id={} number={} status={:?}",
            round.id, round.round_number, round.status
        )),
        None => lines.push("active round: none".to_string()),
    }

    let teams = state.store.get_teams().await?;
    lines.push(format!("teams registered: {}", teams.len()));

    Ok(Json(lines))
}
