// [apps/orchestrator/src/handlers/game.rs]
/*!
 * APARATO: GAME CONTROL HANDLERS (V1.0)
 * CLASIFICACION: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: ARRANQUE Y DETENCION ADMINISTRATIVA DEL SCHEDULER
 */

use crate::error::ApiError;
use crate::handlers::{authenticate, require_admin};
use crate::services::RoundScheduler;
use crate::state::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde_json::{json, Value};
use std::sync::Arc;

/// `POST /api/game/start` — admin-only; 400 `"Game already started"` on a
/// second call (spec.md §5 Cancellation, §8 scenario (e)).
pub async fn start(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    require_admin(authenticate(&state, &headers))?;

    let scheduler = Arc::new(RoundScheduler::new(state.clone()));

    if !scheduler.start() {
        return Err(ApiError::BadRequest("Game already started".into()));
    }

    Ok(Json(json!({ "started": true })))
}

/// `POST /api/game/stop` — clears `started`; the scheduler closes any
/// active round and exits on its own next loop iteration.
pub async fn stop(State(state): State<AppState>, headers: HeaderMap) -> Result<Json<Value>, ApiError> {
    require_admin(authenticate(&state, &headers))?;
    state.game.started.store(false, std::sync::atomic::Ordering::SeqCst);
    Ok(Json(json!({ "started": false })))
}
