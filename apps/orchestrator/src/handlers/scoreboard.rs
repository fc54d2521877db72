// [apps/orchestrator/src/handlers/scoreboard.rs]
/*!
 * APARATO: SCOREBOARD HANDLER (V1.0)
 * RESPONSABILIDAD: TOTALES AGREGADOS Y DESGLOSE POR RONDA
 */

use crate::error::ApiError;
use crate::state::AppState;
use adctf_domain_models::{Score, ScoreboardEntry};
use axum::extract::{Path, State};
use axum::Json;

pub async fn scoreboard(State(state): State<AppState>) -> Result<Json<Vec<ScoreboardEntry>>, ApiError> {
    Ok(Json(state.store.scoreboard().await?))
}

pub async fn round_scores(
    State(state): State<AppState>,
    Path(round_number): Path<i64>,
) -> Result<Json<Vec<Score>>, ApiError> {
    let round = state
        .store
        .get_round_by_number(round_number)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("round {round_number} not found")))?;

    Ok(Json(state.store.round_scores(round.id).await?))
}
