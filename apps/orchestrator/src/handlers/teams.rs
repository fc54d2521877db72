// [apps/orchestrator/src/handlers/teams.rs]
/*!
 * APARATO: TEAMS HANDLER (V1.0)
 * RESPONSABILIDAD: CONSULTA DE EQUIPOS REGISTRADOS
 */

use crate::error::ApiError;
use crate::state::AppState;
use adctf_domain_models::Team;
use axum::extract::State;
use axum::Json;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Team>>, ApiError> {
    Ok(Json(state.store.get_teams().await?))
}
