// [apps/orchestrator/src/handlers/service_status.rs]
/*!
 * APARATO: SERVICE STATUS HANDLER (V1.0)
 * RESPONSABILIDAD: ULTIMA SONDA POR EQUIPO PARA LA RONDA ACTUAL
 */

use crate::error::ApiError;
use crate::state::AppState;
use adctf_domain_models::ServiceProbe;
use axum::extract::State;
use axum::Json;

pub async fn service_status(State(state): State<AppState>) -> Result<Json<Vec<ServiceProbe>>, ApiError> {
    let probes = match state.store.get_current_round().await? {
        Some(round) => state.store.latest_probe_per_team(round.id).await?,
        None => Vec::new(),
    };
    Ok(Json(probes))
}
