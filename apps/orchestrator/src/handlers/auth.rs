// [apps/orchestrator/src/handlers/auth.rs]
/*!
 * APARATO: AUTH HANDLERS (V1.0)
 * RESPONSABILIDAD: VERIFICACION DE TOKENS Y CONSULTA INTERNA DE TOKEN POR EQUIPO
 */

use crate::auth::AuthOutcome;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub role: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
}

pub async fn verify(State(state): State<AppState>, Json(body): Json<VerifyRequest>) -> Json<VerifyResponse> {
    let response = match state.tokens.validate(&body.token) {
        AuthOutcome::Admin => VerifyResponse { valid: true, role: Some("admin"), team_id: None },
        AuthOutcome::Team { team_id } => VerifyResponse { valid: true, role: Some("team"), team_id: Some(team_id) },
        AuthOutcome::Invalid => VerifyResponse { valid: false, role: None, team_id: None },
    };
    Json(response)
}

/// Internal lookup: returns the stored team token; 404 if unknown.
pub async fn team_token(
    State(state): State<AppState>,
    Path(team_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    match state.tokens.team_token(team_id) {
        Some(token) => Ok(Json(json!({ "team_id": team_id, "token": token }))),
        None => Err(ApiError::NotFound(format!("no token for team {team_id}"))),
    }
}
