// [apps/orchestrator/src/handlers/patch.rs]
/*!
 * APARATO: PATCH HANDLERS (V1.0)
 * CLASIFICACION: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: SUBIDA, DESCARGA Y LISTADO DE PARCHES POR EQUIPO
 */

use crate::error::ApiError;
use crate::handlers::{authenticate, require_team, require_team_self_or_admin};
use crate::services::patch_store::PatchStoreError;
use crate::state::AppState;
use adctf_domain_models::PatchRecord;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;

/// `POST /api/patch/upload` — multipart `patch=...py`; 400 on non-`.py`
/// (spec.md §4.7, §6).
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<serde_json::Value>, ApiError> {
    let team_id = require_team(authenticate(&state, &headers))?;

    let mut filename = None;
    let mut bytes = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(err.to_string()))?
    {
        if field.name() == Some("patch") {
            filename = field.file_name().map(|s| s.to_string());
            bytes = Some(field.bytes().await.map_err(|err| ApiError::BadRequest(err.to_string()))?);
        }
    }

    let filename = filename.ok_or_else(|| ApiError::BadRequest("missing patch field".into()))?;
    let bytes = bytes.ok_or_else(|| ApiError::BadRequest("missing patch field".into()))?;

    state
        .patches
        .upload(team_id, &filename, &bytes)
        .map_err(|err| match err {
            PatchStoreError::InvalidExtension => ApiError::BadRequest(err.to_string()),
            other => ApiError::Internal(other.to_string()),
        })?;

    Ok(Json(serde_json::json!({ "team_id": team_id, "uploaded": true })))
}

/// `GET /api/patch/download/{id}` — binary patch bytes; team-self or admin.
pub async fn download(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(team_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    require_team_self_or_admin(authenticate(&state, &headers), team_id)?;
    fetch_patch(&state, team_id)
}

/// `GET /api/patch/download` — the `{id}` path segment is optional (spec.md
/// §6); a team token with no id names its own patch.
pub async fn download_self(State(state): State<AppState>, headers: HeaderMap) -> Result<impl IntoResponse, ApiError> {
    let team_id = require_team(authenticate(&state, &headers))?;
    fetch_patch(&state, team_id)
}

fn fetch_patch(state: &AppState, team_id: i64) -> Result<Bytes, ApiError> {
    state
        .patches
        .fetch(team_id)
        .map(Bytes::from)
        .map_err(|err| match err {
            PatchStoreError::NotFound(id) => ApiError::NotFound(format!("no patch uploaded for team {id}")),
            other => ApiError::Internal(other.to_string()),
        })
}

/// `GET /api/patch/list` — patch metadata sorted by team id.
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<PatchRecord>>, ApiError> {
    let outcome = authenticate(&state, &headers);
    require_team(outcome.clone()).map(|_| ()).or_else(|_| {
        crate::handlers::require_admin(outcome)
    })?;

    let teams = state.store.get_teams().await?;
    Ok(Json(state.patches.list(&teams)))
}
