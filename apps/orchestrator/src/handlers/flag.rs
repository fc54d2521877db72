// [apps/orchestrator/src/handlers/flag.rs]
/*!
 * APARATO: FLAG HANDLERS (V1.0)
 * CLASIFICACION: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: SUBMISION, CONSULTA Y HISTORIAL DE FLAGS
 */

use crate::error::ApiError;
use crate::handlers::require_team_self_or_admin;
use crate::state::{AppState, Phase};
use crate::services::SubmissionEngine;
use adctf_domain_models::{SubmissionOutcome, VulnType};
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub token: String,
    pub flag: String,
}

/// `POST /api/flag/submit` — token travels in the body, not a bearer header,
/// mirroring the source's team-submission contract (spec.md §6).
pub async fn submit(
    State(state): State<AppState>,
    Json(body): Json<SubmitRequest>,
) -> Result<Json<SubmissionOutcome>, ApiError> {
    let submitter_team_id = match state.tokens.validate(&body.token) {
        crate::auth::AuthOutcome::Team { team_id } => team_id,
        _ => return Err(ApiError::Unauthorized),
    };

    let round = state
        .store
        .get_current_round()
        .await?
        .ok_or_else(|| ApiError::Unavailable("No active round".into()))?;

    let engine = SubmissionEngine::new(state.store.clone(), state.events.clone());
    let outcome = engine
        .submit(submitter_team_id, &body.flag, round.id, round.round_number)
        .await?;

    Ok(Json(outcome))
}

#[derive(Debug, Serialize)]
pub struct TeamFlagsResponse {
    pub team_id: i64,
    pub round: i64,
    pub flags: HashMap<String, String>,
}

fn empty_flags_map() -> HashMap<String, String> {
    VulnType::ALL
        .iter()
        .map(|v| (v.as_str().to_string(), String::new()))
        .collect()
}

/// `GET /api/team/{id}/flags` — all three current-round flags; `{}` values
/// during any phase other than playing (spec.md §8 scenario (f)).
pub async fn team_flags(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(team_id): Path<i64>,
) -> Result<Json<TeamFlagsResponse>, ApiError> {
    let outcome = crate::handlers::authenticate(&state, &headers);
    require_team_self_or_admin(outcome, team_id)?;

    let phase = *state.game.phase.read().await;
    if phase != Phase::Playing {
        return Ok(Json(TeamFlagsResponse { team_id, round: 0, flags: empty_flags_map() }));
    }

    let round = match state.store.get_current_round().await? {
        Some(round) => round,
        None => return Ok(Json(TeamFlagsResponse { team_id, round: 0, flags: empty_flags_map() })),
    };

    let flags = state.store.flags_for_team_round(team_id, round.id).await?;
    let mut by_vuln = empty_flags_map();
    for flag in flags {
        by_vuln.insert(flag.vuln_type.as_str().to_string(), flag.value);
    }

    Ok(Json(TeamFlagsResponse { team_id, round: round.round_number, flags: by_vuln }))
}

/// `GET /api/team/{id}/flag` — current-round `monitor` flag only.
pub async fn team_flag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(team_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let outcome = crate::handlers::authenticate(&state, &headers);
    require_team_self_or_admin(outcome, team_id)?;

    let phase = *state.game.phase.read().await;
    if phase != Phase::Playing {
        return Ok(Json(json!({ "team_id": team_id, "round": 0, "flag": "" })));
    }

    let round = match state.store.get_current_round().await? {
        Some(round) => round,
        None => return Ok(Json(json!({ "team_id": team_id, "round": 0, "flag": "" }))),
    };

    let flags = state.store.flags_for_team_round(team_id, round.id).await?;
    let monitor = flags
        .into_iter()
        .find(|f| f.vuln_type == VulnType::Monitor)
        .map(|f| f.value)
        .unwrap_or_default();

    Ok(Json(json!({ "team_id": team_id, "round": round.round_number, "flag": monitor })))
}

#[derive(Debug, Serialize)]
struct MaskedSubmission {
    id: i64,
    submitter_team_id: i64,
    target_team_id: i64,
    round_id: i64,
    flag_value: String,
    #[serde(serialize_with = "adctf_domain_models::timestamp::serialize")]
    submitted_at: chrono::DateTime<chrono::Utc>,
}

/// `GET /api/flag/history` — last 100 submissions, flag masked to its first
/// 8 chars plus a single `*` (spec.md §6).
pub async fn history(State(state): State<AppState>) -> Result<Json<Vec<MaskedSubmission>>, ApiError> {
    let submissions = state.store.submission_history(100).await?;

    let masked = submissions
        .into_iter()
        .map(|s| MaskedSubmission {
            id: s.id,
            submitter_team_id: s.submitter_team_id,
            target_team_id: s.target_team_id,
            round_id: s.round_id,
            flag_value: mask_flag(&s.flag_value),
            submitted_at: s.submitted_at,
        })
        .collect();

    Ok(Json(masked))
}

fn mask_flag(value: &str) -> String {
    let prefix: String = value.chars().take(8).collect();
    format!("{prefix}*")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_to_first_eight_chars_and_an_asterisk() {
        assert_eq!(mask_flag("FLAG{1_3_deadbeefdeadbeefdeadbeefdeadbeef}"), "FLAG{1_3*");
    }

    #[test]
    fn masks_short_values_without_panicking() {
        assert_eq!(mask_flag("abc"), "abc*");
    }
}
