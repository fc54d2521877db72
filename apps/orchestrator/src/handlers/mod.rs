// [apps/orchestrator/src/handlers/mod.rs]
/*!
 * APARATO: HANDLER SUPPORT (V1.0)
 * CLASIFICACION: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: EXTRACCION COMPARTIDA DE IDENTIDAD AUTENTICADA
 */

pub mod admin;
pub mod auth;
pub mod flag;
pub mod game;
pub mod patch;
pub mod scoreboard;
pub mod service_status;
pub mod status;
pub mod teams;
pub mod ws;

use crate::auth::AuthOutcome;
use crate::error::ApiError;
use crate::state::AppState;
use axum::http::{header, HeaderMap};

/// Extracts the bearer token from `Authorization` and validates it against
/// the Token Authority. Every mutating endpoint (and several read ones)
/// goes through this (spec.md §1, §4.2).
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> AuthOutcome {
    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => state.tokens.validate(token),
        None => AuthOutcome::Invalid,
    }
}

pub fn require_admin(outcome: AuthOutcome) -> Result<(), ApiError> {
    match outcome {
        AuthOutcome::Admin => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

pub fn require_team(outcome: AuthOutcome) -> Result<i64, ApiError> {
    match outcome {
        AuthOutcome::Team { team_id } => Ok(team_id),
        _ => Err(ApiError::Unauthorized),
    }
}

/// Team-self or admin: used by the team-scoped flag/patch endpoints.
pub fn require_team_self_or_admin(outcome: AuthOutcome, path_team_id: i64) -> Result<(), ApiError> {
    match outcome {
        AuthOutcome::Admin => Ok(()),
        AuthOutcome::Team { team_id } if team_id == path_team_id => Ok(()),
        AuthOutcome::Team { .. } => Err(ApiError::Forbidden("not your team".into())),
        AuthOutcome::Invalid => Err(ApiError::Unauthorized),
    }
}
