// [apps/orchestrator/src/routes.rs]
/*!
 * APARATO: ROUTING MATRIX (V1.0)
 * CLASIFICACION: API ADAPTER LAYER (ESTRATO L3)
 * RESPONSABILIDAD: COMPOSICION DE LA TOPOLOGIA HTTP Y WEBSOCKET DEL TORNEO
 */

use crate::handlers::{admin, auth, flag, game, patch, scoreboard, service_status, status, teams, ws};
use crate::middleware::trace_layer;
use crate::state::AppState;
use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

/// Builds the full router over §6's endpoint table. CORS is permissive —
/// the dashboard and scorer live on a different origin than the API.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    let api = Router::new()
        .route("/auth/verify", post(auth::verify))
        .route("/auth/token/:team_id", get(auth::team_token))
        .route("/status", get(status::status))
        .route("/teams", get(teams::list))
        .route("/scoreboard", get(scoreboard::scoreboard))
        .route("/round/:round_number/scores", get(scoreboard::round_scores))
        .route("/flag/submit", post(flag::submit))
        .route("/flag/history", get(flag::history))
        .route("/team/:team_id/flag", get(flag::team_flag))
        .route("/team/:team_id/flags", get(flag::team_flags))
        .route("/service-status", get(service_status::service_status))
        .route("/patch/upload", post(patch::upload))
        .route("/patch/download", get(patch::download_self))
        .route("/patch/download/:team_id", get(patch::download))
        .route("/patch/list", get(patch::list))
        .route("/game/start", post(game::start))
        .route("/game/stop", post(game::stop))
        .route("/admin/logs", get(admin::logs));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/ws", get(ws::handler))
        .nest("/api", api)
        .layer(trace_layer())
        .layer(cors)
        .with_state(state)
}
