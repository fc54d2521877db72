// [apps/orchestrator/src/middleware.rs]
/*!
 * APARATO: REQUEST OBSERVABILITY LAYER (V1.0)
 * CLASIFICACION: APPLICATION LAYER (ESTRATO L4)
 * RESPONSABILIDAD: TRAZADO ESTRUCTURADO DE CADA PETICION HTTP
 */

use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Per-request tracing span (method, path, status, latency). Authorization
/// is decided per-endpoint via `handlers::authenticate` — each handler knows
/// whether it needs admin, team-self, or no identity at all (spec.md §7).
pub fn trace_layer() -> TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnResponse,
> {
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}
