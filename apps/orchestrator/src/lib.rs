// [apps/orchestrator/src/lib.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR LIBRARY ROOT (V1.0)
 * CLASIFICACION: CRATE ROOT (ESTRATO L3)
 * RESPONSABILIDAD: DEFINICION DEL ARBOL DE MODULOS DEL TORNEO
 * =================================================================
 */

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod kernel;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

/// Re-exports needed for minimal ignition from `main.rs`.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::kernel::OrchestratorKernel;
    pub use crate::state::AppState;
}
