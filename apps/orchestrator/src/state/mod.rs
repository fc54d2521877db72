// [apps/orchestrator/src/state/mod.rs]
/*!
 * APARATO: APPLICATION STATE (V1.0)
 * CLASIFICACION: COMPOSITION ROOT (ESTRATO L1-APP)
 * RESPONSABILIDAD: MUNDO EXPLICITO COMPARTIDO POR TODO COMPONENTE DE LA API
 */

pub mod game_state;

pub use game_state::{GameState, Phase};

use crate::auth::TokenAuthority;
use crate::config::Config;
use crate::services::{ContainerOrchestrator, EventBus, PatchStore};
use adctf_infra_store::Store;
use std::sync::Arc;

/// One explicit handle wired once at boot and cloned into every handler and
/// background daemon — no ambient singletons (spec.md §9 Design Notes).
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
    pub game: GameState,
    pub tokens: Arc<TokenAuthority>,
    pub events: EventBus,
    pub patches: Arc<PatchStore>,
    pub orchestrator: Arc<dyn ContainerOrchestrator>,
}
