// [apps/orchestrator/src/kernel.rs]
/*!
 * =================================================================
 * APARATO: ORCHESTRATOR KERNEL (V1.0)
 * CLASIFICACION: COMPOSITION ROOT (ESTRATO L1-APP)
 * RESPONSABILIDAD: BOOTSTRAP DE INFRAESTRUCTURA E IGNICION DEL SERVIDOR
 * =================================================================
 */

use crate::auth::TokenAuthority;
use crate::config::Config;
use crate::routes::build_router;
use crate::services::{EventBus, PatchStore, ShellContainerOrchestrator};
use crate::state::{AppState, GameState};
use adctf_infra_store::{Store, StoreClient};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, instrument};

const TOKEN_FILE: &str = "data/tokens.json";
const PATCH_DIR: &str = "patches";

pub struct OrchestratorKernel {
    pub config: Arc<Config>,
    pub state: AppState,
}

impl OrchestratorKernel {
    /// Connects the Store, loads or generates the token table, registers the
    /// configured teams, and assembles the single `AppState` handle shared
    /// by every handler and background daemon (spec.md §9 Design Notes).
    #[instrument(skip_all)]
    pub async fn ignite(config: Config) -> Self {
        let config = Arc::new(config);

        let client = StoreClient::connect(&config.database.path, None)
            .await
            .expect("CRITICAL_FAULT: database ignition failed");
        let store = Store::new(client);

        for team in &config.teams {
            store
                .add_team(team)
                .await
                .expect("CRITICAL_FAULT: failed to register configured team");
        }

        let tokens = TokenAuthority::load_or_generate(&PathBuf::from(TOKEN_FILE), config.game.num_teams)
            .expect("CRITICAL_FAULT: token authority ignition failed");

        let state = AppState {
            store,
            config: config.clone(),
            game: GameState::new(),
            tokens: Arc::new(tokens),
            events: EventBus::new(),
            patches: Arc::new(PatchStore::new(PathBuf::from(PATCH_DIR))),
            orchestrator: Arc::new(ShellContainerOrchestrator::new()),
        };

        info!("⚓ [KERNEL]: ignition complete, {} teams registered", config.teams.len());
        Self { config, state }
    }

    /// Binds the HTTP/WebSocket listener and serves forever. The Round
    /// Scheduler is *not* started here — it starts only when an admin calls
    /// `POST /api/game/start` (spec.md §4.9, §5).
    pub async fn launch(self) {
        let router = build_router(self.state);

        let address: SocketAddr = format!("{}:{}", self.config.server.host, self.config.server.port)
            .parse()
            .expect("CRITICAL_FAULT: malformed server.host/server.port in configuration");

        let listener = tokio::net::TcpListener::bind(address)
            .await
            .expect("CRITICAL_FAULT: failed to bind network port");

        info!("🚀 [KERNEL_ONLINE]: orchestrator listening at {}", address);

        if let Err(e) = axum::serve(listener, router).await {
            panic!("CRITICAL_FAULT: HTTP server collapsed: {e}");
        }
    }
}
