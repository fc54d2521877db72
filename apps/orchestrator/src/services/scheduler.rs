// [apps/orchestrator/src/services/scheduler.rs]
/*!
 * =================================================================
 * APARATO: ROUND SCHEDULER (V1.0)
 * CLASIFICACION: COMPOSITION SERVICE (ESTRATO L1-APP)
 * RESPONSABILIDAD: MAQUINA DE ESTADOS DE DOS FASES, CORAZON DEL TORNEO
 * =================================================================
 */

use crate::services::{FlagFactory, ScoringEngine, ServiceProber};
use crate::state::{AppState, Phase};
use adctf_domain_models::{GameEvent, Team, TeamStatus};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, instrument, warn};

const WARMUP_SLEEP: Duration = Duration::from_secs(15);
const POST_PATCH_SLEEP: Duration = Duration::from_secs(5);
const FAULT_BACKOFF: Duration = Duration::from_secs(5);

/// The orchestrator's own fixed address on `ad_ctf_net`, reachable from
/// every team container — matches the source's own hardcoded default for
/// `MAIN_SERVER` (spec.md §4.8).
const ORCHESTRATOR_NETWORK_IP: &str = "172.30.0.10";

/// Non-preemptive state machine running in one dedicated task, gated by
/// `GameState.started`. See spec.md §4.9 for the exact phase algorithm.
pub struct RoundScheduler {
    state: AppState,
    flag_factory: FlagFactory,
    prober: ServiceProber,
    scoring: ScoringEngine,
}

impl RoundScheduler {
    pub fn new(state: AppState) -> Self {
        let flag_factory = FlagFactory::new(state.store.clone());
        let prober = ServiceProber::new(state.store.clone(), Duration::from_secs(5));
        let scoring = ScoringEngine::new(state.store.clone(), state.config.scoring.clone());
        Self { state, flag_factory, prober, scoring }
    }

    /// Claims the single-slot guard and spawns the loop task. Returns
    /// `false` if a scheduler worker is already in flight (spec.md §5).
    pub fn start(self: Arc<Self>) -> bool {
        if !self.state.game.try_claim_scheduler_slot() {
            return false;
        }
        self.state.game.started.store(true, Ordering::SeqCst);
        tokio::spawn(async move {
            self.run().await;
        });
        true
    }

    /// Clears `started`; the loop observes this at its next check and exits.
    pub fn stop(&self) {
        self.state.game.started.store(false, Ordering::SeqCst);
    }

    #[instrument(skip(self))]
    async fn run(&self) {
        info!("🚀 [SCHEDULER]: game loop starting");
        self.state.events.publish(GameEvent::GameStarted);

        loop {
            if !self.state.game.is_started() {
                break;
            }

            if let Err(e) = self.run_playing_phase().await {
                error!("💥 [SCHEDULER]: playing phase fault: {e:#}");
                sleep(FAULT_BACKOFF).await;
                continue;
            }

            if !self.state.game.is_started() {
                break;
            }

            if let Err(e) = self.run_patching_phase().await {
                error!("💥 [SCHEDULER]: patching phase fault: {e:#}");
                sleep(FAULT_BACKOFF).await;
                continue;
            }
        }

        self.state.game.release_scheduler_slot();
        self.state.events.publish(GameEvent::GameStopped);
        info!("🛑 [SCHEDULER]: game loop exited");
    }

    #[instrument(skip(self))]
    async fn run_playing_phase(&self) -> anyhow::Result<()> {
        let teams = self.state.store.get_teams().await?;

        let round_number = self.state.game.current_round.fetch_add(1, Ordering::SeqCst) + 1;
        let round_id = self.state.store.create_round(round_number).await?;
        self.state.game.round_id.store(round_id, Ordering::SeqCst);
        *self.state.game.phase.write().await = Phase::Playing;

        let round_duration = self.state.config.game.round_duration;
        let check_interval = self.state.config.game.service_check_interval;
        self.set_deadline(round_duration);

        self.flag_factory
            .create_flags_for_round(round_id, round_number, &teams)
            .await?;

        self.state.events.publish(GameEvent::RoundStarted {
            round_number,
            phase: "playing",
            duration_seconds: round_duration,
        });

        let phase_started = tokio::time::Instant::now();
        while phase_started.elapsed() < Duration::from_secs(round_duration) && self.state.game.is_started() {
            self.probe_and_broadcast(round_id, &teams).await;
            sleep(Duration::from_secs(check_interval)).await;
        }

        let scores = self.scoring.score_round(round_id, &teams).await?;
        info!("📊 [SCHEDULER]: round {} scored ({} teams)", round_number, scores.len());

        self.state.store.close_round(round_id).await?;
        self.clear_deadline();
        self.state.events.publish(GameEvent::ScoreboardUpdated);

        Ok(())
    }

    #[instrument(skip(self))]
    async fn run_patching_phase(&self) -> anyhow::Result<()> {
        let teams = self.state.store.get_teams().await?;
        let patch_duration = self.state.config.game.patch_duration;

        *self.state.game.phase.write().await = Phase::Patching;
        self.set_deadline(patch_duration);
        self.state.events.publish(GameEvent::PhaseChanged {
            phase: "patching",
            duration_seconds: patch_duration,
        });

        let team_names: Vec<String> = teams.iter().map(|t| format!("team{}", t.id)).collect();
        self.state.orchestrator.destroy(&team_names).await;
        self.state.orchestrator.ensure_network("ad_ctf_net", "172.30.0.0/24").await;

        let main_server = format!("http://{}:{}", ORCHESTRATOR_NETWORK_IP, self.state.config.server.port);
        for team in &teams {
            let secret_key = self.state.tokens.team_token(team.id).unwrap_or_default();
            self.state.orchestrator.create(team, &main_server, secret_key).await;
        }

        sleep(WARMUP_SLEEP).await;

        for team in &teams {
            if let Ok(bytes) = self.state.patches.fetch(team.id) {
                let local_path = format!("/tmp/adctf_patch_{}.py", team.id);
                if std::fs::write(&local_path, &bytes).is_ok() {
                    let container = format!("team{}", team.id);
                    self.state
                        .orchestrator
                        .copy_into(&container, &local_path, "/app/app.py")
                        .await;
                }
            }
        }

        sleep(POST_PATCH_SLEEP).await;
        self.warmup_probe(&teams).await;

        self.wait_out_patch_deadline(patch_duration).await;
        self.clear_deadline();

        Ok(())
    }

    async fn probe_and_broadcast(&self, round_id: i64, teams: &[Team]) {
        self.prober.check_all_services(round_id, teams).await;

        let statuses = match self.state.store.latest_probe_per_team(round_id).await {
            Ok(probes) => probes
                .into_iter()
                .map(|p| TeamStatus { team_id: p.team_id, is_up: p.is_up })
                .collect(),
            Err(e) => {
                warn!("⚠️ [SCHEDULER]: failed to read back probes: {e}");
                Vec::new()
            }
        };

        self.state.events.publish(GameEvent::ServiceStatusUpdated { statuses });
    }

    /// Best-effort warmup GET to each team's `/health`; failures are logged
    /// and never block the patching phase (spec.md §4.9 step 6).
    async fn warmup_probe(&self, teams: &[Team]) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("CRITICAL_FAULT: failed to build warmup HTTP client");

        for team in teams {
            let url = format!("http://{}:{}/health", team.host, team.port);
            match client.get(&url).send().await {
                Ok(response) if response.status().is_success() => {
                    info!("✅ [SCHEDULER]: warmup ok for team {}", team.id);
                }
                Ok(response) => {
                    warn!("⚠️ [SCHEDULER]: warmup non-2xx for team {}: {}", team.id, response.status());
                }
                Err(e) => {
                    warn!("⚠️ [SCHEDULER]: warmup failed for team {}: {}", team.id, e);
                }
            }
        }
    }

    /// Sleeps until `phase_deadline`, updating it once per second so status
    /// queries reflect `remaining_seconds`; exits early if `started` clears.
    async fn wait_out_patch_deadline(&self, patch_duration: u64) {
        for _ in 0..patch_duration {
            if !self.state.game.is_started() {
                return;
            }
            sleep(Duration::from_secs(1)).await;
        }
    }

    fn set_deadline(&self, duration_seconds: u64) {
        let deadline = chrono::Utc::now().timestamp() as u64 + duration_seconds;
        self.state.game.phase_deadline.store(deadline, Ordering::SeqCst);
    }

    fn clear_deadline(&self) {
        self.state.game.phase_deadline.store(0, Ordering::SeqCst);
    }
}
