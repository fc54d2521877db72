// [libs/infra/store/src/lib.rs]
/*!
 * =================================================================
 * APARATO: PERSISTENT STORE FACADE (V1.0)
 * CLASIFICACION: INFRASTRUCTURE CORE (ESTRATO L3)
 * RESPONSABILIDAD: PUNTO UNICO DE ENTRADA A LA PERSISTENCIA DEL TORNEO
 * =================================================================
 */

pub mod client;
pub mod errors;
pub mod repositories;
pub mod schema;

pub use client::StoreClient;
pub use errors::StoreError;

use adctf_domain_models::{
    Flag, FlagSubmission, Round, Score, ScoreboardEntry, ServiceProbe, Team, VulnType,
};
use repositories::{
    FlagRepository, ProbeRepository, RoundRepository, ScoreRepository, SubmissionRepository,
    TeamRepository,
};
use std::collections::HashMap;
use tracing::instrument;

/// One explicit handle wrapping every repository over a shared `StoreClient`
/// connection — the single source of truth for game history (spec.md §5).
/// Every other component reads and writes through this facade, never through
/// a repository directly, mirroring the teacher's single-client composition.
#[derive(Clone)]
pub struct Store {
    teams: std::sync::Arc<TeamRepository>,
    rounds: std::sync::Arc<RoundRepository>,
    flags: std::sync::Arc<FlagRepository>,
    submissions: std::sync::Arc<SubmissionRepository>,
    probes: std::sync::Arc<ProbeRepository>,
    scores: std::sync::Arc<ScoreRepository>,
}

impl Store {
    pub fn new(client: StoreClient) -> Self {
        Self {
            teams: std::sync::Arc::new(TeamRepository::new(client.clone())),
            rounds: std::sync::Arc::new(RoundRepository::new(client.clone())),
            flags: std::sync::Arc::new(FlagRepository::new(client.clone())),
            submissions: std::sync::Arc::new(SubmissionRepository::new(client.clone())),
            probes: std::sync::Arc::new(ProbeRepository::new(client.clone())),
            scores: std::sync::Arc::new(ScoreRepository::new(client)),
        }
    }

    pub async fn add_team(&self, team: &Team) -> Result<(), StoreError> {
        self.teams.add_team(team).await
    }

    pub async fn get_teams(&self) -> Result<Vec<Team>, StoreError> {
        self.teams.get_teams().await
    }

    pub async fn create_round(&self, round_number: i64) -> Result<i64, StoreError> {
        self.rounds.create_round(round_number).await
    }

    pub async fn get_current_round(&self) -> Result<Option<Round>, StoreError> {
        self.rounds.get_current_round().await
    }

    pub async fn get_round_by_number(&self, round_number: i64) -> Result<Option<Round>, StoreError> {
        self.rounds.get_round_by_number(round_number).await
    }

    pub async fn close_round(&self, round_id: i64) -> Result<(), StoreError> {
        self.rounds.close_round(round_id).await
    }

    pub async fn add_flag(
        &self,
        team_id: i64,
        round_id: i64,
        value: &str,
        vuln_type: VulnType,
    ) -> Result<i64, StoreError> {
        self.flags.add_flag(team_id, round_id, value, vuln_type).await
    }

    pub async fn get_flag_by_value(&self, value: &str) -> Result<Option<Flag>, StoreError> {
        self.flags.get_flag_by_value(value).await
    }

    pub async fn flags_for_team_round(
        &self,
        team_id: i64,
        round_id: i64,
    ) -> Result<Vec<Flag>, StoreError> {
        self.flags.flags_for_team_round(team_id, round_id).await
    }

    pub async fn record_submission(
        &self,
        submitter_team_id: i64,
        target_team_id: i64,
        round_id: i64,
        flag_value: &str,
    ) -> Result<(), StoreError> {
        self.submissions
            .record_submission(submitter_team_id, target_team_id, round_id, flag_value)
            .await
    }

    pub async fn steal_counts(&self, round_id: i64) -> Result<Vec<(i64, i64)>, StoreError> {
        self.submissions.steal_counts(round_id).await
    }

    pub async fn attack_counts(&self, round_id: i64) -> Result<Vec<(i64, i64)>, StoreError> {
        self.submissions.attack_counts(round_id).await
    }

    pub async fn submission_history(&self, limit: i64) -> Result<Vec<FlagSubmission>, StoreError> {
        self.submissions.submission_history(limit).await
    }

    pub async fn record_probe(
        &self,
        team_id: i64,
        round_id: i64,
        is_up: bool,
        response_time: f64,
        error_message: Option<&str>,
    ) -> Result<(), StoreError> {
        self.probes
            .record_probe(team_id, round_id, is_up, response_time, error_message)
            .await
    }

    pub async fn latest_probe_per_team(&self, round_id: i64) -> Result<Vec<ServiceProbe>, StoreError> {
        self.probes.latest_probe_per_team(round_id).await
    }

    pub async fn save_scores(&self, scores: &[Score]) -> Result<(), StoreError> {
        self.scores.save_scores(scores).await
    }

    pub async fn round_scores(&self, round_id: i64) -> Result<Vec<Score>, StoreError> {
        self.scores.round_scores(round_id).await
    }

    /// Aggregated totals across all rounds, joined with each team's `is_up`
    /// status for the current round (spec.md §4.1, `GET /api/scoreboard`).
    #[instrument(skip(self))]
    pub async fn scoreboard(&self) -> Result<Vec<ScoreboardEntry>, StoreError> {
        let totals = self.scores.scoreboard_totals().await?;

        let current_statuses: HashMap<i64, bool> = match self.rounds.get_current_round().await? {
            Some(round) => self
                .probes
                .latest_probe_per_team(round.id)
                .await?
                .into_iter()
                .map(|p| (p.team_id, p.is_up))
                .collect(),
            None => HashMap::new(),
        };

        Ok(totals
            .into_iter()
            .map(|(team_id, sla, defense, attack, total)| ScoreboardEntry {
                team_id,
                sla,
                defense,
                attack,
                total,
                is_up: current_statuses.get(&team_id).copied().unwrap_or(false),
            })
            .collect())
    }
}
