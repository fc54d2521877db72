// [apps/orchestrator/src/services/scoring.rs]
/*!
 * APARATO: SCORING ENGINE (V1.0)
 * CLASIFICACION: DOMAIN SERVICE (ESTRATO L2)
 * RESPONSABILIDAD: RECOMPUTO DETERMINISTA DE SLA/DEFENSA/ATAQUE POR RONDA
 */

use crate::config::ScoringConfig;
use adctf_domain_models::{round2, Score, Team};
use adctf_infra_store::{Store, StoreError};
use chrono::Utc;
use std::collections::HashMap;
use tracing::instrument;

/// Invoked exactly once per round, after probing stops and the round is
/// closed (spec.md §4.5). A pure function of `(probes, submissions,
/// config)` — re-running it yields identical rows (spec.md §8 invariant 7).
pub struct ScoringEngine {
    store: Store,
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(store: Store, config: ScoringConfig) -> Self {
        Self { store, config }
    }

    #[instrument(skip(self, teams))]
    pub async fn score_round(&self, round_id: i64, teams: &[Team]) -> Result<Vec<Score>, StoreError> {
        let probes = self.store.latest_probe_per_team(round_id).await?;
        let up: HashMap<i64, bool> = probes.into_iter().map(|p| (p.team_id, p.is_up)).collect();

        let steal_counts: HashMap<i64, i64> = self.store.steal_counts(round_id).await?.into_iter().collect();
        let attack_counts: HashMap<i64, i64> = self.store.attack_counts(round_id).await?.into_iter().collect();

        let up_team_count = teams.iter().filter(|t| *up.get(&t.id).unwrap_or(&false)).count();
        let now = Utc::now();

        let scores: Vec<Score> = teams
            .iter()
            .map(|team| {
                let is_up = *up.get(&team.id).unwrap_or(&false);
                let steals = *steal_counts.get(&team.id).unwrap_or(&0) as f64;
                let attacks = *attack_counts.get(&team.id).unwrap_or(&0) as f64;

                let sla = if is_up && up_team_count > 0 {
                    round2(self.config.sla_total_pool / up_team_count as f64)
                } else {
                    0.0
                };
                let defense = round2(
                    (self.config.base_defense_score - self.config.defense_penalty_per_steal * steals)
                        .max(0.0),
                );
                let attack = round2(self.config.attack_score_per_flag * attacks);
                let total = round2(sla + defense + attack);

                Score {
                    team_id: team.id,
                    round_id,
                    sla,
                    defense,
                    attack,
                    total,
                    calculated_at: now,
                }
            })
            .collect();

        self.store.save_scores(&scores).await?;
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScoringConfig {
        ScoringConfig {
            sla_total_pool: 512.0,
            base_defense_score: 12.0,
            attack_score_per_flag: 1.0,
            defense_penalty_per_steal: 1.0,
        }
    }

    /// spec.md §8 scenario (a): 2 teams, both up, no submissions.
    #[test]
    fn scenario_a_two_teams_no_submissions() {
        let cfg = config();
        let up_team_count = 2usize;
        let sla = round2(cfg.sla_total_pool / up_team_count as f64);
        let defense = round2((cfg.base_defense_score - cfg.defense_penalty_per_steal * 0.0).max(0.0));
        let attack = round2(cfg.attack_score_per_flag * 0.0);
        let total = round2(sla + defense + attack);

        assert_eq!(sla, 256.00);
        assert_eq!(defense, 12.00);
        assert_eq!(attack, 0.00);
        assert_eq!(total, 268.00);
    }

    /// spec.md §8 scenario (b): 4 teams, team 1 steals team 2's monitor flag once.
    #[test]
    fn scenario_b_four_teams_one_steal() {
        let cfg = config();
        let up_team_count = 4usize;
        let sla = round2(cfg.sla_total_pool / up_team_count as f64);
        assert_eq!(sla, 128.00);

        let t1_total = round2(sla + round2(cfg.base_defense_score) + round2(cfg.attack_score_per_flag));
        let t2_total = round2(sla + round2(cfg.base_defense_score - 1.0));
        let t3_total = round2(sla + round2(cfg.base_defense_score));

        assert_eq!(t1_total, 141.00);
        assert_eq!(t2_total, 139.00);
        assert_eq!(t3_total, 140.00);
    }

    #[test]
    fn defense_never_goes_negative() {
        let cfg = config();
        let defense = round2((cfg.base_defense_score - cfg.defense_penalty_per_steal * 20.0).max(0.0));
        assert_eq!(defense, 0.0);
    }

    #[test]
    fn zero_up_teams_yields_zero_sla() {
        let cfg = config();
        let up_team_count = 0usize;
        let sla = if up_team_count > 0 { cfg.sla_total_pool / up_team_count as f64 } else { 0.0 };
        assert_eq!(sla, 0.0);
    }
}
