// [libs/infra/store/src/repositories/score_repository.rs]
/*!
 * APARATO: SCORE REPOSITORY (V1.0)
 * RESPONSABILIDAD: PERSISTENCIA IDEMPOTENTE DE PUNTAJES POR RONDA
 */

use crate::client::StoreClient;
use crate::errors::StoreError;
use adctf_domain_models::Score;
use chrono::Utc;
use libsql::params;
use tracing::instrument;

/// Unique on `(team_id, round_id)`; rewritten idempotently each time the
/// Scoring Engine runs for a round (spec.md §3/§4.5).
pub struct ScoreRepository {
    client: StoreClient,
}

impl ScoreRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, scores))]
    pub async fn save_scores(&self, scores: &[Score]) -> Result<(), StoreError> {
        let conn = self.client.conn()?;
        let now = Utc::now().timestamp();
        for score in scores {
            conn.execute(
                "INSERT INTO scores (team_id, round_id, sla, defense, attack, total, calculated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                 ON CONFLICT(team_id, round_id) DO UPDATE SET
                    sla=excluded.sla, defense=excluded.defense, attack=excluded.attack,
                    total=excluded.total, calculated_at=excluded.calculated_at",
                params![
                    score.team_id,
                    score.round_id,
                    score.sla,
                    score.defense,
                    score.attack,
                    score.total,
                    now
                ],
            )
            .await?;
        }
        Ok(())
    }

    /// Per-team score rows for one round.
    #[instrument(skip(self))]
    pub async fn round_scores(&self, round_id: i64) -> Result<Vec<Score>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT team_id, round_id, sla, defense, attack, total, calculated_at
                 FROM scores WHERE round_id=?1 ORDER BY team_id",
                params![round_id],
            )
            .await?;

        let mut scores = Vec::new();
        while let Some(row) = rows.next().await? {
            scores.push(map_score(&row)?);
        }
        Ok(scores)
    }

    /// Aggregate per-team totals across all rounds, for the scoreboard view.
    #[instrument(skip(self))]
    pub async fn scoreboard_totals(&self) -> Result<Vec<(i64, f64, f64, f64, f64)>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT team_id, SUM(sla), SUM(defense), SUM(attack), SUM(total)
                 FROM scores GROUP BY team_id",
                (),
            )
            .await?;

        let mut totals = Vec::new();
        while let Some(row) = rows.next().await? {
            totals.push((
                row.get(0)?,
                row.get(1)?,
                row.get(2)?,
                row.get(3)?,
                row.get(4)?,
            ));
        }
        Ok(totals)
    }
}

fn map_score(row: &libsql::Row) -> Result<Score, StoreError> {
    Ok(Score {
        team_id: row.get(0)?,
        round_id: row.get(1)?,
        sla: row.get(2)?,
        defense: row.get(3)?,
        attack: row.get(4)?,
        total: row.get(5)?,
        calculated_at: chrono::DateTime::from_timestamp(row.get::<i64>(6)?, 0)
            .ok_or_else(|| StoreError::Mapping("invalid calculated_at epoch".into()))?,
    })
}
