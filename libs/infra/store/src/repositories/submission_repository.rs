// [libs/infra/store/src/repositories/submission_repository.rs]
/*!
 * APARATO: SUBMISSION REPOSITORY (V1.0)
 * RESPONSABILIDAD: ANTI-REPLAY Y ATRIBUCION DE CAPTURAS
 */

use crate::client::StoreClient;
use crate::errors::StoreError;
use adctf_domain_models::FlagSubmission;
use chrono::Utc;
use libsql::params;
use tracing::instrument;

/// Stored only on accepted submissions; unique on `(submitter_team_id,
/// flag_value)` enforces anti-replay at the Store layer (spec.md §4.6, §5).
pub struct SubmissionRepository {
    client: StoreClient,
}

impl SubmissionRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    /// Atomically inserts the accepted submission. The unique constraint on
    /// `(submitter_team_id, flag_value)` is the linearization point for
    /// anti-replay — returns `StoreError::Conflict` on a duplicate rather
    /// than relying on an optimistic pre-check (spec.md §7).
    #[instrument(skip(self, flag_value))]
    pub async fn record_submission(
        &self,
        submitter_team_id: i64,
        target_team_id: i64,
        round_id: i64,
        flag_value: &str,
    ) -> Result<(), StoreError> {
        let conn = self.client.conn()?;
        let now = Utc::now().timestamp();
        conn.execute(
            "INSERT INTO flag_submissions
                (submitter_team_id, target_team_id, round_id, flag_value, submitted_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![submitter_team_id, target_team_id, round_id, flag_value, now],
        )
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                StoreError::Conflict("flag already submitted".into())
            } else {
                StoreError::Query(e)
            }
        })?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn steal_counts(&self, round_id: i64) -> Result<Vec<(i64, i64)>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT target_team_id, COUNT(*) FROM flag_submissions
                 WHERE round_id=?1 GROUP BY target_team_id",
                params![round_id],
            )
            .await?;

        let mut counts = Vec::new();
        while let Some(row) = rows.next().await? {
            counts.push((row.get(0)?, row.get(1)?));
        }
        Ok(counts)
    }

    #[instrument(skip(self))]
    pub async fn attack_counts(&self, round_id: i64) -> Result<Vec<(i64, i64)>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT submitter_team_id, COUNT(*) FROM flag_submissions
                 WHERE round_id=?1 GROUP BY submitter_team_id",
                params![round_id],
            )
            .await?;

        let mut counts = Vec::new();
        while let Some(row) = rows.next().await? {
            counts.push((row.get(0)?, row.get(1)?));
        }
        Ok(counts)
    }

    #[instrument(skip(self))]
    pub async fn submission_history(&self, limit: i64) -> Result<Vec<FlagSubmission>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, submitter_team_id, target_team_id, round_id, flag_value, submitted_at
                 FROM flag_submissions ORDER BY id DESC LIMIT ?1",
                params![limit],
            )
            .await?;

        let mut history = Vec::new();
        while let Some(row) = rows.next().await? {
            history.push(FlagSubmission {
                id: row.get(0)?,
                submitter_team_id: row.get(1)?,
                target_team_id: row.get(2)?,
                round_id: row.get(3)?,
                flag_value: row.get(4)?,
                submitted_at: chrono::DateTime::from_timestamp(row.get::<i64>(5)?, 0)
                    .ok_or_else(|| StoreError::Mapping("invalid submitted_at epoch".into()))?,
            });
        }
        Ok(history)
    }
}
