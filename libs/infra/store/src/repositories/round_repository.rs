// [libs/infra/store/src/repositories/round_repository.rs]
/*!
 * APARATO: ROUND REPOSITORY (V1.0)
 * RESPONSABILIDAD: CICLO DE VIDA DE RONDAS (ACTIVA/CERRADA)
 */

use crate::client::StoreClient;
use crate::errors::StoreError;
use adctf_domain_models::{Round, RoundStatus};
use chrono::Utc;
use libsql::params;
use tracing::instrument;

/// At most one row carries `status=active` at any instant (spec.md §3).
pub struct RoundRepository {
    client: StoreClient,
}

impl RoundRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn create_round(&self, round_number: i64) -> Result<i64, StoreError> {
        let conn = self.client.conn()?;
        let now = Utc::now().timestamp();
        conn.execute(
            "INSERT INTO rounds (round_number, start_time, end_time, status) VALUES (?1, ?2, NULL, 'active')",
            params![round_number, now],
        )
        .await?;
        Ok(conn.last_insert_rowid())
    }

    #[instrument(skip(self))]
    pub async fn get_current_round(&self) -> Result<Option<Round>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, round_number, start_time, end_time, status FROM rounds
                 WHERE status='active' ORDER BY id DESC LIMIT 1",
                (),
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(map_round(&row)?)),
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    pub async fn get_round_by_number(&self, round_number: i64) -> Result<Option<Round>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, round_number, start_time, end_time, status FROM rounds
                 WHERE round_number=?1 ORDER BY id DESC LIMIT 1",
                params![round_number],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(map_round(&row)?)),
            None => Ok(None),
        }
    }

    /// Closing an already-closed round is a no-op (spec.md §8 idempotence).
    #[instrument(skip(self))]
    pub async fn close_round(&self, round_id: i64) -> Result<(), StoreError> {
        let conn = self.client.conn()?;
        let now = Utc::now().timestamp();
        conn.execute(
            "UPDATE rounds SET status='closed', end_time=?2 WHERE id=?1 AND status='active'",
            params![round_id, now],
        )
        .await?;
        Ok(())
    }
}

fn map_round(row: &libsql::Row) -> Result<Round, StoreError> {
    let end_time: Option<i64> = row.get(3)?;
    let status: String = row.get(4)?;
    Ok(Round {
        id: row.get(0)?,
        round_number: row.get(1)?,
        start_time: chrono::DateTime::from_timestamp(row.get::<i64>(2)?, 0)
            .ok_or_else(|| StoreError::Mapping("invalid start_time epoch".into()))?,
        end_time: end_time
            .map(|t| {
                chrono::DateTime::from_timestamp(t, 0)
                    .ok_or_else(|| StoreError::Mapping("invalid end_time epoch".into()))
            })
            .transpose()?,
        status: RoundStatus::from_str(&status),
    })
}
