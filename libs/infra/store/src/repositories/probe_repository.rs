// [libs/infra/store/src/repositories/probe_repository.rs]
/*!
 * APARATO: PROBE REPOSITORY (V1.0)
 * RESPONSABILIDAD: HISTORIAL DE SALUD FUNCIONAL POR EQUIPO/RONDA
 */

use crate::client::StoreClient;
use crate::errors::StoreError;
use adctf_domain_models::ServiceProbe;
use chrono::Utc;
use libsql::params;
use tracing::instrument;

/// Append-only. The effective status of (team, round) is the row with the
/// greatest `checked_at` (spec.md §3).
pub struct ProbeRepository {
    client: StoreClient,
}

impl ProbeRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, error_message))]
    pub async fn record_probe(
        &self,
        team_id: i64,
        round_id: i64,
        is_up: bool,
        response_time: f64,
        error_message: Option<&str>,
    ) -> Result<(), StoreError> {
        let conn = self.client.conn()?;
        let now = Utc::now().timestamp();
        conn.execute(
            "INSERT INTO service_probes (team_id, round_id, is_up, response_time, error_message, checked_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![team_id, round_id, is_up, response_time, error_message, now],
        )
        .await?;
        Ok(())
    }

    /// One row per team: the probe with the greatest `checked_at` for this round.
    #[instrument(skip(self))]
    pub async fn latest_probe_per_team(&self, round_id: i64) -> Result<Vec<ServiceProbe>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT p.id, p.team_id, p.round_id, p.is_up, p.response_time, p.error_message, p.checked_at
                 FROM service_probes p
                 INNER JOIN (
                     SELECT team_id, MAX(checked_at) AS max_checked_at
                     FROM service_probes WHERE round_id=?1 GROUP BY team_id
                 ) latest ON latest.team_id = p.team_id AND latest.max_checked_at = p.checked_at
                 WHERE p.round_id=?1",
                params![round_id],
            )
            .await?;

        let mut probes = Vec::new();
        while let Some(row) = rows.next().await? {
            probes.push(ServiceProbe {
                id: row.get(0)?,
                team_id: row.get(1)?,
                round_id: row.get(2)?,
                is_up: row.get::<i64>(3)? != 0,
                response_time: row.get(4)?,
                error_message: row.get(5)?,
                checked_at: chrono::DateTime::from_timestamp(row.get::<i64>(6)?, 0)
                    .ok_or_else(|| StoreError::Mapping("invalid checked_at epoch".into()))?,
            });
        }
        Ok(probes)
    }
}
