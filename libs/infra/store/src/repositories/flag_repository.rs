// [libs/infra/store/src/repositories/flag_repository.rs]
/*!
 * APARATO: FLAG REPOSITORY (V1.0)
 * RESPONSABILIDAD: PERSISTENCIA DE FLAGS MINADAS POR RONDA
 */

use crate::client::StoreClient;
use crate::errors::StoreError;
use adctf_domain_models::{Flag, VulnType};
use chrono::Utc;
use libsql::params;
use tracing::instrument;

/// Exactly three rows per (team, round), one per vuln_type (spec.md §3).
pub struct FlagRepository {
    client: StoreClient,
}

impl FlagRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self, value))]
    pub async fn add_flag(
        &self,
        team_id: i64,
        round_id: i64,
        value: &str,
        vuln_type: VulnType,
    ) -> Result<i64, StoreError> {
        let conn = self.client.conn()?;
        let now = Utc::now().timestamp();
        conn.execute(
            "INSERT INTO flags (team_id, round_id, value, vuln_type, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![team_id, round_id, value, vuln_type.as_str(), now],
        )
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                StoreError::FlagCollision
            } else {
                StoreError::Query(e)
            }
        })?;
        Ok(conn.last_insert_rowid())
    }

    #[instrument(skip(self, value))]
    pub async fn get_flag_by_value(&self, value: &str) -> Result<Option<Flag>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, team_id, round_id, value, vuln_type, created_at FROM flags WHERE value=?1",
                params![value],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(map_flag(&row)?)),
            None => Ok(None),
        }
    }

    /// All three flags minted for `(team_id, round_id)`, keyed by vuln_type.
    #[instrument(skip(self))]
    pub async fn flags_for_team_round(
        &self,
        team_id: i64,
        round_id: i64,
    ) -> Result<Vec<Flag>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query(
                "SELECT id, team_id, round_id, value, vuln_type, created_at FROM flags
                 WHERE team_id=?1 AND round_id=?2",
                params![team_id, round_id],
            )
            .await?;

        let mut flags = Vec::new();
        while let Some(row) = rows.next().await? {
            flags.push(map_flag(&row)?);
        }
        Ok(flags)
    }
}

fn map_flag(row: &libsql::Row) -> Result<Flag, StoreError> {
    let vuln_type: String = row.get(4)?;
    Ok(Flag {
        id: row.get(0)?,
        team_id: row.get(1)?,
        round_id: row.get(2)?,
        value: row.get(3)?,
        vuln_type: VulnType::from_str(&vuln_type)
            .ok_or_else(|| StoreError::Mapping(format!("unknown vuln_type '{vuln_type}'")))?,
        created_at: chrono::DateTime::from_timestamp(row.get::<i64>(5)?, 0)
            .ok_or_else(|| StoreError::Mapping("invalid created_at epoch".into()))?,
    })
}
