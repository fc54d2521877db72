// [libs/infra/store/src/repositories/team_repository.rs]
/*!
 * APARATO: TEAM REPOSITORY (V1.0)
 * RESPONSABILIDAD: REGISTRO ESTATICO DE EQUIPOS COMPETIDORES
 */

use crate::client::StoreClient;
use crate::errors::StoreError;
use adctf_domain_models::Team;
use libsql::params;
use tracing::instrument;

/// Teams are loaded once at boot from configuration (spec.md §3); the only
/// mutation after init is re-registration with the same `id` (upsert).
pub struct TeamRepository {
    client: StoreClient,
}

impl TeamRepository {
    pub fn new(client: StoreClient) -> Self {
        Self { client }
    }

    #[instrument(skip(self))]
    pub async fn add_team(&self, team: &Team) -> Result<(), StoreError> {
        let conn = self.client.conn()?;
        conn.execute(
            "INSERT INTO teams (id, name, host, port) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET name=excluded.name, host=excluded.host, port=excluded.port",
            params![team.id, team.name.clone(), team.host.clone(), team.port as i64],
        )
        .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn get_teams(&self) -> Result<Vec<Team>, StoreError> {
        let conn = self.client.conn()?;
        let mut rows = conn
            .query("SELECT id, name, host, port FROM teams ORDER BY id", ())
            .await?;

        let mut teams = Vec::new();
        while let Some(row) = rows.next().await? {
            teams.push(Team {
                id: row.get(0)?,
                name: row.get(1)?,
                host: row.get(2)?,
                port: row.get::<i64>(3)? as u16,
            });
        }
        Ok(teams)
    }
}
