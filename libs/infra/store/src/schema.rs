// [libs/infra/store/src/schema.rs]
/*!
 * APARATO: SCHEMA DEFINITION (V1.0)
 * CLASIFICACION: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: DDL IDEMPOTENTE PARA EL TORNEO
 */

use libsql::Connection;
use tracing::instrument;

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS teams (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        host TEXT NOT NULL,
        port INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS rounds (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        round_number INTEGER NOT NULL,
        start_time INTEGER NOT NULL,
        end_time INTEGER,
        status TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS flags (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        team_id INTEGER NOT NULL REFERENCES teams(id),
        round_id INTEGER NOT NULL REFERENCES rounds(id),
        value TEXT NOT NULL UNIQUE,
        vuln_type TEXT NOT NULL,
        created_at INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS flag_submissions (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        submitter_team_id INTEGER NOT NULL REFERENCES teams(id),
        target_team_id INTEGER NOT NULL REFERENCES teams(id),
        round_id INTEGER NOT NULL REFERENCES rounds(id),
        flag_value TEXT NOT NULL,
        submitted_at INTEGER NOT NULL,
        UNIQUE(submitter_team_id, flag_value)
    )",
    "CREATE TABLE IF NOT EXISTS service_probes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        team_id INTEGER NOT NULL REFERENCES teams(id),
        round_id INTEGER NOT NULL REFERENCES rounds(id),
        is_up INTEGER NOT NULL,
        response_time REAL NOT NULL,
        error_message TEXT,
        checked_at INTEGER NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS scores (
        team_id INTEGER NOT NULL REFERENCES teams(id),
        round_id INTEGER NOT NULL REFERENCES rounds(id),
        sla REAL NOT NULL,
        defense REAL NOT NULL,
        attack REAL NOT NULL,
        total REAL NOT NULL,
        calculated_at INTEGER NOT NULL,
        PRIMARY KEY(team_id, round_id)
    )",
    "CREATE INDEX IF NOT EXISTS idx_flags_round ON flags(round_id)",
    "CREATE INDEX IF NOT EXISTS idx_probes_team_round ON service_probes(team_id, round_id, checked_at)",
    "CREATE INDEX IF NOT EXISTS idx_submissions_round ON flag_submissions(round_id)",
];

#[instrument(skip_all)]
pub async fn apply_schema(conn: &Connection) -> Result<(), libsql::Error> {
    for statement in STATEMENTS {
        conn.execute(statement, ()).await?;
    }
    Ok(())
}
