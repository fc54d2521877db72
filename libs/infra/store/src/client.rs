// [libs/infra/store/src/client.rs]
/*!
 * APARATO: DATABASE CONNECTION CLIENT (V1.0)
 * CLASIFICACION: INFRASTRUCTURE LAYER (ESTRATO L3)
 * RESPONSABILIDAD: GESTION DE ENLACES EMBEBIDOS Y PERSISTENCIA ACID
 */

use crate::errors::StoreError;
use crate::schema::apply_schema;
use libsql::{Builder, Connection, Database};
use std::sync::Arc;
use tracing::{info, error, instrument};

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 30_000;

#[derive(Clone)]
pub struct StoreClient {
    driver: Arc<Database>,
}

impl StoreClient {
    /// Opens (or creates) the embedded libSQL database at `path`, applies the
    /// schema idempotently, and configures WAL + a busy-wait timeout.
    #[instrument(skip(path))]
    pub async fn connect(path: &str, busy_timeout_ms: Option<u64>) -> Result<Self, StoreError> {
        if path.is_empty() {
            return Err(StoreError::Connection("DATABASE_PATH_UNDEFINED".into()));
        }

        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Connection(format!("DATA_DIR_FAULT: {e}")))?;
            }
        }

        info!("🔌 [STORE]: opening embedded database at [{}]", path);

        let driver = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Connection(format!("DRIVER_IGNITION_FAULT: {e}")))?;

        let conn = driver
            .connect()
            .map_err(|e| StoreError::Connection(format!("BOOTSTRAP_LINK_FAULT: {e}")))?;

        conn.execute("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| StoreError::Connection(format!("WAL_FAULT: {e}")))?;

        let timeout = busy_timeout_ms.unwrap_or(DEFAULT_BUSY_TIMEOUT_MS);
        conn.execute(&format!("PRAGMA busy_timeout={timeout}"), ())
            .await
            .map_err(|e| StoreError::Connection(format!("BUSY_TIMEOUT_FAULT: {e}")))?;

        apply_schema(&conn)
            .await
            .map_err(|e| StoreError::Connection(format!("SCHEMA_SYNC_FAULT: {e}")))?;

        info!("⚓ [STORE]: schema applied, WAL enabled, busy_timeout={}ms", timeout);

        Ok(Self { driver: Arc::new(driver) })
    }

    pub fn conn(&self) -> Result<Connection, StoreError> {
        self.driver.connect().map_err(|e| {
            error!("⚠️ [STORE]: connection allocation failed: {}", e);
            StoreError::Connection(e.to_string())
        })
    }
}
