// [apps/orchestrator/src/services/patch_store.rs]
/*!
 * APARATO: PATCH STORE (V1.0)
 * CLASIFICACION: DOMAIN SERVICE (ESTRATO L2)
 * RESPONSABILIDAD: PERSISTENCIA DURADERA DE PARCHES POR EQUIPO
 */

use adctf_domain_models::{PatchRecord, Team};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::instrument;

/// `patches/<team_id>_app.py`, last-writer-wins, not versioned — spec.md §4.7.
pub struct PatchStore {
    base_dir: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PatchStoreError {
    #[error("patch filename must end in .py")]
    InvalidExtension,
    #[error("no patch uploaded for team {0}")]
    NotFound(i64),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
}

impl PatchStore {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn path_for(&self, team_id: i64) -> PathBuf {
        self.base_dir.join(format!("{team_id}_app.py"))
    }

    #[instrument(skip(self, bytes))]
    pub fn upload(&self, team_id: i64, filename: &str, bytes: &[u8]) -> Result<(), PatchStoreError> {
        if !filename.ends_with(".py") {
            return Err(PatchStoreError::InvalidExtension);
        }
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::write(self.path_for(team_id), bytes)?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub fn fetch(&self, team_id: i64) -> Result<Vec<u8>, PatchStoreError> {
        std::fs::read(self.path_for(team_id)).map_err(|_| PatchStoreError::NotFound(team_id))
    }

    #[instrument(skip(self, teams))]
    pub fn list(&self, teams: &[Team]) -> Vec<PatchRecord> {
        let mut records: Vec<PatchRecord> = teams
            .iter()
            .filter_map(|team| {
                let metadata = std::fs::metadata(self.path_for(team.id)).ok()?;
                let modified_at: DateTime<Utc> = metadata.modified().ok()?.into();
                Some(PatchRecord {
                    team_id: team.id,
                    team_name: team.name.clone(),
                    size_bytes: metadata.len(),
                    modified_at,
                })
            })
            .collect();

        records.sort_by_key(|r| r.team_id);
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_python_patches() {
        let dir = tempfile::tempdir().unwrap();
        let store = PatchStore::new(dir.path().to_path_buf());
        let result = store.upload(1, "app.txt", b"print(1)");
        assert!(matches!(result, Err(PatchStoreError::InvalidExtension)));
    }

    #[test]
    fn second_upload_replaces_the_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = PatchStore::new(dir.path().to_path_buf());
        store.upload(1, "app.py", b"first").unwrap();
        store.upload(1, "app.py", b"second").unwrap();
        assert_eq!(store.fetch(1).unwrap(), b"second");
    }

    #[test]
    fn fetch_missing_team_errors() {
        let dir = tempfile::tempdir().unwrap();
        let store = PatchStore::new(dir.path().to_path_buf());
        assert!(matches!(store.fetch(99), Err(PatchStoreError::NotFound(99))));
    }
}
