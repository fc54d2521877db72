// [apps/orchestrator/src/auth/token_authority.rs]
/*!
 * APARATO: TOKEN AUTHORITY (V1.0)
 * CLASIFICACION: SECURITY CORE (ESTRATO L2)
 * RESPONSABILIDAD: GENERACION Y VALIDACION CONSTANTE-TIEMPO DE BEARER TOKENS
 */

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use subtle::ConstantTimeEq;
use tracing::{info, instrument};

/// Result of `TokenAuthority::validate` — a tagged variant, not subclassing
/// (spec.md §9 Design Notes on polymorphism).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Admin,
    Team { team_id: i64 },
    Invalid,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenTable {
    admin: String,
    #[serde(flatten)]
    teams: HashMap<String, String>,
}

/// Owns the in-memory token map, written once at init and read-only
/// thereafter (spec.md §5). Reloaded verbatim from `path` while the file
/// exists — tokens are never regenerated on restart (spec.md §4.2, §8
/// invariant 6).
pub struct TokenAuthority {
    admin_token: String,
    team_tokens: HashMap<i64, String>,
    path: PathBuf,
}

impl TokenAuthority {
    #[instrument(skip_all)]
    pub fn load_or_generate(path: &Path, num_teams: u32) -> std::io::Result<Self> {
        if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            let table: TokenTable = serde_json::from_str(&raw)
                .unwrap_or_else(|e| panic!("CRITICAL_FAULT: corrupt token file {path:?}: {e}"));

            let team_tokens = table
                .teams
                .into_iter()
                .filter_map(|(key, token)| {
                    key.strip_prefix("team")
                        .and_then(|n| n.parse::<i64>().ok())
                        .map(|id| (id, token))
                })
                .collect();

            info!("🔑 [AUTH]: token file reloaded verbatim from [{:?}]", path);
            return Ok(Self { admin_token: table.admin, team_tokens, path: path.to_path_buf() });
        }

        let admin_token = format!("ADMIN_{}", random_hex_64());
        let mut team_tokens = HashMap::new();
        let mut raw_teams = HashMap::new();
        for i in 1..=num_teams as i64 {
            let token = format!("TEAM{i}_{}", random_hex_64());
            team_tokens.insert(i, token.clone());
            raw_teams.insert(format!("team{i}"), token);
        }

        let table = TokenTable { admin: admin_token.clone(), teams: raw_teams };
        write_atomically(path, &serde_json::to_string_pretty(&table).unwrap())?;

        info!("🔑 [AUTH]: generated {} fresh tokens at [{:?}]", num_teams + 1, path);
        Ok(Self { admin_token, team_tokens, path: path.to_path_buf() })
    }

    /// Constant-time against every known token — never short-circuited, so
    /// the response timing does not leak which sub-check failed (spec.md §7).
    #[instrument(skip_all)]
    pub fn validate(&self, token: &str) -> AuthOutcome {
        let token_bytes = token.as_bytes();
        let mut outcome = AuthOutcome::Invalid;

        if bool::from(self.admin_token.as_bytes().ct_eq(token_bytes)) {
            outcome = AuthOutcome::Admin;
        }

        for (&team_id, team_token) in &self.team_tokens {
            if bool::from(team_token.as_bytes().ct_eq(token_bytes)) {
                outcome = AuthOutcome::Team { team_id };
            }
        }

        outcome
    }

    pub fn team_token(&self, team_id: i64) -> Option<&str> {
        self.team_tokens.get(&team_id).map(String::as_str)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn random_hex_64() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn write_atomically(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let tmp_path = path.with_extension("tmp");
    std::fs::write(&tmp_path, contents)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_injective_tokens_and_validates_them() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let authority = TokenAuthority::load_or_generate(&path, 3).unwrap();

        assert_eq!(authority.validate(&authority.admin_token.clone()), AuthOutcome::Admin);
        assert_eq!(authority.validate(authority.team_token(2).unwrap()), AuthOutcome::Team { team_id: 2 });
        assert_eq!(authority.validate("garbage"), AuthOutcome::Invalid);

        let mut seen = std::collections::HashSet::new();
        seen.insert(authority.admin_token.clone());
        for i in 1..=3 {
            assert!(seen.insert(authority.team_token(i).unwrap().to_string()));
        }
    }

    #[test]
    fn reloads_the_same_tokens_on_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        let first = TokenAuthority::load_or_generate(&path, 2).unwrap();
        let second = TokenAuthority::load_or_generate(&path, 2).unwrap();

        assert_eq!(first.admin_token, second.admin_token);
        assert_eq!(first.team_token(1), second.team_token(1));
    }
}
