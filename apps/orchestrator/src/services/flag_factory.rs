// [apps/orchestrator/src/services/flag_factory.rs]
/*!
 * APARATO: FLAG FACTORY (V1.0)
 * CLASIFICACION: DOMAIN SERVICE (ESTRATO L2)
 * RESPONSABILIDAD: MINTADO DE FLAGS UNICAS POR RONDA Y TIPO DE VULNERABILIDAD
 */

use adctf_domain_models::{Team, VulnType};
use adctf_infra_store::{Store, StoreError};
use chrono::Utc;
use rand::RngCore;
use sha2::{Digest, Sha256};
use tracing::instrument;

pub struct FlagFactory {
    store: Store,
}

impl FlagFactory {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// Mints 3·|teams| flags for `round_id`, one per (team, vuln_type). Each
    /// value is the first 32 hex chars of a SHA-256 digest over a random,
    /// time-salted string, wrapped in `FLAG{...}` — spec.md §4.3.
    #[instrument(skip(self, teams))]
    pub async fn create_flags_for_round(
        &self,
        round_id: i64,
        round_number: i64,
        teams: &[Team],
    ) -> Result<(), StoreError> {
        for team in teams {
            for vuln_type in VulnType::ALL {
                let value = mint_flag_value(team.id, round_number, vuln_type);
                self.store.add_flag(team.id, round_id, &value, vuln_type).await?;
            }
        }
        Ok(())
    }
}

fn mint_flag_value(team_id: i64, round_number: i64, vuln_type: VulnType) -> String {
    let mut random_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut random_bytes);
    let random_hex = hex::encode(random_bytes);
    let now = Utc::now().to_rfc3339();

    let seed = format!(
        "{}_{}_{}_{}_{}",
        team_id,
        round_number,
        vuln_type.as_str(),
        random_hex,
        now
    );

    let digest = Sha256::digest(seed.as_bytes());
    let secret = &hex::encode(digest)[..32];

    format!("FLAG{{{team_id}_{round_number}_{secret}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mints_the_documented_shape() {
        let value = mint_flag_value(1, 3, VulnType::Monitor);
        assert!(value.starts_with("FLAG{1_3_"));
        assert!(value.ends_with('}'));
        let secret = value
            .trim_start_matches("FLAG{1_3_")
            .trim_end_matches('}');
        assert_eq!(secret.len(), 32);
        assert!(secret.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn never_collides_across_many_draws() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            assert!(seen.insert(mint_flag_value(1, 1, VulnType::Logs)));
        }
    }
}
