// [apps/orchestrator/src/config.rs]
/*!
 * APARATO: CONFIGURATION LOADER (V1.0)
 * CLASIFICACION: BOOTSTRAP (ESTRATO L2)
 * RESPONSABILIDAD: CARGA DE LA TOPOLOGIA DEL TORNEO DESDE YAML
 */

use adctf_domain_models::Team;
use serde::Deserialize;
use std::path::Path;
use tracing::instrument;

#[derive(Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub num_teams: u32,
    pub round_duration: u64,
    pub patch_duration: u64,
    pub service_check_interval: u64,
    /// Present for schema parity with the source; unused — see DESIGN.md.
    #[serde(default)]
    pub flag_lifetime: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    pub sla_total_pool: f64,
    pub base_defense_score: f64,
    pub attack_score_per_flag: f64,
    pub defense_penalty_per_steal: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub game: GameConfig,
    pub scoring: ScoringConfig,
    pub teams: Vec<Team>,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl Config {
    /// Loads the YAML configuration file at `path`. Boundary-only parsing:
    /// a missing or malformed file is a fatal init failure (spec.md §6 Exit
    /// Codes), so this panics rather than returning a `Result` the caller
    /// would have nothing useful to do with.
    #[instrument]
    pub fn load(path: &Path) -> Self {
        let raw = std::fs::read_to_string(path)
            .unwrap_or_else(|e| panic!("CRITICAL_FAULT: cannot read config file {path:?}: {e}"));
        serde_yaml::from_str(&raw)
            .unwrap_or_else(|e| panic!("CRITICAL_FAULT: malformed config file {path:?}: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_documented_shape() {
        let yaml = r#"
game:
  num_teams: 2
  round_duration: 300
  patch_duration: 300
  service_check_interval: 30
  flag_lifetime: 0
scoring:
  sla_total_pool: 512
  base_defense_score: 12
  attack_score_per_flag: 1
  defense_penalty_per_steal: 1
teams:
  - id: 1
    name: "Team One"
    host: "10.0.1.10"
    port: 8001
database:
  path: "data/adctf.db"
server:
  host: "0.0.0.0"
  port: 5000
  debug: false
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.game.num_teams, 2);
        assert_eq!(config.teams[0].name, "Team One");
        assert_eq!(config.scoring.sla_total_pool, 512.0);
    }
}
