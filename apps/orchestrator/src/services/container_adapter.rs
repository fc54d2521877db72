// [apps/orchestrator/src/services/container_adapter.rs]
/*!
 * APARATO: CONTAINER ORCHESTRATOR ADAPTER (V1.0)
 * CLASIFICACION: INFRASTRUCTURE ADAPTER (ESTRATO L3)
 * RESPONSABILIDAD: EJECUTOR OPACO SOBRE EL RUNTIME DE CONTENEDORES
 */

use adctf_domain_models::Team;
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tracing::{instrument, warn};

/// Internal port the team image always binds, and the path its log volume
/// is mounted at — both passed through as env so the service doesn't need
/// to hardcode them (spec.md §4.8).
const TEAM_CONTAINER_PORT: u16 = 8000;
const TEAM_LOG_DIR: &str = "/app/logs";

const DESTROY_TIMEOUT: Duration = Duration::from_secs(10);
const NETWORK_TIMEOUT: Duration = Duration::from_secs(10);
const CREATE_TIMEOUT: Duration = Duration::from_secs(30);
const COPY_TIMEOUT: Duration = Duration::from_secs(10);

/// Opaque executor exposing `cp`, `rm -f`, `run -d`, `network create`
/// semantics (spec.md §1, §4.8). Each primitive has an independent timeout;
/// per-team failure is logged and does not abort the round.
#[async_trait]
pub trait ContainerOrchestrator: Send + Sync {
    async fn destroy(&self, team_names: &[String]);
    async fn ensure_network(&self, name: &str, cidr: &str);
    /// `main_server` is the orchestrator's own address as reachable from
    /// inside the team network; `secret_key` is the team's issued bearer
    /// token, reused as the deployed service's session secret.
    async fn create(&self, team: &Team, main_server: &str, secret_key: &str);
    async fn copy_into(&self, container: &str, local_path: &str, remote_path: &str) -> bool;
}

/// Production implementation: shells out to the `docker` CLI, wrapping
/// every call in `tokio::time::timeout` and swallowing per-team failures —
/// mirrors the teacher's per-worker fault isolation pattern.
pub struct ShellContainerOrchestrator;

impl ShellContainerOrchestrator {
    pub fn new() -> Self {
        Self
    }

    async fn run(label: &str, timeout: Duration, mut command: Command) {
        match tokio::time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) if output.status.success() => {}
            Ok(Ok(output)) => warn!(
                "⚠️ [ORCHESTRATOR]: {} exited non-zero: {}",
                label,
                String::from_utf8_lossy(&output.stderr)
            ),
            Ok(Err(e)) => warn!("⚠️ [ORCHESTRATOR]: {} failed to spawn: {}", label, e),
            Err(_) => warn!("⚠️ [ORCHESTRATOR]: {} timed out after {:?}", label, timeout),
        }
    }
}

impl Default for ShellContainerOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContainerOrchestrator for ShellContainerOrchestrator {
    #[instrument(skip(self))]
    async fn destroy(&self, team_names: &[String]) {
        if team_names.is_empty() {
            return;
        }
        let mut command = Command::new("docker");
        command.arg("rm").arg("-f").args(team_names);
        Self::run("destroy", DESTROY_TIMEOUT, command).await;
    }

    #[instrument(skip(self))]
    async fn ensure_network(&self, name: &str, cidr: &str) {
        let mut command = Command::new("docker");
        command
            .arg("network")
            .arg("create")
            .arg("--subnet")
            .arg(cidr)
            .arg(name);
        Self::run("ensure_network", NETWORK_TIMEOUT, command).await;
    }

    #[instrument(skip(self, main_server, secret_key))]
    async fn create(&self, team: &Team, main_server: &str, secret_key: &str) {
        let team_id = team.id;
        let container = format!("team{team_id}");
        let image = format!("adsystem_team{team_id}");
        let ip = format!("172.30.0.{}", 100 + team_id);
        let port_mapping = format!("{}:{}", 8100 + team_id, TEAM_CONTAINER_PORT);

        let mut command = Command::new("docker");
        command
            .arg("run")
            .arg("-d")
            .arg("--name")
            .arg(&container)
            .arg("--network")
            .arg("ad_ctf_net")
            .arg("--ip")
            .arg(&ip)
            .arg("-p")
            .arg(&port_mapping)
            .arg("-e")
            .arg(format!("TEAM_ID={team_id}"))
            .arg("-e")
            .arg(format!("MAIN_SERVER={main_server}"))
            .arg("-e")
            .arg(format!("PORT={TEAM_CONTAINER_PORT}"))
            .arg("-e")
            .arg(format!("SECRET_KEY={secret_key}"))
            .arg("-e")
            .arg(format!("APACHE_LOG_DIR={TEAM_LOG_DIR}"))
            .arg("-v")
            .arg(format!("team{team_id}-logs:/app/logs"))
            .arg("-v")
            .arg(format!("team{team_id}-files:/app/files"))
            .arg(&image);

        Self::run("create", CREATE_TIMEOUT, command).await;
    }

    #[instrument(skip(self))]
    async fn copy_into(&self, container: &str, local_path: &str, remote_path: &str) -> bool {
        let mut command = Command::new("docker");
        command
            .arg("cp")
            .arg(local_path)
            .arg(format!("{container}:{remote_path}"));

        match tokio::time::timeout(COPY_TIMEOUT, command.output()).await {
            Ok(Ok(output)) if output.status.success() => true,
            Ok(Ok(output)) => {
                warn!("⚠️ [ORCHESTRATOR]: copy_into into {} failed: {}", container, String::from_utf8_lossy(&output.stderr));
                false
            }
            Ok(Err(e)) => {
                warn!("⚠️ [ORCHESTRATOR]: copy_into into {} failed to spawn: {}", container, e);
                false
            }
            Err(_) => {
                warn!("⚠️ [ORCHESTRATOR]: copy_into into {} timed out", container);
                false
            }
        }
    }
}

/// Test double backing unit tests without a Docker daemon — grounded on the
/// teacher's own test-double-friendly repository constructors.
#[derive(Default)]
pub struct NullContainerOrchestrator;

#[async_trait]
impl ContainerOrchestrator for NullContainerOrchestrator {
    async fn destroy(&self, _team_names: &[String]) {}
    async fn ensure_network(&self, _name: &str, _cidr: &str) {}
    async fn create(&self, _team: &Team, _main_server: &str, _secret_key: &str) {}
    async fn copy_into(&self, _container: &str, _local_path: &str, _remote_path: &str) -> bool {
        true
    }
}
