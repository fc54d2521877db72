// [apps/orchestrator/src/services/prober.rs]
/*!
 * APARATO: SERVICE PROBER (V1.0)
 * CLASIFICACION: DOMAIN SERVICE (ESTRATO L2)
 * RESPONSABILIDAD: SONDEO FUNCIONAL MULTI-ENDPOINT DE LOS SERVICIOS DE EQUIPO
 */

use adctf_domain_models::Team;
use adctf_infra_store::{Store, StoreError};
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{instrument, warn};

const MIN_PASS_BODY_LEN: usize = 100;

struct ProbeAttempt {
    endpoint: &'static str,
    passed: bool,
    detail: String,
}

/// Issues the three-endpoint functional probe of spec.md §4.4 against every
/// team's service and records one `ServiceProbe` row per team per pass.
pub struct ServiceProber {
    store: Store,
    client: Client,
}

impl ServiceProber {
    pub fn new(store: Store, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("CRITICAL_FAULT: failed to build probe HTTP client");
        Self { store, client }
    }

    #[instrument(skip(self, teams))]
    pub async fn check_all_services(&self, round_id: i64, teams: &[Team]) {
        for team in teams {
            if let Err(e) = self.check_one_service(round_id, team).await {
                warn!("⚠️ [PROBER]: failed to persist probe for team {}: {}", team.id, e);
            }
        }
    }

    async fn check_one_service(&self, round_id: i64, team: &Team) -> Result<(), StoreError> {
        let base = format!("http://{}:{}", team.host, team.port);
        let started = Instant::now();

        let files = self.probe_get(&format!("{base}/files")).await;
        let logs = self
            .probe_post_form(&format!("{base}/logs"), &[("keyword", "test")])
            .await;
        let monitor = self
            .probe_post_form(&format!("{base}/monitor"), &[("host", "localhost")])
            .await;

        let response_time = started.elapsed().as_secs_f64();
        let attempts = [files, logs, monitor];
        let passed = attempts.iter().filter(|a| a.passed).count();
        let is_up = passed >= 2;
        let error_message = summarize_failures(&attempts, passed);

        self.store
            .record_probe(team.id, round_id, is_up, response_time, error_message.as_deref())
            .await
    }

    async fn probe_get(&self, url: &str) -> ProbeAttempt {
        let endpoint = endpoint_label(url);
        match self.client.get(url).send().await {
            Ok(response) => self.classify(endpoint, response).await,
            Err(e) => ProbeAttempt { endpoint, passed: false, detail: classify_transport_error(&e) },
        }
    }

    async fn probe_post_form(&self, url: &str, form: &[(&str, &str)]) -> ProbeAttempt {
        let endpoint = endpoint_label(url);
        match self.client.post(url).form(form).send().await {
            Ok(response) => self.classify(endpoint, response).await,
            Err(e) => ProbeAttempt { endpoint, passed: false, detail: classify_transport_error(&e) },
        }
    }

    async fn classify(&self, endpoint: &'static str, response: reqwest::Response) -> ProbeAttempt {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let passed = status.is_success() && body.len() >= MIN_PASS_BODY_LEN;
        let detail = if passed { String::new() } else { format!("HTTP {}", status.as_u16()) };
        ProbeAttempt { endpoint, passed, detail }
    }
}

fn endpoint_label(url: &str) -> &'static str {
    if url.ends_with("/files") {
        "/files"
    } else if url.ends_with("/logs") {
        "/logs"
    } else {
        "/monitor"
    }
}

fn classify_transport_error(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "Timeout".to_string()
    } else {
        "Connection error".to_string()
    }
}

/// `"Partial (2/3): /logs: HTTP 500"` or `"Failed (0/3): /files: Timeout; ..."`
/// — spec.md §4.4's exact summary format.
fn summarize_failures(attempts: &[ProbeAttempt; 3], passed: usize) -> Option<String> {
    if passed == 3 {
        return None;
    }

    let label = if passed == 0 { "Failed" } else { "Partial" };
    let failures: Vec<String> = attempts
        .iter()
        .filter(|a| !a.passed)
        .map(|a| format!("{}: {}", a.endpoint, a.detail))
        .collect();

    Some(format!("{label} ({passed}/3): {}", failures.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summarizes_partial_failure() {
        let attempts = [
            ProbeAttempt { endpoint: "/files", passed: true, detail: String::new() },
            ProbeAttempt { endpoint: "/logs", passed: false, detail: "HTTP 500".into() },
            ProbeAttempt { endpoint: "/monitor", passed: true, detail: String::new() },
        ];
        assert_eq!(
            summarize_failures(&attempts, 2),
            Some("Partial (2/3): /logs: HTTP 500".to_string())
        );
    }

    #[test]
    fn summarizes_total_failure() {
        let attempts = [
            ProbeAttempt { endpoint: "/files", passed: false, detail: "Timeout".into() },
            ProbeAttempt { endpoint: "/logs", passed: false, detail: "Timeout".into() },
            ProbeAttempt { endpoint: "/monitor", passed: false, detail: "Timeout".into() },
        ];
        assert_eq!(
            summarize_failures(&attempts, 0),
            Some("Failed (0/3): /files: Timeout; /logs: Timeout; /monitor: Timeout".to_string())
        );
    }

    #[test]
    fn no_summary_when_all_pass() {
        let attempts = [
            ProbeAttempt { endpoint: "/files", passed: true, detail: String::new() },
            ProbeAttempt { endpoint: "/logs", passed: true, detail: String::new() },
            ProbeAttempt { endpoint: "/monitor", passed: true, detail: String::new() },
        ];
        assert_eq!(summarize_failures(&attempts, 3), None);
    }
}
