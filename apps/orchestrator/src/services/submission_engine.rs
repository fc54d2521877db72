// [apps/orchestrator/src/services/submission_engine.rs]
/*!
 * APARATO: SUBMISSION ENGINE (V1.0)
 * CLASIFICACION: DOMAIN SERVICE (ESTRATO L2)
 * RESPONSABILIDAD: SUBMISION AUTENTICADA DE FLAGS CON ATRIBUCION Y ANTI-REPLAY
 */

use crate::services::event_bus::EventBus;
use adctf_domain_models::{GameEvent, SubmissionOutcome};
use adctf_infra_store::{Store, StoreError};
use tracing::instrument;

/// Implements the four-step algorithm of spec.md §4.6 exactly, including
/// its literal message strings.
pub struct SubmissionEngine {
    store: Store,
    events: EventBus,
}

impl SubmissionEngine {
    pub fn new(store: Store, events: EventBus) -> Self {
        Self { store, events }
    }

    #[instrument(skip(self, flag_value))]
    pub async fn submit(
        &self,
        submitter_team_id: i64,
        flag_value: &str,
        current_round_id: i64,
        current_round_number: i64,
    ) -> Result<SubmissionOutcome, StoreError> {
        let flag = match self.store.get_flag_by_value(flag_value).await? {
            Some(flag) => flag,
            None => return Ok(SubmissionOutcome::rejected("Invalid flag")),
        };

        if flag.team_id == submitter_team_id {
            return Ok(SubmissionOutcome::rejected("Cannot submit your own flag"));
        }

        match self
            .store
            .record_submission(submitter_team_id, flag.team_id, current_round_id, flag_value)
            .await
        {
            Ok(()) => {
                self.events.publish(GameEvent::FlagCaptured {
                    attacker_team_id: submitter_team_id,
                    victim_team_id: flag.team_id,
                    round_number: current_round_number,
                });
                Ok(SubmissionOutcome::accepted(flag.team_id))
            }
            Err(StoreError::Conflict(_)) => {
                Ok(SubmissionOutcome::rejected("This flag has already been submitted"))
            }
            Err(other) => Err(other),
        }
    }
}
