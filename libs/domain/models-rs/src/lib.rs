// [libs/domain/models-rs/src/lib.rs]
/*!
 * =================================================================
 * APARATO: DOMAIN MODELS ROOT (V1.0)
 * CLASIFICACION: CRATE ROOT (ESTRATO L2)
 * RESPONSABILIDAD: ENTIDADES Y DTOs COMPARTIDOS DEL TORNEO
 * =================================================================
 */

pub mod team;
pub mod round;
pub mod flag;
pub mod submission;
pub mod probe;
pub mod score;
pub mod patch;
pub mod event;
pub mod timestamp;

pub use team::Team;
pub use round::{Round, RoundStatus};
pub use flag::{Flag, VulnType};
pub use submission::{FlagSubmission, SubmissionOutcome};
pub use probe::ServiceProbe;
pub use score::{Score, ScoreboardEntry, round2};
pub use patch::PatchRecord;
pub use event::{GameEvent, TeamStatus};
