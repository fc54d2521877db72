// [libs/infra/store/src/repositories/mod.rs]
pub mod flag_repository;
pub mod probe_repository;
pub mod round_repository;
pub mod score_repository;
pub mod submission_repository;
pub mod team_repository;

pub use flag_repository::FlagRepository;
pub use probe_repository::ProbeRepository;
pub use round_repository::RoundRepository;
pub use score_repository::ScoreRepository;
pub use submission_repository::SubmissionRepository;
pub use team_repository::TeamRepository;
