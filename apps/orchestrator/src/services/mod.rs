// [apps/orchestrator/src/services/mod.rs]
pub mod container_adapter;
pub mod event_bus;
pub mod flag_factory;
pub mod patch_store;
pub mod prober;
pub mod scheduler;
pub mod scoring;
pub mod submission_engine;

pub use container_adapter::{ContainerOrchestrator, NullContainerOrchestrator, ShellContainerOrchestrator};
pub use event_bus::EventBus;
pub use flag_factory::FlagFactory;
pub use patch_store::PatchStore;
pub use prober::ServiceProber;
pub use scheduler::RoundScheduler;
pub use scoring::ScoringEngine;
pub use submission_engine::SubmissionEngine;
