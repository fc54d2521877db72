// [apps/orchestrator/src/auth/mod.rs]
pub mod token_authority;

pub use token_authority::{AuthOutcome, TokenAuthority};
