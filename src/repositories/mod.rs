pub mod risk_repo;
pub mod seed_repo;

pub use risk_repo::{InMemoryRiskRepository, MergeOutcome, RiskRepository};
pub use seed_repo::seed_records;
