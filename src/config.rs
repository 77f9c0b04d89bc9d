use config::Config;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::RiskLevel;

/// Engine settings. Hard defaults overlaid with `RCSA_`-prefixed
/// environment variables, so an embedding host can tune the engine without
/// code changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Owner assigned to imported records that omit one.
    pub default_owner: String,
    /// Hierarchy level assigned to imported records that omit one.
    pub default_risk_level: RiskLevel,
    /// Whether a freshly constructed engine seeds the store with the mock
    /// assessment dataset.
    pub seed_dataset: bool,
    /// Log level hint surfaced to embedding hosts; the engine itself only
    /// emits `tracing` events.
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_owner: "Unassigned".to_string(),
            default_risk_level: RiskLevel::Level3,
            seed_dataset: true,
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Create a settings instance from environment overrides on top of the
    /// defaults: `RCSA_DEFAULT_OWNER`, `RCSA_DEFAULT_RISK_LEVEL`,
    /// `RCSA_SEED_DATASET`, `RCSA_LOG_LEVEL`.
    pub fn new() -> EngineResult<Self> {
        fn read_env(key: &str) -> Option<String> {
            std::env::var(key).ok()
        }

        fn parse_bool_env(key: &str) -> Option<bool> {
            read_env(key).and_then(|v| match v.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            })
        }

        let mut builder = Config::builder()
            .set_default("default_owner", "Unassigned")?
            .set_default("default_risk_level", "Level 3")?
            .set_default("seed_dataset", true)?
            .set_default("log_level", "info")?;

        if let Some(v) = read_env("RCSA_DEFAULT_OWNER") {
            builder = builder.set_override("default_owner", v)?;
        }
        if let Some(v) = read_env("RCSA_DEFAULT_RISK_LEVEL") {
            builder = builder.set_override("default_risk_level", v)?;
        }
        if let Some(v) = parse_bool_env("RCSA_SEED_DATASET") {
            builder = builder.set_override("seed_dataset", v)?;
        }
        if let Some(v) = read_env("RCSA_LOG_LEVEL") {
            builder = builder.set_override("log_level", v)?;
        }

        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate configuration values
    pub fn validate(&self) -> EngineResult<()> {
        if self.default_owner.trim().is_empty() {
            return Err(EngineError::configuration(
                "default_owner must not be empty",
            ));
        }
        if self.log_level.trim().is_empty() {
            return Err(EngineError::configuration("log_level must not be empty"));
        }
        Ok(())
    }
}
