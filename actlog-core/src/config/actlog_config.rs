//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    AnalysisConfig, CategoryConfig, ObservabilityConfig, RouterConfig, SessionConfig, StoreConfig,
};
use crate::errors::ConfigError;
use crate::models::RecordType;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`ACTLOG_*`)
/// 2. Config file passed to [`ActlogConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActlogConfig {
    pub store: StoreConfig,
    pub analysis: AnalysisConfig,
    pub router: RouterConfig,
    pub session: SessionConfig,
    pub categories: CategoryConfig,
    pub observability: ObservabilityConfig,
}

impl ActlogConfig {
    /// Load configuration: defaults, then `path` (if given), then env.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
                        path: path.display().to_string(),
                    })?;
                toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                    path: path.display().to_string(),
                    message: e.to_string(),
                })?
            }
            None => Self::default(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.analysis.dedup_window_secs == 0 {
            return Err(invalid("analysis.dedup_window_secs", "must be greater than 0"));
        }
        if self.analysis.spike_window_secs == 0 {
            return Err(invalid("analysis.spike_window_secs", "must be greater than 0"));
        }
        if !(self.analysis.spike_rate_multiplier.is_finite()
            && self.analysis.spike_rate_multiplier >= 1.0)
        {
            return Err(invalid(
                "analysis.spike_rate_multiplier",
                "must be a finite number >= 1.0",
            ));
        }
        if self.analysis.spike_min_count < 2 {
            return Err(invalid("analysis.spike_min_count", "must be at least 2"));
        }
        if self.store.column_family.is_empty() || self.store.column_qualifier.is_empty() {
            return Err(invalid("store.column_family", "column must be non-empty"));
        }
        for (phrase, name) in &self.categories.record_type_aliases {
            if name.parse::<RecordType>().is_err() {
                return Err(invalid(
                    "categories.record_type_aliases",
                    &format!("alias '{phrase}' names unknown record type '{name}'"),
                ));
            }
        }
        let mut names = std::collections::HashSet::new();
        for filter in &self.categories.filters {
            if filter.name.is_empty() || !names.insert(filter.name.as_str()) {
                return Err(invalid(
                    "categories.filters",
                    &format!("filter name '{}' is empty or duplicated", filter.name),
                ));
            }
            if filter.rules.is_empty() {
                return Err(invalid(
                    "categories.filters",
                    &format!("filter '{}' has no rules", filter.name),
                ));
            }
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("ACTLOG_STORE_DB_PATH") {
            self.store.db_path = Some(val);
        }
        if let Some(v) = env_parse("ACTLOG_ANALYSIS_DEDUP_WINDOW_SECS")? {
            self.analysis.dedup_window_secs = v;
        }
        if let Some(v) = env_parse("ACTLOG_ANALYSIS_SPIKE_WINDOW_SECS")? {
            self.analysis.spike_window_secs = v;
        }
        if let Some(v) = env_parse("ACTLOG_ANALYSIS_SPIKE_RATE_MULTIPLIER")? {
            self.analysis.spike_rate_multiplier = v;
        }
        if let Some(v) = env_parse("ACTLOG_ANALYSIS_SPIKE_MIN_COUNT")? {
            self.analysis.spike_min_count = v;
        }
        if let Ok(val) = std::env::var("ACTLOG_ROUTER_DEFAULT_RECORD_TYPE") {
            self.router.default_record_type = if val.is_empty() {
                None
            } else {
                Some(val.parse().map_err(|_| {
                    invalid("ACTLOG_ROUTER_DEFAULT_RECORD_TYPE", "unknown record type")
                })?)
            };
        }
        if let Some(v) = env_parse("ACTLOG_SESSION_MAX_IDLE_SECS")? {
            self.session.max_idle_secs = v;
        }
        if let Ok(val) = std::env::var("ACTLOG_LOG_LEVEL") {
            self.observability.log_level = val;
        }
        if let Some(v) = env_parse("ACTLOG_JSON_LOGS")? {
            self.observability.json_logs = v;
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| invalid(key, &format!("cannot parse '{raw}'"))),
        Err(_) => Ok(None),
    }
}
