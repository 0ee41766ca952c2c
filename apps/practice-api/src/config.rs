//! Service configuration from environment variables.

use std::path::PathBuf;

use latex_drill_core::{EquivalenceTable, QualityPolicy, Sm2};

use crate::error::{ApiError, Result};

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// External equivalence table; the bundled one is used when unset.
    pub equivalence_table_path: Option<PathBuf>,
    pub scheduler: Sm2,
    pub quality: QualityPolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            equivalence_table_path: None,
            scheduler: Sm2::default(),
            quality: QualityPolicy::default(),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = parse_var("PORT", &port)?;
        }
        config.equivalence_table_path = lookup("EQUIVALENCE_TABLE_PATH").map(PathBuf::from);
        if let Some(path) = lookup("SCHEDULER_CONFIG_PATH") {
            tracing::info!(path = %path, "Loading scheduler parameters");
            config.scheduler = Sm2::from_path(&path)?;
        }
        if let Some(path) = lookup("QUALITY_POLICY_PATH") {
            tracing::info!(path = %path, "Loading quality policy");
            config.quality = QualityPolicy::from_path(&path)?;
        }
        if let Some(secs) = lookup("QUALITY_TIME_THRESHOLD_SECS") {
            config.quality.time_threshold_secs = parse_var("QUALITY_TIME_THRESHOLD_SECS", &secs)?;
        }

        Ok(config)
    }

    /// Address to bind, `host:port`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Load the configured equivalence table.
    pub fn load_table(&self) -> Result<EquivalenceTable> {
        let table = match &self.equivalence_table_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading equivalence table");
                EquivalenceTable::from_path(path)?
            }
            None => EquivalenceTable::bundled()?,
        };
        tracing::info!(groups = table.len(), "Equivalence table ready");
        Ok(table)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ApiError::Config(format!("{key} has invalid value {value:?}")))
}
