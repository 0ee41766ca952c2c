//! Quality scores from practice attempts.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::types::QualityScore;

/// How hints and slow answers reduce the quality of a correct attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityPolicy {
    /// Answers at or under this many seconds carry no time penalty.
    pub time_threshold_secs: u64,
    pub hint_penalty: f64,
    pub overtime_block_secs: u64,
    /// Penalty per started block beyond the threshold.
    pub overtime_penalty: f64,
}

impl Default for QualityPolicy {
    fn default() -> Self {
        Self {
            time_threshold_secs: 300,
            hint_penalty: 1.0,
            overtime_block_secs: 300,
            overtime_penalty: 0.5,
        }
    }
}

impl QualityPolicy {
    /// Load a policy from a JSON file. Missing fields keep their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let policy: Self = serde_json::from_str(content)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Penalties must be finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("hint_penalty", self.hint_penalty),
            ("overtime_penalty", self.overtime_penalty),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    name,
                    format!("{value} is not a finite non-negative number"),
                ));
            }
        }
        Ok(())
    }

    /// Score an attempt. Incorrect attempts score 0; correct ones score
    /// between 1 and 5.
    pub fn score(&self, is_correct: bool, hints_used: u32, time_spent_secs: u64) -> QualityScore {
        if !is_correct {
            return QualityScore::MIN;
        }

        let overtime = time_spent_secs.saturating_sub(self.time_threshold_secs);
        let blocks = if self.overtime_block_secs == 0 {
            0
        } else {
            overtime.div_ceil(self.overtime_block_secs)
        };

        let penalty =
            f64::from(hints_used) * self.hint_penalty + blocks as f64 * self.overtime_penalty;
        // max/min rather than clamp: a NaN penalty lands on the floor of 1.
        let raw = (5.0 - penalty).floor().max(1.0).min(5.0);

        QualityScore::new(raw as u8).unwrap_or(QualityScore::MAX)
    }
}
