//! Application configuration value object

use serde::Deserialize;

use crate::domain::error::{BatchSizeError, ConfigError};
use crate::domain::translation::{BatchSize, TranslationConfig};

/// Default external program
pub const DEFAULT_VIRSH_BIN: &str = "virsh";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    pub virsh_bin: Option<String>,
    /// Wider than the valid range so bad values reach validation
    pub speed: Option<i64>,
    pub newline: Option<bool>,
    pub strict: Option<bool>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            virsh_bin: Some(DEFAULT_VIRSH_BIN.to_string()),
            speed: Some(BatchSize::single().get() as i64),
            newline: Some(false),
            strict: Some(false),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            virsh_bin: other.virsh_bin.or(self.virsh_bin),
            speed: other.speed.or(self.speed),
            newline: other.newline.or(self.newline),
            strict: other.strict.or(self.strict),
        }
    }

    /// Get the external program, or "virsh" if not set
    pub fn virsh_bin_or_default(&self) -> &str {
        self.virsh_bin
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_VIRSH_BIN)
    }

    /// Get speed as a validated BatchSize, or 1 if not set
    pub fn batch_size(&self) -> Result<BatchSize, BatchSizeError> {
        match self.speed {
            Some(speed) => u8::try_from(speed)
                .map_err(|_| BatchSizeError {
                    input: speed.to_string(),
                })
                .and_then(BatchSize::new),
            None => Ok(BatchSize::default()),
        }
    }

    /// Get newline setting, or false if not set
    pub fn newline_or_default(&self) -> bool {
        self.newline.unwrap_or(false)
    }

    /// Get strict setting, or false if not set
    pub fn strict_or_default(&self) -> bool {
        self.strict.unwrap_or(false)
    }

    /// Build the translator settings from this config
    pub fn translation_config(&self) -> Result<TranslationConfig, ConfigError> {
        let batch_size = self.batch_size().map_err(|e| ConfigError::ValidationError {
            key: "speed".to_string(),
            message: e.to_string(),
        })?;

        Ok(TranslationConfig::new(batch_size).with_strict(self.strict_or_default()))
    }
}
