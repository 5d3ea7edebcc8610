//! Formatter configuration
//!
//! Defaults can be overridden by a YAML file and then by CLI flags:
//!
//! ```yaml
//! classifier:
//!   marker: "(RelationType = Direct)"
//!   case_insensitive_marker: false
//!   trading_prefix: "ST"
//!   count_indirect_as_other: false
//! risk_prefix: "SHELL_"
//! sheet: "Changes"
//! ```

use crate::error::{FormatterError, FormatterResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_MARKER: &str = "(RelationType = Direct)";
pub const DEFAULT_TRADING_PREFIX: &str = "ST";
pub const DEFAULT_RISK_PREFIX: &str = "SHELL_";

/// Rules for recognising and classifying direct-relation apps
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Literal tag marking a direct relation
    pub marker: String,
    /// Match the marker ignoring case
    pub case_insensitive_marker: bool,
    /// Name prefix (compared uppercase) that puts an app in trading scope
    pub trading_prefix: String,
    /// Classify untagged items as "other" instead of dropping them
    pub count_indirect_as_other: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_MARKER.to_string(),
            case_insensitive_marker: false,
            trading_prefix: DEFAULT_TRADING_PREFIX.to_string(),
            count_indirect_as_other: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    pub classifier: ClassifierConfig,
    /// Prefix stripped (ignoring case) from risk levels
    pub risk_prefix: String,
    /// Input worksheet; the first sheet when unset
    pub sheet: Option<String>,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            classifier: ClassifierConfig::default(),
            risk_prefix: DEFAULT_RISK_PREFIX.to_string(),
            sheet: None,
        }
    }
}

impl FormatterConfig {
    /// Load a YAML config file; missing keys keep their defaults
    pub fn load(path: &Path) -> FormatterResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(path = %path.display(), "loaded formatter config");
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> FormatterResult<Self> {
        // An empty document deserializes to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: FormatterConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FormatterResult<()> {
        if self.classifier.marker.trim().is_empty() {
            return Err(FormatterError::Config(
                "classifier.marker must not be empty".to_string(),
            ));
        }
        if self.classifier.trading_prefix.trim().is_empty() {
            return Err(FormatterError::Config(
                "classifier.trading_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
