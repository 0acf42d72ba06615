//! Recognizer configuration.
//!
//! Load from a TOML file or use `Default::default()`; invalid values return
//! an error at validation time, never a silent fallback.
//!
//! # TOML Structure
//!
//! ```toml
//! activation = "lookup"
//!
//! [topology]
//! height = 25
//! num_neurons = 100
//! num_classes = 110
//!
//! [decoder]
//! blank_threshold = 0.7
//! max_label_len = 83
//!
//! [lookup.exp]
//! min = -5.0
//! max = 25.0
//! size = 256
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::activation::{ActivationMode, LookupConfig};
use crate::error::{NetworkError, NetworkResult};
use crate::topology::{Topology, DEFAULT_BLANK_THRESHOLD, DEFAULT_MAX_LABEL_LEN};

// =============================================================================
// DECODER CONFIG
// =============================================================================

/// Label-decoder settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Blank-probability threshold separating character segments.
    #[serde(default = "DecoderConfig::default_threshold")]
    pub blank_threshold: f32,
    /// Cap on the decoded sequence length; excess labels are dropped.
    #[serde(default = "DecoderConfig::default_max_len")]
    pub max_label_len: usize,
}

impl DecoderConfig {
    fn default_threshold() -> f32 {
        DEFAULT_BLANK_THRESHOLD
    }

    fn default_max_len() -> usize {
        DEFAULT_MAX_LABEL_LEN
    }

    /// Check the threshold is a probability and the cap is nonzero.
    pub fn validate(&self) -> NetworkResult<()> {
        if !self.blank_threshold.is_finite()
            || self.blank_threshold <= 0.0
            || self.blank_threshold >= 1.0
        {
            return Err(NetworkError::ConfigError {
                message: format!(
                    "blank_threshold must be in (0, 1), got {}",
                    self.blank_threshold
                ),
            });
        }
        if self.max_label_len == 0 {
            return Err(NetworkError::ConfigError {
                message: "max_label_len must be nonzero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            blank_threshold: Self::default_threshold(),
            max_label_len: Self::default_max_len(),
        }
    }
}

// =============================================================================
// RECOGNIZER CONFIG
// =============================================================================

/// Root configuration for one recognizer instance.
///
/// # Example
///
/// ```rust
/// use textline_blstm::RecognizerConfig;
///
/// let config = RecognizerConfig::default();
/// config.validate().expect("default config is valid");
/// assert_eq!(config.topology.num_inputs(), 126);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Network shape; must match the loaded weights.
    #[serde(default)]
    pub topology: Topology,

    /// Numerical policy for sigmoid/tanh/exp.
    #[serde(default)]
    pub activation: ActivationMode,

    /// Table domains, used when `activation = "lookup"`.
    #[serde(default)]
    pub lookup: LookupConfig,

    /// Label-decoder settings.
    #[serde(default)]
    pub decoder: DecoderConfig,
}

impl RecognizerConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError::ConfigError` on parse failure; the result is
    /// *not* yet validated — call [`validate`](Self::validate).
    pub fn from_toml_str(contents: &str) -> NetworkResult<Self> {
        toml::from_str(contents).map_err(|e| NetworkError::ConfigError {
            message: format!("failed to parse TOML config: {e}"),
        })
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    ///
    /// - `NetworkError::IoError` if the file cannot be read
    /// - `NetworkError::ConfigError` on parse failure
    pub fn from_file(path: impl AsRef<Path>) -> NetworkResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents).map_err(|e| NetworkError::ConfigError {
            message: format!("{}: {e}", path.display()),
        })
    }

    /// Validate every nested section together.
    pub fn validate(&self) -> NetworkResult<()> {
        self.topology.validate()?;
        self.decoder.validate()?;
        if self.activation == ActivationMode::Lookup {
            self.lookup.validate()?;
        }
        Ok(())
    }
}
