//! Configuration for the diff engine.
//!
//! `DiffConfig` holds the resource limits and the opt-in behavior switches.
//! The defaults reproduce the plain two-pass algorithm.

use crate::error_codes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest alignment table a single pass may allocate by default
/// (one byte of back-pointer per cell).
pub const DEFAULT_MAX_LCS_CELLS: u64 = 100_000_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffConfig {
    /// Upper bound on `before_lines * after_lines` for either pass.
    #[serde(alias = "lcs_cell_limit")]
    pub max_lcs_cells: u64,
    /// Treat two entirely blank lines as equal during alignment.
    ///
    /// Off by default: a blank line shares no value with anything, so it is
    /// always reported as deleted and added. Turning this on changes that.
    pub blank_lines_match: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            max_lcs_cells: DEFAULT_MAX_LCS_CELLS,
            blank_lines_match: false,
        }
    }
}

impl DiffConfig {
    pub fn builder() -> DiffConfigBuilder {
        DiffConfigBuilder {
            inner: DiffConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_lcs_cells == 0 {
            return Err(ConfigError::NonPositiveLimit {
                field: "max_lcs_cells",
                value: 0,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("[GRIDDIFF_CONFIG_001] {field} must be greater than zero (got {value})")]
    NonPositiveLimit { field: &'static str, value: u64 },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::NonPositiveLimit { .. } => error_codes::CONFIG_NON_POSITIVE_LIMIT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DiffConfigBuilder {
    inner: DiffConfig,
}

impl Default for DiffConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiffConfigBuilder {
    pub fn new() -> Self {
        DiffConfig::builder()
    }

    pub fn max_lcs_cells(mut self, value: u64) -> Self {
        self.inner.max_lcs_cells = value;
        self
    }

    pub fn blank_lines_match(mut self, value: bool) -> Self {
        self.inner.blank_lines_match = value;
        self
    }

    pub fn build(self) -> Result<DiffConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}
