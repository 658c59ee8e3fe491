//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::filter_spec::FilterSpec;
use crate::options::{ValidationError, build_filter_config};
use fxbridge_filter::FilterConfig;

/// A named list of filters stored as TOML.
///
/// # TOML Format
///
/// ```toml
/// name = "Podcast voice"
/// description = "Denoise, then level"
///
/// [[filters]]
/// type = "anoisecanceller"
/// [filters.options]
/// level = "2"
///
/// [[filters]]
/// type = "agc"
/// [filters.options]
/// target_dbfs = "3"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Filters in processing order.
    #[serde(default)]
    pub filters: Vec<FilterSpec>,
}

impl Preset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            filters: Vec::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a filter to the preset.
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate every filter and build their configurations in order.
    ///
    /// Errors from all filters are collected.
    pub fn build(&self) -> Result<Vec<FilterConfig>, ConfigError> {
        let mut configs = Vec::with_capacity(self.filters.len());
        let mut errors = Vec::new();
        for spec in &self.filters {
            match build_filter_config(spec) {
                Ok(config) => configs.push(config),
                Err(ValidationError::Multiple(inner)) => errors.extend(inner),
                Err(e) => errors.push(e),
            }
        }
        match errors.len() {
            0 => Ok(configs),
            1 => Err(errors.remove(0).into()),
            _ => Err(ValidationError::Multiple(errors).into()),
        }
    }

    /// Number of filters in the preset.
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether the preset has no filters.
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
