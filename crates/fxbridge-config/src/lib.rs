//! Configuration and presets for fxbridge filters.
//!
//! Filters are described by a name plus integer options, either in host
//! syntax (`tuner=band0=3:band1=-2`) or in TOML presets. This crate parses
//! those descriptions, checks them against each filter's option table and
//! builds the [`FilterConfig`](fxbridge_filter::FilterConfig) a filter is
//! constructed from.
//!
//! # Features
//!
//! - **Filter specs**: [`FilterSpec`] with `FromStr`/`Display` for host syntax
//! - **Option tables**: [`FilterKind::options`] with help text, ranges and defaults
//! - **Validation**: [`build_filter_config`] reports every bad option at once
//! - **Presets**: [`Preset`] load/save as TOML
//!
//! # Example
//!
//! ```rust
//! use fxbridge_config::{Preset, FilterSpec};
//!
//! let preset = Preset::new("Voice")
//!     .with_filter("anoisecanceller=level=2".parse().unwrap())
//!     .with_filter(FilterSpec::new("agc").with_option("target_dbfs", "3"));
//!
//! let configs = preset.build().unwrap();
//! assert_eq!(configs.len(), 2);
//! ```

mod error;
mod filter_spec;
mod preset;

/// Option tables and validation.
pub mod options;

pub use error::ConfigError;
pub use filter_spec::FilterSpec;
pub use options::{
    FilterKind, OptionInfo, ValidationError, ValidationResult, build_filter_config,
    validate_option,
};
pub use preset::Preset;
