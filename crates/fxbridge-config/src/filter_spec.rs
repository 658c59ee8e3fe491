//! Filter specification: a filter name plus string options.

use crate::options::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One filter as written in a host filter graph or a preset.
///
/// Host syntax is `name=key=value:key=value`. Options stay strings until
/// [`build_filter_config`](crate::build_filter_config) validates them.
///
/// # Example
///
/// ```rust
/// use fxbridge_config::FilterSpec;
///
/// let spec: FilterSpec = "tuner=band0=3:switch_flag_after_tune=1".parse().unwrap();
/// assert_eq!(spec.filter, "tuner");
/// assert_eq!(spec.get_option("band0"), Some("3"));
///
/// let built = FilterSpec::new("agc").with_option("target_dbfs", "3");
/// assert_eq!(built.to_string(), "agc=target_dbfs=3");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterSpec {
    /// Filter name (`agc`, `anoisecanceller`, `tuner`).
    #[serde(rename = "type")]
    pub filter: String,

    /// Options as key-value pairs.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

impl FilterSpec {
    /// Create a spec with no options.
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
            options: BTreeMap::new(),
        }
    }

    /// Add an option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Get an option value.
    pub fn get_option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(|s| s.as_str())
    }

    /// Set an option value.
    pub fn set_option(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.options.insert(key.into(), value.into());
    }
}

impl FromStr for FilterSpec {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (name, rest) = match s.split_once('=') {
            Some((name, rest)) => (name.trim(), Some(rest)),
            None => (s, None),
        };
        if name.is_empty() {
            return Err(ValidationError::InvalidFormat {
                option: "filter".to_string(),
                reason: format!("missing filter name in '{s}'"),
            });
        }

        let mut spec = FilterSpec::new(name);
        for pair in rest.into_iter().flat_map(|r| r.split(':')) {
            if pair.trim().is_empty() {
                continue;
            }
            let (key, value) = pair.split_once('=').ok_or_else(|| ValidationError::InvalidFormat {
                option: pair.trim().to_string(),
                reason: "expected key=value".to_string(),
            })?;
            spec.set_option(key.trim(), value.trim());
        }
        Ok(spec)
    }
}

impl fmt::Display for FilterSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.filter)?;
        for (i, (key, value)) in self.options.iter().enumerate() {
            let sep = if i == 0 { '=' } else { ':' };
            write!(f, "{sep}{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_name() {
        let spec: FilterSpec = "anoisecanceller".parse().unwrap();
        assert_eq!(spec.filter, "anoisecanceller");
        assert!(spec.options.is_empty());
    }

    #[test]
    fn parses_options() {
        let spec: FilterSpec = "tuner=revb_percent=40: band9 = -3".parse().unwrap();
        assert_eq!(spec.get_option("revb_percent"), Some("40"));
        assert_eq!(spec.get_option("band9"), Some("-3"));
    }

    #[test]
    fn rejects_option_without_value() {
        let err = "tuner=band0".parse::<FilterSpec>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { ref option, .. } if option == "band0"));
    }

    #[test]
    fn rejects_missing_name() {
        assert!("=band0=1".parse::<FilterSpec>().is_err());
        assert!("".parse::<FilterSpec>().is_err());
    }

    #[test]
    fn display_matches_host_syntax() {
        let spec = FilterSpec::new("tuner")
            .with_option("band1", "2")
            .with_option("band0", "1");
        assert_eq!(spec.to_string(), "tuner=band0=1:band1=2");
        assert_eq!(spec.to_string().parse::<FilterSpec>().unwrap(), spec);
    }
}
