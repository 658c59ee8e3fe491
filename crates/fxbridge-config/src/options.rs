//! Per-filter option tables and validation.
//!
//! Every filter family exposes a fixed table of integer options. A
//! [`FilterSpec`] is checked against its table (names, integer syntax,
//! ranges) and turned into a [`FilterConfig`] by [`build_filter_config`].
//! All problems in a spec are collected before returning, so a user sees
//! every bad option at once.

use crate::filter_spec::FilterSpec;
use fxbridge_core::{
    ChannelRemap, EQ_BANDS, EffectParams, ReverbSettings, StreamFormat, SuppressionLevel,
    TunerSettings,
};
use fxbridge_filter::FilterConfig;
use std::fmt;
use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Unknown filter name.
    #[error("unknown filter: {0}")]
    UnknownFilter(String),

    /// Option not in the filter's table.
    #[error("unknown option '{option}' for filter '{filter}'")]
    UnknownOption {
        /// Filter name.
        filter: String,
        /// Unrecognized option.
        option: String,
    },

    /// Option value outside its range.
    #[error("option '{option}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Option name.
        option: String,
        /// Offending value.
        value: i64,
        /// Minimum allowed value.
        min: i64,
        /// Maximum allowed value.
        max: i64,
    },

    /// Option value could not be interpreted.
    #[error("invalid format for option '{option}': {reason}")]
    InvalidFormat {
        /// Option name.
        option: String,
        /// Description of the format error.
        reason: String,
    },

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Metadata for one filter option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionInfo {
    /// Option name as written in a filter spec.
    pub name: &'static str,
    /// One-line description.
    pub help: &'static str,
    /// Minimum accepted value.
    pub min: i64,
    /// Maximum accepted value.
    pub max: i64,
    /// Value used when the option is absent.
    pub default: i64,
}

const fn opt(name: &'static str, help: &'static str, min: i64, max: i64, default: i64) -> OptionInfo {
    OptionInfo {
        name,
        help,
        min,
        max,
        default,
    }
}

const INT_MIN: i64 = i32::MIN as i64;
const INT_MAX: i64 = i32::MAX as i64;

const AGC_OPTIONS: &[OptionInfo] = &[opt("target_dbfs", "target loudness level", 0, INT_MAX, 1)];

const NOISE_CANCELLER_OPTIONS: &[OptionInfo] = &[opt(
    "level",
    "suppression level (0 low, 1 moderate, 2 high, 3 very high)",
    0,
    3,
    3,
)];

const TUNER_OPTIONS: &[OptionInfo] = &[
    opt("revb_percent", "reverb density", 0, INT_MAX, 0),
    opt("revb_hfdamping", "reverb high-frequency damping", 0, INT_MAX, 0),
    opt("revb_roomscale", "reverb room size", 0, INT_MAX, 0),
    opt("revb_depth", "reverb stereo depth", 0, INT_MAX, 0),
    opt("revb_predelay", "reverb pre-delay", 0, INT_MAX, 0),
    opt("total_gain", "overall gain", INT_MIN, INT_MAX, 0),
    opt("eq_pattern", "equalizer pattern", 0, INT_MAX, 0),
    opt("reverb_pattern", "reverb pattern (1 minimum, 2 meeting room, 3 concert hall, 4 surround)", 0, INT_MAX, 0),
    opt("band0", "gain value 0", INT_MIN, INT_MAX, 0),
    opt("band1", "gain value 1", INT_MIN, INT_MAX, 0),
    opt("band2", "gain value 2", INT_MIN, INT_MAX, 0),
    opt("band3", "gain value 3", INT_MIN, INT_MAX, 0),
    opt("band4", "gain value 4", INT_MIN, INT_MAX, 0),
    opt("band5", "gain value 5", INT_MIN, INT_MAX, 0),
    opt("band6", "gain value 6", INT_MIN, INT_MAX, 0),
    opt("band7", "gain value 7", INT_MIN, INT_MAX, 0),
    opt("band8", "gain value 8", INT_MIN, INT_MAX, 0),
    opt("band9", "gain value 9", INT_MIN, INT_MAX, 0),
    opt("switch_flag_before_tune", "channel remap before tuning (0-3)", 0, 3, 0),
    opt("switch_flag_after_tune", "channel remap after tuning (0-3)", 0, 3, 0),
    opt("channels", "channel count for eager init (0 = from first frame)", 0, u16::MAX as i64, 0),
    opt("sample_rate", "sample rate for eager init (0 = from first frame)", 0, INT_MAX, 0),
];

/// Filter families known to the configuration layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    /// Automatic gain control.
    Agc,
    /// Noise suppression.
    NoiseCanceller,
    /// Reverb and equalizer tuning.
    Tuner,
}

impl FilterKind {
    /// All filter kinds.
    pub const ALL: [FilterKind; 3] = [FilterKind::Agc, FilterKind::NoiseCanceller, FilterKind::Tuner];

    /// Filter name as used in specs.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Agc => "agc",
            FilterKind::NoiseCanceller => "anoisecanceller",
            FilterKind::Tuner => "tuner",
        }
    }

    /// Look up a kind by filter name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Option table for this kind.
    pub fn options(self) -> &'static [OptionInfo] {
        match self {
            FilterKind::Agc => AGC_OPTIONS,
            FilterKind::NoiseCanceller => NOISE_CANCELLER_OPTIONS,
            FilterKind::Tuner => TUNER_OPTIONS,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Host filter-graph spellings accepted in place of table names.
const ALIASES: &[(FilterKind, &str, &str)] = &[(FilterKind::Agc, "targetDBFS", "target_dbfs")];

impl FilterKind {
    /// Table entry for `option`, resolving host aliases.
    pub fn option(self, option: &str) -> Option<&'static OptionInfo> {
        let name = ALIASES
            .iter()
            .find(|(kind, alias, _)| *kind == self && *alias == option)
            .map_or(option, |(_, _, name)| *name);
        self.options().iter().find(|o| o.name == name)
    }
}

/// Validate one option value against its table entry.
pub fn validate_option(kind: FilterKind, option: &str, value: &str) -> ValidationResult<i64> {
    let info = kind
        .option(option)
        .ok_or_else(|| ValidationError::UnknownOption {
            filter: kind.name().to_string(),
            option: option.to_string(),
        })?;

    let parsed: i64 = value
        .trim()
        .parse()
        .map_err(|e| ValidationError::InvalidFormat {
            option: option.to_string(),
            reason: format!("'{value}' is not an integer ({e})"),
        })?;

    if parsed < info.min || parsed > info.max {
        return Err(ValidationError::OutOfRange {
            option: option.to_string(),
            value: parsed,
            min: info.min,
            max: info.max,
        });
    }
    Ok(parsed)
}

/// Option values for one filter after validation, defaults filled in.
struct Resolved {
    values: Vec<(&'static str, i64)>,
}

impl Resolved {
    fn get(&self, name: &str) -> i64 {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map_or(0, |(_, v)| *v)
    }

    // Table ranges keep every value inside i32.
    fn int(&self, name: &str) -> i32 {
        self.get(name) as i32
    }
}

fn resolve(kind: FilterKind, spec: &FilterSpec) -> ValidationResult<Resolved> {
    let mut values: Vec<(&'static str, i64)> =
        kind.options().iter().map(|o| (o.name, o.default)).collect();
    let mut errors = Vec::new();

    for (key, raw) in &spec.options {
        match validate_option(kind, key, raw) {
            Ok(v) => {
                if let Some(info) = kind.option(key)
                    && let Some(slot) = values.iter_mut().find(|(n, _)| *n == info.name)
                {
                    slot.1 = v;
                }
            }
            Err(e) => errors.push(e),
        }
    }

    match errors.len() {
        0 => Ok(Resolved { values }),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}

fn remap(resolved: &Resolved, name: &str) -> ValidationResult<ChannelRemap> {
    ChannelRemap::try_from(resolved.int(name)).map_err(|e| ValidationError::InvalidFormat {
        option: name.to_string(),
        reason: e.to_string(),
    })
}

/// Validate a spec and build the filter configuration it describes.
///
/// # Example
///
/// ```rust
/// use fxbridge_config::{FilterSpec, build_filter_config};
/// use fxbridge_core::{ChannelRemap, EffectParams};
///
/// let spec: FilterSpec = "tuner=band2=4:switch_flag_before_tune=1".parse().unwrap();
/// let config = build_filter_config(&spec).unwrap();
/// assert_eq!(config.remap_before, ChannelRemap::Swap);
/// match config.params {
///     EffectParams::Tuner(t) => assert_eq!(t.eq_bands[2], 4),
///     _ => unreachable!(),
/// }
/// ```
pub fn build_filter_config(spec: &FilterSpec) -> ValidationResult<FilterConfig> {
    let kind = FilterKind::from_name(&spec.filter)
        .ok_or_else(|| ValidationError::UnknownFilter(spec.filter.clone()))?;
    let r = resolve(kind, spec)?;

    let config = match kind {
        FilterKind::Agc => FilterConfig::new(EffectParams::Agc {
            target_dbfs: r.int("target_dbfs"),
        }),
        FilterKind::NoiseCanceller => {
            let level = SuppressionLevel::try_from(r.int("level")).map_err(|e| {
                ValidationError::InvalidFormat {
                    option: "level".to_string(),
                    reason: e.to_string(),
                }
            })?;
            FilterConfig::new(EffectParams::NoiseSuppression { level })
        }
        FilterKind::Tuner => {
            let mut eq_bands = [0i32; EQ_BANDS];
            for (band, gain) in eq_bands.iter_mut().enumerate() {
                *gain = r.int(&format!("band{band}"));
            }
            let settings = TunerSettings {
                reverb: ReverbSettings {
                    percent: r.int("revb_percent"),
                    hf_damping: r.int("revb_hfdamping"),
                    room_scale: r.int("revb_roomscale"),
                    depth: r.int("revb_depth"),
                    predelay: r.int("revb_predelay"),
                },
                reverb_pattern: r.int("reverb_pattern"),
                eq_pattern: r.int("eq_pattern"),
                eq_bands,
                total_gain: r.int("total_gain"),
            };

            let mut config = FilterConfig::new(EffectParams::Tuner(settings))
                .with_remap_before(remap(&r, "switch_flag_before_tune")?)
                .with_remap_after(remap(&r, "switch_flag_after_tune")?);

            match (r.get("channels"), r.get("sample_rate")) {
                (0, 0) => {}
                (channels, sample_rate) if channels == 0 || sample_rate == 0 => {
                    let missing = if channels == 0 {
                        "channels"
                    } else {
                        "sample_rate"
                    };
                    return Err(ValidationError::InvalidFormat {
                        option: missing.to_string(),
                        reason: "eager init needs both channels and sample_rate".to_string(),
                    });
                }
                (channels, sample_rate) => {
                    let format = StreamFormat::new(channels as u16, sample_rate as u32)
                        .map_err(|e| ValidationError::InvalidFormat {
                            option: "channels".to_string(),
                            reason: e.to_string(),
                        })?;
                    config = config.with_initial_format(format);
                }
            }
            config
        }
    };
    Ok(config)
}
