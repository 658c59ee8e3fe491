//! Static, construction-time parameters for each engine family.
//!
//! These values are fixed when a filter is built and are copied into every
//! [`EngineConfig`](crate::EngineConfig) the filter produces. Live changes
//! only happen through the equalizer band-gain channel.

use crate::error::Error;
use std::fmt;

/// Number of equalizer bands exposed by the tuner engine.
pub const EQ_BANDS: usize = 10;

/// Default AGC target level.
pub const DEFAULT_TARGET_DBFS: i32 = 1;

/// Named reverb patterns understood by the tuner engine.
///
/// The engine accepts any non-negative pattern id; these are the ones it
/// documents.
pub mod reverb_pattern {
    /// Minimal reverb (the engine default).
    pub const MINIMUM: i32 = 1;
    /// Meeting room.
    pub const MEETING_ROOM: i32 = 2;
    /// Concert hall.
    pub const CONCERT_HALL: i32 = 3;
    /// Immersive 3D surround.
    pub const IMMERSIVE_SURROUND: i32 = 4;

    /// Documented patterns with display names, in id order.
    pub const NAMED: [(i32, &str); 4] = [
        (MINIMUM, "minimum"),
        (MEETING_ROOM, "meeting room"),
        (CONCERT_HALL, "concert hall"),
        (IMMERSIVE_SURROUND, "immersive surround"),
    ];

    /// Display name of a documented pattern.
    pub fn name(pattern: i32) -> Option<&'static str> {
        NAMED.iter().find(|(id, _)| *id == pattern).map(|(_, name)| *name)
    }
}

/// Aggressiveness of the noise suppression engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SuppressionLevel {
    /// Light suppression.
    Low,
    /// Moderate suppression.
    Moderate,
    /// Strong suppression.
    High,
    /// Strongest suppression.
    #[default]
    VeryHigh,
}

impl SuppressionLevel {
    /// Ordinal passed to the engine.
    pub fn ordinal(self) -> i32 {
        match self {
            SuppressionLevel::Low => 0,
            SuppressionLevel::Moderate => 1,
            SuppressionLevel::High => 2,
            SuppressionLevel::VeryHigh => 3,
        }
    }
}

impl TryFrom<i32> for SuppressionLevel {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(SuppressionLevel::Low),
            1 => Ok(SuppressionLevel::Moderate),
            2 => Ok(SuppressionLevel::High),
            3 => Ok(SuppressionLevel::VeryHigh),
            other => Err(Error::InvalidSuppressionLevel(other)),
        }
    }
}

impl fmt::Display for SuppressionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SuppressionLevel::Low => "low",
            SuppressionLevel::Moderate => "moderate",
            SuppressionLevel::High => "high",
            SuppressionLevel::VeryHigh => "very-high",
        };
        f.write_str(name)
    }
}

/// Reverb shaping values for the tuner engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReverbSettings {
    /// Reverb density.
    pub percent: i32,
    /// High-frequency damping (wet/dry balance).
    pub hf_damping: i32,
    /// Room size.
    pub room_scale: i32,
    /// Stereo depth.
    pub depth: i32,
    /// Pre-delay time.
    pub predelay: i32,
}

/// Static configuration of the tuner (reverb + equalizer) engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TunerSettings {
    /// Reverb shaping.
    pub reverb: ReverbSettings,
    /// Reverb pattern id, see [`reverb_pattern`].
    pub reverb_pattern: i32,
    /// Equalizer style pattern id.
    pub eq_pattern: i32,
    /// Initial gain of each equalizer band.
    pub eq_bands: [i32; EQ_BANDS],
    /// Overall gain applied after equalization.
    pub total_gain: i32,
}

/// Effect-family specific static parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectParams {
    /// Automatic gain control.
    Agc {
        /// Target loudness level.
        target_dbfs: i32,
    },
    /// Noise suppression.
    NoiseSuppression {
        /// Suppression aggressiveness.
        level: SuppressionLevel,
    },
    /// Multi-band tuning with reverb and equalizer.
    Tuner(TunerSettings),
}

impl EffectParams {
    /// AGC parameters with the default target.
    pub fn agc() -> Self {
        EffectParams::Agc {
            target_dbfs: DEFAULT_TARGET_DBFS,
        }
    }

    /// Noise suppression parameters with the default level.
    pub fn noise_suppression() -> Self {
        EffectParams::NoiseSuppression {
            level: SuppressionLevel::default(),
        }
    }

    /// Tuner parameters with every value zeroed.
    pub fn tuner() -> Self {
        EffectParams::Tuner(TunerSettings::default())
    }

    /// Short family name used in diagnostics.
    pub fn family(&self) -> &'static str {
        match self {
            EffectParams::Agc { .. } => "agc",
            EffectParams::NoiseSuppression { .. } => "anoisecanceller",
            EffectParams::Tuner(_) => "tuner",
        }
    }
}
