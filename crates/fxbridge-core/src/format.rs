//! Stream format identity.

use crate::error::{Error, Result};
use std::fmt;

/// Channel count and sample rate of an audio stream.
///
/// A bound engine instance is only valid for the format it was created with.
/// Two formats are equal iff both fields match; any difference is a format
/// change and forces the engine to be rebuilt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamFormat {
    channels: u16,
    sample_rate: u32,
}

impl StreamFormat {
    /// Create a format, rejecting a zero channel count or sample rate.
    pub fn new(channels: u16, sample_rate: u32) -> Result<Self> {
        if channels == 0 || sample_rate == 0 {
            return Err(Error::InvalidFormat {
                channels,
                sample_rate,
            });
        }
        Ok(Self {
            channels,
            sample_rate,
        })
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Whether this is an interleaved two-channel stream.
    pub fn is_stereo(&self) -> bool {
        self.channels == 2
    }
}

impl fmt::Display for StreamFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ch@{}Hz", self.channels, self.sample_rate)
    }
}
