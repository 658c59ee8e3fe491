//! Error types shared by the core types and engine implementations.

use thiserror::Error;

/// Errors raised while constructing or validating core values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Channel count or sample rate was zero.
    #[error("invalid stream format: {channels} channel(s) at {sample_rate} Hz")]
    InvalidFormat {
        /// Requested channel count.
        channels: u16,
        /// Requested sample rate in Hz.
        sample_rate: u32,
    },

    /// Interleaved buffer length is not a multiple of the channel count.
    #[error("buffer of {len} samples is not a whole number of {channels}-channel frames")]
    RaggedFrame {
        /// Total number of interleaved samples.
        len: usize,
        /// Channel count of the frame.
        channels: u16,
    },

    /// Channel remap flag outside `0..=3`.
    #[error("invalid channel remap flag {0} (expected 0-3)")]
    InvalidRemap(i32),

    /// Noise suppression level outside `0..=3`.
    #[error("invalid suppression level {0} (expected 0-3)")]
    InvalidSuppressionLevel(i32),
}

/// Errors reported by an [`EffectEngine`](crate::EffectEngine) call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The engine family does not implement the requested operation.
    #[error("{engine} does not support {operation}")]
    Unsupported {
        /// Engine family name.
        engine: &'static str,
        /// Operation that was requested.
        operation: &'static str,
    },

    /// Equalizer band index outside the engine's band range.
    #[error("band index {band} out of range (engine has {bands} bands)")]
    BandOutOfRange {
        /// Requested band.
        band: usize,
        /// Number of bands the engine exposes.
        bands: usize,
    },

    /// The engine rejected the call with a status code.
    #[error("{operation} failed with status {status}")]
    Status {
        /// Operation that failed.
        operation: &'static str,
        /// Raw status code returned by the engine.
        status: i32,
    },

    /// The engine failed for a reason it could describe.
    #[error("{operation} failed: {reason}")]
    Failed {
        /// Operation that failed.
        operation: &'static str,
        /// Human-readable reason.
        reason: String,
    },
}

/// Convenience result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
