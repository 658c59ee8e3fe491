//! Engine capability trait and the records exchanged with engines.
//!
//! An effect engine is an opaque, stateful processor reached through a
//! small handle-based API: create an instance for a stream format, feed it
//! sample blocks, optionally adjust equalizer bands, destroy it. The
//! [`EffectEngine`] trait captures exactly that surface so filters never
//! depend on a concrete engine, and tests can substitute a recording fake.
//!
//! ## Ownership
//!
//! `create` hands out an owned `Handle`; `destroy` consumes it. A handle
//! therefore cannot be destroyed twice or used after destruction, and the
//! caller decides when that happens.
//!
//! ## Output length
//!
//! Engines may buffer internally and produce more or fewer samples than they
//! consumed. The produced length is whatever the engine leaves in the
//! [`EngineBuffer`]; callers never assume it matches the input length.

use crate::convert::{SampleForm, decode_fixed, encode_fixed};
use crate::error::EngineError;
use crate::format::StreamFormat;
use crate::params::EffectParams;
use crate::session::SessionIds;
use std::collections::TryReserveError;

/// Everything an engine needs to build one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Format the instance is bound to.
    pub format: StreamFormat,
    /// Channel ids reserved for this instance.
    pub session: SessionIds,
    /// Family specific static parameters.
    pub params: EffectParams,
}

impl EngineConfig {
    /// Sample depth the engines are configured for.
    pub const BITS_PER_SAMPLE: u32 = 16;

    /// Samples per channel in one engine processing block.
    pub const BLOCK_SAMPLES_PER_CHANNEL: usize = 1200;

    /// Extra samples of slack in the engine work buffer.
    pub const WORK_BUFFER_PADDING: usize = 100;

    /// Interleaved samples in one engine processing block.
    pub fn frame_len(&self) -> usize {
        Self::BLOCK_SAMPLES_PER_CHANNEL * usize::from(self.format.channels())
    }

    /// Length of the engine's internal work buffer.
    pub fn work_buffer_len(&self) -> usize {
        self.frame_len() + Self::WORK_BUFFER_PADDING
    }
}

/// Output buffer in an engine's native sample form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineBuffer {
    /// 16-bit PCM samples.
    Pcm16(Vec<i16>),
    /// Fixed-point samples normalized to the `i32` range.
    Fixed32(Vec<i32>),
}

impl EngineBuffer {
    /// Empty buffer of the given form.
    pub fn new(form: SampleForm) -> Self {
        match form {
            SampleForm::Pcm16 => EngineBuffer::Pcm16(Vec::new()),
            SampleForm::Fixed32 => EngineBuffer::Fixed32(Vec::new()),
        }
    }

    /// Empty buffer with room for `capacity` samples.
    ///
    /// Fails instead of aborting when the allocation cannot be satisfied.
    pub fn try_with_capacity(form: SampleForm, capacity: usize) -> Result<Self, TryReserveError> {
        let mut buffer = Self::new(form);
        buffer.try_reserve(capacity)?;
        Ok(buffer)
    }

    /// Sample form of this buffer.
    pub fn form(&self) -> SampleForm {
        match self {
            EngineBuffer::Pcm16(_) => SampleForm::Pcm16,
            EngineBuffer::Fixed32(_) => SampleForm::Fixed32,
        }
    }

    /// Number of samples held.
    pub fn len(&self) -> usize {
        match self {
            EngineBuffer::Pcm16(v) => v.len(),
            EngineBuffer::Fixed32(v) => v.len(),
        }
    }

    /// Whether the buffer holds no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all samples, keeping the allocation.
    pub fn clear(&mut self) {
        match self {
            EngineBuffer::Pcm16(v) => v.clear(),
            EngineBuffer::Fixed32(v) => v.clear(),
        }
    }

    /// Reserve room for `additional` more samples.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), TryReserveError> {
        match self {
            EngineBuffer::Pcm16(v) => v.try_reserve_exact(additional),
            EngineBuffer::Fixed32(v) => v.try_reserve_exact(additional),
        }
    }

    /// Append pipeline samples, encoding them into this buffer's form.
    pub fn extend_from_pcm16(&mut self, samples: &[i16]) {
        match self {
            EngineBuffer::Pcm16(v) => v.extend_from_slice(samples),
            EngineBuffer::Fixed32(v) => {
                let start = v.len();
                v.resize(start + samples.len(), 0);
                encode_fixed(samples, &mut v[start..]);
            }
        }
    }

    /// Decode the held samples into `out` as 16-bit PCM.
    ///
    /// `out` is cleared first and ends up exactly [`len`](Self::len) long.
    pub fn decode_into(&self, out: &mut Vec<i16>) -> Result<(), TryReserveError> {
        out.clear();
        out.try_reserve_exact(self.len())?;
        match self {
            EngineBuffer::Pcm16(v) => out.extend_from_slice(v),
            EngineBuffer::Fixed32(v) => {
                out.resize(v.len(), 0);
                decode_fixed(v, out);
            }
        }
        Ok(())
    }
}

/// Capability interface of one effect-engine family.
///
/// Implementations wrap a concrete engine (a vendor library, an in-process
/// passthrough, a test fake). Filters are generic over this trait and own
/// exactly one engine value plus at most one live handle.
///
/// # Example
///
/// ```rust
/// use fxbridge_core::{EffectEngine, EngineBuffer, EngineConfig, EngineError, SampleForm};
///
/// struct Silence;
///
/// impl EffectEngine for Silence {
///     type Handle = ();
///
///     fn name(&self) -> &'static str { "silence" }
///     fn sample_form(&self) -> SampleForm { SampleForm::Pcm16 }
///     fn create(&mut self, _config: &EngineConfig) -> Option<()> { Some(()) }
///
///     fn process(
///         &mut self,
///         _handle: &mut (),
///         input: &[i16],
///         output: &mut EngineBuffer,
///     ) -> Result<(), EngineError> {
///         output.extend_from_pcm16(&vec![0; input.len()]);
///         Ok(())
///     }
///
///     fn destroy(&mut self, _handle: ()) {}
/// }
/// ```
pub trait EffectEngine: Send {
    /// Opaque per-instance token returned by [`create`](Self::create).
    type Handle: Send;

    /// Engine family name for diagnostics.
    fn name(&self) -> &'static str;

    /// Form of the samples this engine writes to its output buffer.
    fn sample_form(&self) -> SampleForm;

    /// Build an instance for `config`. `None` means creation failed.
    fn create(&mut self, config: &EngineConfig) -> Option<Self::Handle>;

    /// Process one block of interleaved PCM.
    ///
    /// `output` arrives empty, in this engine's [`sample_form`](Self::sample_form),
    /// with capacity for at least `input.len()` samples. Whatever the engine
    /// leaves in it is the produced block.
    fn process(
        &mut self,
        handle: &mut Self::Handle,
        input: &[i16],
        output: &mut EngineBuffer,
    ) -> Result<(), EngineError>;

    /// Release an instance.
    fn destroy(&mut self, handle: Self::Handle);

    /// Set the gain of one equalizer band on a live instance.
    ///
    /// Engines without an equalizer keep the default, which reports the
    /// operation as unsupported.
    fn set_band_gain(
        &mut self,
        handle: &mut Self::Handle,
        band: usize,
        gain: i32,
    ) -> Result<(), EngineError> {
        let _ = (handle, band, gain);
        Err(EngineError::Unsupported {
            engine: self.name(),
            operation: "set_band_gain",
        })
    }
}
