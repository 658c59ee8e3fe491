//! Frame-level effect filter.
//!
//! [`EffectFilter`] is what a host pipeline talks to. Each call to
//! [`process`](EffectFilter::process) runs one frame through:
//!
//! ```text
//! frame ─▶ ensure bound ─▶ remap (before) ─▶ engine ─▶ decode ─▶ remap (after) ─▶ frame
//! ```
//!
//! The engine instance is created lazily from the first frame's format and
//! rebuilt whenever the format changes. Live equalizer updates go through an
//! [`EqualizerControl`] that shares the same engine slot.

use crate::control::{EqualizerControl, UpdateReport};
use crate::error::{FilterError, Result};
use crate::slot::EngineSlot;
use fxbridge_core::{
    AudioFrame, ChannelRemap, EffectEngine, EffectParams, EngineBuffer, SessionIdAllocator,
    SessionIds, StreamFormat,
};
use parking_lot::Mutex;
use std::sync::Arc;

/// Host commands that carry an equalizer update.
pub const EQUALIZER_COMMANDS: [&str; 3] = ["eq", "equalizer", "band_gain"];

/// Construction-time settings of an [`EffectFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterConfig {
    /// Static engine parameters.
    pub params: EffectParams,
    /// Remap applied to the input before the engine sees it.
    pub remap_before: ChannelRemap,
    /// Remap applied to the engine output.
    pub remap_after: ChannelRemap,
    /// Format to bind eagerly in [`EffectFilter::prepare`].
    pub initial_format: Option<StreamFormat>,
}

impl FilterConfig {
    /// Config with identity remaps and lazy binding.
    pub fn new(params: EffectParams) -> Self {
        Self {
            params,
            remap_before: ChannelRemap::Identity,
            remap_after: ChannelRemap::Identity,
            initial_format: None,
        }
    }

    /// Set the remap applied before the engine.
    pub fn with_remap_before(mut self, remap: ChannelRemap) -> Self {
        self.remap_before = remap;
        self
    }

    /// Set the remap applied after the engine.
    pub fn with_remap_after(mut self, remap: ChannelRemap) -> Self {
        self.remap_after = remap;
        self
    }

    /// Bind eagerly to `format` when the filter is prepared.
    pub fn with_initial_format(mut self, format: StreamFormat) -> Self {
        self.initial_format = Some(format);
        self
    }
}

/// Streaming adapter between a frame pipeline and one effect engine.
///
/// # Example
///
/// ```rust
/// use fxbridge_core::{AudioFrame, EffectParams, SampleForm};
/// use fxbridge_filter::{BypassEngine, EffectFilter, FilterConfig};
///
/// let mut filter = EffectFilter::new(
///     BypassEngine::new(SampleForm::Fixed32),
///     FilterConfig::new(EffectParams::tuner()),
/// );
///
/// let frame = AudioFrame::new(2, 16000, vec![100, -100, 200, -200]).unwrap();
/// let out = filter.process(frame).unwrap();
/// assert_eq!(out.samples(), &[100, -100, 200, -200]);
/// assert!(filter.is_bound());
/// ```
pub struct EffectFilter<E: EffectEngine> {
    config: FilterConfig,
    slot: Arc<Mutex<EngineSlot<E>>>,
    scratch: EngineBuffer,
}

impl<E: EffectEngine> EffectFilter<E> {
    /// Create a filter drawing session ids from the process-wide allocator.
    pub fn new(engine: E, config: FilterConfig) -> Self {
        Self::with_allocator(engine, config, SessionIdAllocator::shared())
    }

    /// Create a filter with an explicit session id allocator.
    pub fn with_allocator(
        engine: E,
        config: FilterConfig,
        allocator: Arc<SessionIdAllocator>,
    ) -> Self {
        let scratch = EngineBuffer::new(engine.sample_form());
        Self {
            config,
            slot: Arc::new(Mutex::new(EngineSlot::new(engine, allocator))),
            scratch,
        }
    }

    /// Construction-time settings.
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Bind eagerly to the configured initial format.
    ///
    /// Any live instance is released first. Does nothing when no initial
    /// format is configured.
    pub fn prepare(&mut self) -> Result<()> {
        let Some(format) = self.config.initial_format else {
            return Ok(());
        };
        let mut slot = self.slot.lock();
        slot.release();
        slot.ensure_bound(format, &self.config.params)?;
        Ok(())
    }

    /// Run one frame through the engine.
    ///
    /// The output frame carries the input's format and timestamp. Its length
    /// is whatever the engine produced, truncated to whole frames.
    pub fn process(&mut self, mut frame: AudioFrame) -> Result<AudioFrame> {
        let format = frame.format();
        let stereo = format.is_stereo();
        let FilterConfig {
            params,
            remap_before,
            remap_after,
            ..
        } = self.config;

        {
            let mut slot = self.slot.lock();
            let fresh = slot.ensure_bound(format, &params)?;
            if fresh && !stereo && !(remap_before.is_identity() && remap_after.is_identity()) {
                tracing::debug!(
                    channels = format.channels(),
                    "channel remap needs stereo input, skipping"
                );
            }

            if stereo {
                remap_before.apply(frame.samples_mut());
            }

            self.scratch.clear();
            self.scratch.try_reserve(frame.samples().len())?;
            tracing::debug!(in_len = frame.samples().len(), "running engine");
            slot.process(frame.samples(), &mut self.scratch)?;
        }

        let mut samples = Vec::new();
        self.scratch.decode_into(&mut samples)?;
        tracing::debug!(out_len = samples.len(), "engine produced samples");

        if stereo {
            remap_after.apply(&mut samples);
        }
        Ok(frame.derive(samples))
    }

    /// Validate raw interleaved samples as a frame, then [`process`](Self::process) it.
    ///
    /// A zero channel count or sample rate, or a buffer that is not a whole
    /// number of frames, is rejected with [`FilterError::Frame`] before the
    /// engine is touched.
    pub fn process_interleaved(
        &mut self,
        channels: u16,
        sample_rate: u32,
        samples: Vec<i16>,
    ) -> Result<AudioFrame> {
        let frame = AudioFrame::new(channels, sample_rate, samples)?;
        self.process(frame)
    }

    /// Release the live engine instance. Idempotent.
    pub fn reset(&mut self) {
        self.slot.lock().release();
    }

    /// Handle for live equalizer updates, shareable across threads.
    pub fn equalizer(&self) -> EqualizerControl<E> {
        EqualizerControl::new(Arc::clone(&self.slot))
    }

    /// Parse and apply a `"g0:...:g9"` equalizer update.
    pub fn update_equalizer(&self, args: &str) -> Result<UpdateReport> {
        self.equalizer().apply_str(args)
    }

    /// Dispatch a host command.
    ///
    /// Equalizer commands (see [`EQUALIZER_COMMANDS`]) route to
    /// [`update_equalizer`](Self::update_equalizer); anything else is
    /// rejected.
    pub fn process_command(&self, command: &str, args: &str) -> Result<UpdateReport> {
        tracing::info!(command, args, "command received");
        if EQUALIZER_COMMANDS.contains(&command) {
            self.update_equalizer(args)
        } else {
            Err(FilterError::UnknownCommand(command.to_string()))
        }
    }

    /// Whether an engine instance is live.
    pub fn is_bound(&self) -> bool {
        self.slot.lock().is_bound()
    }

    /// Format of the live engine instance.
    pub fn bound_format(&self) -> Option<StreamFormat> {
        self.slot.lock().format()
    }

    /// Session ids of the live engine instance.
    pub fn session(&self) -> Option<SessionIds> {
        self.slot.lock().session()
    }
}

impl<E: EffectEngine> Drop for EffectFilter<E> {
    fn drop(&mut self) {
        // Equalizer controls may outlive the filter; they see NotBound.
        self.reset();
    }
}
