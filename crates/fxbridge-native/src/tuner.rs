//! Reverb and equalizer tuner engine.

use crate::ffi::{self, AudioProfile};
use crate::output::block_len;
use fxbridge_core::{
    EQ_BANDS, EffectEngine, EffectParams, EngineBuffer, EngineConfig, EngineError, SampleForm,
    TunerSettings,
};
use std::os::raw::{c_int, c_void};
use std::ptr::NonNull;

/// Live tuner instance.
#[derive(Debug)]
pub struct TunerHandle(NonNull<c_void>);

// SAFETY: see AgcHandle; calls are serialized by the owning filter.
unsafe impl Send for TunerHandle {}

/// Vendor tuner engine.
///
/// Produces one fixed-point sample per input sample and accepts live
/// equalizer band updates.
#[derive(Debug, Default)]
pub struct TunerEngine {
    scratch: Vec<i16>,
}

impl TunerEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Build the configuration record handed to `init_AW_API`.
fn audio_profile(config: &EngineConfig, settings: &TunerSettings) -> AudioProfile {
    AudioProfile {
        sample_rate: config.format.sample_rate() as c_int,
        chan_num: c_int::from(config.format.channels()),
        bits_depth: EngineConfig::BITS_PER_SAMPLE as c_int,
        frame_len: config.frame_len() as c_int,
        big_endian: 0,
        wav_len: config.work_buffer_len() as c_int,
        msg_snd_id: config.session.send_id as c_int,
        msg_rcv_id: config.session.receive_id as c_int,
        opt_rcv_id: config.session.options_id as c_int,
        eq_pattern: settings.eq_pattern,
        reverb_pattern: settings.reverb_pattern,
        eq_profile: settings.eq_bands,
        total_gain: settings.total_gain,
        revb_percent: settings.reverb.percent,
        revb_hfdamping: settings.reverb.hf_damping,
        revb_roomscale: settings.reverb.room_scale,
        revb_depth: settings.reverb.depth,
        revb_predelay: settings.reverb.predelay,
    }
}

impl EffectEngine for TunerEngine {
    type Handle = TunerHandle;

    fn name(&self) -> &'static str {
        "tuner"
    }

    fn sample_form(&self) -> SampleForm {
        SampleForm::Fixed32
    }

    fn create(&mut self, config: &EngineConfig) -> Option<TunerHandle> {
        let EffectParams::Tuner(settings) = config.params else {
            tracing::warn!(family = config.params.family(), "tuner engine given foreign parameters");
            return None;
        };
        let mut profile = audio_profile(config, &settings);
        // SAFETY: profile is a valid record for the duration of the call.
        let raw = unsafe { ffi::init_AW_API(&raw mut profile) };
        NonNull::new(raw).map(TunerHandle)
    }

    fn process(
        &mut self,
        handle: &mut TunerHandle,
        input: &[i16],
        output: &mut EngineBuffer,
    ) -> Result<(), EngineError> {
        let in_len = block_len("runAW_API", input.len())?;
        let EngineBuffer::Fixed32(out) = output else {
            return Err(EngineError::Failed {
                operation: "runAW_API",
                reason: "expected a fixed-point output buffer".to_string(),
            });
        };
        self.scratch.clear();
        self.scratch.extend_from_slice(input);
        out.resize(input.len(), 0);

        // SAFETY: live handle; scratch and out both hold `in_len` samples.
        unsafe {
            ffi::runAW_API(
                handle.0.as_ptr(),
                self.scratch.as_mut_ptr(),
                in_len,
                out.as_mut_ptr(),
            );
        }
        Ok(())
    }

    fn destroy(&mut self, handle: TunerHandle) {
        // SAFETY: handle came from init_AW_API and is consumed here.
        unsafe { ffi::terminate_AW_API(handle.0.as_ptr()) };
    }

    fn set_band_gain(
        &mut self,
        handle: &mut TunerHandle,
        band: usize,
        gain: i32,
    ) -> Result<(), EngineError> {
        if band >= EQ_BANDS {
            return Err(EngineError::BandOutOfRange {
                band,
                bands: EQ_BANDS,
            });
        }
        // SAFETY: live handle; band is within the engine's range.
        let status = unsafe { ffi::setEqOption(handle.0.as_ptr(), band as c_int, gain) };
        if status < 0 {
            return Err(EngineError::Status {
                operation: "setEqOption",
                status,
            });
        }
        Ok(())
    }
}
