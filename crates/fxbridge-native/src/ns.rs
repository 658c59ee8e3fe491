//! Noise suppression engine.

use crate::ffi;
use crate::output::{block_len, copy_pcm_output};
use fxbridge_core::{EffectEngine, EffectParams, EngineBuffer, EngineConfig, EngineError, SampleForm};
use std::os::raw::{c_int, c_void};
use std::ptr::NonNull;

/// Live noise suppression instance.
#[derive(Debug)]
pub struct NoiseSuppressorHandle(NonNull<c_void>);

// SAFETY: see AgcHandle; calls are serialized by the owning filter.
unsafe impl Send for NoiseSuppressorHandle {}

/// Vendor noise suppression engine. Output length varies per block.
#[derive(Debug, Default)]
pub struct NoiseSuppressorEngine {
    scratch: Vec<i16>,
}

impl NoiseSuppressorEngine {
    /// Create the engine.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EffectEngine for NoiseSuppressorEngine {
    type Handle = NoiseSuppressorHandle;

    fn name(&self) -> &'static str {
        "anoisecanceller"
    }

    fn sample_form(&self) -> SampleForm {
        SampleForm::Pcm16
    }

    fn create(&mut self, config: &EngineConfig) -> Option<NoiseSuppressorHandle> {
        let EffectParams::NoiseSuppression { level } = config.params else {
            tracing::warn!(
                family = config.params.family(),
                "noise suppression engine given foreign parameters"
            );
            return None;
        };
        // SAFETY: plain values in; the returned pointer is owned by us until terminate.
        let raw = unsafe {
            ffi::init_NS_API(
                u32::from(config.format.channels()),
                config.format.sample_rate(),
                level.ordinal(),
            )
        };
        NonNull::new(raw).map(NoiseSuppressorHandle)
    }

    fn process(
        &mut self,
        handle: &mut NoiseSuppressorHandle,
        input: &[i16],
        output: &mut EngineBuffer,
    ) -> Result<(), EngineError> {
        let in_len = block_len("runNS_API", input.len())?;
        self.scratch.clear();
        self.scratch.extend_from_slice(input);

        let mut out_len: c_int = 0;
        // SAFETY: live handle; scratch holds `in_len` samples; out_len is a valid out pointer.
        let data = unsafe {
            ffi::runNS_API(
                handle.0.as_ptr(),
                self.scratch.as_mut_ptr(),
                in_len,
                &raw mut out_len,
            )
        };
        // SAFETY: the engine guarantees `out_len` samples at `data` until its next call.
        unsafe { copy_pcm_output("runNS_API", data, out_len, output) }
    }

    fn destroy(&mut self, handle: NoiseSuppressorHandle) {
        // SAFETY: handle came from init_NS_API and is consumed here.
        unsafe { ffi::terminate_NS_API(handle.0.as_ptr()) };
    }
}
