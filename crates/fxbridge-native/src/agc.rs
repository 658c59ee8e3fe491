//! Automatic gain control engine.

use crate::ffi;
use crate::output::{block_len, copy_pcm_output};
use fxbridge_core::{EffectEngine, EffectParams, EngineBuffer, EngineConfig, EngineError, SampleForm};
use std::os::raw::{c_int, c_void};
use std::ptr::NonNull;

/// Live AGC instance.
#[derive(Debug)]
pub struct AgcHandle(NonNull<c_void>);

// SAFETY: the instance has no thread affinity and the filter serializes every
// call on it behind its slot lock.
unsafe impl Send for AgcHandle {}

/// Vendor AGC engine. Output length varies per block.
#[derive(Debug, Default)]
pub struct AgcEngine {
    scratch: Vec<i16>,
}

impl AgcEngine {
    /// Create the engine. Instances are created per stream format.
    pub fn new() -> Self {
        Self::default()
    }
}

impl EffectEngine for AgcEngine {
    type Handle = AgcHandle;

    fn name(&self) -> &'static str {
        "agc"
    }

    fn sample_form(&self) -> SampleForm {
        SampleForm::Pcm16
    }

    fn create(&mut self, config: &EngineConfig) -> Option<AgcHandle> {
        let EffectParams::Agc { target_dbfs } = config.params else {
            tracing::warn!(family = config.params.family(), "agc engine given foreign parameters");
            return None;
        };
        let channels = c_int::from(config.format.channels());
        // SAFETY: plain values in; the returned pointer is owned by us until terminate.
        let raw = unsafe { ffi::init_AGC_API(config.format.sample_rate(), channels, target_dbfs) };
        NonNull::new(raw).map(AgcHandle)
    }

    fn process(
        &mut self,
        handle: &mut AgcHandle,
        input: &[i16],
        output: &mut EngineBuffer,
    ) -> Result<(), EngineError> {
        let in_len = block_len("runAGC_API", input.len())?;
        self.scratch.clear();
        self.scratch.extend_from_slice(input);

        let mut out_len: c_int = 0;
        // SAFETY: live handle; scratch holds `in_len` samples; out_len is a valid out pointer.
        let data = unsafe {
            ffi::runAGC_API(
                handle.0.as_ptr(),
                self.scratch.as_mut_ptr(),
                in_len,
                &raw mut out_len,
            )
        };
        // SAFETY: the engine guarantees `out_len` samples at `data` until its next call.
        unsafe { copy_pcm_output("runAGC_API", data, out_len, output) }
    }

    fn destroy(&mut self, handle: AgcHandle) {
        // SAFETY: handle came from init_AGC_API and is consumed here.
        unsafe { ffi::terminate_AGC_API(handle.0.as_ptr()) };
    }
}
