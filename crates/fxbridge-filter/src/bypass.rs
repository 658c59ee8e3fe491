//! Passthrough engine.

use fxbridge_core::{EffectEngine, EngineBuffer, EngineConfig, EngineError, SampleForm};

/// Engine that returns its input unchanged.
///
/// Declaring [`SampleForm::Fixed32`] routes samples through the fixed-point
/// bridge, which is lossless for `-32767..=32767`. Useful for dry runs and
/// for checking a pipeline without vendor engines.
#[derive(Debug, Clone, Copy)]
pub struct BypassEngine {
    form: SampleForm,
}

impl BypassEngine {
    /// Create a passthrough engine producing `form`.
    pub fn new(form: SampleForm) -> Self {
        Self { form }
    }
}

impl Default for BypassEngine {
    fn default() -> Self {
        Self::new(SampleForm::Pcm16)
    }
}

impl EffectEngine for BypassEngine {
    type Handle = ();

    fn name(&self) -> &'static str {
        "bypass"
    }

    fn sample_form(&self) -> SampleForm {
        self.form
    }

    fn create(&mut self, _config: &EngineConfig) -> Option<()> {
        Some(())
    }

    fn process(
        &mut self,
        _handle: &mut (),
        input: &[i16],
        output: &mut EngineBuffer,
    ) -> Result<(), EngineError> {
        output.extend_from_pcm16(input);
        Ok(())
    }

    fn destroy(&mut self, _handle: ()) {}

    fn set_band_gain(&mut self, _handle: &mut (), _band: usize, _gain: i32) -> Result<(), EngineError> {
        Ok(())
    }
}
