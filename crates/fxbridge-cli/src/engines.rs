//! Engine selection for a filter kind.
//!
//! Built with the `native` feature, each filter runs its vendor engine.
//! Otherwise every filter runs the passthrough engine in the sample form its
//! vendor engine would use, which exercises the full frame path.

use crate::commands::process::{StageOptions, run_filter};
use fxbridge_config::FilterKind;
use fxbridge_core::StreamFormat;
use fxbridge_filter::FilterConfig;

/// Run `frames` through one filter of `kind`.
#[cfg(not(feature = "native"))]
pub fn run_stage(
    kind: FilterKind,
    config: FilterConfig,
    format: StreamFormat,
    frames: Vec<Vec<i16>>,
    options: &StageOptions,
) -> anyhow::Result<Vec<Vec<i16>>> {
    use fxbridge_core::SampleForm;
    use fxbridge_filter::BypassEngine;

    let form = match kind {
        FilterKind::Agc | FilterKind::NoiseCanceller => SampleForm::Pcm16,
        FilterKind::Tuner => SampleForm::Fixed32,
    };
    tracing::debug!(filter = %kind, "using passthrough engine");
    run_filter(BypassEngine::new(form), config, format, frames, options)
}

/// Run `frames` through one filter of `kind`.
#[cfg(feature = "native")]
pub fn run_stage(
    kind: FilterKind,
    config: FilterConfig,
    format: StreamFormat,
    frames: Vec<Vec<i16>>,
    options: &StageOptions,
) -> anyhow::Result<Vec<Vec<i16>>> {
    use fxbridge_native::{AgcEngine, NoiseSuppressorEngine, TunerEngine};

    match kind {
        FilterKind::Agc => run_filter(AgcEngine::new(), config, format, frames, options),
        FilterKind::NoiseCanceller => {
            run_filter(NoiseSuppressorEngine::new(), config, format, frames, options)
        }
        FilterKind::Tuner => run_filter(TunerEngine::new(), config, format, frames, options),
    }
}
