//! Frame-level effect filtering for fxbridge.
//!
//! This crate provides:
//!
//! - **[`EffectFilter`]**: lazy engine binding, format-change reinit, sample
//!   bridging and channel remap around any [`EffectEngine`](fxbridge_core::EffectEngine)
//! - **[`EqualizerControl`]**: live per-band equalizer updates that share the
//!   filter's engine instance
//! - **[`BypassEngine`]**: passthrough engine for dry runs
//!
//! ## Quick Start
//!
//! ```rust
//! use fxbridge_core::{AudioFrame, EffectParams, SampleForm};
//! use fxbridge_filter::{BypassEngine, EffectFilter, FilterConfig};
//!
//! let mut filter = EffectFilter::new(
//!     BypassEngine::new(SampleForm::Pcm16),
//!     FilterConfig::new(EffectParams::agc()),
//! );
//!
//! let out = filter.process(AudioFrame::new(1, 16000, vec![0; 160]).unwrap()).unwrap();
//! assert_eq!(out.nb_samples(), 160);
//!
//! let report = filter.update_equalizer("255:255:255:255:255:255:255:255:255:255").unwrap();
//! assert!(report.applied.is_empty());
//! ```

mod bypass;
mod control;
mod error;
mod filter;
mod slot;

pub use bypass::BypassEngine;
pub use control::{BAND_UNCHANGED, EqualizerControl, EqualizerUpdate, UpdateReport};
pub use error::{FilterError, Result};
pub use filter::{EQUALIZER_COMMANDS, EffectFilter, FilterConfig};
pub use slot::EngineSlot;
