//! Vendor-backed engines for fxbridge filters.
//!
//! Implements [`EffectEngine`](fxbridge_core::EffectEngine) over the vendor
//! C libraries:
//!
//! - [`AgcEngine`]: automatic gain control, 16-bit in and out
//! - [`NoiseSuppressorEngine`]: noise suppression, 16-bit in and out
//! - [`TunerEngine`]: reverb plus 10-band equalizer, fixed-point out
//!
//! The build script links the libraries; see `build.rs` for the environment
//! variables that locate them. Every instance handle is released through the
//! matching terminate call when the owning filter rebinds or drops.

#[allow(unsafe_code)]
mod agc;
#[allow(unsafe_code)]
mod ffi;
#[allow(unsafe_code)]
mod ns;
#[allow(unsafe_code)]
mod output;
#[allow(unsafe_code)]
mod tuner;

pub use agc::{AgcEngine, AgcHandle};
pub use ns::{NoiseSuppressorEngine, NoiseSuppressorHandle};
pub use tuner::{TunerEngine, TunerHandle};
