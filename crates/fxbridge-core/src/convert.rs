//! Sample format bridge between pipeline PCM and engine-native samples.
//!
//! The pipeline always carries interleaved 16-bit PCM. Engines either work on
//! that directly or emit wide fixed-point samples normalized to the full
//! signed 32-bit range:
//!
//! | Form | Engine sample | Conversion |
//! |------|---------------|------------|
//! | [`SampleForm::Pcm16`] | `i16` | none (passthrough) |
//! | [`SampleForm::Fixed32`] | `i32`, full scale = 2147483647.99 | scaled, rounded |
//!
//! # Rounding
//!
//! Decoding scales by `32767 / 2147483647.99` and rounds half away from zero,
//! then saturates into `i16`. The boundary values are pinned:
//! `i32::MAX → 32767`, `i32::MIN → -32767`. Plain truncation would map
//! `i32::MAX` to 32766 because the scale denominator sits just above it.

/// Full-scale magnitude of the fixed-point engine form.
pub const FIXED_FULL_SCALE: f64 = 2_147_483_647.99;

/// Full-scale magnitude of 16-bit PCM used by the bridge.
pub const PCM16_FULL_SCALE: f64 = 32767.0;

/// Native sample representation of an engine's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SampleForm {
    /// 16-bit PCM, identical to the pipeline form.
    Pcm16,
    /// Signed fixed point normalized to the `i32` range.
    Fixed32,
}

/// Decode one fixed-point engine sample to 16-bit PCM.
///
/// # Example
/// ```rust
/// use fxbridge_core::convert::fixed_to_pcm16;
///
/// assert_eq!(fixed_to_pcm16(i32::MAX), 32767);
/// assert_eq!(fixed_to_pcm16(i32::MIN), -32767);
/// assert_eq!(fixed_to_pcm16(0), 0);
/// ```
#[inline]
pub fn fixed_to_pcm16(value: i32) -> i16 {
    let scaled = f64::from(value) / FIXED_FULL_SCALE * PCM16_FULL_SCALE;
    // `as` saturates; the rounded value is already inside ±32767.
    scaled.round() as i16
}

/// Encode one 16-bit PCM sample into the fixed-point engine form.
///
/// Inverse of [`fixed_to_pcm16`] for every sample in `-32767..=32767`.
#[inline]
pub fn pcm16_to_fixed(sample: i16) -> i32 {
    let scaled = f64::from(sample) / PCM16_FULL_SCALE * FIXED_FULL_SCALE;
    scaled.round() as i32
}

/// Decode a fixed-point buffer into 16-bit PCM.
///
/// Converts `min(src.len(), dst.len())` samples and returns that count.
/// Empty input is a no-op.
pub fn decode_fixed(src: &[i32], dst: &mut [i16]) -> usize {
    let len = src.len().min(dst.len());
    for (out, &value) in dst[..len].iter_mut().zip(src) {
        *out = fixed_to_pcm16(value);
    }
    len
}

/// Encode a 16-bit PCM buffer into the fixed-point form.
///
/// Converts `min(src.len(), dst.len())` samples and returns that count.
pub fn encode_fixed(src: &[i16], dst: &mut [i32]) -> usize {
    let len = src.len().min(dst.len());
    for (out, &sample) in dst[..len].iter_mut().zip(src) {
        *out = pcm16_to_fixed(sample);
    }
    len
}
