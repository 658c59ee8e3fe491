//! Copying engine-owned PCM blocks into filter buffers.

use fxbridge_core::{EngineBuffer, EngineError};
use std::os::raw::c_int;

/// Copy `len` samples the engine left at `data` into `output`.
///
/// The engine keeps ownership of `data`; it is only valid until the next
/// call on the same instance, so the samples are copied out immediately.
///
/// # Safety
///
/// `data` must be null or point to at least `len` readable `i16` values.
pub(crate) unsafe fn copy_pcm_output(
    operation: &'static str,
    data: *const i16,
    len: c_int,
    output: &mut EngineBuffer,
) -> Result<(), EngineError> {
    if len < 0 {
        return Err(EngineError::Status {
            operation,
            status: len,
        });
    }
    if len == 0 {
        return Ok(());
    }
    if data.is_null() {
        return Err(EngineError::Failed {
            operation,
            reason: format!("engine reported {len} samples but returned no buffer"),
        });
    }

    // SAFETY: non-null and valid for `len` reads per the caller contract.
    let samples = unsafe { std::slice::from_raw_parts(data, len as usize) };
    output
        .try_reserve(samples.len())
        .map_err(|e| EngineError::Failed {
            operation,
            reason: e.to_string(),
        })?;
    output.extend_from_pcm16(samples);
    Ok(())
}

/// Block length as the C `int` the engines expect.
pub(crate) fn block_len(operation: &'static str, len: usize) -> Result<c_int, EngineError> {
    c_int::try_from(len).map_err(|_| EngineError::Failed {
        operation,
        reason: format!("block of {len} samples exceeds the engine limit"),
    })
}
