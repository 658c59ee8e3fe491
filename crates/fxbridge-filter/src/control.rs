//! Live equalizer control.
//!
//! Band gains can change while audio flows. Updates arrive out of band as
//! ten colon-separated integers (`"g0:g1:...:g9"`); a slot holding
//! [`BAND_UNCHANGED`] leaves that band alone. [`EqualizerControl`] shares the
//! filter's engine slot behind the same lock the frame path uses, so an
//! update never observes a handle that is being torn down.

use crate::error::{FilterError, Result};
use crate::slot::EngineSlot;
use fxbridge_core::{EQ_BANDS, EffectEngine, EngineError};
use parking_lot::Mutex;
use std::str::FromStr;
use std::sync::Arc;

/// Band value meaning "leave this band as it is".
pub const BAND_UNCHANGED: i32 = 0xFF;

/// Ten band gains parsed from a host update string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EqualizerUpdate {
    gains: [i32; EQ_BANDS],
}

impl EqualizerUpdate {
    /// Build an update from explicit gains.
    pub fn new(gains: [i32; EQ_BANDS]) -> Self {
        Self { gains }
    }

    /// An update that changes nothing.
    pub fn unchanged() -> Self {
        Self::new([BAND_UNCHANGED; EQ_BANDS])
    }

    /// Gains in band order.
    pub fn gains(&self) -> &[i32; EQ_BANDS] {
        &self.gains
    }
}

impl FromStr for EqualizerUpdate {
    type Err = FilterError;

    /// Parse `"g0:g1:...:g9"`. Fields after the tenth are ignored.
    fn from_str(s: &str) -> Result<Self> {
        let malformed = |reason: String| FilterError::MalformedUpdate {
            input: s.to_string(),
            reason,
        };

        let mut gains = [0i32; EQ_BANDS];
        let mut fields = s.split(':');
        for (band, gain) in gains.iter_mut().enumerate() {
            let field = fields.next().ok_or_else(|| {
                malformed(format!("expected {EQ_BANDS} band gains, found {band}"))
            })?;
            *gain = field
                .trim()
                .parse()
                .map_err(|e| malformed(format!("band {band}: {e}")))?;
        }
        Ok(Self { gains })
    }
}

/// Outcome of applying one [`EqualizerUpdate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateReport {
    /// Bands whose gain was set.
    pub applied: Vec<usize>,
    /// Bands left unchanged on request.
    pub skipped: Vec<usize>,
    /// Bands the engine refused, with its error.
    pub failed: Vec<(usize, EngineError)>,
}

impl UpdateReport {
    /// Whether every requested band was applied.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Cloneable handle for live equalizer updates against a filter's engine.
pub struct EqualizerControl<E: EffectEngine> {
    slot: Arc<Mutex<EngineSlot<E>>>,
}

impl<E: EffectEngine> Clone for EqualizerControl<E> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<E: EffectEngine> EqualizerControl<E> {
    pub(crate) fn new(slot: Arc<Mutex<EngineSlot<E>>>) -> Self {
        Self { slot }
    }

    /// Apply a parsed update to the live engine.
    ///
    /// Fails with [`FilterError::NotBound`] when no engine is live; updates
    /// are not queued. Per-band engine failures do not abort the batch and
    /// are returned in the report.
    pub fn apply(&self, update: &EqualizerUpdate) -> Result<UpdateReport> {
        let mut slot = self.slot.lock();
        if !slot.is_bound() {
            return Err(FilterError::NotBound);
        }
        Self::apply_locked(&mut slot, update)
    }

    /// Parse and apply a `"g0:...:g9"` update string.
    pub fn apply_str(&self, args: &str) -> Result<UpdateReport> {
        let mut slot = self.slot.lock();
        if !slot.is_bound() {
            return Err(FilterError::NotBound);
        }
        let update: EqualizerUpdate = args.parse()?;
        Self::apply_locked(&mut slot, &update)
    }

    fn apply_locked(slot: &mut EngineSlot<E>, update: &EqualizerUpdate) -> Result<UpdateReport> {
        let mut report = UpdateReport::default();
        for (band, &gain) in update.gains().iter().enumerate() {
            if gain == BAND_UNCHANGED {
                report.skipped.push(band);
                continue;
            }
            match slot.set_band_gain(band, gain) {
                Ok(()) => {
                    tracing::info!(band, gain, "equalizer band set");
                    report.applied.push(band);
                }
                Err(FilterError::Engine(e)) => {
                    tracing::warn!(band, gain, error = %e, "equalizer band update failed");
                    report.failed.push((band, e));
                }
                Err(other) => return Err(other),
            }
        }
        Ok(report)
    }
}
