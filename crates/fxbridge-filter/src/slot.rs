//! Engine lifecycle: zero or one live engine instance per filter.
//!
//! [`EngineSlot`] owns an engine value and at most one handle created from
//! it. The handle and the format it was created for are stored together, so
//! they are always set and cleared as a unit.
//!
//! ```text
//!             ensure_bound(fmt)
//!   Unbound ─────────────────────▶ Bound(fmt)
//!      ▲                            │   │ ensure_bound(other)
//!      │ release / drop / failure   │   ▼
//!      └────────────────────────────┘ destroy, create ─▶ Bound(other)
//! ```

use crate::error::{FilterError, Result};
use fxbridge_core::{
    EffectEngine, EffectParams, EngineBuffer, EngineConfig, SampleForm, SessionIdAllocator,
    SessionIds, StreamFormat,
};
use std::sync::Arc;

struct Bound<H> {
    format: StreamFormat,
    session: SessionIds,
    handle: H,
}

/// Lifecycle manager for one engine instance.
pub struct EngineSlot<E: EffectEngine> {
    engine: E,
    bound: Option<Bound<E::Handle>>,
    allocator: Arc<SessionIdAllocator>,
}

impl<E: EffectEngine> EngineSlot<E> {
    /// Create an unbound slot drawing session ids from `allocator`.
    pub fn new(engine: E, allocator: Arc<SessionIdAllocator>) -> Self {
        Self {
            engine,
            bound: None,
            allocator,
        }
    }

    /// Sample form the engine produces.
    pub fn sample_form(&self) -> SampleForm {
        self.engine.sample_form()
    }

    /// Whether a live handle exists.
    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Format of the live handle.
    pub fn format(&self) -> Option<StreamFormat> {
        self.bound.as_ref().map(|b| b.format)
    }

    /// Session ids of the live handle.
    pub fn session(&self) -> Option<SessionIds> {
        self.bound.as_ref().map(|b| b.session)
    }

    /// Make sure a handle exists for `format`.
    ///
    /// Reuses the live handle when the format matches. Otherwise the live
    /// handle (if any) is destroyed first, a fresh id triple is drawn and the
    /// engine is asked for a new instance. If creation fails the slot is left
    /// unbound.
    ///
    /// Returns `true` when a new instance was created and `false` when the
    /// live one was reused.
    pub fn ensure_bound(&mut self, format: StreamFormat, params: &EffectParams) -> Result<bool> {
        let previous = match &self.bound {
            Some(bound) if bound.format == format => return Ok(false),
            Some(bound) => Some(bound.format),
            None => None,
        };

        if let Some(old) = self.bound.take() {
            self.engine.destroy(old.handle);
        }

        let engine = self.engine.name();
        let session = self.allocator.allocate();
        let config = EngineConfig {
            format,
            session,
            params: *params,
        };

        let Some(handle) = self.engine.create(&config) else {
            tracing::warn!(engine, %format, "engine creation failed");
            return Err(FilterError::EngineInit { engine, format });
        };

        match previous {
            Some(from) => tracing::info!(
                engine,
                %from,
                to = %format,
                send_id = session.send_id,
                "engine reinitialized"
            ),
            None => tracing::info!(
                engine,
                %format,
                send_id = session.send_id,
                "engine created"
            ),
        }

        self.bound = Some(Bound {
            format,
            session,
            handle,
        });
        Ok(true)
    }

    /// Run one block through the live handle.
    pub fn process(&mut self, input: &[i16], output: &mut EngineBuffer) -> Result<()> {
        let bound = self.bound.as_mut().ok_or(FilterError::NotBound)?;
        self.engine.process(&mut bound.handle, input, output)?;
        Ok(())
    }

    /// Set one equalizer band on the live handle.
    pub fn set_band_gain(&mut self, band: usize, gain: i32) -> Result<()> {
        let bound = self.bound.as_mut().ok_or(FilterError::NotBound)?;
        self.engine.set_band_gain(&mut bound.handle, band, gain)?;
        Ok(())
    }

    /// Destroy the live handle, if any. Safe to call repeatedly.
    pub fn release(&mut self) {
        if let Some(bound) = self.bound.take() {
            self.engine.destroy(bound.handle);
            tracing::info!(
                engine = self.engine.name(),
                format = %bound.format,
                "engine released"
            );
        }
    }
}

impl<E: EffectEngine> Drop for EngineSlot<E> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxbridge_core::EngineError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counters {
        created: AtomicUsize,
        destroyed: AtomicUsize,
    }

    struct Counting {
        counters: Arc<Counters>,
        fail_create: bool,
    }

    impl EffectEngine for Counting {
        type Handle = StreamFormat;

        fn name(&self) -> &'static str {
            "counting"
        }

        fn sample_form(&self) -> SampleForm {
            SampleForm::Pcm16
        }

        fn create(&mut self, config: &EngineConfig) -> Option<StreamFormat> {
            if self.fail_create {
                return None;
            }
            self.counters.created.fetch_add(1, Ordering::SeqCst);
            Some(config.format)
        }

        fn process(
            &mut self,
            _handle: &mut StreamFormat,
            input: &[i16],
            output: &mut EngineBuffer,
        ) -> std::result::Result<(), EngineError> {
            output.extend_from_pcm16(input);
            Ok(())
        }

        fn destroy(&mut self, _handle: StreamFormat) {
            self.counters.destroyed.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn slot(fail_create: bool) -> (EngineSlot<Counting>, Arc<Counters>) {
        let counters = Arc::new(Counters::default());
        let engine = Counting {
            counters: Arc::clone(&counters),
            fail_create,
        };
        (
            EngineSlot::new(engine, Arc::new(SessionIdAllocator::new())),
            counters,
        )
    }

    fn fmt(channels: u16, rate: u32) -> StreamFormat {
        StreamFormat::new(channels, rate).unwrap()
    }

    #[test]
    fn same_format_binds_once() {
        let (mut slot, counters) = slot(false);
        let params = EffectParams::agc();
        for _ in 0..5 {
            slot.ensure_bound(fmt(2, 16000), &params).unwrap();
        }
        assert_eq!(counters.created.load(Ordering::SeqCst), 1);
        assert_eq!(counters.destroyed.load(Ordering::SeqCst), 0);
        assert_eq!(slot.session().unwrap().as_array(), [1, 2, 3]);
    }

    #[test]
    fn format_change_rebinds_with_fresh_ids() {
        let (mut slot, counters) = slot(false);
        let params = EffectParams::agc();
        slot.ensure_bound(fmt(2, 16000), &params).unwrap();
        slot.ensure_bound(fmt(2, 8000), &params).unwrap();

        assert_eq!(counters.created.load(Ordering::SeqCst), 2);
        assert_eq!(counters.destroyed.load(Ordering::SeqCst), 1);
        assert_eq!(slot.format(), Some(fmt(2, 8000)));
        assert_eq!(slot.session().unwrap().send_id, 4);
    }

    #[test]
    fn ensure_bound_reports_new_instances() {
        let (mut slot, _) = slot(false);
        let params = EffectParams::agc();
        assert!(slot.ensure_bound(fmt(1, 8000), &params).unwrap());
        assert!(!slot.ensure_bound(fmt(1, 8000), &params).unwrap());
        assert!(slot.ensure_bound(fmt(2, 8000), &params).unwrap());
        assert!(!slot.ensure_bound(fmt(2, 8000), &params).unwrap());
    }

    #[test]
    fn failed_create_leaves_slot_unbound() {
        let (mut slot, counters) = slot(true);
        let err = slot
            .ensure_bound(fmt(1, 8000), &EffectParams::agc())
            .unwrap_err();
        assert!(matches!(err, FilterError::EngineInit { engine: "counting", .. }));
        assert!(!slot.is_bound());
        assert_eq!(counters.destroyed.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn release_is_idempotent() {
        let (mut slot, counters) = slot(false);
        slot.ensure_bound(fmt(1, 8000), &EffectParams::agc()).unwrap();
        slot.release();
        slot.release();
        assert!(!slot.is_bound());
        assert_eq!(counters.destroyed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn drop_destroys_live_handle() {
        let (mut slot, counters) = slot(false);
        slot.ensure_bound(fmt(1, 8000), &EffectParams::agc()).unwrap();
        drop(slot);
        assert_eq!(counters.destroyed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unbound_operations_report_not_bound() {
        let (mut slot, _) = slot(false);
        let mut out = EngineBuffer::new(SampleForm::Pcm16);
        assert!(matches!(slot.process(&[0; 4], &mut out), Err(FilterError::NotBound)));
        assert!(matches!(slot.set_band_gain(0, 1), Err(FilterError::NotBound)));
    }
}
