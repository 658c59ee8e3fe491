//! Integration tests for fxbridge-filter lifecycle, bridging and equalizer control.

use fxbridge_core::{
    AudioFrame, ChannelRemap, EffectEngine, EffectParams, EngineBuffer, EngineConfig,
    EngineError, SampleForm, SessionIdAllocator, StreamFormat,
};
use fxbridge_filter::{BAND_UNCHANGED, EffectFilter, EqualizerUpdate, FilterConfig, FilterError};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// ---------------------------------------------------------------------------
// Recording fake engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Create(EngineConfig),
    Process { handle: u32, len: usize },
    Destroy(u32),
    SetBandGain { handle: u32, band: usize, gain: i32 },
}

/// Shared view of what the fake engine was asked to do.
#[derive(Clone, Default)]
struct Probe {
    calls: Arc<Mutex<Vec<Call>>>,
    fail_create: Arc<AtomicBool>,
    fail_process: Arc<AtomicBool>,
}

impl Probe {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn clear(&self) {
        self.calls.lock().clear();
    }

    fn creates(&self) -> Vec<EngineConfig> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Create(config) => Some(config),
                _ => None,
            })
            .collect()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|&c| pred(c)).count()
    }

    fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    fn set_fail_process(&self, fail: bool) {
        self.fail_process.store(fail, Ordering::SeqCst);
    }
}

struct RecordingEngine {
    form: SampleForm,
    probe: Probe,
    next_handle: u32,
    failing_bands: Vec<usize>,
    drop_tail: usize,
}

impl RecordingEngine {
    fn new(form: SampleForm) -> (Self, Probe) {
        let probe = Probe::default();
        let engine = Self {
            form,
            probe: probe.clone(),
            next_handle: 1,
            failing_bands: Vec::new(),
            drop_tail: 0,
        };
        (engine, probe)
    }

    fn failing_bands(mut self, bands: &[usize]) -> Self {
        self.failing_bands = bands.to_vec();
        self
    }

    /// Produce `n` fewer samples than consumed, like an engine holding
    /// samples back in an internal buffer.
    fn dropping_tail(mut self, n: usize) -> Self {
        self.drop_tail = n;
        self
    }
}

impl EffectEngine for RecordingEngine {
    type Handle = u32;

    fn name(&self) -> &'static str {
        "recording"
    }

    fn sample_form(&self) -> SampleForm {
        self.form
    }

    fn create(&mut self, config: &EngineConfig) -> Option<u32> {
        self.probe.calls.lock().push(Call::Create(*config));
        if self.probe.fail_create.load(Ordering::SeqCst) {
            return None;
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        Some(handle)
    }

    fn process(
        &mut self,
        handle: &mut u32,
        input: &[i16],
        output: &mut EngineBuffer,
    ) -> Result<(), EngineError> {
        self.probe.calls.lock().push(Call::Process {
            handle: *handle,
            len: input.len(),
        });
        if self.probe.fail_process.load(Ordering::SeqCst) {
            return Err(EngineError::Status {
                operation: "process",
                status: -7,
            });
        }
        let keep = input.len().saturating_sub(self.drop_tail);
        output.extend_from_pcm16(&input[..keep]);
        Ok(())
    }

    fn destroy(&mut self, handle: u32) {
        self.probe.calls.lock().push(Call::Destroy(handle));
    }

    fn set_band_gain(&mut self, handle: &mut u32, band: usize, gain: i32) -> Result<(), EngineError> {
        self.probe.calls.lock().push(Call::SetBandGain {
            handle: *handle,
            band,
            gain,
        });
        if self.failing_bands.contains(&band) {
            return Err(EngineError::Status {
                operation: "set_band_gain",
                status: -1,
            });
        }
        Ok(())
    }
}

fn tuner_filter(engine: RecordingEngine) -> EffectFilter<RecordingEngine> {
    EffectFilter::with_allocator(
        engine,
        FilterConfig::new(EffectParams::tuner()),
        Arc::new(SessionIdAllocator::new()),
    )
}

fn frame(channels: u16, rate: u32, samples: Vec<i16>) -> AudioFrame {
    AudioFrame::new(channels, rate, samples).unwrap()
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn constant_format_creates_once() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Pcm16);
    let mut filter = tuner_filter(engine);

    for _ in 0..10 {
        filter.process(frame(2, 48000, vec![0; 64])).unwrap();
    }

    assert_eq!(probe.creates().len(), 1);
    assert_eq!(probe.count(|c| matches!(c, Call::Destroy(_))), 0);
    assert_eq!(probe.count(|c| matches!(c, Call::Process { .. })), 10);
}

#[test]
fn format_change_destroys_then_creates_before_process() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Pcm16);
    let mut filter = tuner_filter(engine);

    filter.process(frame(2, 16000, vec![0; 8])).unwrap();
    probe.clear();
    filter.process(frame(1, 16000, vec![0; 4])).unwrap();

    let calls = probe.calls();
    assert_eq!(calls.len(), 3, "calls: {calls:?}");
    assert_eq!(calls[0], Call::Destroy(1));
    assert!(matches!(&calls[1], Call::Create(c) if c.format.channels() == 1));
    assert_eq!(calls[2], Call::Process { handle: 2, len: 4 });
}

#[test]
fn scenario_bind_reuse_rebind() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Pcm16);
    let mut filter = tuner_filter(engine);

    // unbound, 2ch/16 kHz: one create with fresh ids
    filter.process(frame(2, 16000, vec![0; 320])).unwrap();
    let creates = probe.creates();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].format, StreamFormat::new(2, 16000).unwrap());
    assert_eq!(creates[0].session.as_array(), [1, 2, 3]);
    assert_eq!(creates[0].frame_len(), 2400);
    assert_eq!(creates[0].params, EffectParams::tuner());

    // same format: only a process call
    probe.clear();
    filter.process(frame(2, 16000, vec![0; 320])).unwrap();
    assert_eq!(probe.calls(), vec![Call::Process { handle: 1, len: 320 }]);

    // 8 kHz: destroy, create with new ids, process
    probe.clear();
    filter.process(frame(2, 8000, vec![0; 160])).unwrap();
    let calls = probe.calls();
    assert_eq!(calls[0], Call::Destroy(1));
    match &calls[1] {
        Call::Create(config) => {
            assert_eq!(config.format.sample_rate(), 8000);
            assert_eq!(config.session.as_array(), [4, 5, 6]);
        }
        other => panic!("expected create, got {other:?}"),
    }
    assert_eq!(calls[2], Call::Process { handle: 2, len: 160 });
    assert_eq!(filter.session().unwrap().send_id, 4);
}

#[test]
fn failed_create_drops_frame_and_retries_next_frame() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Pcm16);
    let mut filter = tuner_filter(engine);

    probe.set_fail_create(true);
    let err = filter.process(frame(2, 16000, vec![0; 8])).unwrap_err();
    assert!(matches!(err, FilterError::EngineInit { engine: "recording", .. }));
    assert!(!filter.is_bound());
    assert_eq!(probe.count(|c| matches!(c, Call::Process { .. })), 0);

    probe.set_fail_create(false);
    filter.process(frame(2, 16000, vec![0; 8])).unwrap();
    assert!(filter.is_bound());
    assert_eq!(probe.creates().len(), 2);
}

#[test]
fn failed_reinit_leaves_filter_unbound_until_next_frame() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Pcm16);
    let mut filter = tuner_filter(engine);

    filter.process(frame(2, 16000, vec![0; 8])).unwrap();
    probe.clear();
    probe.set_fail_create(true);

    let err = filter.process(frame(2, 8000, vec![0; 8])).unwrap_err();
    assert!(matches!(err, FilterError::EngineInit { .. }), "{err}");
    assert!(!filter.is_bound());
    assert_eq!(filter.bound_format(), None);

    let calls = probe.calls();
    assert_eq!(calls.len(), 2, "calls: {calls:?}");
    assert_eq!(calls[0], Call::Destroy(1));
    assert!(matches!(&calls[1], Call::Create(c) if c.session.as_array() == [4, 5, 6]));

    probe.clear();
    probe.set_fail_create(false);
    filter.process(frame(2, 8000, vec![0; 8])).unwrap();

    let creates = probe.creates();
    assert_eq!(creates.len(), 1);
    assert_eq!(creates[0].session.as_array(), [7, 8, 9]);
    assert_eq!(probe.count(|c| matches!(c, Call::Destroy(_))), 0);
    assert_eq!(filter.bound_format(), Some(StreamFormat::new(2, 8000).unwrap()));
}

#[test]
fn engine_process_failure_keeps_instance_bound() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Pcm16);
    let mut filter = tuner_filter(engine);

    probe.set_fail_process(true);
    let err = filter.process(frame(2, 16000, vec![0; 8])).unwrap_err();
    assert!(matches!(
        err,
        FilterError::Engine(EngineError::Status { status: -7, .. })
    ));
    assert!(filter.is_bound());

    probe.set_fail_process(false);
    let out = filter.process(frame(2, 16000, vec![1, 2, 3, 4])).unwrap();
    assert_eq!(out.samples(), &[1, 2, 3, 4]);

    assert_eq!(probe.creates().len(), 1);
    assert_eq!(probe.count(|c| matches!(c, Call::Destroy(_))), 0);
    assert_eq!(
        probe.count(|c| matches!(c, Call::Process { handle: 1, .. })),
        2
    );
}

#[test]
fn invalid_raw_frames_never_reach_the_engine() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Pcm16);
    let mut filter = tuner_filter(engine);

    let ragged = filter.process_interleaved(2, 16000, vec![1, 2, 3]).unwrap_err();
    assert!(matches!(ragged, FilterError::Frame(_)), "{ragged}");
    let no_channels = filter.process_interleaved(0, 16000, vec![1, 2]).unwrap_err();
    assert!(matches!(no_channels, FilterError::Frame(_)), "{no_channels}");
    let no_rate = filter.process_interleaved(2, 0, vec![1, 2]).unwrap_err();
    assert!(matches!(no_rate, FilterError::Frame(_)), "{no_rate}");

    assert!(probe.calls().is_empty());
    assert!(!filter.is_bound());

    let out = filter.process_interleaved(2, 16000, vec![5, 6]).unwrap();
    assert_eq!(out.samples(), &[5, 6]);
    assert_eq!(out.pts(), None);
}

#[test]
fn reset_is_idempotent_and_drop_releases() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Pcm16);
    let mut filter = tuner_filter(engine);

    filter.process(frame(1, 8000, vec![0; 4])).unwrap();
    filter.reset();
    filter.reset();
    assert_eq!(probe.count(|c| matches!(c, Call::Destroy(_))), 1);

    filter.process(frame(1, 8000, vec![0; 4])).unwrap();
    drop(filter);
    assert_eq!(probe.count(|c| matches!(c, Call::Destroy(_))), 2);
}

#[test]
fn prepare_binds_then_matching_frame_reuses() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Fixed32);
    let format = StreamFormat::new(2, 44100).unwrap();
    let mut filter = EffectFilter::with_allocator(
        engine,
        FilterConfig::new(EffectParams::tuner()).with_initial_format(format),
        Arc::new(SessionIdAllocator::new()),
    );

    filter.prepare().unwrap();
    filter.process(frame(2, 44100, vec![0; 8])).unwrap();
    assert_eq!(probe.creates().len(), 1);

    // preparing again releases the live instance first
    filter.prepare().unwrap();
    assert_eq!(probe.count(|c| matches!(c, Call::Destroy(_))), 1);
    assert_eq!(probe.creates().len(), 2);
}

// ---------------------------------------------------------------------------
// Sample path
// ---------------------------------------------------------------------------

#[test]
fn fixed_point_engine_roundtrips_samples() {
    let (engine, _) = RecordingEngine::new(SampleForm::Fixed32);
    let mut filter = tuner_filter(engine);

    let input = vec![-32767, -1, 0, 1, 12345, 32767];
    let out = filter.process(frame(2, 48000, input.clone())).unwrap();
    assert_eq!(out.samples(), input.as_slice());
}

#[test]
fn output_length_follows_engine_and_truncates_partial_frames() {
    let (engine, _) = RecordingEngine::new(SampleForm::Pcm16);
    let mut filter = tuner_filter(engine.dropping_tail(3));

    let out = filter
        .process(frame(2, 16000, (0..10).collect()).with_pts(7))
        .unwrap();
    // 10 in, 7 produced, 3 whole stereo frames kept
    assert_eq!(out.samples(), &[0, 1, 2, 3, 4, 5]);
    assert_eq!(out.nb_samples(), 3);
    assert_eq!(out.pts(), Some(7));
}

#[test]
fn remaps_wrap_engine_call() {
    let (engine, _) = RecordingEngine::new(SampleForm::Fixed32);
    let config = FilterConfig::new(EffectParams::tuner())
        .with_remap_before(ChannelRemap::Swap)
        .with_remap_after(ChannelRemap::FillLeftFromRight);
    let mut filter =
        EffectFilter::with_allocator(engine, config, Arc::new(SessionIdAllocator::new()));

    let out = filter.process(frame(2, 16000, vec![1, 2, 3, 4])).unwrap();
    // swap: [2,1,4,3]; fill left from right: [1,1,3,3]
    assert_eq!(out.samples(), &[1, 1, 3, 3]);
}

// ---------------------------------------------------------------------------
// Equalizer control
// ---------------------------------------------------------------------------

#[test]
fn equalizer_requires_bound_engine() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Fixed32);
    let filter = tuner_filter(engine);

    let err = filter.update_equalizer("0:0:0:0:0:0:0:0:0:0").unwrap_err();
    assert!(matches!(err, FilterError::NotBound));
    assert!(probe.calls().is_empty());
}

#[test]
fn all_unchanged_update_makes_no_engine_calls() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Fixed32);
    let mut filter = tuner_filter(engine);
    filter.process(frame(2, 16000, vec![0; 4])).unwrap();
    probe.clear();

    let report = filter
        .equalizer()
        .apply(&EqualizerUpdate::unchanged())
        .unwrap();
    assert!(probe.calls().is_empty());
    assert_eq!(report.skipped.len(), 10);
    assert!(report.applied.is_empty());
}

#[test]
fn partial_update_skips_sentinels_and_reports_failures() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Fixed32);
    let mut filter = tuner_filter(engine.failing_bands(&[3]));
    filter.process(frame(2, 16000, vec![0; 4])).unwrap();
    probe.clear();

    let u = BAND_UNCHANGED;
    let args = format!("5:{u}:{u}:-2:{u}:{u}:{u}:{u}:{u}:9");
    let report = filter.process_command("eq", &args).unwrap();

    assert_eq!(report.applied, vec![0, 9]);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, 3);
    assert!(!report.is_complete());
    assert_eq!(
        probe.calls(),
        vec![
            Call::SetBandGain { handle: 1, band: 0, gain: 5 },
            Call::SetBandGain { handle: 1, band: 3, gain: -2 },
            Call::SetBandGain { handle: 1, band: 9, gain: 9 },
        ]
    );
}

#[test]
fn malformed_update_is_distinct_from_engine_failure() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Fixed32);
    let mut filter = tuner_filter(engine);
    filter.process(frame(2, 16000, vec![0; 4])).unwrap();
    probe.clear();

    let err = filter.update_equalizer("1:2:3").unwrap_err();
    assert!(matches!(err, FilterError::MalformedUpdate { .. }));
    assert!(probe.calls().is_empty());
}

#[test]
fn control_outliving_filter_sees_not_bound() {
    let (engine, _) = RecordingEngine::new(SampleForm::Fixed32);
    let mut filter = tuner_filter(engine);
    filter.process(frame(2, 16000, vec![0; 4])).unwrap();

    let control = filter.equalizer();
    drop(filter);
    let err = control.apply(&EqualizerUpdate::new([0; 10])).unwrap_err();
    assert!(matches!(err, FilterError::NotBound));
}

#[test]
fn control_updates_from_another_thread() {
    let (engine, probe) = RecordingEngine::new(SampleForm::Fixed32);
    let mut filter = tuner_filter(engine);
    filter.process(frame(2, 16000, vec![0; 4])).unwrap();

    let control = filter.equalizer();
    std::thread::scope(|scope| {
        scope.spawn(|| {
            control
                .apply_str("1:1:1:1:1:1:1:1:1:1")
                .unwrap();
        });
        for _ in 0..20 {
            filter.process(frame(2, 16000, vec![0; 4])).unwrap();
        }
    });

    assert_eq!(probe.count(|c| matches!(c, Call::SetBandGain { .. })), 10);
    assert_eq!(probe.creates().len(), 1);
}
