//! Property-based tests for fxbridge-filter.
//!
//! Exercises the frame path with the passthrough engine over random frames,
//! remap settings and format sequences.

use fxbridge_core::{
    AudioFrame, ChannelRemap, EffectParams, SampleForm, SessionIdAllocator, StreamFormat,
};
use fxbridge_filter::{BypassEngine, EffectFilter, EqualizerUpdate, FilterConfig};
use proptest::prelude::*;
use std::sync::Arc;

fn remap() -> impl Strategy<Value = ChannelRemap> {
    (0i32..=3).prop_map(|flag| ChannelRemap::try_from(flag).unwrap())
}

fn filter(form: SampleForm, config: FilterConfig) -> EffectFilter<BypassEngine> {
    EffectFilter::with_allocator(
        BypassEngine::new(form),
        config,
        Arc::new(SessionIdAllocator::new()),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Routing through the fixed-point form gives the same frame as the
    /// 16-bit form for every sample in the symmetric range.
    #[test]
    fn fixed_and_pcm_paths_agree(
        pairs in prop::collection::vec((-32767i16..=32767i16, -32767i16..=32767i16), 0..128),
        before in remap(),
        after in remap(),
    ) {
        let samples: Vec<i16> = pairs.iter().flat_map(|&(l, r)| [l, r]).collect();
        let config = FilterConfig::new(EffectParams::tuner())
            .with_remap_before(before)
            .with_remap_after(after);

        let mut pcm = filter(SampleForm::Pcm16, config);
        let mut fixed = filter(SampleForm::Fixed32, config);
        let a = pcm.process(AudioFrame::new(2, 16000, samples.clone()).unwrap()).unwrap();
        let b = fixed.process(AudioFrame::new(2, 16000, samples).unwrap()).unwrap();
        prop_assert_eq!(a.samples(), b.samples());
    }

    /// Output frames keep the input's format, timestamp and length.
    #[test]
    fn passthrough_preserves_frame(
        channels in 1u16..=6,
        frames in 0usize..64,
        pts in any::<i64>(),
    ) {
        let samples: Vec<i16> = (0..frames * usize::from(channels))
            .map(|i| (i % 1000) as i16)
            .collect();
        let frame = AudioFrame::new(channels, 44100, samples.clone()).unwrap().with_pts(pts);

        let mut f = filter(SampleForm::Pcm16, FilterConfig::new(EffectParams::agc()));
        let out = f.process(frame).unwrap();
        prop_assert_eq!(out.channels(), channels);
        prop_assert_eq!(out.sample_rate(), 44100);
        prop_assert_eq!(out.pts(), Some(pts));
        prop_assert_eq!(out.samples(), &samples[..]);
    }

    /// A new session is drawn exactly when the frame format changes.
    #[test]
    fn session_changes_track_format_changes(
        formats in prop::collection::vec((1u16..=2, prop::sample::select(vec![8000u32, 16000, 48000])), 1..20),
    ) {
        let mut f = filter(SampleForm::Pcm16, FilterConfig::new(EffectParams::agc()));
        let mut previous: Option<(StreamFormat, u32)> = None;
        for (channels, rate) in formats {
            let samples = vec![0i16; usize::from(channels) * 4];
            f.process(AudioFrame::new(channels, rate, samples).unwrap()).unwrap();

            let format = f.bound_format().unwrap();
            let send_id = f.session().unwrap().send_id;
            if let Some((last_format, last_id)) = previous {
                if last_format == format {
                    prop_assert_eq!(last_id, send_id);
                } else {
                    prop_assert!(send_id > last_id);
                }
            }
            previous = Some((format, send_id));
        }
    }

    /// Any ten integers joined by ':' parse back to the same gains.
    #[test]
    fn equalizer_update_parses_joined_gains(gains in prop::array::uniform10(any::<i32>())) {
        let text = gains.iter().map(ToString::to_string).collect::<Vec<_>>().join(":");
        let update: EqualizerUpdate = text.parse().unwrap();
        prop_assert_eq!(update.gains(), &gains);
    }
}
