//! File-based filter processing command.

use crate::engines::run_stage;
use crate::wav::{read_pcm16, write_pcm16};
use anyhow::bail;
use clap::Args;
use fxbridge_config::{FilterKind, FilterSpec, Preset, ValidationError, build_filter_config};
use fxbridge_core::{EffectEngine, StreamFormat};
use fxbridge_filter::{EffectFilter, EqualizerUpdate, FilterConfig};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (16-bit PCM)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Filter in host syntax, repeatable (e.g., "tuner=band0=3:switch_flag_after_tune=1")
    #[arg(short, long = "filter", value_name = "SPEC")]
    filters: Vec<String>,

    /// Preset file (TOML)
    #[arg(short, long, conflicts_with = "filters")]
    preset: Option<PathBuf>,

    /// Samples per channel in each frame
    #[arg(long, default_value = "1024")]
    frame_size: usize,

    /// Equalizer update sent to tuner filters mid-stream ("g0:...:g9", 255 = unchanged)
    #[arg(long, value_name = "GAINS")]
    eq: Option<String>,

    /// Frame index after which the equalizer update is sent
    #[arg(long, default_value = "0")]
    eq_at: usize,
}

/// Per-stage settings shared with the engine dispatch.
pub struct StageOptions {
    /// Equalizer update to send, if any.
    pub eq_update: Option<String>,
    /// Frame index after which to send it.
    pub eq_at: usize,
    /// Progress across all stages.
    pub progress: ProgressBar,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.frame_size == 0 {
        bail!("--frame-size must be at least 1");
    }
    if let Some(update) = &args.eq {
        update.parse::<EqualizerUpdate>()?;
    }

    let specs = collect_specs(&args)?;
    let stages = specs
        .iter()
        .map(|spec| {
            let kind = FilterKind::from_name(&spec.filter)
                .ok_or_else(|| ValidationError::UnknownFilter(spec.filter.clone()))?;
            Ok((kind, build_filter_config(spec)?))
        })
        .collect::<Result<Vec<(FilterKind, FilterConfig)>, ValidationError>>()?;

    if args.eq.is_some() && !stages.iter().any(|(kind, _)| *kind == FilterKind::Tuner) {
        tracing::warn!("--eq given but no tuner filter in the chain; ignoring");
    }

    println!("Reading {}...", args.input.display());
    let (samples, format) = read_pcm16(&args.input)?;
    let channels = usize::from(format.channels());
    println!(
        "  {} frames, {}, {:.2}s",
        samples.len() / channels,
        format,
        (samples.len() / channels) as f64 / f64::from(format.sample_rate())
    );

    let mut frames: Vec<Vec<i16>> = samples
        .chunks(args.frame_size * channels)
        .map(<[i16]>::to_vec)
        .collect();

    if args.eq.is_some() && args.eq_at >= frames.len() {
        tracing::warn!(
            eq_at = args.eq_at,
            frames = frames.len(),
            "--eq-at is past the last frame, the equalizer update will not be sent"
        );
    }

    let progress = ProgressBar::new((frames.len() * stages.len()) as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    println!(
        "Processing {} frame(s) with {}...",
        frames.len(),
        specs
            .iter()
            .map(|s| s.filter.as_str())
            .collect::<Vec<_>>()
            .join(" -> ")
    );

    for (kind, config) in stages {
        let options = StageOptions {
            eq_update: (kind == FilterKind::Tuner)
                .then(|| args.eq.clone())
                .flatten(),
            eq_at: args.eq_at,
            progress: progress.clone(),
        };
        frames = run_stage(kind, config, format, frames, &options)?;
    }
    progress.finish_with_message("done");

    let output: Vec<i16> = frames.into_iter().flatten().collect();

    println!("\nStats:");
    println!(
        "  Input:  {} samples, peak {:.1} dBFS",
        samples.len(),
        peak_dbfs(&samples)
    );
    println!(
        "  Output: {} samples, peak {:.1} dBFS",
        output.len(),
        peak_dbfs(&output)
    );

    println!("\nWriting {}...", args.output.display());
    write_pcm16(&args.output, &output, format)?;
    println!("Done!");

    Ok(())
}

fn collect_specs(args: &ProcessArgs) -> anyhow::Result<Vec<FilterSpec>> {
    let specs = if let Some(path) = &args.preset {
        let preset = Preset::load(path)?;
        println!("Loading preset: {}", preset.name);
        preset.filters
    } else {
        args.filters
            .iter()
            .map(|s| s.parse::<FilterSpec>())
            .collect::<Result<Vec<_>, _>>()?
    };
    if specs.is_empty() {
        bail!("No filter specified. Use --filter or --preset");
    }
    Ok(specs)
}

/// Run every frame of `format` through one filter built around `engine`.
pub fn run_filter<E: EffectEngine>(
    engine: E,
    config: FilterConfig,
    format: StreamFormat,
    frames: Vec<Vec<i16>>,
    options: &StageOptions,
) -> anyhow::Result<Vec<Vec<i16>>> {
    let mut filter = EffectFilter::new(engine, config);
    filter.prepare()?;

    let mut out = Vec::with_capacity(frames.len());
    for (index, samples) in frames.into_iter().enumerate() {
        let frame = filter.process_interleaved(format.channels(), format.sample_rate(), samples)?;
        out.push(frame.into_samples());

        if index == options.eq_at
            && let Some(update) = &options.eq_update
        {
            let report = filter.process_command("eq", update)?;
            if !report.is_complete() {
                tracing::warn!(
                    failed = report.failed.len(),
                    "some equalizer bands were not applied"
                );
            }
        }
        options.progress.inc(1);
    }

    filter.reset();
    Ok(out)
}

fn peak_dbfs(samples: &[i16]) -> f64 {
    let peak = samples
        .iter()
        .map(|s| s.unsigned_abs())
        .max()
        .unwrap_or(0);
    if peak == 0 {
        -120.0
    } else {
        20.0 * (f64::from(peak) / 32768.0).log10()
    }
}
