//! 16-bit PCM WAV reading and writing.

use anyhow::{Context, bail};
use fxbridge_core::StreamFormat;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;

/// Read an interleaved 16-bit PCM WAV file.
///
/// A trailing partial frame is dropped.
pub fn read_pcm16(path: &Path) -> anyhow::Result<(Vec<i16>, StreamFormat)> {
    let mut reader =
        WavReader::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        bail!(
            "{} is {}-bit {:?}; only 16-bit PCM is supported",
            path.display(),
            spec.bits_per_sample,
            spec.sample_format
        );
    }

    let format = StreamFormat::new(spec.channels, spec.sample_rate)?;
    let mut samples = reader
        .samples::<i16>()
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("failed to read samples from {}", path.display()))?;

    let channels = usize::from(format.channels());
    samples.truncate(samples.len() - samples.len() % channels);
    Ok((samples, format))
}

/// Write interleaved 16-bit PCM samples to a WAV file.
pub fn write_pcm16(path: &Path, samples: &[i16], format: StreamFormat) -> anyhow::Result<()> {
    let spec = WavSpec {
        channels: format.channels(),
        sample_rate: format.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer =
        WavWriter::create(path, spec).with_context(|| format!("failed to create {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
