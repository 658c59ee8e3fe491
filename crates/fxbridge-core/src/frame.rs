//! Interleaved 16-bit PCM frames as delivered by the host pipeline.

use crate::error::{Error, Result};
use crate::format::StreamFormat;

/// One frame of interleaved 16-bit PCM audio.
///
/// `samples` holds `nb_samples() * channels` values laid out as
/// `[L0, R0, L1, R1, ...]` for stereo. The presentation timestamp is opaque
/// to the adapter and is copied from input to output frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioFrame {
    format: StreamFormat,
    samples: Vec<i16>,
    pts: Option<i64>,
}

impl AudioFrame {
    /// Create a frame from interleaved samples.
    ///
    /// Fails if the format is invalid or the buffer does not hold a whole
    /// number of frames.
    pub fn new(channels: u16, sample_rate: u32, samples: Vec<i16>) -> Result<Self> {
        let format = StreamFormat::new(channels, sample_rate)?;
        Self::with_format(format, samples)
    }

    /// Create a frame for an already validated format.
    pub fn with_format(format: StreamFormat, samples: Vec<i16>) -> Result<Self> {
        let channels = format.channels();
        if samples.len() % usize::from(channels) != 0 {
            return Err(Error::RaggedFrame {
                len: samples.len(),
                channels,
            });
        }
        Ok(Self {
            format,
            samples,
            pts: None,
        })
    }

    /// Attach a presentation timestamp.
    pub fn with_pts(mut self, pts: i64) -> Self {
        self.pts = Some(pts);
        self
    }

    /// Stream format of this frame.
    pub fn format(&self) -> StreamFormat {
        self.format
    }

    /// Channel count.
    pub fn channels(&self) -> u16 {
        self.format.channels()
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.format.sample_rate()
    }

    /// Samples per channel.
    pub fn nb_samples(&self) -> usize {
        self.samples.len() / usize::from(self.format.channels())
    }

    /// Presentation timestamp, if any.
    pub fn pts(&self) -> Option<i64> {
        self.pts
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Mutable interleaved samples.
    pub fn samples_mut(&mut self) -> &mut [i16] {
        &mut self.samples
    }

    /// Consume the frame, returning its sample buffer.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Build an output frame that carries this frame's properties
    /// (format and timestamp) around a new sample buffer.
    ///
    /// A trailing partial frame in `samples` is dropped.
    pub fn derive(&self, mut samples: Vec<i16>) -> Self {
        let channels = usize::from(self.format.channels());
        samples.truncate(samples.len() - samples.len() % channels);
        Self {
            format: self.format,
            samples,
            pts: self.pts,
        }
    }
}
