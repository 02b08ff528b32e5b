//! Audio carriers: signed 16-bit PCM samples, channels interleaved.

use super::{Carrier, MediaFormat};
use crate::error::{Error, Result};

/// Decoded PCM audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioCarrier {
    sample_rate: u32,
    channels: u16,
    samples: Vec<i16>,
}

impl AudioCarrier {
    /// Wrap interleaved samples. The sample count must be a whole number of
    /// frames.
    pub fn new(sample_rate: u32, channels: u16, samples: Vec<i16>) -> Result<Self> {
        if channels == 0 || sample_rate == 0 {
            return Err(Error::UnsupportedFormat(format!(
                "{} Hz audio with {} channels",
                sample_rate, channels
            )));
        }
        if samples.len() % channels as usize != 0 {
            return Err(Error::UnsupportedFormat(format!(
                "{} samples do not divide into {} channels",
                samples.len(),
                channels
            )));
        }

        Ok(Self {
            sample_rate,
            channels,
            samples,
        })
    }

    /// Samples per second per channel.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Interleaved samples.
    pub fn samples(&self) -> &[i16] {
        &self.samples
    }

    /// Consume the carrier and return its samples.
    pub fn into_samples(self) -> Vec<i16> {
        self.samples
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        let frames = self.samples.len() / self.channels as usize;
        frames as f64 / self.sample_rate as f64
    }
}

impl Carrier for AudioCarrier {
    type Unit = i16;

    fn units(&self) -> &[i16] {
        &self.samples
    }

    fn with_units(&self, units: Vec<i16>) -> Self {
        debug_assert_eq!(units.len(), self.samples.len());
        Self {
            sample_rate: self.sample_rate,
            channels: self.channels,
            samples: units,
        }
    }

    fn format(&self) -> MediaFormat {
        MediaFormat::Wav
    }
}
