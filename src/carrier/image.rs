//! Image carriers: 8-bit channel values in row-major, interleaved order.

use super::{Carrier, MediaFormat};
use crate::error::{Error, Result};

/// Decoded pixel data of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCarrier {
    width: u32,
    height: u32,
    channels: u8,
    format: MediaFormat,
    data: Vec<u8>,
}

impl ImageCarrier {
    /// Wrap raw channel bytes (`R,G,B[,A]` per pixel, row by row).
    ///
    /// `data` must hold exactly `width * height * channels` bytes and
    /// `channels` must be between 1 and 4.
    pub fn new(width: u32, height: u32, channels: u8, format: MediaFormat, data: Vec<u8>) -> Result<Self> {
        if !(1..=4).contains(&channels) {
            return Err(Error::UnsupportedFormat(format!(
                "{} channels per pixel",
                channels
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(channels as usize))
            .ok_or_else(|| Error::UnsupportedFormat(format!("{}x{} image is too large", width, height)))?;
        if data.len() != expected {
            return Err(Error::UnsupportedFormat(format!(
                "{}x{}x{} image needs {} bytes, got {}",
                width,
                height,
                channels,
                expected,
                data.len()
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            format,
            data,
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel.
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Channel bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the carrier and return its channel bytes.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// The same pixels tagged with another container format.
    pub fn with_format(mut self, format: MediaFormat) -> Self {
        self.format = format;
        self
    }
}

impl Carrier for ImageCarrier {
    type Unit = u8;

    fn units(&self) -> &[u8] {
        &self.data
    }

    fn with_units(&self, units: Vec<u8>) -> Self {
        debug_assert_eq!(units.len(), self.data.len());
        Self {
            width: self.width,
            height: self.height,
            channels: self.channels,
            format: self.format,
            data: units,
        }
    }

    fn format(&self) -> MediaFormat {
        self.format
    }
}
