//! Video carriers: decoded frames of 8-bit channels, concatenated in frame
//! order.

use super::{Carrier, MediaFormat};
use crate::error::{Error, Result};

/// Decoded video frames sharing one geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoCarrier {
    width: u32,
    height: u32,
    channels: u8,
    format: MediaFormat,
    frame_len: usize,
    data: Vec<u8>,
}

impl VideoCarrier {
    /// Build a carrier from individual frames. Every frame must hold
    /// `width * height * channels` bytes.
    pub fn from_frames(
        width: u32,
        height: u32,
        channels: u8,
        format: MediaFormat,
        frames: &[Vec<u8>],
    ) -> Result<Self> {
        if !(1..=4).contains(&channels) {
            return Err(Error::UnsupportedFormat(format!(
                "{} channels per pixel",
                channels
            )));
        }

        let frame_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(channels as usize))
            .ok_or_else(|| {
                Error::UnsupportedFormat(format!("{}x{} frames are too large", width, height))
            })?;
        if let Some((index, frame)) = frames
            .iter()
            .enumerate()
            .find(|(_, frame)| frame.len() != frame_len)
        {
            return Err(Error::UnsupportedFormat(format!(
                "frame {} has {} bytes, expected {}",
                index,
                frame.len(),
                frame_len
            )));
        }

        Ok(Self {
            width,
            height,
            channels,
            format,
            frame_len,
            data: frames.concat(),
        })
    }

    /// Bytes per frame.
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Number of frames.
    pub fn frame_count(&self) -> usize {
        match self.frame_len() {
            0 => 0,
            len => self.data.len() / len,
        }
    }

    /// Borrow one frame.
    pub fn frame(&self, index: usize) -> Option<&[u8]> {
        let len = self.frame_len();
        let start = index.checked_mul(len)?;
        self.data.get(start..start.checked_add(len)?)
    }

    /// Split back into owned frames.
    pub fn into_frames(self) -> Vec<Vec<u8>> {
        let len = self.frame_len();
        if len == 0 {
            return Vec::new();
        }
        self.data.chunks_exact(len).map(<[u8]>::to_vec).collect()
    }
}

impl Carrier for VideoCarrier {
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
            frame_len: self.frame_len,
            data: units,
        }
    }

    fn format(&self) -> MediaFormat {
        self.format
    }
}
