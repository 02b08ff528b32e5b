//! Carriers: flat, ordered sequences of LSB-modifiable units.
//!
//! Each media kind hands the codec its units in a fixed traversal order and
//! takes a same-shaped buffer back. The embedding engine only ever sees
//! `&[U]` where `U: CarrierUnit`, so it is written once for all of them.

mod audio;
mod image;
mod unit;
mod video;

pub use audio::AudioCarrier;
pub use image::ImageCarrier;
pub use unit::CarrierUnit;
pub use video::VideoCarrier;

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a format stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaKind {
    Image,
    Audio,
    Video,
}

/// Container format a carrier came from or will be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaFormat {
    Png,
    Bmp,
    Jpeg,
    Wav,
    Mp3,
    RawVideo,
    Mp4,
}

impl MediaFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(MediaFormat::Png),
            "bmp" => Some(MediaFormat::Bmp),
            "jpg" | "jpeg" => Some(MediaFormat::Jpeg),
            "wav" => Some(MediaFormat::Wav),
            "mp3" => Some(MediaFormat::Mp3),
            "raw" | "yuv" | "rgb" => Some(MediaFormat::RawVideo),
            "mp4" | "mov" | "avi" => Some(MediaFormat::Mp4),
            _ => None,
        }
    }

    /// Whether saving through this format preserves every unit exactly.
    pub fn is_lossless(self) -> bool {
        matches!(
            self,
            MediaFormat::Png | MediaFormat::Bmp | MediaFormat::Wav | MediaFormat::RawVideo
        )
    }

    /// Image, audio or video.
    pub fn kind(self) -> MediaKind {
        match self {
            MediaFormat::Png | MediaFormat::Bmp | MediaFormat::Jpeg => MediaKind::Image,
            MediaFormat::Wav | MediaFormat::Mp3 => MediaKind::Audio,
            MediaFormat::RawVideo | MediaFormat::Mp4 => MediaKind::Video,
        }
    }

    /// Nearest lossless format to save a stego carrier as.
    pub fn lossless_counterpart(self) -> Self {
        match self {
            MediaFormat::Jpeg => MediaFormat::Png,
            MediaFormat::Mp3 => MediaFormat::Wav,
            MediaFormat::Mp4 => MediaFormat::RawVideo,
            other => other,
        }
    }
}

impl fmt::Display for MediaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaFormat::Png => "PNG",
            MediaFormat::Bmp => "BMP",
            MediaFormat::Jpeg => "JPEG",
            MediaFormat::Wav => "WAV",
            MediaFormat::Mp3 => "MP3",
            MediaFormat::RawVideo => "raw video",
            MediaFormat::Mp4 => "MP4",
        };
        f.write_str(name)
    }
}

/// A media buffer the codec can hide a payload in.
pub trait Carrier: Sized {
    /// Integer type of one unit.
    type Unit: CarrierUnit;

    /// All units in traversal order.
    fn units(&self) -> &[Self::Unit];

    /// A carrier of the same shape holding `units` instead.
    ///
    /// `units` always has the same length as [`Carrier::units`].
    fn with_units(&self, units: Vec<Self::Unit>) -> Self;

    /// Container format of this carrier.
    fn format(&self) -> MediaFormat;

    /// Number of units, i.e. the raw capacity in bits.
    fn unit_count(&self) -> usize {
        self.units().len()
    }
}
