//! File I/O for carriers: PNG/BMP images and 16-bit PCM WAV audio.
//!
//! The codec itself never touches files; this module is the adapter the CLI
//! uses to turn a path into a carrier and back.

use crate::carrier::{AudioCarrier, Carrier, ImageCarrier, MediaFormat};
use crate::error::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use image::{ColorType, GenericImageView, ImageFormat};
use std::path::Path;

/// A carrier loaded from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaCarrier {
    Image(ImageCarrier),
    Audio(AudioCarrier),
}

impl MediaCarrier {
    /// Units available for embedding.
    pub fn unit_count(&self) -> usize {
        match self {
            MediaCarrier::Image(image) => image.unit_count(),
            MediaCarrier::Audio(audio) => audio.unit_count(),
        }
    }

    /// Container format.
    pub fn format(&self) -> MediaFormat {
        match self {
            MediaCarrier::Image(image) => image.format(),
            MediaCarrier::Audio(audio) => audio.format(),
        }
    }
}

/// Format implied by a path's extension.
pub fn format_for_path(path: &Path) -> Result<MediaFormat> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .ok_or_else(|| Error::UnsupportedFormat(format!("{} has no extension", path.display())))?;
    MediaFormat::from_extension(ext)
        .ok_or_else(|| Error::UnsupportedFormat(format!("unknown extension .{}", ext)))
}

/// Check that a carrier read from `input` can be written to `output`.
///
/// Both must be lossless-capable and hold the same kind of media. Nothing
/// is read or written.
pub fn check_compatible(input: &Path, output: &Path) -> Result<()> {
    let from = format_for_path(input)?;
    let to = format_for_path(output)?;
    if !to.is_lossless() {
        return Err(Error::LossyFormat(to));
    }
    if from.kind() != to.kind() {
        return Err(Error::UnsupportedFormat(format!(
            "cannot write a {} carrier as {}",
            from, to
        )));
    }
    Ok(())
}

/// Load an image or WAV file as a carrier.
///
/// Lossy inputs are refused: their decoded units would not survive being
/// written back, so there is nothing useful to embed into or extract from.
pub fn load(path: &Path) -> Result<MediaCarrier> {
    match format_for_path(path)? {
        format @ (MediaFormat::Png | MediaFormat::Bmp) => load_image(path, format).map(MediaCarrier::Image),
        MediaFormat::Wav => load_wav(path).map(MediaCarrier::Audio),
        format => Err(Error::LossyFormat(format)),
    }
}

/// Save a carrier, choosing the container from the path's extension.
pub fn save(path: &Path, carrier: &MediaCarrier) -> Result<()> {
    let format = format_for_path(path)?;
    if !format.is_lossless() {
        return Err(Error::LossyFormat(format));
    }

    match (carrier, format) {
        (MediaCarrier::Image(image), MediaFormat::Png | MediaFormat::Bmp) => save_image(path, image, format),
        (MediaCarrier::Audio(audio), MediaFormat::Wav) => save_wav(path, audio),
        (_, format) => Err(Error::UnsupportedFormat(format!(
            "cannot write this carrier as {}",
            format
        ))),
    }
}

/// Decode an image into channel bytes.
///
/// Only 8-bit channels are accepted. Anything wider would have to be
/// narrowed, which rewrites every bit of every sample, not just bit 0.
pub fn load_image(path: &Path, format: MediaFormat) -> Result<ImageCarrier> {
    let img = image::open(path)?;
    let (width, height) = img.dimensions();

    let (channels, data) = match img.color() {
        ColorType::L8 => (1, img.into_luma8().into_raw()),
        ColorType::La8 => (2, img.into_luma_alpha8().into_raw()),
        ColorType::Rgb8 => (3, img.into_rgb8().into_raw()),
        ColorType::Rgba8 => (4, img.into_rgba8().into_raw()),
        other => {
            return Err(Error::UnsupportedFormat(format!(
                "{} uses {:?} pixels; only 8-bit channels can carry a payload",
                path.display(),
                other
            )))
        }
    };

    ImageCarrier::new(width, height, channels, format, data)
}

/// Encode channel bytes as PNG or BMP.
pub fn save_image(path: &Path, carrier: &ImageCarrier, format: MediaFormat) -> Result<()> {
    let color = match carrier.channels() {
        1 => ColorType::L8,
        2 => ColorType::La8,
        3 => ColorType::Rgb8,
        _ => ColorType::Rgba8,
    };
    let container = match format {
        MediaFormat::Png => ImageFormat::Png,
        MediaFormat::Bmp => ImageFormat::Bmp,
        other => return Err(Error::LossyFormat(other)),
    };

    image::save_buffer_with_format(
        path,
        carrier.data(),
        carrier.width(),
        carrier.height(),
        color,
        container,
    )?;
    Ok(())
}

/// Read a 16-bit integer PCM WAV file.
pub fn load_wav(path: &Path) -> Result<AudioCarrier> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int || spec.bits_per_sample != 16 {
        return Err(Error::UnsupportedFormat(format!(
            "only 16-bit PCM WAV is supported, got {} bits {:?}",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let samples = reader
        .into_samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()?;

    AudioCarrier::new(spec.sample_rate, spec.channels, samples)
}

/// Write a 16-bit integer PCM WAV file.
pub fn save_wav(path: &Path, carrier: &AudioCarrier) -> Result<()> {
    let spec = WavSpec {
        channels: carrier.channels(),
        sample_rate: carrier.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in carrier.samples() {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}
