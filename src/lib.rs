//! StegoX payload codec
//!
//! Hides a password-protected message in the least significant bits of a
//! lossless carrier (image pixels, PCM audio samples or raw video frames)
//! and recovers it again.
//!
//! # Features
//!
//! - **Authenticated encryption**: Argon2id key derivation, AES-256-CBC and
//!   an HMAC-SHA256 tag over salt, IV and ciphertext
//! - **Self-describing frame**: a length-prefixed header so the reader knows
//!   how many bits to pull back out
//! - **One LSB engine** for every carrier kind through the [`Carrier`] trait
//! - **Capacity checks** before any expensive work is done
//!
//! # Architecture
//!
//! ```text
//! Message → Encrypt (Argon2id + AES-CBC + HMAC) → Frame → Bits → LSB embed
//! ```
//!
//! # Example
//!
//! ```rust
//! use stegox::{CodecConfig, ImageCarrier, KdfParams, MediaFormat, StegoCodec};
//!
//! let codec = StegoCodec::new(CodecConfig::new(KdfParams::fast_insecure())).unwrap();
//! let cover = ImageCarrier::new(100, 10, 1, MediaFormat::Png, vec![128; 1000]).unwrap();
//!
//! let stego = codec.hide(&cover, b"HI", "pw123").unwrap();
//! assert_eq!(codec.reveal(&stego, "pw123").unwrap(), b"HI");
//! ```

pub mod auth;
pub mod carrier;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod encoding;
pub mod error;
pub mod media;
pub mod report;
pub mod stego;

pub use auth::{AllowAll, Authorizer, TranscriptGate};
pub use carrier::{
    AudioCarrier, Carrier, CarrierUnit, ImageCarrier, MediaFormat, MediaKind, VideoCarrier,
};
pub use codec::StegoCodec;
pub use config::{CodecConfig, KdfParams};
pub use error::{Error, Result};

/// Hide `message` in a copy of `carrier` with the default configuration.
pub fn hide<C: Carrier>(carrier: &C, message: &[u8], password: &str) -> Result<C> {
    StegoCodec::default().hide(carrier, message, password)
}

/// Recover a message hidden with the default configuration.
pub fn reveal<C: Carrier>(carrier: &C, password: &str) -> Result<Vec<u8>> {
    StegoCodec::default().reveal(carrier, password)
}

/// Largest message, in bytes, `carrier` can hold.
pub fn estimate_capacity<C: Carrier>(carrier: &C) -> usize {
    stego::max_message_bytes(carrier.unit_count())
}
