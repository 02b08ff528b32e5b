//! Hide and reveal: the full payload pipeline.
//!
//! ```text
//! hide:   message → encrypt → frame → bits → embed into a carrier copy
//! reveal: header bits → length → frame bits → frame → verify + decrypt
//! ```

use crate::auth::Authorizer;
use crate::carrier::Carrier;
use crate::config::{CodecConfig, HEADER_BITS, HEADER_SIZE};
use crate::crypto;
use crate::encoding::{decode_frame, encode_frame, from_bits, to_bits, FrameHeader};
use crate::error::{Error, Result};
use crate::stego::{capacity, lsb};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

/// The payload codec.
///
/// Holds only immutable configuration, so one instance can serve concurrent
/// calls as long as each call has its own carrier.
#[derive(Debug, Clone, Default)]
pub struct StegoCodec {
    config: CodecConfig,
}

impl StegoCodec {
    /// Create a codec after validating its configuration.
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate().map_err(Error::Config)?;
        Ok(Self { config })
    }

    /// The codec's configuration.
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Largest message, in bytes, `carrier` can hold.
    pub fn estimate_capacity<C: Carrier>(&self, carrier: &C) -> usize {
        capacity::max_message_bytes(carrier.unit_count())
    }

    /// Hide `message` in a copy of `carrier`, using the OS random source.
    pub fn hide<C: Carrier>(&self, carrier: &C, message: &[u8], password: &str) -> Result<C> {
        self.hide_with_rng(carrier, message, password, &mut OsRng)
    }

    /// Hide `message` in a copy of `carrier`, drawing salt and IV from `rng`.
    ///
    /// Fails before any key derivation if the carrier is lossy or too small.
    /// The input carrier is never modified.
    pub fn hide_with_rng<C, R>(&self, carrier: &C, message: &[u8], password: &str, rng: &mut R) -> Result<C>
    where
        C: Carrier,
        R: RngCore + CryptoRng,
    {
        let format = carrier.format();
        if !format.is_lossless() {
            return Err(Error::LossyFormat(format));
        }

        let unit_count = carrier.unit_count();
        if !capacity::fits(unit_count, message.len()) {
            return Err(Error::CapacityExceeded {
                required: message.len(),
                available: capacity::max_message_bytes(unit_count),
            });
        }

        let sealed = crypto::encrypt(message, password, &self.config.kdf, rng)?;
        let frame = encode_frame(&sealed)?;
        let bits = to_bits(&frame);
        let units = lsb::embed(carrier.units(), &bits)?;

        Ok(carrier.with_units(units))
    }

    /// Recover the message hidden in `carrier`.
    ///
    /// A carrier without a frame fails with [`Error::FrameFormat`]; a wrong
    /// password or a damaged payload fails with
    /// [`Error::AuthenticationFailure`].
    pub fn reveal<C: Carrier>(&self, carrier: &C, password: &str) -> Result<Vec<u8>> {
        let units = carrier.units();
        let max_frame_len = capacity::capacity_bytes(units.len());

        let header_bits = lsb::extract(units, HEADER_BITS).map_err(not_a_frame)?;
        let header_bytes = from_bits(&header_bits)?;
        let header = FrameHeader::decode(&header_bytes)?;
        header.check_length(max_frame_len)?;

        let body_bits = lsb::extract_range(units, HEADER_BITS, header.length as usize * 8)
            .map_err(not_a_frame)?;
        let mut frame = Vec::with_capacity(header.frame_len());
        frame.extend_from_slice(&header_bytes);
        frame.extend_from_slice(&from_bits(&body_bits)?);
        debug_assert_eq!(frame.len(), HEADER_SIZE + header.length as usize);

        let sealed = decode_frame(&frame, max_frame_len)?;
        crypto::decrypt(&sealed, password, &self.config.kdf)
    }

    /// Reveal and decode the message as UTF-8.
    pub fn reveal_text<C: Carrier>(&self, carrier: &C, password: &str) -> Result<String> {
        let bytes = self.reveal(carrier, password)?;
        String::from_utf8(bytes).map_err(|_| Error::InvalidUtf8)
    }

    /// Reveal only if `gate` accepts `passphrase`.
    ///
    /// The carrier is not read at all when the gate refuses.
    pub fn reveal_authorized<C, A>(
        &self,
        carrier: &C,
        password: &str,
        gate: &A,
        passphrase: &str,
    ) -> Result<Vec<u8>>
    where
        C: Carrier,
        A: Authorizer + ?Sized,
    {
        if !gate.authorize(passphrase) {
            return Err(Error::Unauthorized);
        }
        self.reveal(carrier, password)
    }
}

fn not_a_frame(err: Error) -> Error {
    match err {
        Error::CarrierTooShort { needed, available } => Error::FrameFormat(format!(
            "carrier has {} units, frame needs {}",
            available, needed
        )),
        other => other,
    }
}
