//! Payload frame construction and parsing.
//!
//! The frame is the self-describing container embedded into the carrier:
//!
//! ```text
//! [4 bytes ] ciphertext length (big-endian u32)
//! [32 bytes] HMAC-SHA256 tag
//! [16 bytes] Argon2 salt
//! [16 bytes] AES-CBC IV
//! [N bytes ] ciphertext
//! ```
//!
//! Everything before the ciphertext has a fixed size, so a reader can pull
//! [`HEADER_SIZE`] bytes out of the carrier and learn how many more to read.

use crate::config::{argon2_params::SALT_LENGTH, BLOCK_SIZE, HEADER_SIZE, IV_SIZE, TAG_SIZE};
use crate::crypto::Sealed;
use crate::error::{Error, Result};

const TAG_OFFSET: usize = 4;
const SALT_OFFSET: usize = TAG_OFFSET + TAG_SIZE;
const IV_OFFSET: usize = SALT_OFFSET + SALT_LENGTH;

/// The fixed-size part of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameHeader {
    /// Ciphertext length in bytes.
    pub length: u32,
    /// Integrity tag.
    pub tag: [u8; TAG_SIZE],
    /// Key derivation salt.
    pub salt: [u8; SALT_LENGTH],
    /// CBC IV.
    pub iv: [u8; IV_SIZE],
}

impl FrameHeader {
    /// Decode the header from the first [`HEADER_SIZE`] bytes of `data`.
    ///
    /// Only the layout is checked here; whether `length` is plausible for a
    /// given carrier is up to the caller (see [`FrameHeader::check_length`]).
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_SIZE {
            return Err(Error::FrameFormat(format!(
                "header needs {} bytes, got {}",
                HEADER_SIZE,
                data.len()
            )));
        }

        let mut length = [0u8; 4];
        length.copy_from_slice(&data[..TAG_OFFSET]);
        let mut tag = [0u8; TAG_SIZE];
        tag.copy_from_slice(&data[TAG_OFFSET..SALT_OFFSET]);
        let mut salt = [0u8; SALT_LENGTH];
        salt.copy_from_slice(&data[SALT_OFFSET..IV_OFFSET]);
        let mut iv = [0u8; IV_SIZE];
        iv.copy_from_slice(&data[IV_OFFSET..HEADER_SIZE]);

        Ok(Self {
            length: u32::from_be_bytes(length),
            tag,
            salt,
            iv,
        })
    }

    /// Total frame size implied by the length field.
    pub fn frame_len(&self) -> usize {
        HEADER_SIZE + self.length as usize
    }

    /// Reject lengths that cannot come from a real frame or would overrun
    /// a carrier holding `max_frame_len` bytes.
    pub fn check_length(&self, max_frame_len: usize) -> Result<()> {
        let length = self.length as usize;
        if length == 0 || length % BLOCK_SIZE != 0 {
            return Err(Error::FrameFormat(format!(
                "ciphertext length {} is not a positive multiple of {}",
                length, BLOCK_SIZE
            )));
        }
        if self.frame_len() > max_frame_len {
            return Err(Error::FrameFormat(format!(
                "frame of {} bytes exceeds carrier capacity of {} bytes",
                self.frame_len(),
                max_frame_len
            )));
        }
        Ok(())
    }
}

/// Serialize sealed components into frame bytes.
pub fn encode_frame(sealed: &Sealed) -> Result<Vec<u8>> {
    let length = u32::try_from(sealed.ciphertext.len()).map_err(|_| {
        Error::FrameFormat(format!(
            "ciphertext of {} bytes does not fit the length field",
            sealed.ciphertext.len()
        ))
    })?;

    let mut frame = Vec::with_capacity(HEADER_SIZE + sealed.ciphertext.len());
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(&sealed.tag);
    frame.extend_from_slice(&sealed.salt);
    frame.extend_from_slice(&sealed.iv);
    frame.extend_from_slice(&sealed.ciphertext);

    Ok(frame)
}

/// Parse frame bytes back into sealed components.
///
/// `max_frame_len` bounds the length field before anything is allocated;
/// pass the carrier's byte capacity. `data` must hold exactly one frame.
pub fn decode_frame(data: &[u8], max_frame_len: usize) -> Result<Sealed> {
    let header = FrameHeader::decode(data)?;
    header.check_length(max_frame_len)?;

    if data.len() != header.frame_len() {
        return Err(Error::FrameFormat(format!(
            "expected {} frame bytes, got {}",
            header.frame_len(),
            data.len()
        )));
    }

    Ok(Sealed {
        salt: header.salt,
        iv: header.iv,
        tag: header.tag,
        ciphertext: data[HEADER_SIZE..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sealed {
        Sealed {
            salt: [0x11; SALT_LENGTH],
            iv: [0x22; IV_SIZE],
            tag: [0x33; TAG_SIZE],
            ciphertext: vec![0x44; 32],
        }
    }

    #[test]
    fn test_layout() {
        let frame = encode_frame(&sample()).unwrap();

        assert_eq!(frame.len(), HEADER_SIZE + 32);
        assert_eq!(&frame[..4], &[0, 0, 0, 32]);
        assert!(frame[4..36].iter().all(|&b| b == 0x33));
        assert!(frame[36..52].iter().all(|&b| b == 0x11));
        assert!(frame[52..68].iter().all(|&b| b == 0x22));
        assert!(frame[68..].iter().all(|&b| b == 0x44));
    }

    #[test]
    fn test_encode_decode() {
        let sealed = sample();
        let frame = encode_frame(&sealed).unwrap();
        let parsed = decode_frame(&frame, frame.len()).unwrap();

        assert_eq!(parsed, sealed);
    }

    #[test]
    fn test_header_only() {
        let frame = encode_frame(&sample()).unwrap();
        let header = FrameHeader::decode(&frame[..HEADER_SIZE]).unwrap();

        assert_eq!(header.length, 32);
        assert_eq!(header.frame_len(), frame.len());
    }

    #[test]
    fn test_short_header_rejected() {
        let result = FrameHeader::decode(&[0u8; HEADER_SIZE - 1]);
        assert!(matches!(result, Err(Error::FrameFormat(_))));
    }

    #[test]
    fn test_length_over_capacity_rejected() {
        let frame = encode_frame(&sample()).unwrap();
        let result = decode_frame(&frame, frame.len() - 1);

        assert!(matches!(result, Err(Error::FrameFormat(_))));
    }

    #[test]
    fn test_huge_length_rejected_before_allocation() {
        let mut header = vec![0u8; HEADER_SIZE];
        header[..4].copy_from_slice(&u32::MAX.to_be_bytes());
        let parsed = FrameHeader::decode(&header).unwrap();

        assert!(parsed.check_length(1024).is_err());
    }

    #[test]
    fn test_unaligned_length_rejected() {
        let mut sealed = sample();
        sealed.ciphertext.truncate(31);
        let frame = encode_frame(&sealed).unwrap();

        assert!(matches!(
            decode_frame(&frame, frame.len()),
            Err(Error::FrameFormat(_))
        ));
    }

    #[test]
    fn test_zero_length_rejected() {
        let mut sealed = sample();
        sealed.ciphertext.clear();
        let frame = encode_frame(&sealed).unwrap();

        assert!(decode_frame(&frame, frame.len()).is_err());
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut frame = encode_frame(&sample()).unwrap();
        frame.push(0);

        assert!(matches!(
            decode_frame(&frame, frame.len()),
            Err(Error::FrameFormat(_))
        ));
    }
}
