//! Carrier capacity accounting.
//!
//! One payload bit per carrier unit. A message of `n` bytes becomes a frame
//! of `FRAME_OVERHEAD + padded_len(n)` bytes, where PKCS#7 always adds
//! between 1 and 16 bytes of padding.

use crate::config::{BLOCK_SIZE, FRAME_OVERHEAD};

/// Payload bits a carrier of `unit_count` units can hold.
pub const fn capacity_bits(unit_count: usize) -> usize {
    unit_count
}

/// Whole payload bytes a carrier of `unit_count` units can hold.
pub const fn capacity_bytes(unit_count: usize) -> usize {
    capacity_bits(unit_count) / 8
}

/// Ciphertext length for a message of `message_len` bytes.
pub fn padded_len(message_len: usize) -> usize {
    (message_len / BLOCK_SIZE + 1) * BLOCK_SIZE
}

/// Frame length for a message of `message_len` bytes.
pub fn frame_len(message_len: usize) -> usize {
    FRAME_OVERHEAD + padded_len(message_len)
}

/// Whether a message of `message_len` bytes fits a carrier of
/// `unit_count` units.
pub fn fits(unit_count: usize, message_len: usize) -> bool {
    message_len <= max_message_bytes(unit_count) && frame_len(message_len) <= capacity_bytes(unit_count)
}

/// Largest message, in bytes, that fits a carrier of `unit_count` units.
///
/// Returns 0 when the carrier cannot hold even the header and one cipher
/// block; in that case [`fits`] is false for every message, empty included.
pub fn max_message_bytes(unit_count: usize) -> usize {
    let room = capacity_bytes(unit_count).saturating_sub(FRAME_OVERHEAD);
    let blocks = room / BLOCK_SIZE;
    if blocks == 0 {
        return 0;
    }
    // The length field is a u32.
    let max_ciphertext = blocks.saturating_mul(BLOCK_SIZE).min(u32::MAX as usize / BLOCK_SIZE * BLOCK_SIZE);
    max_ciphertext - 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_bit_per_unit() {
        assert_eq!(capacity_bits(1000), 1000);
        assert_eq!(capacity_bytes(1000), 125);
        assert_eq!(capacity_bytes(7), 0);
    }

    #[test]
    fn test_padding() {
        assert_eq!(padded_len(0), 16);
        assert_eq!(padded_len(15), 16);
        assert_eq!(padded_len(16), 32);
        assert_eq!(frame_len(2), FRAME_OVERHEAD + 16);
    }

    #[test]
    fn test_thousand_units() {
        // 125 bytes - 68 overhead = 57 → three blocks → 47 message bytes
        assert_eq!(max_message_bytes(1000), 47);
        assert!(fits(1000, 2));
        assert!(fits(1000, 47));
        assert!(!fits(1000, 48));
    }

    #[test]
    fn test_boundary_is_exact() {
        for units in [700usize, 1000, 4096, 12_345, 80_000] {
            let max = max_message_bytes(units);
            if max == 0 && !fits(units, 0) {
                continue;
            }
            assert!(fits(units, max), "max {} should fit {} units", max, units);
            assert!(!fits(units, max + 1), "max+1 should not fit {} units", units);
            assert!(frame_len(max) <= capacity_bytes(units));
        }
    }

    #[test]
    fn test_too_small_for_anything() {
        let units = (FRAME_OVERHEAD + BLOCK_SIZE) * 8 - 1;
        assert_eq!(max_message_bytes(units), 0);
        assert!(!fits(units, 0));

        let units = (FRAME_OVERHEAD + BLOCK_SIZE) * 8;
        assert_eq!(max_message_bytes(units), 15);
        assert!(fits(units, 0));
    }

    #[test]
    fn test_empty_carrier() {
        assert_eq!(max_message_bytes(0), 0);
        assert!(!fits(0, 0));
    }
}
