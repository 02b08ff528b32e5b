//! Byte/bit conversion, most-significant bit first.

use crate::error::{Error, Result};

/// Expand bytes into bits, MSB first within each byte.
///
/// # Example
///
/// ```
/// use stegox::encoding::to_bits;
///
/// let bits = to_bits(&[0b1000_0001]);
/// assert_eq!(bits, [true, false, false, false, false, false, false, true]);
/// ```
pub fn to_bits(bytes: &[u8]) -> Vec<bool> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &byte in bytes {
        for shift in (0..8).rev() {
            bits.push((byte >> shift) & 1 == 1);
        }
    }
    bits
}

/// Pack bits back into bytes. The bit count must be a multiple of 8.
pub fn from_bits(bits: &[bool]) -> Result<Vec<u8>> {
    if bits.len() % 8 != 0 {
        return Err(Error::Alignment { bits: bits.len() });
    }

    Ok(bits
        .chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb_first() {
        let bits = to_bits(&[0x48]);
        assert_eq!(
            bits,
            vec![false, true, false, false, true, false, false, false]
        );
    }

    #[test]
    fn test_roundtrip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let bits = to_bits(&bytes);

        assert_eq!(bits.len(), bytes.len() * 8);
        assert_eq!(from_bits(&bits).unwrap(), bytes);
    }

    #[test]
    fn test_empty() {
        assert!(to_bits(&[]).is_empty());
        assert!(from_bits(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_misaligned_bits_rejected() {
        let bits = vec![true; 13];
        assert!(matches!(
            from_bits(&bits),
            Err(Error::Alignment { bits: 13 })
        ));
    }
}
