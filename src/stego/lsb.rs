//! Least-significant-bit embedding.
//!
//! Bit `i` of the stream goes into bit 0 of unit `i`. The order is the
//! carrier's own traversal order, with no key-dependent permutation, so
//! extraction only needs the carrier shape.

use crate::carrier::CarrierUnit;
use crate::error::{Error, Result};

/// Write `bits` into a copy of `units`.
///
/// Units past `bits.len()` are copied unchanged; the input is never
/// modified.
pub fn embed<U: CarrierUnit>(units: &[U], bits: &[bool]) -> Result<Vec<U>> {
    if bits.len() > units.len() {
        return Err(Error::CarrierTooShort {
            needed: bits.len(),
            available: units.len(),
        });
    }

    let mut out = units.to_vec();
    for (unit, &bit) in out.iter_mut().zip(bits) {
        *unit = unit.with_lsb(bit);
    }
    Ok(out)
}

/// Read the LSBs of the first `count` units.
pub fn extract<U: CarrierUnit>(units: &[U], count: usize) -> Result<Vec<bool>> {
    extract_range(units, 0, count)
}

/// Read the LSBs of `count` units starting at unit `start`.
pub fn extract_range<U: CarrierUnit>(units: &[U], start: usize, count: usize) -> Result<Vec<bool>> {
    let end = start.checked_add(count).ok_or(Error::CarrierTooShort {
        needed: usize::MAX,
        available: units.len(),
    })?;

    match units.get(start..end) {
        Some(window) => Ok(window.iter().map(|unit| unit.lsb()).collect()),
        None => Err(Error::CarrierTooShort {
            needed: end,
            available: units.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_extract_u8() {
        let units: Vec<u8> = (0..32).map(|i| (i * 37) as u8).collect();
        let bits: Vec<bool> = (0..20).map(|i| i % 3 == 0).collect();

        let stego = embed(&units, &bits).unwrap();
        assert_eq!(extract(&stego, bits.len()).unwrap(), bits);
    }

    #[test]
    fn test_tail_untouched() {
        let units = vec![0xAAu8; 16];
        let stego = embed(&units, &[true, true, true]).unwrap();

        assert_eq!(&stego[3..], &units[3..]);
        assert_eq!(&stego[..3], &[0xAB, 0xAB, 0xAB]);
    }

    #[test]
    fn test_only_lsb_changes_i16() {
        let units: Vec<i16> = vec![-32768, -1, 0, 1, 32767, -1234];
        let bits = vec![true, false, true, false, false, true];

        let stego = embed(&units, &bits).unwrap();
        for (before, after) in units.iter().zip(&stego) {
            assert_eq!(before >> 1, after >> 1);
            assert!((*before as i32 - *after as i32).abs() <= 1);
        }
        assert_eq!(extract(&stego, 6).unwrap(), bits);
    }

    #[test]
    fn test_u16_units() {
        let units = vec![0xFFFFu16, 0x0000, 0x8000];
        let stego = embed(&units, &[false, true, true]).unwrap();

        assert_eq!(stego, vec![0xFFFE, 0x0001, 0x8001]);
    }

    #[test]
    fn test_input_not_mutated() {
        let units = vec![0u8; 8];
        let snapshot = units.clone();
        let _ = embed(&units, &[true; 8]).unwrap();

        assert_eq!(units, snapshot);
    }

    #[test]
    fn test_too_many_bits() {
        let result = embed(&[0u8; 4], &[true; 5]);
        assert!(matches!(
            result,
            Err(Error::CarrierTooShort {
                needed: 5,
                available: 4
            })
        ));
    }

    #[test]
    fn test_extract_range() {
        let units = vec![0u8, 1, 0, 1, 1, 0];
        assert_eq!(extract_range(&units, 2, 3).unwrap(), vec![false, true, true]);
        assert!(extract_range(&units, 4, 3).is_err());
        assert!(extract_range(&units, usize::MAX, 2).is_err());
    }
}
