//! The integer types a payload bit can live in.

/// One addressable, LSB-modifiable integer of a carrier.
///
/// Only bit 0 is ever read or written; for signed samples that means the
/// value moves by at most one quantization step.
pub trait CarrierUnit: Copy + Eq + std::fmt::Debug {
    /// Width of the unit in bits.
    const BITS: u32;

    /// Current value of bit 0.
    fn lsb(self) -> bool;

    /// The same value with bit 0 replaced by `bit`.
    fn with_lsb(self, bit: bool) -> Self;
}

macro_rules! impl_carrier_unit {
    ($($ty:ty),*) => {
        $(
            impl CarrierUnit for $ty {
                const BITS: u32 = <$ty>::BITS;

                #[inline]
                fn lsb(self) -> bool {
                    self & 1 == 1
                }

                #[inline]
                fn with_lsb(self, bit: bool) -> Self {
                    (self & !1) | bit as $ty
                }
            }
        )*
    };
}

impl_carrier_unit!(u8, u16, i16);
