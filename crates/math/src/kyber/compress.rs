//! Sealed compression-width traits and compress/decompress operations.
//!
//! Each compression width (d = 1, 4, 5, 10, 11) is a zero-sized marker type
//! implementing [`CompressWidth`], so the bit width is fixed at compile time.

use super::{Q, reduce::to_canonical};
use crate::{
    N,
    pack::{pack_bits, unpack_bits},
};

mod sealed {
    pub trait Sealed {}
}

pub trait CompressWidth: sealed::Sealed {
    /// Bits kept per coefficient.
    const D: u32;
    /// Bytes of one compressed polynomial.
    const POLY_BYTES: usize = N * Self::D as usize / 8;

    /// Compress and pack every coefficient of `coeffs` into `r`.
    fn compress_poly(r: &mut [u8], coeffs: &[i16; N]) {
        debug_assert_eq!(r.len(), Self::POLY_BYTES);
        pack_bits(
            r,
            Self::D,
            coeffs
                .iter()
                .map(|&c| u32::from(compress_coeff(to_canonical(c), Self::D))),
        );
    }

    /// Unpack `a` and decompress each `D`-bit value back into `Z_q`.
    fn decompress_poly(coeffs: &mut [i16; N], a: &[u8]) {
        debug_assert_eq!(a.len(), Self::POLY_BYTES);
        unpack_bits(coeffs, a, Self::D, |y| decompress_coeff(y, Self::D));
    }
}

macro_rules! compress_width {
    ($($name:ident: $d:expr),* $(,)?) => {
        $(
            pub struct $name;
            impl sealed::Sealed for $name {}
            impl CompressWidth for $name {
                const D: u32 = $d;
            }
        )*
    };
}

compress_width!(D1: 1, D4: 4, D5: 5, D10: 10, D11: 11);

/// `round(2^d / q * x) mod 2^d` for canonical `x in [0, q)`.
///
/// The division by q is a multiply-shift: `20642679 / 2^36` agrees with
/// `1 / q` closely enough that the quotient is exact for every `x < q`
/// and `d <= 11`.
#[inline]
#[must_use]
pub const fn compress_coeff(x: u16, d: u32) -> u16 {
    const M: u64 = 20_642_679;
    let n = ((x as u64) << d) + (Q as u64) / 2;
    (((n * M) >> 36) as u16) & ((1u16 << d) - 1)
}

/// `round(q / 2^d * y)`.
#[inline]
#[must_use]
pub const fn decompress_coeff(y: u32, d: u32) -> i16 {
    ((y * (Q as u32) + (1 << (d - 1))) >> d) as i16
}
