//! Power-of-two rounding, high/low decomposition, and hints.

use super::{D, Q};

mod sealed {
    pub trait Sealed {}
}

/// Split `a in [0, q)` into `(a1, a0)` with `a = a1 * 2^D + a0` and
/// `-2^{D-1} < a0 <= 2^{D-1}`.
#[inline]
#[must_use]
pub const fn power2round(a: i32) -> (i32, i32) {
    let a1 = (a + (1 << (D - 1)) - 1) >> D;
    (a1, a - (a1 << D))
}

/// Low-order rounding range `gamma2`, one marker type per divisor of `q - 1`.
pub trait Gamma2: sealed::Sealed {
    const GAMMA2: i32;
    /// Largest value of a high part, `(q - 1) / (2 * gamma2) - 1`.
    const MAX_HIGH: i32 = (Q - 1) / (2 * Self::GAMMA2) - 1;
    /// Bits per packed high part.
    const W1_BITS: u32;

    /// Split `a in [0, q)` into `(a1, a0)` with `a = a1 * 2 * gamma2 + a0`,
    /// `-gamma2 < a0 <= gamma2`, except that the top bucket wraps to
    /// `a1 = 0` with `a0 = a - q`.
    fn decompose(a: i32) -> (i32, i32);

    /// Whether adding the low part moves the high part.
    #[inline]
    fn make_hint(a0: i32, a1: i32) -> bool {
        a0 > Self::GAMMA2 || a0 < -Self::GAMMA2 || (a0 == -Self::GAMMA2 && a1 != 0)
    }

    /// Correct the high part of `a` using a hint bit.
    #[inline]
    fn use_hint(a: i32, hint: bool) -> i32 {
        let (a1, a0) = Self::decompose(a);
        if !hint {
            a1
        } else if a0 > 0 {
            if a1 == Self::MAX_HIGH { 0 } else { a1 + 1 }
        } else if a1 == 0 {
            Self::MAX_HIGH
        } else {
            a1 - 1
        }
    }
}

/// `gamma2 = (q - 1) / 88`: 44 high buckets, 6-bit `w1`.
pub struct Gamma2Q88;
/// `gamma2 = (q - 1) / 32`: 16 high buckets, 4-bit `w1`.
pub struct Gamma2Q32;

impl sealed::Sealed for Gamma2Q88 {}
impl Gamma2 for Gamma2Q88 {
    const GAMMA2: i32 = (Q - 1) / 88;
    const W1_BITS: u32 = 6;

    #[inline]
    fn decompose(a: i32) -> (i32, i32) {
        let mut a1 = (a + 127) >> 7;
        a1 = (a1 * 11275 + (1 << 23)) >> 24;
        a1 ^= ((43 - a1) >> 31) & a1;
        (a1, low_part(a, a1, Self::GAMMA2))
    }
}

impl sealed::Sealed for Gamma2Q32 {}
impl Gamma2 for Gamma2Q32 {
    const GAMMA2: i32 = (Q - 1) / 32;
    const W1_BITS: u32 = 4;

    #[inline]
    fn decompose(a: i32) -> (i32, i32) {
        let mut a1 = (a + 127) >> 7;
        a1 = (a1 * 1025 + (1 << 21)) >> 22;
        a1 &= 15;
        (a1, low_part(a, a1, Self::GAMMA2))
    }
}

#[inline]
const fn low_part(a: i32, a1: i32, gamma2: i32) -> i32 {
    let a0 = a - a1 * 2 * gamma2;
    a0 - ((((Q - 1) / 2 - a0) >> 31) & Q)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decompose_by_definition(a: i32, gamma2: i32) -> (i32, i32) {
        let mut a0 = a.rem_euclid(2 * gamma2);
        if a0 > gamma2 {
            a0 -= 2 * gamma2;
        }
        if a - a0 == Q - 1 {
            (0, a0 - 1)
        } else {
            ((a - a0) / (2 * gamma2), a0)
        }
    }

    fn check_decompose<G: Gamma2>() {
        for a in (0..Q).step_by(997).chain(Q - 2000..Q) {
            assert_eq!(
                G::decompose(a),
                decompose_by_definition(a, G::GAMMA2),
                "a = {a}"
            );
        }
    }

    #[test]
    fn decompose_matches_definition() {
        check_decompose::<Gamma2Q88>();
        check_decompose::<Gamma2Q32>();
    }

    #[test]
    fn max_high() {
        assert_eq!(Gamma2Q88::MAX_HIGH, 43);
        assert_eq!(Gamma2Q32::MAX_HIGH, 15);
    }

    #[test]
    fn power2round_splits() {
        for a in [0, 1, 4095, 4096, 4097, 8191, 8192, Q - 1] {
            let (a1, a0) = power2round(a);
            assert_eq!(a1 * (1 << D) + a0, a);
            assert!(a0 > -(1 << (D - 1)) && a0 <= 1 << (D - 1), "a = {a}");
        }
    }

    fn check_hint_recovers_high<G: Gamma2>() {
        // signer holds (w1, w0) = decompose(w); verifier sees w + delta
        let g = G::GAMMA2;
        for w in (0..Q).step_by(7919).chain(Q - 300..Q) {
            let (w1, w0) = G::decompose(w);
            if w0.abs() >= g - 200 {
                continue;
            }
            for delta in [-g + 1, -g / 2, -1000, -1, 0, 1, 999, g / 2, g - 1] {
                let r = (w + delta).rem_euclid(Q);
                let h = G::make_hint(w0 + delta, w1);
                assert_eq!(G::use_hint(r, h), w1, "w={w} delta={delta}");
            }
        }
    }

    #[test]
    fn use_hint_recovers_high_bits() {
        check_hint_recovers_high::<Gamma2Q88>();
        check_hint_recovers_high::<Gamma2Q32>();
    }

    #[test]
    fn make_hint_boundaries() {
        let g = Gamma2Q32::GAMMA2;
        assert!(!Gamma2Q32::make_hint(g, 3));
        assert!(Gamma2Q32::make_hint(g + 1, 3));
        assert!(!Gamma2Q32::make_hint(-g, 0));
        assert!(Gamma2Q32::make_hint(-g, 1));
        assert!(Gamma2Q32::make_hint(-g - 1, 0));
    }
}
