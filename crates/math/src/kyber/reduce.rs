//! Montgomery and Barrett modular reduction for q = 3329.

use super::Q;

/// q^{-1} mod 2^{16} (Montgomery inverse).
pub const QINV: i16 = -3327;

/// 2^{16} mod q (Montgomery radix residue).
pub const MONT: i16 = -1044;

/// Montgomery reduction: computes `a * R^{-1} mod q` where R = 2^{16}.
///
/// Input: `a in {-q*2^{15}, ..., q*2^{15} - 1}`. Output: `r in {-q+1, ...,
/// q-1}` with `r \equiv a*R^{-1} (mod q)`.
#[inline]
#[must_use]
pub const fn montgomery_reduce(a: i32) -> i16 {
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}

/// Barrett reduction: centered representative of `a mod q` in
/// `{-(q-1)/2, ..., (q-1)/2}`.
#[inline]
#[must_use]
pub const fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = ((1i32 << 26) + (Q as i32) / 2) / (Q as i32); // 20159
    let t = ((V * (a as i32) + (1 << 25)) >> 26) as i16;
    a.wrapping_sub(t.wrapping_mul(Q))
}

/// Field multiplication followed by Montgomery reduction: `a*b*R^{-1} mod q`.
#[inline]
#[must_use]
pub const fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}

/// Map `a in (-q, q)` to the canonical representative in `[0, q)`.
#[inline]
#[must_use]
pub const fn to_canonical(a: i16) -> u16 {
    (a as u16).wrapping_add(((a >> 15) as u16) & (Q as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn montgomery_reduce_of_zero() {
        assert_eq!(montgomery_reduce(0), 0);
    }

    #[test]
    fn montgomery_reduce_removes_radix() {
        // |a * R| must stay below q * 2^15
        for a in [-1664i32, -1000, -1, 1, 17, 1000, 1664] {
            let r = montgomery_reduce(a * (1 << 16)) as i32;
            assert!(r.abs() < Q as i32);
            assert_eq!((r - a).rem_euclid(Q as i32), 0, "a = {a}");
        }
        // extremes of the input domain
        for a in [-(Q as i32) << 15, ((Q as i32) << 15) - 1] {
            let r = montgomery_reduce(a) as i64;
            assert!(r.abs() < Q as i64);
            assert_eq!((r * (1 << 16) - a as i64).rem_euclid(Q as i64), 0, "a = {a}");
        }
    }

    #[test]
    fn barrett_reduce_is_centered() {
        for a in i16::MIN..=i16::MAX {
            let r = barrett_reduce(a);
            assert!(r.abs() <= (Q - 1) / 2, "a = {a} gave {r}");
            assert_eq!((r as i32 - a as i32).rem_euclid(Q as i32), 0);
        }
    }

    #[test]
    fn fqmul_mont_identity() {
        // fqmul(a, MONT) = a * MONT * R^-1 = a * (R mod q) * R^-1 = a mod q
        assert_eq!(fqmul(1, MONT), 1);
        assert_eq!(fqmul(-77, MONT), -77);
    }

    #[test]
    fn to_canonical_range() {
        assert_eq!(to_canonical(0), 0);
        assert_eq!(to_canonical(-1), (Q - 1) as u16);
        assert_eq!(to_canonical(Q - 1), (Q - 1) as u16);
        assert_eq!(to_canonical(-(Q - 1)), 1);
    }
}
