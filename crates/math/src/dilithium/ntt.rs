//! Complete 256-point NTT over q = 8380417 with root of unity 1753.
//!
//! Forward output is in bit-reversed order and is not reduced; the inverse
//! takes bit-reversed input and leaves every coefficient multiplied by the
//! Montgomery factor `2^{32}`.

use super::{Q, reduce::montgomery_reduce};
use crate::N;

const Q64: i64 = Q as i64;

const fn pow_mod(mut base: i64, mut exp: i64) -> i64 {
    let mut result = 1;
    base %= Q64;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % Q64;
        }
        exp >>= 1;
        base = base * base % Q64;
    }
    result
}

const fn bitrev8(x: usize) -> usize {
    (x as u8).reverse_bits() as usize
}

const fn centred(val: i64) -> i32 {
    if val > Q64 / 2 {
        (val - Q64) as i32
    } else {
        val as i32
    }
}

/// `ZETAS[i] = 1753^{BitRev₈(i)} · 2³² mod q`, centred. Index 0 is unused.
pub const ZETAS: [i32; N] = {
    const ROOT: i64 = 1753;
    let mont = pow_mod(2, 32);
    let mut zetas = [0i32; N];
    let mut i = 0;
    while i < N {
        zetas[i] = centred(pow_mod(ROOT, bitrev8(i) as i64) * mont % Q64);
        i += 1;
    }
    zetas
};

/// Forward NTT (in-place). For `|a| < q` input, output is below `9q`.
pub fn ntt(a: &mut [i32; N]) {
    let mut k = 0;
    let mut len = 128;
    while len > 0 {
        for start in (0..N).step_by(2 * len) {
            k += 1;
            let zeta = i64::from(ZETAS[k]);
            for j in start..start + len {
                let t = montgomery_reduce(zeta * i64::from(a[j + len]));
                a[j + len] = a[j] - t;
                a[j] += t;
            }
        }
        len >>= 1;
    }
}

/// Inverse NTT (in-place) with the `2^{32}` factor left in. For `|a| < q`
/// input, output is below q in absolute value.
pub fn invntt_tomont(a: &mut [i32; N]) {
    // mont^2 / 256
    const F: i64 = 41_978;
    let mut k = N;
    let mut len = 1;
    while len < N {
        for start in (0..N).step_by(2 * len) {
            k -= 1;
            let zeta = -i64::from(ZETAS[k]);
            for j in start..start + len {
                let t = a[j];
                a[j] = t + a[j + len];
                a[j + len] = montgomery_reduce(zeta * i64::from(t - a[j + len]));
            }
        }
        len <<= 1;
    }
    for c in a.iter_mut() {
        *c = montgomery_reduce(F * i64::from(*c));
    }
}

/// Pointwise product with one factor of `2^{-32}`.
#[must_use]
pub fn pointwise_montgomery(a: &[i32; N], b: &[i32; N]) -> [i32; N] {
    core::array::from_fn(|i| montgomery_reduce(i64::from(a[i]) * i64::from(b[i])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dilithium::reduce::{freeze, reduce32};

    #[test]
    fn zetas_match_reference_table() {
        assert_eq!(&ZETAS[1..5], &[25847, -2608894, -518909, 237124]);
        assert_eq!(ZETAS[255], 1_976_782);
    }

    #[test]
    fn inverse_scale_constant() {
        // 41978 = 2^64 / 256 mod q
        assert_eq!(pow_mod(2, 64) * pow_mod(256, Q64 - 2) % Q64, 41_978);
    }

    fn schoolbook(a: &[i32; N], b: &[i32; N]) -> [i32; N] {
        let mut c = [0i64; N];
        for i in 0..N {
            for j in 0..N {
                let p = i64::from(a[i]) * i64::from(b[j]) % Q64;
                if i + j < N {
                    c[i + j] += p;
                } else {
                    c[i + j - N] -= p;
                }
            }
        }
        c.map(|x| x.rem_euclid(Q64) as i32)
    }

    #[test]
    fn ntt_product_matches_schoolbook() {
        let a: [i32; N] = core::array::from_fn(|i| ((i * 7919 + 11) % 9000) as i32 - 4500);
        let b: [i32; N] = core::array::from_fn(|i| ((i * 31 + 5) % 9) as i32 - 4);
        let expected = schoolbook(&a, &b);

        let (mut ah, mut bh) = (a, b);
        ntt(&mut ah);
        ntt(&mut bh);
        let mut c = pointwise_montgomery(&ah, &bh);
        for x in &mut c {
            *x = reduce32(*x);
        }
        invntt_tomont(&mut c);
        assert_eq!(c.map(freeze), expected);
    }

    #[test]
    fn roundtrip_leaves_montgomery_factor() {
        let a: [i32; N] = core::array::from_fn(|i| (i as i32) * 1000 - 128_000);
        let mut t = a;
        ntt(&mut t);
        for x in &mut t {
            *x = reduce32(*x);
        }
        invntt_tomont(&mut t);
        let back = t.map(|x| freeze(montgomery_reduce(i64::from(x))));
        assert_eq!(back, a.map(freeze));
    }
}
