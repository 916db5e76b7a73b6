//! Number-Theoretic Transform and base multiplication in `Z_q[X]/(X^2 - zeta)`.
//!
//! - `forward_ntt`: forward NTT, standard order -> bit-reversed order.
//! - `inverse_ntt`: inverse NTT with Montgomery scaling.
//! - `basemul`: degree-1 multiplication in the NTT domain.

use super::{
    Q,
    reduce::{barrett_reduce, fqmul},
};
use crate::N;

const Q64: i64 = Q as i64;

const fn pow_mod(mut base: i64, mut exp: i64, modulus: i64) -> i64 {
    let mut result: i64 = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        exp >>= 1;
        base = base * base % modulus;
    }
    result
}

const fn bitrev7(x: usize) -> usize {
    let mut r = 0;
    let mut i = 0;
    while i < 7 {
        r |= ((x >> i) & 1) << (6 - i);
        i += 1;
    }
    r
}

/// Centred representative of `val mod q` in `[−(q−1)/2, (q−1)/2]`.
const fn centred(val: i64) -> i16 {
    if val > Q64 / 2 {
        (val - Q64) as i16
    } else {
        val as i16
    }
}

/// Twiddle factors in Montgomery form, from primitive 256th root ζ = 17,
/// bit-reversed indexing.
///
/// `ZETAS[i] = ζ^{BitRev₇(i)} · 2¹⁶  (mod q)`, centred to signed.
pub const ZETAS: [i16; 128] = {
    const ZETA: i64 = 17;
    const MONT: i64 = 1 << 16;

    let mut zetas = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        let val = pow_mod(ZETA, bitrev7(i) as i64, Q64) * MONT % Q64;
        zetas[i] = centred(val);
        i += 1;
    }
    zetas
};

/// Forward NTT (in-place). Standard order in, bit-reversed order out.
///
/// No final reduction: inputs bounded by q come out bounded by 8q.
pub fn forward_ntt(r: &mut [i16; N]) {
    let mut k = 1;
    let mut len = 128;
    while len >= 2 {
        for start in (0..N).step_by(2 * len) {
            let zeta = ZETAS[k];
            k += 1;
            for j in start..start + len {
                let t = fqmul(zeta, r[j + len]);
                r[j + len] = r[j].wrapping_sub(t);
                r[j] = r[j].wrapping_add(t);
            }
        }
        len >>= 1;
    }
}

/// Inverse NTT (in-place). Bit-reversed in, standard order out,
/// each coefficient scaled by Montgomery factor `R = 2^{16}`.
pub fn inverse_ntt(r: &mut [i16; N]) {
    // R² · 128⁻¹ mod q, where R = 2¹⁶
    const F: i16 = centred(pow_mod(2, 32, Q64) * pow_mod(128, Q64 - 2, Q64) % Q64);
    let mut k = 127;
    let mut len = 2;
    while len <= 128 {
        for start in (0..N).step_by(2 * len) {
            let zeta = ZETAS[k];
            k -= 1;
            for j in start..start + len {
                let t = r[j];
                r[j] = barrett_reduce(t.wrapping_add(r[j + len]));
                r[j + len] = fqmul(zeta, r[j + len].wrapping_sub(t));
            }
        }
        len <<= 1;
    }
    for c in r.iter_mut() {
        *c = fqmul(*c, F);
    }
}

#[inline]
fn basemul_pair(a: [i16; 2], b: [i16; 2], zeta: i16) -> [i16; 2] {
    let r0 = fqmul(fqmul(a[1], b[1]), zeta).wrapping_add(fqmul(a[0], b[0]));
    let r1 = fqmul(a[0], b[1]).wrapping_add(fqmul(a[1], b[0]));
    [r0, r1]
}

/// Products of the 128 degree-1 factors, each in `Z_q[X]/(X^2 ∓ zeta)`.
///
/// Result carries an extra `R^{-1}` Montgomery factor.
#[must_use]
pub fn basemul(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
    let mut r = [0i16; N];
    for i in 0..N / 4 {
        let zeta = ZETAS[64 + i];
        let (j, k) = (4 * i, 4 * i + 2);
        [r[j], r[j + 1]] = basemul_pair([a[j], a[j + 1]], [b[j], b[j + 1]], zeta);
        [r[k], r[k + 1]] = basemul_pair([a[k], a[k + 1]], [b[k], b[k + 1]], -zeta);
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyber::poly::Polynomial;

    #[test]
    fn zetas_match_reference_table() {
        assert_eq!(&ZETAS[..8], &[-1044, -758, -359, -1517, 1493, 1422, 287, 202]);
        assert_eq!(ZETAS[127], 1628);
    }

    #[test]
    fn ntt_inverse_ntt_roundtrip() {
        let mut a = [0i16; N];
        for (i, c) in a.iter_mut().enumerate() {
            *c = (i % 13) as i16;
        }
        let original = a;
        forward_ntt(&mut a);
        assert_ne!(a, original, "NTT should change coefficients");
        inverse_ntt(&mut a);

        // the inverse leaves a factor R; fqmul by 1 strips it
        for c in &mut a {
            *c = barrett_reduce(fqmul(*c, 1));
        }
        assert_eq!(a, original);
    }

    fn schoolbook_mul(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
        let mut c = [0i32; N];
        for (i, &ai) in a.iter().enumerate() {
            for (j, &bj) in b.iter().enumerate() {
                let prod = (ai as i32) * (bj as i32);
                if i + j < N {
                    c[i + j] += prod;
                } else {
                    c[i + j - N] -= prod;
                }
            }
        }
        c.map(|ci| ci.rem_euclid(Q as i32) as i16)
    }

    #[test]
    fn ntt_basemul_matches_schoolbook() {
        let mut a = Polynomial::zero();
        let mut b = Polynomial::zero();
        for i in 0..N {
            a.coeffs_mut()[i] = ((i * 7 + 3) % 100) as i16;
            b.coeffs_mut()[i] = ((i * 13 + 1) % 100) as i16 - 50;
        }
        let expected = schoolbook_mul(a.coeffs(), b.coeffs());

        // basemul leaves R^{-1} and the inverse NTT multiplies by R.
        let c = a.ntt().basemul(&b.ntt()).ntt_inverse();
        for (i, (&got, &exp)) in c.coeffs().iter().zip(expected.iter()).enumerate() {
            let got = (got as i32).rem_euclid(Q as i32) as i16;
            assert_eq!(got, exp, "mismatch at {i}");
        }
    }
}
