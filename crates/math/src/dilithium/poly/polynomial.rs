use core::ops;

use zeroize::Zeroize;

use super::NttPolynomial;
use crate::{
    N,
    dilithium::{
        D, Q, ntt,
        reduce::{caddq, reduce32},
        rounding::{Gamma2, power2round},
        sample::{EtaWidth, challenge, reject_eta},
    },
};

/// Polynomial in coefficient form over `Z_q[X]/(X^{256}+1)`, q = 8380417.
#[derive(Clone, Copy, PartialEq, Eq, Zeroize)]
pub struct Polynomial(pub(crate) [i32; N]);

impl Polynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i32; N])
    }

    /// Consuming forward NTT. Coefficients are not reduced afterwards.
    #[must_use]
    pub fn ntt(mut self) -> NttPolynomial {
        ntt::ntt(&mut self.0);
        NttPolynomial(self.0)
    }

    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = reduce32(*c);
        }
    }

    pub fn caddq(&mut self) {
        for c in &mut self.0 {
            *c = caddq(*c);
        }
    }

    /// Multiply by `2^D`.
    pub fn shiftl(&mut self) {
        for c in &mut self.0 {
            *c <<= D;
        }
    }

    /// Whether some coefficient has `|c| >= bound`. Expects reduced input.
    ///
    /// Bounds above `(q - 1) / 8` always report true.
    #[must_use]
    pub fn exceeds_bound(&self, bound: i32) -> bool {
        if bound > (Q - 1) / 8 {
            return true;
        }
        // |c| without a branch on the sign
        self.0.iter().any(|&c| c - ((c >> 31) & (2 * c)) >= bound)
    }

    /// `(t1, t0)` with `t = t1 * 2^D + t0`, for `t` in `[0, q)`.
    #[must_use]
    pub fn power2round(&self) -> (Self, Self) {
        let mut hi = Self::zero();
        let mut lo = Self::zero();
        for ((h, l), &c) in hi.0.iter_mut().zip(lo.0.iter_mut()).zip(self.0.iter()) {
            (*h, *l) = power2round(c);
        }
        (hi, lo)
    }

    /// `(w1, w0)` high and low parts, for `w` in `[0, q)`.
    #[must_use]
    pub fn decompose<G: Gamma2>(&self) -> (Self, Self) {
        let mut hi = Self::zero();
        let mut lo = Self::zero();
        for ((h, l), &c) in hi.0.iter_mut().zip(lo.0.iter_mut()).zip(self.0.iter()) {
            (*h, *l) = G::decompose(c);
        }
        (hi, lo)
    }

    /// Hint polynomial (coefficients 0/1) for low parts `a0` and high parts
    /// `a1`, together with its weight.
    #[must_use]
    pub fn make_hint<G: Gamma2>(a0: &Self, a1: &Self) -> (Self, usize) {
        let mut h = Self::zero();
        let mut weight = 0;
        for ((slot, &l), &c) in h.0.iter_mut().zip(a0.0.iter()).zip(a1.0.iter()) {
            let bit = G::make_hint(l, c);
            *slot = i32::from(bit);
            weight += usize::from(bit);
        }
        (h, weight)
    }

    /// High parts of `self` corrected by `hint`.
    #[must_use]
    pub fn use_hint<G: Gamma2>(&self, hint: &Self) -> Self {
        let mut r = Self::zero();
        for ((slot, &a), &h) in r.0.iter_mut().zip(self.0.iter()).zip(hint.0.iter()) {
            *slot = G::use_hint(a, h != 0);
        }
        r
    }

    /// Secret polynomial with coefficients in `[-η, η]`.
    #[must_use]
    pub fn sample_eta<E: EtaWidth>(fill: impl FnMut(&mut [u8])) -> Self {
        let mut p = Self::zero();
        reject_eta::<E>(&mut p.0, fill);
        p
    }

    /// Challenge polynomial with `tau` nonzero `±1` coefficients.
    #[must_use]
    pub fn challenge(tau: usize, fill: impl FnMut(&mut [u8])) -> Self {
        let mut p = Self::zero();
        challenge(&mut p.0, tau, fill);
        p
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i32; N] {
        &self.0
    }

    #[must_use]
    pub const fn coeffs_mut(&mut self) -> &mut [i32; N] {
        &mut self.0
    }
}

impl From<[i32; N]> for Polynomial {
    #[inline]
    fn from(coeffs: [i32; N]) -> Self {
        Self(coeffs)
    }
}

impl Default for Polynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl ops::AddAssign<&Self> for Polynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl ops::SubAssign<&Self> for Polynomial {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a -= b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dilithium::{Gamma2Q32, reduce::freeze};

    #[test]
    fn exceeds_bound_is_strict() {
        let mut p = Polynomial::zero();
        p.0[17] = -99;
        assert!(!p.exceeds_bound(100));
        assert!(p.exceeds_bound(99));
        p.0[17] = 99;
        assert!(p.exceeds_bound(99));
        assert!(p.exceeds_bound(Q));
    }

    #[test]
    fn power2round_recombines() {
        let p = Polynomial(core::array::from_fn(|i| (i as i32 * 32_749) % Q));
        let (hi, lo) = p.power2round();
        for i in 0..N {
            assert_eq!((hi.0[i] << D) + lo.0[i], p.0[i]);
        }
    }

    #[test]
    fn shiftl_then_reduce() {
        let mut p = Polynomial::zero();
        p.0[0] = 1023;
        p.shiftl();
        assert_eq!(p.0[0], 1023 << 13);
        p.reduce();
        assert_eq!(freeze(p.0[0]), 1023 << 13);
    }

    #[test]
    fn hints_without_noise_are_empty() {
        let w = Polynomial(core::array::from_fn(|i| (i as i32 * 104_729) % Q));
        let (w1, w0) = w.decompose::<Gamma2Q32>();
        let (h, weight) = Polynomial::make_hint::<Gamma2Q32>(&w0, &w1);
        assert_eq!(weight, 0);
        assert_eq!(w.use_hint::<Gamma2Q32>(&h), w1);
    }
}
