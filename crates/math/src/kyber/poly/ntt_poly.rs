use core::ops;

use zeroize::Zeroize;

use super::Polynomial;
use crate::{
    N,
    kyber::{
        encode, ntt,
        reduce::{barrett_reduce, montgomery_reduce},
    },
};

/// Polynomial in NTT (bit-reversed) domain.
#[derive(Clone, Copy, PartialEq, Eq, Zeroize)]
pub struct NttPolynomial(pub(crate) [i16; N]);

impl NttPolynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Inverse NTT; multiplies every coefficient by the Montgomery factor.
    #[must_use]
    pub fn ntt_inverse(mut self) -> Polynomial {
        ntt::inverse_ntt(&mut self.0);
        Polynomial(self.0)
    }

    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = barrett_reduce(*c);
        }
    }

    /// Multiply every coefficient by `R = 2^{16}` (into Montgomery form).
    pub fn to_mont(&mut self) {
        // R^2 mod q
        const F: i32 = 1353;
        for c in &mut self.0 {
            *c = montgomery_reduce(i32::from(*c) * F);
        }
    }

    /// Pointwise basemul: 128 degree-1 multiplications in NTT domain.
    #[must_use]
    pub fn basemul(&self, other: &Self) -> Self {
        Self(ntt::basemul(&self.0, &other.0))
    }

    /// Serialize to bytes (12-bit packing, 384 bytes).
    pub fn to_bytes(&self, r: &mut [u8]) {
        encode::coeffs_to_bytes(r, &self.0);
    }

    /// Deserialize from bytes (12-bit unpacking).
    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        let mut p = Self::zero();
        encode::bytes_to_coeffs(&mut p.0, a);
        p
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] {
        &self.0
    }

    #[must_use]
    pub const fn coeffs_mut(&mut self) -> &mut [i16; N] {
        &mut self.0
    }
}

impl Default for NttPolynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Debug for NttPolynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttPolynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl<'b> ops::Add<&'b NttPolynomial> for &NttPolynomial {
    type Output = NttPolynomial;
    #[inline]
    fn add(self, rhs: &'b NttPolynomial) -> NttPolynomial {
        let mut r = *self;
        r += rhs;
        r
    }
}

impl ops::AddAssign<&Self> for NttPolynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = a.wrapping_add(b);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kyber::{
        POLYBYTES, Q,
        reduce::{MONT, fqmul},
    };

    #[test]
    fn ntt_roundtrip() {
        let mut p = Polynomial::zero();
        for (i, c) in p.0.iter_mut().enumerate() {
            *c = (i % 13) as i16;
        }
        let original = p.0;

        let ntt_p = p.ntt();
        assert_ne!(ntt_p.0, original);

        let recovered = ntt_p.ntt_inverse();
        let mut coeffs = recovered.0;
        for c in &mut coeffs {
            *c = barrett_reduce(fqmul(*c, 1));
        }
        assert_eq!(coeffs, original);
    }

    #[test]
    fn to_mont_multiplies_by_radix() {
        let mut p = NttPolynomial::zero();
        p.0[0] = 1;
        p.0[1] = -7;
        p.to_mont();
        assert_eq!(barrett_reduce(p.0[0]), MONT);
        assert_eq!(
            (i32::from(p.0[1]) + 7 * i32::from(MONT)).rem_euclid(i32::from(Q)),
            0
        );
    }

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let mut p = NttPolynomial::zero();
        for i in 0..N {
            p.0[i] = (i as i16 * 13) % (Q - 1);
        }
        let mut buf = [0u8; POLYBYTES];
        p.to_bytes(&mut buf);
        let q = NttPolynomial::from_bytes(&buf);
        assert_eq!(p, q);
    }
}
