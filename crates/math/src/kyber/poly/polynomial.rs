use core::ops;

use zeroize::Zeroize;

use super::NttPolynomial;
use crate::{
    N,
    kyber::{
        SYMBYTES,
        compress::CompressWidth,
        encode, ntt,
        reduce::barrett_reduce,
        sample::{CbdWidth, reject_uniform},
    },
};

/// Polynomial in standard (coefficient) form over `R_q = Z_q[X]/(X^{256}+1)`.
#[derive(Clone, Copy, PartialEq, Eq, Zeroize)]
pub struct Polynomial(pub(crate) [i16; N]);

impl Polynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Consuming forward NTT transform, Barrett-reduced.
    #[must_use]
    pub fn ntt(mut self) -> NttPolynomial {
        ntt::forward_ntt(&mut self.0);
        let mut t = NttPolynomial(self.0);
        t.reduce();
        t
    }

    /// Centre every coefficient into `[-(q-1)/2, (q-1)/2]`.
    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = barrett_reduce(*c);
        }
    }

    /// Compress to `D` bits and write to buffer.
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        D::compress_poly(r, &self.0);
    }

    /// Decompress from buffer with `D` bits.
    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut p = Self::zero();
        D::decompress_poly(&mut p.0, a);
        p
    }

    /// Decode a 32-byte message into a polynomial.
    #[must_use]
    pub fn from_message(msg: &[u8; SYMBYTES]) -> Self {
        let mut p = Self::zero();
        encode::msg_to_poly(&mut p.0, msg);
        p
    }

    /// Encode polynomial to 32-byte message.
    #[must_use]
    pub fn to_message(&self) -> [u8; SYMBYTES] {
        let mut msg = [0u8; SYMBYTES];
        encode::poly_to_msg(&mut msg, &self.0);
        msg
    }

    /// Sample noise polynomial via the sealed [`CbdWidth`] trait.
    #[must_use]
    pub fn sample_cbd<Eta: CbdWidth>(buf: &[u8]) -> Self {
        let mut p = Self::zero();
        Eta::sample(&mut p.0, buf);
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

impl NttPolynomial {
    /// Uniform polynomial by rejection sampling; the values are read directly
    /// as NTT-domain coefficients.
    #[must_use]
    pub fn sample_uniform(fill: impl FnMut(&mut [u8])) -> Self {
        let mut p = Self::zero();
        reject_uniform(&mut p.0, fill);
        p
    }
}

impl From<[i16; N]> for Polynomial {
    #[inline]
    fn from(coeffs: [i16; N]) -> Self {
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

impl<'b> ops::Add<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn add(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = *self;
        r += rhs;
        r
    }
}

impl<'b> ops::Sub<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn sub(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = *self;
        r -= rhs;
        r
    }
}

impl ops::AddAssign<&Self> for Polynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = a.wrapping_add(b);
        }
    }
}

impl ops::SubAssign<&Self> for Polynomial {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a = a.wrapping_sub(b);
        }
    }
}
