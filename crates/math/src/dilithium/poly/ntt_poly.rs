use core::ops;

use zeroize::Zeroize;

use super::Polynomial;
use crate::{
    N,
    dilithium::{ntt, reduce::reduce32, sample::reject_uniform},
};

/// Polynomial in NTT (bit-reversed) domain.
#[derive(Clone, Copy, PartialEq, Eq, Zeroize)]
pub struct NttPolynomial(pub(crate) [i32; N]);

impl NttPolynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i32; N])
    }

    /// Inverse NTT; multiplies every coefficient by the Montgomery factor.
    #[must_use]
    pub fn ntt_inverse(mut self) -> Polynomial {
        ntt::invntt_tomont(&mut self.0);
        Polynomial(self.0)
    }

    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = reduce32(*c);
        }
    }

    /// Pointwise Montgomery product.
    #[must_use]
    pub fn pointwise(&self, other: &Self) -> Self {
        Self(ntt::pointwise_montgomery(&self.0, &other.0))
    }

    /// Uniform polynomial in `[0, q)`, read directly as NTT coefficients.
    #[must_use]
    pub fn sample_uniform(fill: impl FnMut(&mut [u8])) -> Self {
        let mut p = Self::zero();
        reject_uniform(&mut p.0, fill);
        p
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i32; N] {
        &self.0
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

impl ops::AddAssign<&Self> for NttPolynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl ops::SubAssign<&Self> for NttPolynomial {
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
    use crate::dilithium::{Q, reduce::freeze};

    #[test]
    fn multiply_by_x() {
        // x * (a0 + a1 x + ... + a255 x^255) = -a255 + a0 x + ...
        let a = Polynomial::from(core::array::from_fn(|i| i as i32 + 1));
        let mut x = Polynomial::zero();
        x.coeffs_mut()[1] = 1;
        let mut prod = a.ntt().pointwise(&x.ntt());
        prod.reduce();
        let c = prod.ntt_inverse();
        assert_eq!(freeze(c.coeffs()[0]), Q - 256);
        for i in 1..N {
            assert_eq!(freeze(c.coeffs()[i]), i as i32);
        }
    }
}
