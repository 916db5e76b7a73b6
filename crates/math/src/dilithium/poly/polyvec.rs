use core::ops;

use zeroize::Zeroize;

use super::{NttPolynomial, Polynomial};
use crate::dilithium::rounding::Gamma2;

/// A vector of `K` polynomials in coefficient form.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct Vector<const K: usize> {
    pub(crate) polys: [Polynomial; K],
}

/// A vector of `K` polynomials in NTT domain.
#[derive(Clone, PartialEq, Eq, Zeroize)]
pub struct NttVector<const K: usize> {
    pub(crate) polys: [NttPolynomial; K],
}

impl<const K: usize> Vector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [Polynomial::zero(); K],
        }
    }

    #[must_use]
    pub fn from_fn(f: impl FnMut(usize) -> Polynomial) -> Self {
        Self {
            polys: core::array::from_fn(f),
        }
    }

    #[must_use]
    pub fn ntt(&self) -> NttVector<K> {
        NttVector {
            polys: self.polys.map(Polynomial::ntt),
        }
    }

    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(Polynomial::reduce);
    }

    pub fn caddq(&mut self) {
        self.polys.iter_mut().for_each(Polynomial::caddq);
    }

    pub fn shiftl(&mut self) {
        self.polys.iter_mut().for_each(Polynomial::shiftl);
    }

    /// Whether any coefficient has `|c| >= bound`.
    #[must_use]
    pub fn exceeds_bound(&self, bound: i32) -> bool {
        self.polys.iter().any(|p| p.exceeds_bound(bound))
    }

    #[must_use]
    pub fn power2round(&self) -> (Self, Self) {
        let mut hi = Self::zero();
        let mut lo = Self::zero();
        for ((h, l), p) in hi.polys.iter_mut().zip(lo.polys.iter_mut()).zip(&self.polys) {
            (*h, *l) = p.power2round();
        }
        (hi, lo)
    }

    #[must_use]
    pub fn decompose<G: Gamma2>(&self) -> (Self, Self) {
        let mut hi = Self::zero();
        let mut lo = Self::zero();
        for ((h, l), p) in hi.polys.iter_mut().zip(lo.polys.iter_mut()).zip(&self.polys) {
            (*h, *l) = p.decompose::<G>();
        }
        (hi, lo)
    }

    /// Hint vector for low parts `a0` and high parts `a1`, with its total
    /// weight.
    #[must_use]
    pub fn make_hint<G: Gamma2>(a0: &Self, a1: &Self) -> (Self, usize) {
        let mut h = Self::zero();
        let mut weight = 0;
        for ((slot, l), c) in h.polys.iter_mut().zip(&a0.polys).zip(&a1.polys) {
            let (p, w) = Polynomial::make_hint::<G>(l, c);
            *slot = p;
            weight += w;
        }
        (h, weight)
    }

    #[must_use]
    pub fn use_hint<G: Gamma2>(&self, hint: &Self) -> Self {
        Self::from_fn(|i| self.polys[i].use_hint::<G>(&hint.polys[i]))
    }

    #[must_use]
    pub const fn polys(&self) -> &[Polynomial; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [Polynomial; K] {
        &mut self.polys
    }
}

impl<const K: usize> NttVector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [NttPolynomial::zero(); K],
        }
    }

    #[must_use]
    pub fn from_fn(f: impl FnMut(usize) -> NttPolynomial) -> Self {
        Self {
            polys: core::array::from_fn(f),
        }
    }

    #[must_use]
    pub fn ntt_inverse(&self) -> Vector<K> {
        Vector {
            polys: self.polys.map(NttPolynomial::ntt_inverse),
        }
    }

    pub fn reduce(&mut self) {
        self.polys.iter_mut().for_each(NttPolynomial::reduce);
    }

    /// Multiply every entry by the same polynomial.
    #[must_use]
    pub fn pointwise_poly(&self, c: &NttPolynomial) -> Self {
        Self::from_fn(|i| c.pointwise(&self.polys[i]))
    }

    /// `sum_i(self[i] * other[i])`, unreduced.
    #[must_use]
    pub fn inner_product(&self, other: &Self) -> NttPolynomial {
        let mut acc = NttPolynomial::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc += &a.pointwise(b);
        }
        acc
    }

    #[must_use]
    pub const fn polys(&self) -> &[NttPolynomial; K] {
        &self.polys
    }
}

/// K x L matrix of NTT-domain polynomials (public matrix A).
pub struct NttMatrix<const K: usize, const L: usize> {
    pub(crate) rows: [NttVector<L>; K],
}

impl<const K: usize, const L: usize> NttMatrix<K, L> {
    /// Build the matrix entry by entry from `f(row, col)`.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> NttPolynomial) -> Self {
        Self {
            rows: core::array::from_fn(|i| NttVector::from_fn(|j| f(i, j))),
        }
    }

    /// `A * v`, unreduced.
    #[must_use]
    pub fn mul_vec(&self, v: &NttVector<L>) -> NttVector<K> {
        NttVector::from_fn(|i| self.rows[i].inner_product(v))
    }

    #[must_use]
    pub const fn rows(&self) -> &[NttVector<L>; K] {
        &self.rows
    }
}

impl<const K: usize> ops::AddAssign<&Self> for Vector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
        }
    }
}

impl<const K: usize> ops::SubAssign<&Self> for Vector<K> {
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a -= b;
        }
    }
}

impl<const K: usize> ops::SubAssign<&Self> for NttVector<K> {
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a -= b;
        }
    }
}

impl<const K: usize> Default for Vector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> Default for NttVector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> core::fmt::Debug for Vector<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Vector").field("k", &K).finish_non_exhaustive()
    }
}

impl<const K: usize> core::fmt::Debug for NttVector<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttVector").field("k", &K).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        N,
        dilithium::{Q, reduce::freeze},
    };

    #[test]
    fn identity_matrix_mul() {
        // the constant 1 in Montgomery form (2^32 mod q) cancels the
        // pointwise 2^{-32}; the inverse NTT then leaves one factor 2^32
        let mont = {
            let mut p = Polynomial::zero();
            p.coeffs_mut()[0] = 4_193_792;
            p.ntt()
        };
        let a = NttMatrix::<2, 2>::from_fn(|i, j| if i == j { mont } else { NttPolynomial::zero() });
        let v = Vector::<2>::from_fn(|k| {
            Polynomial::from(core::array::from_fn(|i| ((i * 5 + k) % 1000) as i32 - 500))
        });
        let mut w = a.mul_vec(&v.ntt());
        w.reduce();
        let got = w.ntt_inverse();
        for (p, q) in got.polys().iter().zip(v.polys()) {
            for (&x, &y) in p.coeffs().iter().zip(q.coeffs()) {
                let x = crate::dilithium::reduce::montgomery_reduce(i64::from(x));
                assert_eq!(freeze(x), freeze(y));
            }
        }
    }

    #[test]
    fn exceeds_bound_any_entry() {
        let mut v = Vector::<3>::zero();
        assert!(!v.exceeds_bound(1));
        v.polys_mut()[2].coeffs_mut()[N - 1] = -(Q - 1) / 8;
        assert!(v.exceeds_bound(1000));
    }
}
