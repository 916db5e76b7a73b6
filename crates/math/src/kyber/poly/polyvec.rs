use core::ops;

use zeroize::Zeroize;

use super::{NttPolynomial, Polynomial};
use crate::kyber::{POLYBYTES, compress::CompressWidth, encode};

/// A vector of `K` polynomials in standard (coefficient) form.
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
    pub fn ntt(self) -> NttVector<K> {
        let polys = self.polys.map(Polynomial::ntt);
        NttVector { polys }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Compress every polynomial to `D` bits, `K * D::POLY_BYTES` bytes total.
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        for (p, chunk) in self.polys.iter().zip(r.chunks_exact_mut(D::POLY_BYTES)) {
            p.compress::<D>(chunk);
        }
    }

    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(D::POLY_BYTES)) {
            *p = Polynomial::decompress::<D>(chunk);
        }
        v
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
    /// Serialised size in bytes.
    pub const BYTES: usize = K * POLYBYTES;

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
    pub fn ntt_inverse(self) -> Vector<K> {
        let polys = self.polys.map(NttPolynomial::ntt_inverse);
        Vector { polys }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    pub fn to_mont(&mut self) {
        for p in &mut self.polys {
            p.to_mont();
        }
    }

    /// `sum_i(self[i] * other[i])` in NTT domain, Barrett-reduced.
    #[must_use]
    pub fn inner_product(&self, other: &Self) -> NttPolynomial {
        let mut acc = NttPolynomial::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc += &a.basemul(b);
        }
        acc.reduce();
        acc
    }

    /// Serialize to `K * 384` bytes (12-bit packing).
    pub fn to_bytes(&self, r: &mut [u8]) {
        debug_assert_eq!(r.len(), Self::BYTES);
        for (p, chunk) in self.polys.iter().zip(r.chunks_exact_mut(POLYBYTES)) {
            p.to_bytes(chunk);
        }
    }

    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        debug_assert_eq!(a.len(), Self::BYTES);
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(POLYBYTES)) {
            *p = NttPolynomial::from_bytes(chunk);
        }
        v
    }

    /// Whether `a` is a canonical encoding: every 12-bit value below q.
    #[must_use]
    pub fn is_canonical(a: &[u8]) -> bool {
        a.len() == Self::BYTES && encode::is_canonical(a)
    }

    #[must_use]
    pub const fn polys(&self) -> &[NttPolynomial; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [NttPolynomial; K] {
        &mut self.polys
    }
}

/// K x K matrix of NTT-domain polynomials (public matrix A).
pub struct NttMatrix<const K: usize> {
    pub(crate) rows: [NttVector<K>; K],
}

impl<const K: usize> NttMatrix<K> {
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| NttVector::zero()),
        }
    }

    /// Build the matrix entry by entry from `f(row, col)`.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> NttPolynomial) -> Self {
        Self {
            rows: core::array::from_fn(|i| NttVector::from_fn(|j| f(i, j))),
        }
    }

    /// `A * v` with Montgomery conversion on each result row.
    #[must_use]
    pub fn mul_vec_tomont(&self, v: &NttVector<K>) -> NttVector<K> {
        let mut result = self.mul_vec(v);
        result.to_mont();
        result
    }

    /// `A * v` without Montgomery conversion.
    #[must_use]
    pub fn mul_vec(&self, v: &NttVector<K>) -> NttVector<K> {
        NttVector::from_fn(|i| self.rows[i].inner_product(v))
    }

    #[must_use]
    pub const fn rows(&self) -> &[NttVector<K>; K] {
        &self.rows
    }
}

impl<'b, const K: usize> ops::Add<&'b Vector<K>> for &Vector<K> {
    type Output = Vector<K>;
    fn add(self, rhs: &'b Vector<K>) -> Vector<K> {
        let mut r = self.clone();
        r += rhs;
        r
    }
}

impl<const K: usize> ops::AddAssign<&Self> for Vector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
        }
    }
}

impl<const K: usize> ops::AddAssign<&Self> for NttVector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
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
