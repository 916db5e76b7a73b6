//! The Kyber ring `Z_3329[X]/(X^{256}+1)`.
//!
//! Coefficients are `i16` with `i32` intermediates. The NTT splits the ring
//! into 128 quadratic factors `Z_q[X]/(X^2 - zeta)`, so products in the NTT
//! domain are degree-1 base multiplications rather than pointwise products.

pub mod compress;
pub mod encode;
pub mod ntt;
pub mod poly;
pub mod reduce;
pub mod sample;

pub use compress::{CompressWidth, D1, D4, D5, D10, D11};
pub use poly::{NttMatrix, NttPolynomial, NttVector, Polynomial, Vector};
pub use sample::{CbdWidth, Eta2, Eta3};

pub use crate::N;

/// Field modulus.
pub const Q: i16 = 3329;

/// Size in bytes of hashes, seeds, and messages.
pub const SYMBYTES: usize = 32;

/// Size in bytes of a serialised polynomial (12 bits * 256 / 8).
pub const POLYBYTES: usize = 384;
