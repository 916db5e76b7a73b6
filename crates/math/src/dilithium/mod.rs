//! The Dilithium ring `Z_8380417[X]/(X^{256}+1)`.
//!
//! Coefficients are `i32` with `i64` intermediates. q is congruent to 1
//! modulo 512, so the NTT splits completely and products in the NTT domain
//! are plain pointwise Montgomery products.

pub mod encode;
pub mod ntt;
pub mod poly;
pub mod reduce;
pub mod rounding;
pub mod sample;

pub use poly::{NttMatrix, NttPolynomial, NttVector, Polynomial, Vector};
pub use rounding::{Gamma2, Gamma2Q32, Gamma2Q88};
pub use sample::{EtaWidth, Eta2, Eta4, Gamma1Pow17, Gamma1Pow19, Gamma1Width};

pub use crate::N;

/// Field modulus, `2^{23} - 2^{13} + 1`.
pub const Q: i32 = 8_380_417;

/// Bits dropped from `t` by [`rounding::power2round`].
pub const D: u32 = 13;
