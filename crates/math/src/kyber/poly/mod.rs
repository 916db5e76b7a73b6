mod ntt_poly;
mod polynomial;
mod polyvec;

pub use ntt_poly::NttPolynomial;
pub use polynomial::Polynomial;
pub use polyvec::{NttMatrix, NttVector, Vector};
