//! `crystals-math` -- Core mathematical primitives for the CRYSTALS schemes.
//!
//! `no_std`, zero-allocation polynomial arithmetic over `Z_q[X]/(X^{256}+1)`
//! for the two moduli in use:
//!
//! - [`kyber`]: q = 3329, `i16` coefficients, NTT into 128 degree-1 factors.
//! - [`dilithium`]: q = 8380417, `i32` coefficients, full 256-point NTT.
//!
//! Both rings keep the coefficient form and NTT form apart as distinct types,
//! so a forward or inverse transform is a consuming conversion and pointwise
//! products only exist in the NTT domain. Nothing here hashes: samplers take
//! byte buffers or a `fill` closure that the caller backs with an XOF.

#![no_std]
#![deny(unsafe_code)]

pub mod dilithium;
pub mod kyber;
pub mod pack;

/// Polynomial ring degree shared by both rings.
pub const N: usize = 256;
