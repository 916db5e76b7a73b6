//! `crystals-keccak` -- Keccak-f\[1600\] and the FIPS 202 sponges used by the
//! CRYSTALS lattice schemes.
//!
//! A sponge session is split into two types: [`Keccak`] only absorbs, and
//! [`Keccak::finalize`] consumes it into an [`XofReader`] that only squeezes.
//! Consecutive squeezes continue the same output stream.

#![no_std]

mod f1600;
mod sponge;

pub use f1600::f1600;
pub use sponge::{Keccak, Sha3_256, Sha3_512, Shake128, Shake256, XofReader};

pub const SHAKE128_RATE: usize = 168;
pub const SHAKE256_RATE: usize = 136;
pub const SHA3_256_RATE: usize = 136;
pub const SHA3_512_RATE: usize = 72;

const SHAKE_PAD: u8 = 0x1F;
const SHA3_PAD: u8 = 0x06;

/// SHAKE-128 of `input`, filling all of `out`.
pub fn shake128(input: &[u8], out: &mut [u8]) {
    Shake128::new().chain(input).finalize().squeeze(out);
}

/// SHAKE-256 of `input`, filling all of `out`.
pub fn shake256(input: &[u8], out: &mut [u8]) {
    Shake256::new().chain(input).finalize().squeeze(out);
}

/// SHA3-256 of `input`.
#[must_use]
pub fn sha3_256(input: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    Sha3_256::new().chain(input).finalize().squeeze(&mut out);
    out
}

/// SHA3-512 of `input`.
#[must_use]
pub fn sha3_512(input: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    Sha3_512::new().chain(input).finalize().squeeze(&mut out);
    out
}
