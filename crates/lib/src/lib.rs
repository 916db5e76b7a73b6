//! `crystals-rs` -- Kyber key encapsulation and Dilithium signatures.
//!
//! Implements the round-3 CRYSTALS constructions for all standard parameter
//! sets:
//!
//! - [`kem`]: Kyber-512, Kyber-768 and Kyber-1024 (IND-CCA2 KEM, implicit
//!   rejection).
//! - [`sign`]: Dilithium2, Dilithium3 and Dilithium5 (Fiat-Shamir with
//!   aborts).
//!
//! Randomness is injected per call through [`rand_core::CryptoRng`]; every
//! randomized operation has a deterministic `_derand` counterpart.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod hash;
pub mod kem;
pub mod params;
pub mod sign;

pub use crystals_keccak as keccak;
pub use crystals_math as math;
pub use kem::{KemParams, Kyber512, Kyber768, Kyber1024};
pub use params::{ByteArray, SYMBYTES};
pub use sign::{Dilithium2, Dilithium3, Dilithium5, SignParams};

/// Errors returned by decoding, verification and signing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input byte slice has wrong length for this parameter set.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// Key bytes are the right length but not a valid encoding.
    #[error("malformed key encoding")]
    MalformedKey,
    /// Signature bytes are the right length but not a valid encoding.
    #[error("malformed signature encoding")]
    MalformedSignature,
    /// Signature does not verify under the given key and message.
    #[error("signature verification failed")]
    InvalidSignature,
    /// Every signing attempt in the retry budget was rejected.
    #[error("signing gave up after {attempts} rejected attempts")]
    RetryBudgetExceeded {
        /// Number of attempts made.
        attempts: u32,
    },
}
