//! Hash and extendable-output function (XOF) adapters over `crystals-keccak`.
//!
//! Kyber uses SHA3-256 as H, SHA3-512 as G, SHAKE-256 as the PRF and KDF,
//! and SHAKE-128 for the public matrix. Dilithium uses SHAKE-128 for the
//! public matrix and SHAKE-256 for everything else, with a 16-bit
//! little-endian nonce appended to the seed.

use crystals_keccak::{
    SHAKE128_RATE, SHAKE256_RATE, Sha3_512, Shake128, Shake256, XofReader,
};

use crate::params::SYMBYTES;

/// SHAKE-128 output stream.
pub type Xof128 = XofReader<SHAKE128_RATE>;
/// SHAKE-256 output stream.
pub type Xof256 = XofReader<SHAKE256_RATE>;

/// H(input) = SHA3-256(input) -> 32 bytes.
#[inline]
#[must_use]
pub fn hash_h(input: impl AsRef<[u8]>) -> [u8; 32] {
    crystals_keccak::sha3_256(input.as_ref())
}

/// G(a || b) = SHA3-512(a || b) -> 64 bytes.
#[must_use]
pub fn hash_g(a: &[u8], b: &[u8]) -> [u8; 64] {
    let mut out = [0u8; 64];
    Sha3_512::new().chain(a).chain(b).finalize().squeeze(&mut out);
    out
}

/// KDF(a || b) = SHAKE-256(a || b) -> 32 bytes.
#[must_use]
pub fn kdf(a: &[u8], b: &[u8]) -> [u8; 32] {
    shake256(&[a, b])
}

/// `PRF(seed, nonce) = SHAKE-256(seed || nonce)`, squeezed into `output`.
pub fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    Shake256::new()
        .chain(seed)
        .chain(&[nonce])
        .finalize()
        .squeeze(output);
}

/// SHAKE-128 XOF over `seed || x || y`.
#[must_use]
pub fn xof(seed: &[u8; SYMBYTES], x: u8, y: u8) -> Xof128 {
    Shake128::new().chain(seed).chain(&[x, y]).finalize()
}

/// SHAKE-128 over `seed || LE16(nonce)`.
#[must_use]
pub fn stream128(seed: &[u8; SYMBYTES], nonce: u16) -> Xof128 {
    Shake128::new()
        .chain(seed)
        .chain(&nonce.to_le_bytes())
        .finalize()
}

/// SHAKE-256 over `seed || LE16(nonce)`.
#[must_use]
pub fn stream256(seed: &[u8], nonce: u16) -> Xof256 {
    Shake256::new()
        .chain(seed)
        .chain(&nonce.to_le_bytes())
        .finalize()
}

/// SHAKE-256 output stream over `input`.
#[must_use]
pub fn xof256(input: &[u8]) -> Xof256 {
    Shake256::new().chain(input).finalize()
}

/// SHAKE-256 over the concatenation of `parts`, `OUT` bytes.
#[must_use]
pub fn shake256<const OUT: usize>(parts: &[&[u8]]) -> [u8; OUT] {
    let mut sponge = Shake256::new();
    for part in parts {
        sponge.absorb(part);
    }
    let mut out = [0u8; OUT];
    sponge.finalize().squeeze(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_g_concatenates() {
        let whole: [u8; 64] = core::array::from_fn(|i| i as u8);
        let mut expected = [0u8; 64];
        Sha3_512::new()
            .chain(&whole)
            .finalize()
            .squeeze(&mut expected);
        assert_eq!(hash_g(&whole[..10], &whole[10..]), expected);
    }

    #[test]
    fn prf_matches_single_shot_shake() {
        let seed = [7u8; SYMBYTES];
        let mut input = [7u8; SYMBYTES + 1];
        input[SYMBYTES] = 9;
        let mut a = [0u8; 200];
        let mut b = [0u8; 200];
        prf(&seed, 9, &mut a);
        crystals_keccak::shake256(&input, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn stream_nonce_is_little_endian() {
        let seed = [3u8; SYMBYTES];
        let mut input = [3u8; SYMBYTES + 2];
        input[SYMBYTES..].copy_from_slice(&[0x01, 0x02]);
        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        stream128(&seed, 0x0201).squeeze(&mut a);
        crystals_keccak::shake128(&input, &mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn xof_orders_indices() {
        let seed = [0u8; SYMBYTES];
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        xof(&seed, 0, 1).squeeze(&mut a);
        xof(&seed, 1, 0).squeeze(&mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn shake256_parts() {
        let joined: [u8; 32] = shake256(&[&b"abc"[..], &b"def"[..]]);
        let single: [u8; 32] = shake256(&[&b"abcdef"[..]]);
        assert_eq!(joined, single);
    }
}
