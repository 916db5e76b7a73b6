//! Kyber IND-CCA2 key encapsulation (round 3).
//!
//! The IND-CPA scheme in [`pke`] is turned into a KEM with the
//! Fujisaki-Okamoto transform. Decapsulation never fails: a ciphertext that
//! does not re-encrypt to itself yields a pseudorandom secret derived from
//! the secret rejection seed `z`.

mod params;
mod pke;
mod types;

use ctutils::{CtAssign, CtEq};
use rand_core::CryptoRng;
use zerocopy::transmute_ref;
use zeroize::Zeroize;

pub use params::{KemParams, Kyber512, Kyber768, Kyber1024, SSBYTES};
pub use types::{Ciphertext, PublicKey, SecretKey, SharedSecret};

use crate::{
    hash,
    params::{ByteArray, SYMBYTES, Sym2},
};

/// Deterministic key generation from 64 bytes of coins `(d || z)`.
///
/// `d` seeds the IND-CPA key pair, `z` is stored as the rejection seed.
#[must_use]
pub fn keypair_derand<P: KemParams>(coins: &[u8; 2 * SYMBYTES]) -> (PublicKey<P>, SecretKey<P>) {
    let Sym2(d, z) = transmute_ref!(coins);

    let mut pk = P::PkArray::zeroed();
    let mut sk = P::SkArray::zeroed();
    {
        let sk = sk.as_mut();
        pke::indcpa_keypair_derand::<P>(pk.as_mut(), &mut sk[..P::INDCPA_SK_BYTES], d);

        // sk = indcpa_sk || pk || H(pk) || z
        let mut off = P::INDCPA_SK_BYTES;
        sk[off..off + P::PK_BYTES].copy_from_slice(pk.as_ref());
        off += P::PK_BYTES;
        sk[off..off + SYMBYTES].copy_from_slice(&hash::hash_h(pk.as_ref()));
        off += SYMBYTES;
        sk[off..].copy_from_slice(z);
    }

    (PublicKey::from_bytes(pk), SecretKey::from_bytes(sk))
}

/// Randomized key generation.
pub fn keypair<P: KemParams>(rng: &mut impl CryptoRng) -> (PublicKey<P>, SecretKey<P>) {
    let mut coins = [0u8; 2 * SYMBYTES];
    rng.fill_bytes(&mut coins);
    let keys = keypair_derand::<P>(&coins);
    coins.zeroize();
    keys
}

/// Deterministic encapsulation with explicit 32-byte randomness.
#[must_use]
pub fn encapsulate_derand<P: KemParams>(
    pk: &PublicKey<P>, coins: &[u8; SYMBYTES],
) -> (Ciphertext<P>, SharedSecret) {
    // never expose raw system randomness
    let mut m = hash::hash_h(coins);

    // (K_bar, r) = G(m || H(pk))
    let mut kr = hash::hash_g(&m, &hash::hash_h(pk.as_bytes()));
    let Sym2(k_bar, r) = transmute_ref!(&kr);

    let mut ct = Ciphertext::<P>::zeroed();
    pke::indcpa_enc::<P>(ct.bytes.as_mut(), &m, pk.as_bytes(), r);

    // K = KDF(K_bar || H(c))
    let ss = hash::kdf(k_bar, &hash::hash_h(ct.as_bytes()));

    m.zeroize();
    kr.zeroize();
    (ct, SharedSecret::from(ss))
}

/// Randomized encapsulation.
pub fn encapsulate<P: KemParams>(
    pk: &PublicKey<P>, rng: &mut impl CryptoRng,
) -> (Ciphertext<P>, SharedSecret) {
    let mut coins = [0u8; SYMBYTES];
    rng.fill_bytes(&mut coins);
    let out = encapsulate_derand::<P>(pk, &coins);
    coins.zeroize();
    out
}

/// Decapsulation with implicit rejection.
///
/// Runs in time independent of whether `ct` is valid.
#[must_use]
pub fn decapsulate<P: KemParams>(ct: &Ciphertext<P>, sk: &SecretKey<P>) -> SharedSecret {
    let mut m = [0u8; SYMBYTES];
    pke::indcpa_dec::<P>(&mut m, ct.as_bytes(), sk.indcpa_sk());

    // (K_bar', r') = G(m' || H(pk))
    let mut kr = hash::hash_g(&m, sk.pk_hash());
    let Sym2(k_bar, r) = transmute_ref!(&kr);

    let mut cmp = Ciphertext::<P>::zeroed();
    pke::indcpa_enc::<P>(cmp.bytes.as_mut(), &m, sk.pk_bytes(), r);

    let ok = ct.as_bytes().ct_eq(cmp.as_bytes());

    // K_bar' on success, z otherwise
    let mut k = *k_bar;
    k.ct_assign(&sk.z(), !ok);

    let ss = hash::kdf(&k, &hash::hash_h(ct.as_bytes()));

    m.zeroize();
    kr.zeroize();
    k.zeroize();
    SharedSecret::from(ss)
}
