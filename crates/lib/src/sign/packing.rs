//! Byte layouts of Dilithium keys and signatures.
//!
//! Coefficient packings live in `crystals_math::dilithium::encode`; this
//! module lays them out and validates what comes back in.

use crystals_math::{
    N,
    dilithium::{
        Vector,
        encode::{
            T0_POLY_BYTES, T1_POLY_BYTES, pack_eta, pack_t0, pack_t1, pack_w1, pack_z,
            unpack_eta, unpack_t0, unpack_t1, unpack_z,
        },
    },
};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::params::SignParams;
use crate::{Error, params::SYMBYTES};

/// `pk = rho || t1`.
pub(crate) fn pack_pk<P: SignParams, const K: usize>(
    pk: &mut [u8], rho: &[u8; SYMBYTES], t1: &Vector<K>,
) {
    pk[..SYMBYTES].copy_from_slice(rho);
    for (chunk, p) in pk[SYMBYTES..P::PK_BYTES]
        .chunks_exact_mut(T1_POLY_BYTES)
        .zip(t1.polys())
    {
        pack_t1(chunk, p.coeffs());
    }
}

pub(crate) fn unpack_pk<P: SignParams, const K: usize>(pk: &[u8]) -> ([u8; SYMBYTES], Vector<K>) {
    let mut rho = [0u8; SYMBYTES];
    rho.copy_from_slice(&pk[..SYMBYTES]);
    let mut t1 = Vector::<K>::zero();
    for (chunk, p) in pk[SYMBYTES..P::PK_BYTES]
        .chunks_exact(T1_POLY_BYTES)
        .zip(t1.polys_mut())
    {
        unpack_t1(p.coeffs_mut(), chunk);
    }
    (rho, t1)
}

/// Decoded secret key. Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct SecretParts<const K: usize, const L: usize> {
    pub rho: [u8; SYMBYTES],
    pub key: [u8; SYMBYTES],
    pub tr: [u8; SYMBYTES],
    pub s1: Vector<L>,
    pub s2: Vector<K>,
    pub t0: Vector<K>,
}

/// `sk = rho || key || tr || s1 || s2 || t0`.
pub(crate) fn pack_sk<P: SignParams, const K: usize, const L: usize>(
    sk: &mut [u8], parts: &SecretParts<K, L>,
) {
    let (head, rest) = sk.split_at_mut(3 * SYMBYTES);
    head[..SYMBYTES].copy_from_slice(&parts.rho);
    head[SYMBYTES..2 * SYMBYTES].copy_from_slice(&parts.key);
    head[2 * SYMBYTES..].copy_from_slice(&parts.tr);

    let (s1, rest) = rest.split_at_mut(L * P::POLYETA_BYTES);
    let (s2, t0) = rest.split_at_mut(K * P::POLYETA_BYTES);
    for (chunk, p) in s1.chunks_exact_mut(P::POLYETA_BYTES).zip(parts.s1.polys()) {
        pack_eta::<P::Eta>(chunk, p.coeffs());
    }
    for (chunk, p) in s2.chunks_exact_mut(P::POLYETA_BYTES).zip(parts.s2.polys()) {
        pack_eta::<P::Eta>(chunk, p.coeffs());
    }
    for (chunk, p) in t0.chunks_exact_mut(T0_POLY_BYTES).zip(parts.t0.polys()) {
        pack_t0(chunk, p.coeffs());
    }
}

/// Inverse of [`pack_sk`]. Rejects `η` fields outside `[0, 2η]`.
pub(crate) fn unpack_sk<P: SignParams, const K: usize, const L: usize>(
    sk: &[u8],
) -> Result<SecretParts<K, L>, Error> {
    let mut parts = SecretParts {
        rho: [0u8; SYMBYTES],
        key: [0u8; SYMBYTES],
        tr: [0u8; SYMBYTES],
        s1: Vector::zero(),
        s2: Vector::zero(),
        t0: Vector::zero(),
    };
    parts.rho.copy_from_slice(&sk[..SYMBYTES]);
    parts.key.copy_from_slice(&sk[SYMBYTES..2 * SYMBYTES]);
    parts.tr.copy_from_slice(&sk[2 * SYMBYTES..3 * SYMBYTES]);

    let rest = &sk[3 * SYMBYTES..P::SK_BYTES];
    let (s1, rest) = rest.split_at(L * P::POLYETA_BYTES);
    let (s2, t0) = rest.split_at(K * P::POLYETA_BYTES);

    let mut ok = true;
    for (chunk, p) in s1.chunks_exact(P::POLYETA_BYTES).zip(parts.s1.polys_mut()) {
        ok &= unpack_eta::<P::Eta>(p.coeffs_mut(), chunk);
    }
    for (chunk, p) in s2.chunks_exact(P::POLYETA_BYTES).zip(parts.s2.polys_mut()) {
        ok &= unpack_eta::<P::Eta>(p.coeffs_mut(), chunk);
    }
    for (chunk, p) in t0.chunks_exact(T0_POLY_BYTES).zip(parts.t0.polys_mut()) {
        unpack_t0(p.coeffs_mut(), chunk);
    }

    if ok { Ok(parts) } else { Err(Error::MalformedKey) }
}

/// Packed `w1`, the input hashed into the challenge after `mu`.
pub(crate) fn pack_w1_vec<P: SignParams, const K: usize>(out: &mut [u8], w1: &Vector<K>) {
    for (chunk, p) in out[..P::POLYVECW1_BYTES]
        .chunks_exact_mut(P::POLYW1_BYTES)
        .zip(w1.polys())
    {
        pack_w1::<P::Gamma2>(chunk, p.coeffs());
    }
}

/// `sig = c~ || z || h`.
///
/// The hint is stored as the positions of its nonzero coefficients,
/// followed by one byte per polynomial holding the running count.
pub(crate) fn pack_sig<P: SignParams, const K: usize, const L: usize>(
    sig: &mut [u8], c_tilde: &[u8; SYMBYTES], z: &Vector<L>, h: &Vector<K>,
) {
    let (head, rest) = sig[..P::SIG_BYTES].split_at_mut(SYMBYTES);
    head.copy_from_slice(c_tilde);

    let (z_bytes, hint) = rest.split_at_mut(L * P::POLYZ_BYTES);
    for (chunk, p) in z_bytes.chunks_exact_mut(P::POLYZ_BYTES).zip(z.polys()) {
        pack_z::<P::Gamma1>(chunk, p.coeffs());
    }

    hint.fill(0);
    let mut k = 0;
    for (i, p) in h.polys().iter().enumerate() {
        for (j, &c) in p.coeffs().iter().enumerate() {
            if c != 0 {
                hint[k] = j as u8;
                k += 1;
            }
        }
        hint[P::OMEGA + i] = k as u8;
    }
}

/// Inverse of [`pack_sig`].
///
/// Every hint encoding has exactly one accepted form: counts must be
/// non-decreasing and at most `ω`, positions strictly increasing within a
/// polynomial, and unused position bytes zero.
pub(crate) fn unpack_sig<P: SignParams, const K: usize, const L: usize>(
    sig: &[u8],
) -> Result<([u8; SYMBYTES], Vector<L>, Vector<K>), Error> {
    let (head, rest) = sig[..P::SIG_BYTES].split_at(SYMBYTES);
    let mut c_tilde = [0u8; SYMBYTES];
    c_tilde.copy_from_slice(head);

    let (z_bytes, hint) = rest.split_at(L * P::POLYZ_BYTES);
    let mut z = Vector::<L>::zero();
    for (chunk, p) in z_bytes.chunks_exact(P::POLYZ_BYTES).zip(z.polys_mut()) {
        unpack_z::<P::Gamma1>(p.coeffs_mut(), chunk);
    }

    let h = unpack_hint::<K>(hint, P::OMEGA).ok_or(Error::MalformedSignature)?;
    Ok((c_tilde, z, h))
}

fn unpack_hint<const K: usize>(hint: &[u8], omega: usize) -> Option<Vector<K>> {
    let mut h = Vector::<K>::zero();
    let mut k = 0;
    for (i, p) in h.polys_mut().iter_mut().enumerate() {
        let end = usize::from(hint[omega + i]);
        if end < k || end > omega {
            return None;
        }
        for j in k..end {
            // strictly increasing positions rule out duplicates
            if j > k && hint[j] <= hint[j - 1] {
                return None;
            }
            p.coeffs_mut()[usize::from(hint[j])] = 1;
        }
        k = end;
    }
    if hint[k..omega].iter().any(|&b| b != 0) {
        return None;
    }
    Some(h)
}

// hint positions are single bytes
const _: () = assert!(N <= 256);
