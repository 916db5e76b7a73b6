//! IND-CPA public-key encryption -- the inner PKE scheme used by the KEM.
//!
//! All functions work on serialised keys and ciphertexts; the polynomial
//! vectors only live for the duration of one call.

use crystals_math::kyber::{CbdWidth, NttMatrix, NttPolynomial, NttVector, Polynomial, Vector};
use zerocopy::transmute_ref;
use zeroize::Zeroize;

use super::params::KemParams;
use crate::{
    hash,
    params::{SYMBYTES, Sym2},
};

/// Noise polynomial from `PRF(seed, nonce)`.
fn getnoise<Eta: CbdWidth>(seed: &[u8; SYMBYTES], nonce: u8) -> Polynomial {
    // large enough for eta = 3
    let mut buf = [0u8; 192];
    let buf = &mut buf[..Eta::BUF_BYTES];
    hash::prf(seed, nonce, buf);
    Polynomial::sample_cbd::<Eta>(buf)
}

/// Sample the KxK public matrix `A` from seed `rho` using SHAKE-128.
/// Entry `(i, j)` absorbs `rho || j || i`; if `transposed`, `rho || i || j`.
fn gen_matrix<const K: usize>(seed: &[u8; SYMBYTES], transposed: bool) -> NttMatrix<K> {
    NttMatrix::from_fn(|i, j| {
        let (x, y) = if transposed {
            (i as u8, j as u8)
        } else {
            (j as u8, i as u8)
        };
        let mut xof = hash::xof(seed, x, y);
        NttPolynomial::sample_uniform(|buf| xof.squeeze(buf))
    })
}

// -- IND-CPA key generation --------------------------------------------------

pub(crate) fn indcpa_keypair_derand<P: KemParams>(
    pk_bytes: &mut [u8], sk_bytes: &mut [u8], coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_keypair_inner::<P, 2>(pk_bytes, sk_bytes, coins),
        3 => indcpa_keypair_inner::<P, 3>(pk_bytes, sk_bytes, coins),
        4 => indcpa_keypair_inner::<P, 4>(pk_bytes, sk_bytes, coins),
        _ => unreachable!(),
    }
}

fn indcpa_keypair_inner<P: KemParams, const K: usize>(
    pk_bytes: &mut [u8], sk_bytes: &mut [u8], coins: &[u8; SYMBYTES],
) {
    // G(d) -> (rho || sigma)
    let mut buf = hash::hash_g(coins, &[]);
    let seeds: &Sym2 = transmute_ref!(&buf);
    let Sym2(public_seed, noise_seed) = seeds;

    let a = gen_matrix::<K>(public_seed, false);

    let mut s = Vector::<K>::from_fn(|i| getnoise::<P::Eta1>(noise_seed, i as u8));
    let mut e = Vector::<K>::from_fn(|i| getnoise::<P::Eta1>(noise_seed, (K + i) as u8));

    let mut s_hat = s.clone().ntt();
    let mut e_hat = e.clone().ntt();

    // t = A * s + e (NTT domain)
    let mut t_hat = a.mul_vec_tomont(&s_hat);
    t_hat += &e_hat;
    t_hat.reduce();

    // pk = Encode_12(t) || rho, sk = Encode_12(s)
    t_hat.to_bytes(&mut pk_bytes[..P::POLYVEC_BYTES]);
    pk_bytes[P::POLYVEC_BYTES..P::INDCPA_PK_BYTES].copy_from_slice(public_seed);
    s_hat.to_bytes(&mut sk_bytes[..P::INDCPA_SK_BYTES]);

    s.zeroize();
    e.zeroize();
    s_hat.zeroize();
    e_hat.zeroize();
    buf.zeroize();
}

// -- IND-CPA encryption ------------------------------------------------------

pub(crate) fn indcpa_enc<P: KemParams>(
    ct_bytes: &mut [u8], m: &[u8; SYMBYTES], pk_bytes: &[u8], coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_enc_inner::<P, 2>(ct_bytes, m, pk_bytes, coins),
        3 => indcpa_enc_inner::<P, 3>(ct_bytes, m, pk_bytes, coins),
        4 => indcpa_enc_inner::<P, 4>(ct_bytes, m, pk_bytes, coins),
        _ => unreachable!(),
    }
}

fn indcpa_enc_inner<P: KemParams, const K: usize>(
    ct_bytes: &mut [u8], m: &[u8; SYMBYTES], pk_bytes: &[u8], coins: &[u8; SYMBYTES],
) {
    let t_hat = NttVector::<K>::from_bytes(&pk_bytes[..P::POLYVEC_BYTES]);
    let mut seed = [0u8; SYMBYTES];
    seed.copy_from_slice(&pk_bytes[P::POLYVEC_BYTES..P::INDCPA_PK_BYTES]);
    let k = Polynomial::from_message(m);

    let at = gen_matrix::<K>(&seed, true);

    let r = Vector::<K>::from_fn(|i| getnoise::<P::Eta1>(coins, i as u8));
    let e1 = Vector::<K>::from_fn(|i| getnoise::<P::Eta2>(coins, (K + i) as u8));
    let e2 = getnoise::<P::Eta2>(coins, (2 * K) as u8);

    let mut r_hat = r.ntt();

    // u = A^T * r + e1
    let mut u = at.mul_vec(&r_hat).ntt_inverse();
    u += &e1;
    u.reduce();

    // v = t^T * r + e2 + Decompress_1(m)
    let mut v = t_hat.inner_product(&r_hat).ntt_inverse();
    v += &e2;
    v += &k;
    v.reduce();

    u.compress::<P::Du>(&mut ct_bytes[..P::POLYVEC_COMPRESSED_BYTES]);
    v.compress::<P::Dv>(&mut ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::INDCPA_BYTES]);

    r_hat.zeroize();
}

// -- IND-CPA decryption ------------------------------------------------------

pub(crate) fn indcpa_dec<P: KemParams>(m: &mut [u8; SYMBYTES], ct_bytes: &[u8], sk_bytes: &[u8]) {
    match P::K {
        2 => indcpa_dec_inner::<P, 2>(m, ct_bytes, sk_bytes),
        3 => indcpa_dec_inner::<P, 3>(m, ct_bytes, sk_bytes),
        4 => indcpa_dec_inner::<P, 4>(m, ct_bytes, sk_bytes),
        _ => unreachable!(),
    }
}

fn indcpa_dec_inner<P: KemParams, const K: usize>(
    m: &mut [u8; SYMBYTES], ct_bytes: &[u8], sk_bytes: &[u8],
) {
    let u = Vector::<K>::decompress::<P::Du>(&ct_bytes[..P::POLYVEC_COMPRESSED_BYTES]);
    let v = Polynomial::decompress::<P::Dv>(
        &ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::INDCPA_BYTES],
    );
    let mut s_hat = NttVector::<K>::from_bytes(&sk_bytes[..P::INDCPA_SK_BYTES]);

    let mut mp = s_hat.inner_product(&u.ntt()).ntt_inverse();

    // m' = v - s^T * u
    let mut msg = &v - &mp;
    msg.reduce();
    *m = msg.to_message();

    s_hat.zeroize();
    mp.zeroize();
    msg.zeroize();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kem::params::{Kyber512, Kyber768, Kyber1024};

    fn indcpa_roundtrip<P: KemParams>() {
        let seed = [42u8; SYMBYTES];
        let mut pk = vec![0u8; P::INDCPA_PK_BYTES];
        let mut sk = vec![0u8; P::INDCPA_SK_BYTES];
        indcpa_keypair_derand::<P>(&mut pk, &mut sk, &seed);

        for (i, msg) in [[0u8; SYMBYTES], [0xAB; SYMBYTES], [0xFF; SYMBYTES]]
            .iter()
            .enumerate()
        {
            let coins = [i as u8 + 7; SYMBYTES];
            let mut ct = vec![0u8; P::INDCPA_BYTES];
            indcpa_enc::<P>(&mut ct, msg, &pk, &coins);

            let mut recovered = [0u8; SYMBYTES];
            indcpa_dec::<P>(&mut recovered, &ct, &sk);
            assert_eq!(*msg, recovered, "IND-CPA roundtrip failed");
        }
    }

    #[test]
    fn indcpa_roundtrip_512() {
        indcpa_roundtrip::<Kyber512>();
    }
    #[test]
    fn indcpa_roundtrip_768() {
        indcpa_roundtrip::<Kyber768>();
    }
    #[test]
    fn indcpa_roundtrip_1024() {
        indcpa_roundtrip::<Kyber1024>();
    }

    #[test]
    fn encryption_is_deterministic_in_coins() {
        let mut pk = vec![0u8; Kyber768::INDCPA_PK_BYTES];
        let mut sk = vec![0u8; Kyber768::INDCPA_SK_BYTES];
        indcpa_keypair_derand::<Kyber768>(&mut pk, &mut sk, &[1; SYMBYTES]);

        let msg = [0x5A; SYMBYTES];
        let mut a = vec![0u8; Kyber768::INDCPA_BYTES];
        let mut b = vec![0u8; Kyber768::INDCPA_BYTES];
        let mut c = vec![0u8; Kyber768::INDCPA_BYTES];
        indcpa_enc::<Kyber768>(&mut a, &msg, &pk, &[2; SYMBYTES]);
        indcpa_enc::<Kyber768>(&mut b, &msg, &pk, &[2; SYMBYTES]);
        indcpa_enc::<Kyber768>(&mut c, &msg, &pk, &[3; SYMBYTES]);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn transposed_matrix_is_transpose() {
        let seed = [9u8; SYMBYTES];
        let a = gen_matrix::<3>(&seed, false);
        let at = gen_matrix::<3>(&seed, true);
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(a.rows()[i].polys()[j], at.rows()[j].polys()[i]);
            }
        }
    }
}
