//! Dilithium signatures (round 3.1), Fiat-Shamir with aborts.
//!
//! Signing draws masks until one produces a signature that leaks nothing
//! about the secret key. The loop is bounded by [`MAX_SIGN_ATTEMPTS`];
//! for every standard parameter set the expected number of attempts is
//! below five.

/// Monomorphise `$f::<P, K, L>` for the parameter set's matrix shape.
macro_rules! with_dims {
    ($p:ty, $f:ident($($arg:expr),* $(,)?)) => {
        match (<$p>::K, <$p>::L) {
            (4, 4) => $f::<$p, 4, 4>($($arg),*),
            (6, 5) => $f::<$p, 6, 5>($($arg),*),
            (8, 7) => $f::<$p, 8, 7>($($arg),*),
            _ => unreachable!(),
        }
    };
}

mod packing;
mod params;
mod types;

use core::marker::PhantomData;

use crystals_math::dilithium::{
    Gamma1Width, Gamma2, NttMatrix, NttPolynomial, NttVector, Polynomial, Vector,
    encode::unpack_z,
};
use ctutils::CtEq;
use rand_core::CryptoRng;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, transmute_ref};
use zeroize::Zeroize;

pub use params::{CRHBYTES, Dilithium2, Dilithium3, Dilithium5, SignParams};
pub use types::{PublicKey, SecretKey, Signature};

use self::{
    packing::{SecretParts, pack_pk, pack_sig, pack_sk, pack_w1_vec, unpack_pk, unpack_sig, unpack_sk},
    params::{MAX_POLYVECW1_BYTES, MAX_POLYZ_BYTES},
};
use crate::{
    Error, hash,
    params::{ByteArray, SYMBYTES},
};

/// Signing gives up with [`Error::RetryBudgetExceeded`] after this many
/// rejected masks. The per-polynomial mask nonce `L * kappa + i` stays
/// below `2^16` for every attempt.
pub const MAX_SIGN_ATTEMPTS: u32 = 1000;

const _: () = assert!(7 * MAX_SIGN_ATTEMPTS as usize + 6 <= u16::MAX as usize);

/// `SHAKE256(zeta)` split into the three key-generation seeds.
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
struct SeedExpansion {
    rho: [u8; SYMBYTES],
    rho_prime: [u8; CRHBYTES],
    key: [u8; SYMBYTES],
}

/// `A` from `rho`; entry `(i, j)` uses stream nonce `256 * i + j`.
fn expand_a<const K: usize, const L: usize>(rho: &[u8; SYMBYTES]) -> NttMatrix<K, L> {
    NttMatrix::from_fn(|i, j| {
        let mut xof = hash::stream128(rho, ((i << 8) + j) as u16);
        NttPolynomial::sample_uniform(|buf| xof.squeeze(buf))
    })
}

fn sample_eta<P: SignParams>(seed: &[u8; CRHBYTES], nonce: u16) -> Polynomial {
    let mut xof = hash::stream256(seed, nonce);
    Polynomial::sample_eta::<P::Eta>(|buf| xof.squeeze(buf))
}

/// Mask vector `y` for attempt `kappa`, coefficients in `(-γ₁, γ₁]`.
fn sample_mask<P: SignParams, const L: usize>(rho_prime: &[u8; CRHBYTES], kappa: u16) -> Vector<L> {
    let mut buf = [0u8; MAX_POLYZ_BYTES];
    let buf = &mut buf[..P::POLYZ_BYTES];
    let mask = Vector::from_fn(|i| {
        hash::stream256(rho_prime, L as u16 * kappa + i as u16).squeeze(buf);
        let mut p = Polynomial::zero();
        unpack_z::<P::Gamma1>(p.coeffs_mut(), buf);
        p
    });
    buf.zeroize();
    mask
}

fn challenge<P: SignParams>(c_tilde: &[u8; SYMBYTES]) -> NttPolynomial {
    let mut xof = hash::xof256(c_tilde);
    Polynomial::challenge(P::TAU, |buf| xof.squeeze(buf)).ntt()
}

/// `SHAKE256(mu || w1)`, the challenge seed.
fn commit<P: SignParams, const K: usize>(mu: &[u8; CRHBYTES], w1: &Vector<K>) -> [u8; SYMBYTES] {
    let mut w1_packed = [0u8; MAX_POLYVECW1_BYTES];
    pack_w1_vec::<P, K>(&mut w1_packed, w1);
    hash::shake256(&[&mu[..], &w1_packed[..P::POLYVECW1_BYTES]])
}

// -- key generation ----------------------------------------------------------

/// Deterministic key generation from a 32-byte seed.
#[must_use]
pub fn keypair_derand<P: SignParams>(seed: &[u8; SYMBYTES]) -> (PublicKey<P>, SecretKey<P>) {
    let mut pk = P::PkArray::zeroed();
    let mut sk = P::SkArray::zeroed();
    with_dims!(P, keypair_inner(pk.as_mut(), sk.as_mut(), seed));
    (PublicKey::from_bytes(pk), SecretKey::from_bytes(sk))
}

/// Randomized key generation.
pub fn keypair<P: SignParams>(rng: &mut impl CryptoRng) -> (PublicKey<P>, SecretKey<P>) {
    let mut seed = [0u8; SYMBYTES];
    rng.fill_bytes(&mut seed);
    let keys = keypair_derand::<P>(&seed);
    seed.zeroize();
    keys
}

fn keypair_inner<P: SignParams, const K: usize, const L: usize>(
    pk: &mut [u8], sk: &mut [u8], seed: &[u8; SYMBYTES],
) {
    let mut seedbuf: [u8; 2 * SYMBYTES + CRHBYTES] = hash::shake256(&[&seed[..]]);
    let seeds: &SeedExpansion = transmute_ref!(&seedbuf);

    let a = expand_a::<K, L>(&seeds.rho);
    let s1 = Vector::<L>::from_fn(|i| sample_eta::<P>(&seeds.rho_prime, i as u16));
    let s2 = Vector::<K>::from_fn(|i| sample_eta::<P>(&seeds.rho_prime, (L + i) as u16));

    // t = A * s1 + s2
    let mut s1_hat = s1.ntt();
    let mut t_hat = a.mul_vec(&s1_hat);
    t_hat.reduce();
    let mut t = t_hat.ntt_inverse();
    t += &s2;
    t.caddq();
    let (t1, t0) = t.power2round();

    pack_pk::<P, K>(pk, &seeds.rho, &t1);
    let tr: [u8; SYMBYTES] = hash::shake256(&[&pk[..P::PK_BYTES]]);

    let parts = SecretParts {
        rho: seeds.rho,
        key: seeds.key,
        tr,
        s1,
        s2,
        t0,
    };
    pack_sk::<P, K, L>(sk, &parts);

    s1_hat.zeroize();
    t_hat.zeroize();
    t.zeroize();
    seedbuf.zeroize();
}

// -- signing -----------------------------------------------------------------

/// Why one signing attempt was thrown away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    /// `‖z‖∞ ≥ γ₁ − β`.
    ZNorm,
    /// `‖w0 − c·s2‖∞ ≥ γ₂ − β`.
    LowBits,
    /// `‖c·t0‖∞ ≥ γ₂`.
    CT0Norm,
    /// More than `ω` hint bits.
    HintWeight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attempt {
    /// The signature has been written out.
    Accepted,
    Rejected(Rejection),
}

/// Per-signature state shared by all attempts.
struct Signer<P: SignParams, const K: usize, const L: usize> {
    a: NttMatrix<K, L>,
    s1_hat: NttVector<L>,
    s2_hat: NttVector<K>,
    t0_hat: NttVector<K>,
    mu: [u8; CRHBYTES],
    rho_prime: [u8; CRHBYTES],
    _params: PhantomData<P>,
}

impl<P: SignParams, const K: usize, const L: usize> Signer<P, K, L> {
    fn new(parts: &SecretParts<K, L>, msg: &[u8], rnd: Option<&[u8; CRHBYTES]>) -> Self {
        let mu: [u8; CRHBYTES] = hash::shake256(&[&parts.tr[..], msg]);
        let rho_prime = match rnd {
            Some(rnd) => *rnd,
            None => hash::shake256(&[&parts.key[..], &mu[..]]),
        };
        Self {
            a: expand_a(&parts.rho),
            s1_hat: parts.s1.ntt(),
            s2_hat: parts.s2.ntt(),
            t0_hat: parts.t0.ntt(),
            mu,
            rho_prime,
            _params: PhantomData,
        }
    }

    fn attempt(&self, kappa: u16, sig: &mut [u8]) -> Attempt {
        let mut y = sample_mask::<P, L>(&self.rho_prime, kappa);
        let outcome = self.try_mask(&y, sig);
        y.zeroize();
        outcome
    }

    fn try_mask(&self, y: &Vector<L>, sig: &mut [u8]) -> Attempt {
        let gamma1 = <P::Gamma1 as Gamma1Width>::GAMMA1;
        let gamma2 = <P::Gamma2 as Gamma2>::GAMMA2;

        // w = A * y, split into high and low parts
        let mut w_hat = self.a.mul_vec(&y.ntt());
        w_hat.reduce();
        let mut w = w_hat.ntt_inverse();
        w.caddq();
        let (w1, mut w0) = w.decompose::<P::Gamma2>();

        let c_tilde = commit::<P, K>(&self.mu, &w1);
        let c_hat = challenge::<P>(&c_tilde);

        // z = y + c * s1
        let mut z = self.s1_hat.pointwise_poly(&c_hat).ntt_inverse();
        z += y;
        z.reduce();
        if z.exceeds_bound(gamma1 - P::BETA) {
            return Attempt::Rejected(Rejection::ZNorm);
        }

        // r0 = LowBits(w - c * s2)
        w0 -= &self.s2_hat.pointwise_poly(&c_hat).ntt_inverse();
        w0.reduce();
        if w0.exceeds_bound(gamma2 - P::BETA) {
            return Attempt::Rejected(Rejection::LowBits);
        }

        let mut ct0 = self.t0_hat.pointwise_poly(&c_hat).ntt_inverse();
        ct0.reduce();
        if ct0.exceeds_bound(gamma2) {
            return Attempt::Rejected(Rejection::CT0Norm);
        }

        w0 += &ct0;
        let (h, weight) = Vector::make_hint::<P::Gamma2>(&w0, &w1);
        if weight > P::OMEGA {
            return Attempt::Rejected(Rejection::HintWeight);
        }

        pack_sig::<P, K, L>(sig, &c_tilde, &z, &h);
        Attempt::Accepted
    }
}

impl<P: SignParams, const K: usize, const L: usize> Drop for Signer<P, K, L> {
    fn drop(&mut self) {
        self.s1_hat.zeroize();
        self.s2_hat.zeroize();
        self.t0_hat.zeroize();
        self.rho_prime.zeroize();
    }
}

fn sign_inner<P: SignParams, const K: usize, const L: usize>(
    sig: &mut [u8], sk: &[u8], msg: &[u8], rnd: Option<&[u8; CRHBYTES]>, max_attempts: u32,
) -> Result<(), Error> {
    debug_assert!(max_attempts <= MAX_SIGN_ATTEMPTS);
    let parts = unpack_sk::<P, K, L>(sk)?;
    let signer = Signer::<P, K, L>::new(&parts, msg, rnd);

    for kappa in 0..max_attempts {
        match signer.attempt(kappa as u16, sig) {
            Attempt::Accepted => {
                tracing::trace!(attempts = kappa + 1, "signature accepted");
                return Ok(());
            }
            Attempt::Rejected(reason) => {
                tracing::trace!(attempt = kappa, ?reason, "signing attempt rejected");
            }
        }
    }

    tracing::warn!(attempts = max_attempts, "signing retry budget exhausted");
    Err(Error::RetryBudgetExceeded {
        attempts: max_attempts,
    })
}

fn sign_with<P: SignParams>(
    sk: &SecretKey<P>, msg: &[u8], rnd: Option<&[u8; CRHBYTES]>,
) -> Result<Signature<P>, Error> {
    let mut sig = P::SigArray::zeroed();
    with_dims!(P, sign_inner(sig.as_mut(), sk.as_bytes(), msg, rnd, MAX_SIGN_ATTEMPTS))?;
    Ok(Signature::from_bytes(sig))
}

/// Deterministic signing: the mask seed is derived from the key and the
/// message, so equal inputs give equal signatures.
///
/// # Errors
///
/// [`Error::MalformedKey`] if the secret key has out-of-range coefficients,
/// [`Error::RetryBudgetExceeded`] if no mask was accepted.
pub fn sign<P: SignParams>(sk: &SecretKey<P>, msg: &[u8]) -> Result<Signature<P>, Error> {
    sign_with(sk, msg, None)
}

/// Randomized signing: the mask seed is 64 fresh random bytes.
///
/// # Errors
///
/// As for [`sign`].
pub fn sign_randomized<P: SignParams>(
    sk: &SecretKey<P>, msg: &[u8], rng: &mut impl CryptoRng,
) -> Result<Signature<P>, Error> {
    let mut rnd = [0u8; CRHBYTES];
    rng.fill_bytes(&mut rnd);
    let sig = sign_with(sk, msg, Some(&rnd));
    rnd.zeroize();
    sig
}

// -- verification ------------------------------------------------------------

fn verify_inner<P: SignParams, const K: usize, const L: usize>(
    pk: &[u8], msg: &[u8], sig: &[u8],
) -> Result<(), Error> {
    let (rho, mut t1) = unpack_pk::<P, K>(pk);
    let (c_tilde, z, h) = unpack_sig::<P, K, L>(sig)?;
    if z.exceeds_bound(<P::Gamma1 as Gamma1Width>::GAMMA1 - P::BETA) {
        return Err(Error::InvalidSignature);
    }

    let tr: [u8; SYMBYTES] = hash::shake256(&[&pk[..P::PK_BYTES]]);
    let mu: [u8; CRHBYTES] = hash::shake256(&[&tr[..], msg]);
    let c_hat = challenge::<P>(&c_tilde);

    // w1' = UseHint(h, A * z - c * t1 * 2^d)
    let a = expand_a::<K, L>(&rho);
    let mut w_hat = a.mul_vec(&z.ntt());
    t1.shiftl();
    w_hat -= &t1.ntt().pointwise_poly(&c_hat);
    w_hat.reduce();
    let mut w = w_hat.ntt_inverse();
    w.caddq();
    let w1 = w.use_hint::<P::Gamma2>(&h);

    let c_check = commit::<P, K>(&mu, &w1);
    if c_tilde.ct_eq(&c_check).to_bool() {
        Ok(())
    } else {
        Err(Error::InvalidSignature)
    }
}

/// Verify `sig` on `msg` under `pk`.
///
/// # Errors
///
/// [`Error::MalformedSignature`] if the hint encoding is not canonical,
/// [`Error::InvalidSignature`] if the signature does not verify.
pub fn verify<P: SignParams>(pk: &PublicKey<P>, msg: &[u8], sig: &Signature<P>) -> Result<(), Error> {
    let result = with_dims!(P, verify_inner(pk.as_bytes(), msg, sig.as_bytes()));
    if let Err(err) = result {
        tracing::debug!(%err, "signature rejected");
    }
    result
}

/// Check the `η` fields of a packed secret key.
pub(crate) fn validate_sk<P: SignParams>(sk: &[u8]) -> Result<(), Error> {
    fn inner<P: SignParams, const K: usize, const L: usize>(sk: &[u8]) -> Result<(), Error> {
        unpack_sk::<P, K, L>(sk).map(drop)
    }
    with_dims!(P, inner(sk))
}
