//! Dilithium parameter definitions. [`SignParams`] trait and marker types
//! [`Dilithium2`], [`Dilithium3`], [`Dilithium5`].

use crystals_math::dilithium::{
    Eta2, Eta4, EtaWidth, Gamma1Pow17, Gamma1Pow19, Gamma1Width, Gamma2, Gamma2Q32, Gamma2Q88,
    encode::{T0_POLY_BYTES, T1_POLY_BYTES, w1_poly_bytes},
};

use crate::params::{ByteArray, SYMBYTES, sealed::Sealed};

/// Bytes of the message representative `mu` and the mask seed `rho'`.
pub const CRHBYTES: usize = 64;

/// Upper bound on `SignParams::POLYVECW1_BYTES` over all parameter sets.
pub(crate) const MAX_POLYVECW1_BYTES: usize = 1024;
/// Upper bound on `SignParams::POLYZ_BYTES`.
pub(crate) const MAX_POLYZ_BYTES: usize = 640;

/// Dilithium parameter set implemented by Dilithium2, Dilithium3, Dilithium5.
///
/// The trait is sealed. Dispatch is specialised on the matrix shape of the
/// built-in sets, so no other implementations are accepted.
///
/// ```compile_fail
/// struct Custom;
/// impl crystals_rs::params::sealed::Sealed for Custom {}
/// ```
pub trait SignParams: Sealed + 'static {
    /// Rows of `A` (length of `s2`, `t`, `w`, `h`).
    const K: usize;
    /// Columns of `A` (length of `s1`, `y`, `z`).
    const L: usize;
    /// Secret coefficient bound.
    type Eta: EtaWidth;
    /// Mask range.
    type Gamma1: Gamma1Width;
    /// Low-order rounding range.
    type Gamma2: Gamma2;
    /// Number of `±1` coefficients in the challenge.
    const TAU: usize;
    /// `τ · η`, the bound on `‖c·s‖∞`.
    const BETA: i32;
    /// Maximum hint weight.
    const OMEGA: usize;

    const POLYETA_BYTES: usize = <Self::Eta as EtaWidth>::POLY_BYTES;
    const POLYZ_BYTES: usize = <Self::Gamma1 as Gamma1Width>::POLY_BYTES;
    const POLYW1_BYTES: usize = w1_poly_bytes::<Self::Gamma2>();
    /// Packed `w1`, the challenge hash input after `mu`.
    const POLYVECW1_BYTES: usize = Self::K * Self::POLYW1_BYTES;

    /// Public key bytes: `rho || t1`.
    const PK_BYTES: usize = SYMBYTES + Self::K * T1_POLY_BYTES;
    /// Secret key bytes: `rho || key || tr || s1 || s2 || t0`.
    const SK_BYTES: usize = 3 * SYMBYTES
        + (Self::L + Self::K) * Self::POLYETA_BYTES
        + Self::K * T0_POLY_BYTES;
    /// Signature bytes: `c~ || z || h`.
    const SIG_BYTES: usize = SYMBYTES + Self::L * Self::POLYZ_BYTES + Self::OMEGA + Self::K;

    type PkArray: ByteArray;
    type SkArray: ByteArray;
    type SigArray: ByteArray;
}

/// Dilithium2 parameter set, NIST security level 2.
#[derive(Debug, Clone, Copy)]
pub struct Dilithium2;

impl Sealed for Dilithium2 {}

impl SignParams for Dilithium2 {
    const K: usize = 4;
    const L: usize = 4;
    type Eta = Eta2;
    type Gamma1 = Gamma1Pow17;
    type Gamma2 = Gamma2Q88;
    const TAU: usize = 39;
    const BETA: i32 = 78;
    const OMEGA: usize = 80;

    type PkArray = [u8; 1312];
    type SkArray = [u8; 2528];
    type SigArray = [u8; 2420];
}

/// Dilithium3 parameter set, NIST security level 3.
#[derive(Debug, Clone, Copy)]
pub struct Dilithium3;

impl Sealed for Dilithium3 {}

impl SignParams for Dilithium3 {
    const K: usize = 6;
    const L: usize = 5;
    type Eta = Eta4;
    type Gamma1 = Gamma1Pow19;
    type Gamma2 = Gamma2Q32;
    const TAU: usize = 49;
    const BETA: i32 = 196;
    const OMEGA: usize = 55;

    type PkArray = [u8; 1952];
    type SkArray = [u8; 4000];
    type SigArray = [u8; 3293];
}

/// Dilithium5 parameter set, NIST security level 5.
#[derive(Debug, Clone, Copy)]
pub struct Dilithium5;

impl Sealed for Dilithium5 {}

impl SignParams for Dilithium5 {
    const K: usize = 8;
    const L: usize = 7;
    type Eta = Eta2;
    type Gamma1 = Gamma1Pow19;
    type Gamma2 = Gamma2Q32;
    const TAU: usize = 60;
    const BETA: i32 = 120;
    const OMEGA: usize = 75;

    type PkArray = [u8; 2592];
    type SkArray = [u8; 4864];
    type SigArray = [u8; 4595];
}

const _: () = {
    macro_rules! check_params {
        ($t:ty, $pk:expr, $sk:expr, $sig:expr) => {
            assert!(<$t>::PK_BYTES == $pk && <<$t as SignParams>::PkArray as ByteArray>::LEN == $pk);
            assert!(<$t>::SK_BYTES == $sk && <<$t as SignParams>::SkArray as ByteArray>::LEN == $sk);
            assert!(<$t>::SIG_BYTES == $sig && <<$t as SignParams>::SigArray as ByteArray>::LEN == $sig);
            assert!(<$t>::BETA == <$t>::TAU as i32 * <<$t as SignParams>::Eta as EtaWidth>::ETA);
            assert!(<$t>::POLYVECW1_BYTES <= MAX_POLYVECW1_BYTES);
            assert!(<$t>::POLYZ_BYTES <= MAX_POLYZ_BYTES);
            // hint indices and counts are single bytes
            assert!(<$t>::OMEGA < 256);
        };
    }
    check_params!(Dilithium2, 1312, 2528, 2420);
    check_params!(Dilithium3, 1952, 4000, 3293);
    check_params!(Dilithium5, 2592, 4864, 4595);
};
