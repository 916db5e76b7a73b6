//! Kyber parameter definitions. [`KemParams`] trait and marker types
//! [`Kyber512`], [`Kyber768`], [`Kyber1024`].

use crystals_math::{
    N,
    kyber::{CbdWidth, CompressWidth, D4, D5, D10, D11, Eta2, Eta3, POLYBYTES},
};

use crate::params::{ByteArray, SYMBYTES, sealed::Sealed};

/// Size in bytes of the shared-secret output.
pub const SSBYTES: usize = 32;

/// Kyber parameter set implemented by Kyber512, Kyber768, Kyber1024.
///
/// The trait is sealed. Dispatch is specialised on the module rank of the
/// built-in sets, so no other implementations are accepted.
///
/// ```compile_fail
/// struct Custom;
/// impl crystals_rs::params::sealed::Sealed for Custom {}
/// ```
pub trait KemParams: Sealed + 'static {
    /// Module rank (k = 2, 3, or 4).
    const K: usize;
    /// CBD noise width for key generation secrets and the encryption `r`.
    type Eta1: CbdWidth;
    /// CBD noise width for the encryption error terms.
    type Eta2: CbdWidth;
    /// Compression width of the vector ciphertext component `u`.
    type Du: CompressWidth;
    /// Compression width of the scalar ciphertext component `v`.
    type Dv: CompressWidth;

    /// K * POLYBYTES - serialised polynomial vector.
    const POLYVEC_BYTES: usize = Self::K * POLYBYTES;
    /// Compressed bytes of `u`.
    const POLYVEC_COMPRESSED_BYTES: usize = Self::K * <Self::Du as CompressWidth>::POLY_BYTES;
    /// Compressed bytes of `v`.
    const POLY_COMPRESSED_BYTES: usize = <Self::Dv as CompressWidth>::POLY_BYTES;
    /// IND-CPA public key bytes (POLYVEC_BYTES + SYMBYTES).
    const INDCPA_PK_BYTES: usize = Self::POLYVEC_BYTES + SYMBYTES;
    /// IND-CPA secret key bytes (`POLYVEC_BYTES`).
    const INDCPA_SK_BYTES: usize = Self::POLYVEC_BYTES;
    /// IND-CPA ciphertext bytes.
    const INDCPA_BYTES: usize = Self::POLYVEC_COMPRESSED_BYTES + Self::POLY_COMPRESSED_BYTES;
    /// KEM public key bytes.
    const PK_BYTES: usize = Self::INDCPA_PK_BYTES;
    /// KEM secret key bytes: `indcpa_sk || pk || H(pk) || z`.
    const SK_BYTES: usize = Self::INDCPA_SK_BYTES + Self::PK_BYTES + 2 * SYMBYTES;
    /// KEM ciphertext bytes.
    const CT_BYTES: usize = Self::INDCPA_BYTES;

    /// Backing array for public keys.
    type PkArray: ByteArray;
    /// Backing array for secret keys.
    type SkArray: ByteArray;
    /// Backing array for ciphertexts.
    type CtArray: ByteArray;
}

/// Kyber-512 parameter set (k = 2, NIST security level 1).
#[derive(Debug, Clone, Copy)]
pub struct Kyber512;

impl Sealed for Kyber512 {}

impl KemParams for Kyber512 {
    const K: usize = 2;
    type Eta1 = Eta3;
    type Eta2 = Eta2;
    type Du = D10;
    type Dv = D4;

    type PkArray = [u8; 800];
    type SkArray = [u8; 1632];
    type CtArray = [u8; 768];
}

/// Kyber-768 parameter set (k = 3, NIST security level 3).
#[derive(Debug, Clone, Copy)]
pub struct Kyber768;

impl Sealed for Kyber768 {}

impl KemParams for Kyber768 {
    const K: usize = 3;
    type Eta1 = Eta2;
    type Eta2 = Eta2;
    type Du = D10;
    type Dv = D4;

    type PkArray = [u8; 1184];
    type SkArray = [u8; 2400];
    type CtArray = [u8; 1088];
}

/// Kyber-1024 parameter set (k = 4, NIST security level 5).
#[derive(Debug, Clone, Copy)]
pub struct Kyber1024;

impl Sealed for Kyber1024 {}

impl KemParams for Kyber1024 {
    const K: usize = 4;
    type Eta1 = Eta2;
    type Eta2 = Eta2;
    type Du = D11;
    type Dv = D5;

    type PkArray = [u8; 1568];
    type SkArray = [u8; 3168];
    type CtArray = [u8; 1568];
}

const _: () = {
    macro_rules! check_params {
        ($t:ty, $pk:expr, $sk:expr, $ct:expr) => {
            assert!(<$t>::PK_BYTES == $pk && <<$t as KemParams>::PkArray as ByteArray>::LEN == $pk);
            assert!(<$t>::SK_BYTES == $sk && <<$t as KemParams>::SkArray as ByteArray>::LEN == $sk);
            assert!(<$t>::CT_BYTES == $ct && <<$t as KemParams>::CtArray as ByteArray>::LEN == $ct);
            assert!(<$t>::POLYVEC_COMPRESSED_BYTES == <$t>::K * N * <<$t as KemParams>::Du as CompressWidth>::D as usize / 8);
        };
    }
    check_params!(Kyber512, 800, 1632, 768);
    check_params!(Kyber768, 1184, 2400, 1088);
    check_params!(Kyber1024, 1568, 3168, 1568);
};
