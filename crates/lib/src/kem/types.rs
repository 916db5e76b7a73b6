//! Kyber key, ciphertext and shared-secret types.
//!
//! All types wrap typed byte arrays parameterised by [`KemParams`].
//! Secret types zeroize on drop and redact themselves in `Debug`.

use crystals_math::kyber::encode::is_canonical;
use ctutils::CtEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::params::{KemParams, SSBYTES};
use crate::{
    Error, hash,
    params::{ByteArray, SYMBYTES},
};

/// Kyber encapsulation key (public key): `Encode_12(t) || rho`.
pub struct PublicKey<P: KemParams> {
    pub(crate) bytes: P::PkArray,
}

impl<P: KemParams> PublicKey<P> {
    /// Wrap raw bytes without validation.
    #[must_use]
    pub const fn from_bytes(bytes: P::PkArray) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    #[must_use]
    pub fn into_bytes(self) -> P::PkArray {
        self.bytes
    }
}

impl<P: KemParams> TryFrom<&[u8]> for PublicKey<P> {
    type Error = Error;

    /// Length check plus the modulus check: every 12-bit field of `t`
    /// must be below q.
    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        let bytes = P::PkArray::try_from_slice(bytes)?;
        if !is_canonical(&bytes.as_ref()[..P::POLYVEC_BYTES]) {
            return Err(Error::MalformedKey);
        }
        Ok(Self { bytes })
    }
}

impl<P: KemParams> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KemParams> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: KemParams> PartialEq for PublicKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<P: KemParams> Eq for PublicKey<P> {}

impl<P: KemParams> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// Kyber decapsulation key (secret key): `indcpa_sk || pk || H(pk) || z`.
pub struct SecretKey<P: KemParams> {
    pub(crate) bytes: P::SkArray,
}

impl<P: KemParams> SecretKey<P> {
    /// Wrap raw bytes without validation.
    #[must_use]
    pub const fn from_bytes(bytes: P::SkArray) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    /// Move the bytes out; the emptied key is still wiped on drop.
    #[must_use]
    pub fn into_bytes(mut self) -> P::SkArray {
        core::mem::replace(&mut self.bytes, P::SkArray::zeroed())
    }

    pub(crate) fn indcpa_sk(&self) -> &[u8] {
        &self.bytes.as_ref()[..P::INDCPA_SK_BYTES]
    }

    pub(crate) fn pk_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[P::INDCPA_SK_BYTES..P::INDCPA_SK_BYTES + P::PK_BYTES]
    }

    pub(crate) fn pk_hash(&self) -> &[u8] {
        let off = P::SK_BYTES - 2 * SYMBYTES;
        &self.bytes.as_ref()[off..off + SYMBYTES]
    }

    pub(crate) fn z(&self) -> [u8; SYMBYTES] {
        let mut z = [0u8; SYMBYTES];
        z.copy_from_slice(&self.bytes.as_ref()[P::SK_BYTES - SYMBYTES..]);
        z
    }

    /// The embedded public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey<P> {
        let mut bytes = P::PkArray::zeroed();
        bytes.as_mut().copy_from_slice(self.pk_bytes());
        PublicKey { bytes }
    }
}

impl<P: KemParams> TryFrom<&[u8]> for SecretKey<P> {
    type Error = Error;

    /// Length check, modulus check on `s` and the embedded `t`, and
    /// agreement of the embedded `H(pk)` with the embedded public key.
    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        let sk = Self {
            bytes: P::SkArray::try_from_slice(bytes)?,
        };
        let pk_hash = hash::hash_h(sk.pk_bytes());
        let valid = is_canonical(sk.indcpa_sk())
            && is_canonical(&sk.pk_bytes()[..P::POLYVEC_BYTES])
            && sk.pk_hash().ct_eq(&pk_hash[..]).to_bool();
        if valid { Ok(sk) } else { Err(Error::MalformedKey) }
    }
}

impl<P: KemParams> AsRef<[u8]> for SecretKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KemParams> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: KemParams> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: KemParams> ZeroizeOnDrop for SecretKey<P> {}

impl<P: KemParams> core::fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// Kyber ciphertext: `Compress_du(u) || Compress_dv(v)`.
pub struct Ciphertext<P: KemParams> {
    pub(crate) bytes: P::CtArray,
}

impl<P: KemParams> Ciphertext<P> {
    #[must_use]
    pub const fn from_bytes(bytes: P::CtArray) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    #[must_use]
    pub fn into_bytes(self) -> P::CtArray {
        self.bytes
    }

    pub(crate) fn zeroed() -> Self {
        Self {
            bytes: P::CtArray::zeroed(),
        }
    }
}

impl<P: KemParams> TryFrom<&[u8]> for Ciphertext<P> {
    type Error = Error;

    /// Every byte string of the right length is a ciphertext.
    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            bytes: P::CtArray::try_from_slice(bytes)?,
        })
    }
}

impl<P: KemParams> AsRef<[u8]> for Ciphertext<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: KemParams> Clone for Ciphertext<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: KemParams> PartialEq for Ciphertext<P> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<P: KemParams> Eq for Ciphertext<P> {}

impl<P: KemParams> core::fmt::Debug for Ciphertext<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// Kyber shared secret (32 bytes).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SSBYTES],
}

impl SharedSecret {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SSBYTES] {
        &self.bytes
    }

    /// Constant-time comparison.
    #[must_use]
    pub fn ct_eq(&self, other: &Self) -> bool {
        self.bytes[..].ct_eq(&other.bytes[..]).to_bool()
    }
}

impl From<[u8; SSBYTES]> for SharedSecret {
    #[inline]
    fn from(bytes: [u8; SSBYTES]) -> Self {
        Self { bytes }
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kem::{Kyber512, Kyber768, keypair_derand};

    #[test]
    fn debug_redacts_secrets() {
        let (_, sk) = keypair_derand::<Kyber512>(&[0u8; 64]);
        assert_eq!(format!("{sk:?}"), "SecretKey { len: 1632, .. }");
        let ss = SharedSecret::from([0xAA; SSBYTES]);
        assert_eq!(format!("{ss:?}"), "SharedSecret { .. }");
    }

    #[test]
    fn public_key_from_secret_key() {
        let (pk, sk) = keypair_derand::<Kyber768>(&[5u8; 64]);
        assert_eq!(sk.public_key(), pk);
    }

    #[test]
    fn wrong_lengths_rejected() {
        let short = [0u8; 10];
        assert_eq!(
            PublicKey::<Kyber512>::try_from(&short[..]).unwrap_err(),
            Error::InvalidLength {
                expected: 800,
                actual: 10
            }
        );
        assert!(matches!(
            SecretKey::<Kyber512>::try_from(&short[..]),
            Err(Error::InvalidLength { expected: 1632, .. })
        ));
        assert!(matches!(
            Ciphertext::<Kyber512>::try_from(&short[..]),
            Err(Error::InvalidLength { expected: 768, .. })
        ));
    }

    #[test]
    fn into_bytes_roundtrip() {
        let (pk, sk) = keypair_derand::<Kyber512>(&[1u8; 64]);
        let sk_bytes = sk.clone().into_bytes();
        assert_eq!(&sk_bytes[..], sk.as_bytes());
        assert!(SecretKey::<Kyber512>::try_from(&sk_bytes[..]).is_ok());
        let pk_bytes = pk.clone().into_bytes();
        assert_eq!(PublicKey::<Kyber512>::from_bytes(pk_bytes), pk);
    }
}
