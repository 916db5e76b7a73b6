//! Dilithium key and signature types.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{params::SignParams, validate_sk};
use crate::{Error, params::ByteArray};

/// Dilithium public key: `rho || t1`.
pub struct PublicKey<P: SignParams> {
    bytes: P::PkArray,
}

impl<P: SignParams> PublicKey<P> {
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

impl<P: SignParams> TryFrom<&[u8]> for PublicKey<P> {
    type Error = Error;

    /// Every 10-bit `t1` field is valid, so only the length is checked.
    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            bytes: P::PkArray::try_from_slice(bytes)?,
        })
    }
}

impl<P: SignParams> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: SignParams> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: SignParams> PartialEq for PublicKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<P: SignParams> Eq for PublicKey<P> {}

impl<P: SignParams> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// Dilithium secret key: `rho || key || tr || s1 || s2 || t0`.
pub struct SecretKey<P: SignParams> {
    bytes: P::SkArray,
}

impl<P: SignParams> SecretKey<P> {
    /// Wrap raw bytes without validation. Signing still rejects keys with
    /// out-of-range coefficients.
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
}

impl<P: SignParams> TryFrom<&[u8]> for SecretKey<P> {
    type Error = Error;

    /// Length check plus the range check on every `s1` and `s2` field.
    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        let sk = Self {
            bytes: P::SkArray::try_from_slice(bytes)?,
        };
        validate_sk::<P>(sk.as_bytes())?;
        Ok(sk)
    }
}

impl<P: SignParams> AsRef<[u8]> for SecretKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: SignParams> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: SignParams> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: SignParams> ZeroizeOnDrop for SecretKey<P> {}

impl<P: SignParams> core::fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// Dilithium signature: `c~ || z || h`.
pub struct Signature<P: SignParams> {
    bytes: P::SigArray,
}

impl<P: SignParams> Signature<P> {
    #[must_use]
    pub const fn from_bytes(bytes: P::SigArray) -> Self {
        Self { bytes }
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }

    #[must_use]
    pub fn into_bytes(self) -> P::SigArray {
        self.bytes
    }
}

impl<P: SignParams> TryFrom<&[u8]> for Signature<P> {
    type Error = Error;

    /// Length check only; the hint encoding is validated by `verify`.
    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        Ok(Self {
            bytes: P::SigArray::try_from_slice(bytes)?,
        })
    }
}

impl<P: SignParams> AsRef<[u8]> for Signature<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: SignParams> Clone for Signature<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: SignParams> PartialEq for Signature<P> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<P: SignParams> Eq for Signature<P> {}

impl<P: SignParams> core::fmt::Debug for Signature<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signature")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}
