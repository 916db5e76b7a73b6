//! Definitions shared by both schemes.

use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
use zeroize::Zeroize;

/// Size in bytes of seeds, hashes and messages.
pub const SYMBYTES: usize = 32;

/// Fixed-size byte buffer usable as a key, ciphertext or signature backing
/// store.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + core::fmt::Debug + Zeroize + Send + Sync + 'static {
    /// Array length in bytes.
    const LEN: usize;

    /// Return a zero-filled instance.
    fn zeroed() -> Self;

    /// Copy out of a slice, checking the length.
    fn try_from_slice(bytes: &[u8]) -> Result<Self, crate::Error> {
        if bytes.len() != Self::LEN {
            return Err(crate::Error::InvalidLength {
                expected: Self::LEN,
                actual: bytes.len(),
            });
        }
        let mut arr = Self::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(arr)
    }
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}

pub(crate) mod sealed {
    /// Implemented only by the parameter sets defined in this crate.
    pub trait Sealed {}
}

/// Two consecutive 32-byte halves of a 64-byte hash or seed.
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub(crate) struct Sym2(pub [u8; SYMBYTES], pub [u8; SYMBYTES]);

#[cfg(test)]
mod tests {
    use zerocopy::transmute_ref;

    use super::*;

    #[test]
    fn sym2_splits_halves() {
        let buf: [u8; 2 * SYMBYTES] = core::array::from_fn(|i| i as u8);
        let halves: &Sym2 = transmute_ref!(&buf);
        assert_eq!(halves.0[0], 0);
        assert_eq!(halves.1[0], 32);
        assert_eq!(halves.1[31], 63);
    }

    #[test]
    fn try_from_slice_checks_length() {
        assert_eq!(
            <[u8; 4]>::try_from_slice(&[1, 2, 3]),
            Err(crate::Error::InvalidLength {
                expected: 4,
                actual: 3
            })
        );
        assert_eq!(<[u8; 3]>::try_from_slice(&[1, 2, 3]), Ok([1, 2, 3]));
    }
}
