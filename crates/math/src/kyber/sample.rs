//! Deterministic sampling: sealed CBD noise traits and rejection-uniform.

use super::Q;
use crate::{N, pack::unpack_bits};

mod sealed {
    pub trait Sealed {}
}

/// Sealed trait for centred-binomial noise of parameter `ETA`.
pub trait CbdWidth: sealed::Sealed {
    const ETA: usize;
    /// PRF output consumed per polynomial: `2 * ETA` bits per coefficient.
    const BUF_BYTES: usize = Self::ETA * N / 4;

    /// Coefficient `i` is `popcount(a) - popcount(b)` where `a` and `b` are
    /// the consecutive `ETA`-bit fields at bit offset `2 * ETA * i`.
    #[inline]
    fn sample(r: &mut [i16; N], buf: &[u8]) {
        debug_assert!(buf.len() >= Self::BUF_BYTES);
        let eta = Self::ETA as u32;
        let mask = (1u32 << eta) - 1;
        unpack_bits(r, &buf[..Self::BUF_BYTES], 2 * eta, |v| {
            (v & mask).count_ones() as i16 - (v >> eta).count_ones() as i16
        });
    }
}

pub struct Eta2;
pub struct Eta3;

impl sealed::Sealed for Eta2 {}
impl CbdWidth for Eta2 {
    const ETA: usize = 2;
}

impl sealed::Sealed for Eta3 {}
impl CbdWidth for Eta3 {
    const ETA: usize = 3;
}

/// XOF bytes pulled per `fill` call: one SHAKE128 block.
pub const REJ_BLOCK_BYTES: usize = 168;

/// Fill `r` with uniform values in `[0, q)` from the byte stream produced by
/// repeated calls to `fill`.
///
/// The stream is read as consecutive 3-byte groups, each yielding two 12-bit
/// candidates; candidates `>= q` are dropped. Returns the number of
/// coefficients written, which is always `N`.
pub fn reject_uniform(r: &mut [i16; N], mut fill: impl FnMut(&mut [u8])) -> usize {
    let mut ctr = 0;
    let mut buf = [0u8; REJ_BLOCK_BYTES];

    while ctr < N {
        fill(&mut buf);
        for chunk in buf.chunks_exact(3) {
            let d1 = u16::from(chunk[0]) | (u16::from(chunk[1] & 0x0F) << 8);
            let d2 = u16::from(chunk[1] >> 4) | (u16::from(chunk[2]) << 4);
            for d in [d1, d2] {
                if ctr < N && d < Q as u16 {
                    r[ctr] = d as i16;
                    ctr += 1;
                }
            }
            if ctr == N {
                break;
            }
        }
    }
    ctr
}
