//! Rejection samplers and the sealed width markers for η and γ₁.
//!
//! Every sampler pulls XOF output one rate block at a time through `fill`;
//! none of them keeps partial bytes across blocks, so the result depends
//! only on the concatenated stream.

use super::Q;
use crate::N;

mod sealed {
    pub trait Sealed {}
}

/// SHAKE128 rate, the block size for [`reject_uniform`].
pub const STREAM128_BLOCK_BYTES: usize = 168;
/// SHAKE256 rate, the block size for [`reject_eta`] and [`challenge`].
pub const STREAM256_BLOCK_BYTES: usize = 136;

/// Secret-coefficient bound η.
pub trait EtaWidth: sealed::Sealed {
    const ETA: i32;
    /// Bits per packed coefficient `η - s`.
    const BITS: u32;
    const POLY_BYTES: usize = N * Self::BITS as usize / 8;

    /// Map a 4-bit candidate to a coefficient in `[-η, η]`, or reject it.
    fn from_nibble(t: u32) -> Option<i32>;
}

pub struct Eta2;
pub struct Eta4;

impl sealed::Sealed for Eta2 {}
impl EtaWidth for Eta2 {
    const ETA: i32 = 2;
    const BITS: u32 = 3;

    #[inline]
    fn from_nibble(t: u32) -> Option<i32> {
        // t mod 5 without a division
        (t < 15).then(|| 2 - (t - ((205 * t) >> 10) * 5) as i32)
    }
}

impl sealed::Sealed for Eta4 {}
impl EtaWidth for Eta4 {
    const ETA: i32 = 4;
    const BITS: u32 = 4;

    #[inline]
    fn from_nibble(t: u32) -> Option<i32> {
        (t < 9).then(|| 4 - t as i32)
    }
}

/// Masking range γ₁ for `y` and `z`.
pub trait Gamma1Width: sealed::Sealed {
    const GAMMA1: i32;
    /// Bits per packed coefficient `γ₁ - z`.
    const BITS: u32;
    const POLY_BYTES: usize = N * Self::BITS as usize / 8;
}

/// `γ₁ = 2^{17}`.
pub struct Gamma1Pow17;
/// `γ₁ = 2^{19}`.
pub struct Gamma1Pow19;

impl sealed::Sealed for Gamma1Pow17 {}
impl Gamma1Width for Gamma1Pow17 {
    const GAMMA1: i32 = 1 << 17;
    const BITS: u32 = 18;
}

impl sealed::Sealed for Gamma1Pow19 {}
impl Gamma1Width for Gamma1Pow19 {
    const GAMMA1: i32 = 1 << 19;
    const BITS: u32 = 20;
}

/// Uniform coefficients in `[0, q)` from 3-byte little-endian candidates
/// with the top bit cleared.
pub fn reject_uniform(r: &mut [i32; N], mut fill: impl FnMut(&mut [u8])) {
    let mut ctr = 0;
    let mut buf = [0u8; STREAM128_BLOCK_BYTES];
    while ctr < N {
        fill(&mut buf);
        for chunk in buf.chunks_exact(3) {
            let t = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], 0]) & 0x7F_FFFF;
            if t < Q as u32 {
                r[ctr] = t as i32;
                ctr += 1;
                if ctr == N {
                    break;
                }
            }
        }
    }
}

/// Coefficients in `[-η, η]`, two 4-bit candidates per byte (low nibble
/// first).
pub fn reject_eta<E: EtaWidth>(r: &mut [i32; N], mut fill: impl FnMut(&mut [u8])) {
    let mut ctr = 0;
    let mut buf = [0u8; STREAM256_BLOCK_BYTES];
    while ctr < N {
        fill(&mut buf);
        for &b in &buf {
            for t in [u32::from(b & 0x0F), u32::from(b >> 4)] {
                if ctr < N {
                    if let Some(c) = E::from_nibble(t) {
                        r[ctr] = c;
                        ctr += 1;
                    }
                }
            }
            if ctr == N {
                break;
            }
        }
    }
}

/// Sparse challenge with exactly `tau` coefficients in `{-1, 1}` and the rest
/// zero.
///
/// The first 8 bytes of the stream are the sign bits; each further byte is
/// a candidate position for an inside-out shuffle, rejected while it exceeds
/// the current index.
pub fn challenge(c: &mut [i32; N], tau: usize, mut fill: impl FnMut(&mut [u8])) {
    debug_assert!(tau <= N);
    let mut buf = [0u8; STREAM256_BLOCK_BYTES];
    fill(&mut buf);

    let mut sign_bytes = [0u8; 8];
    sign_bytes.copy_from_slice(&buf[..8]);
    let mut signs = u64::from_le_bytes(sign_bytes);
    let mut pos = 8;

    c.fill(0);
    for i in N - tau..N {
        let b = loop {
            if pos >= STREAM256_BLOCK_BYTES {
                fill(&mut buf);
                pos = 0;
            }
            let b = usize::from(buf[pos]);
            pos += 1;
            if b <= i {
                break b;
            }
        };
        c[i] = c[b];
        c[b] = 1 - 2 * (signs & 1) as i32;
        signs >>= 1;
    }
}
