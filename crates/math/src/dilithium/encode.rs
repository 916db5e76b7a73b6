//! Coefficient packings for keys and signatures.
//!
//! Signed fields are stored as an offset from their bound (`η - s`,
//! `2^{12} - t0`, `γ₁ - z`) so every packed value is non-negative.

use super::{
    D,
    rounding::Gamma2,
    sample::{EtaWidth, Gamma1Width},
};
use crate::{
    N,
    pack::{BitUnpacker, pack_bits, unpack_bits},
};

/// Bits per `t1` coefficient.
pub const T1_BITS: u32 = 23 - D;
/// Bytes of one packed `t1` polynomial.
pub const T1_POLY_BYTES: usize = N * T1_BITS as usize / 8;
/// Bytes of one packed `t0` polynomial.
pub const T0_POLY_BYTES: usize = N * D as usize / 8;

const T0_OFFSET: i32 = 1 << (D - 1);

pub fn pack_t1(r: &mut [u8], a: &[i32; N]) {
    pack_bits(r, T1_BITS, a.iter().map(|&c| c as u32));
}

pub fn unpack_t1(r: &mut [i32; N], a: &[u8]) {
    unpack_bits(r, a, T1_BITS, |v| v as i32);
}

pub fn pack_t0(r: &mut [u8], a: &[i32; N]) {
    pack_bits(r, D, a.iter().map(|&c| (T0_OFFSET - c) as u32));
}

pub fn unpack_t0(r: &mut [i32; N], a: &[u8]) {
    unpack_bits(r, a, D, |v| T0_OFFSET - v as i32);
}

pub fn pack_eta<E: EtaWidth>(r: &mut [u8], a: &[i32; N]) {
    pack_bits(r, E::BITS, a.iter().map(|&c| (E::ETA - c) as u32));
}

/// Unpack `η - s` fields. Returns `false` if any field exceeds `2η`, which
/// no honest key produces.
#[must_use]
pub fn unpack_eta<E: EtaWidth>(r: &mut [i32; N], a: &[u8]) -> bool {
    let mut ok = true;
    for (slot, v) in r.iter_mut().zip(BitUnpacker::new(a, E::BITS)) {
        ok &= v <= 2 * E::ETA as u32;
        *slot = E::ETA - v as i32;
    }
    ok
}

pub fn pack_z<G: Gamma1Width>(r: &mut [u8], a: &[i32; N]) {
    pack_bits(r, G::BITS, a.iter().map(|&c| (G::GAMMA1 - c) as u32));
}

/// Unpack `γ₁ - z` fields into `z in (-γ₁, γ₁]`.
pub fn unpack_z<G: Gamma1Width>(r: &mut [i32; N], a: &[u8]) {
    unpack_bits(r, a, G::BITS, |v| G::GAMMA1 - v as i32);
}

/// Pack high parts `w1` for hashing into the challenge.
pub fn pack_w1<G: Gamma2>(r: &mut [u8], a: &[i32; N]) {
    debug_assert!(a.iter().all(|&c| (0..=G::MAX_HIGH).contains(&c)));
    pack_bits(r, G::W1_BITS, a.iter().map(|&c| c as u32));
}

/// Bytes of one packed `w1` polynomial.
#[must_use]
pub const fn w1_poly_bytes<G: Gamma2>() -> usize {
    N * G::W1_BITS as usize / 8
}

const _: () = assert!(T1_POLY_BYTES == 320 && T0_POLY_BYTES == 416);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dilithium::{Eta2, Eta4, Gamma1Pow17, Gamma1Pow19, Gamma2Q32, Gamma2Q88};

    fn ramp(lo: i32, hi: i32) -> [i32; N] {
        let span = (hi - lo + 1) as usize;
        core::array::from_fn(|i| lo + ((i * 7) % span) as i32)
    }

    #[test]
    fn t1_roundtrip() {
        let a = ramp(0, 1023);
        let mut buf = [0u8; T1_POLY_BYTES];
        pack_t1(&mut buf, &a);
        let mut b = [0i32; N];
        unpack_t1(&mut b, &buf);
        assert_eq!(a, b);
    }

    #[test]
    fn t0_roundtrip_and_offset() {
        let a = ramp(-T0_OFFSET + 1, T0_OFFSET);
        let mut buf = [0u8; T0_POLY_BYTES];
        pack_t0(&mut buf, &a);
        let mut b = [0i32; N];
        unpack_t0(&mut b, &buf);
        assert_eq!(a, b);

        // t0 = 2^12 packs to zero
        let mut buf = [0u8; T0_POLY_BYTES];
        pack_t0(&mut buf, &[T0_OFFSET; N]);
        assert!(buf.iter().all(|&x| x == 0));
    }

    fn check_eta<E: EtaWidth>() {
        let a = ramp(-E::ETA, E::ETA);
        let mut buf = [0u8; 128];
        let buf = &mut buf[..E::POLY_BYTES];
        pack_eta::<E>(buf, &a);
        let mut b = [0i32; N];
        assert!(unpack_eta::<E>(&mut b, buf));
        assert_eq!(a, b);
    }

    #[test]
    fn eta_roundtrip() {
        check_eta::<Eta2>();
        check_eta::<Eta4>();
    }

    #[test]
    fn eta_rejects_out_of_range_field() {
        // 3-bit field 7 > 2 * 2
        let mut buf = [0u8; 96];
        buf[0] = 0b111;
        let mut b = [0i32; N];
        assert!(!unpack_eta::<Eta2>(&mut b, &buf));

        // 4-bit field 9 > 2 * 4
        let mut buf = [0u8; 128];
        buf[5] = 0x90;
        assert!(!unpack_eta::<Eta4>(&mut b, &buf));
    }

    fn check_z<G: Gamma1Width>() {
        let a = ramp(-G::GAMMA1 + 1, G::GAMMA1);
        let mut buf = [0u8; 640];
        let buf = &mut buf[..G::POLY_BYTES];
        pack_z::<G>(buf, &a);
        let mut b = [0i32; N];
        unpack_z::<G>(&mut b, buf);
        assert_eq!(a, b);
    }

    #[test]
    fn z_roundtrip() {
        check_z::<Gamma1Pow17>();
        check_z::<Gamma1Pow19>();
    }

    #[test]
    fn w1_sizes() {
        assert_eq!(w1_poly_bytes::<Gamma2Q88>(), 192);
        assert_eq!(w1_poly_bytes::<Gamma2Q32>(), 128);
        let mut buf = [0u8; 192];
        // 0 then 7: the low two bits of the second field land on top
        pack_w1::<Gamma2Q88>(&mut buf, &ramp(0, 43));
        assert_eq!(buf[0], 0xC0);
    }
}
