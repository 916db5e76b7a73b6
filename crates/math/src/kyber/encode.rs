//! 12-bit polynomial serialisation and 32-byte message encoding.

use super::{
    POLYBYTES, Q, SYMBYTES,
    compress::{CompressWidth, D1},
    reduce::to_canonical,
};
use crate::{
    N,
    pack::{BitUnpacker, pack_bits, unpack_bits},
};

/// Serialise 256 coefficients into 384 bytes, two per 3 bytes, after mapping
/// each into `[0, q)`.
pub fn coeffs_to_bytes(r: &mut [u8], a: &[i16; N]) {
    debug_assert_eq!(r.len(), POLYBYTES);
    pack_bits(r, 12, a.iter().map(|&c| u32::from(to_canonical(c))));
}

/// Inverse of [`coeffs_to_bytes`]. Values are taken modulo 2^{12} and are
/// not range-checked; see [`is_canonical`].
pub fn bytes_to_coeffs(r: &mut [i16; N], a: &[u8]) {
    debug_assert_eq!(a.len(), POLYBYTES);
    unpack_bits(r, a, 12, |v| v as i16);
}

/// Whether every 12-bit value in `a` is below q, i.e. whether decoding then
/// re-encoding reproduces `a`.
#[must_use]
pub fn is_canonical(a: &[u8]) -> bool {
    BitUnpacker::new(a, 12).fold(true, |ok, v| ok & (v < Q as u32))
}

/// Map each message bit to `0` or `(q + 1) / 2`.
pub fn msg_to_poly(r: &mut [i16; N], msg: &[u8; SYMBYTES]) {
    D1::decompress_poly(r, msg);
}

/// Round each coefficient to the nearer of `0` and `q / 2`, one bit each.
pub fn poly_to_msg(msg: &mut [u8; SYMBYTES], a: &[i16; N]) {
    D1::compress_poly(msg, a);
}
