//! Montgomery and centred reduction for q = 8380417.

use super::Q;

/// q^{-1} mod 2^{32}.
pub const QINV: i32 = 58_728_449;

/// Montgomery reduction: for `|a| <= 2^{31} * q`, returns `r` with
/// `r \equiv a * 2^{-32} (mod q)` and `-q < r < q`.
#[inline]
#[must_use]
pub const fn montgomery_reduce(a: i64) -> i32 {
    let t = (a as i32).wrapping_mul(QINV);
    ((a - (t as i64) * (Q as i64)) >> 32) as i32
}

/// For `a <= 2^{31} - 2^{22} - 1`, returns `r \equiv a (mod q)` with
/// `-6283008 <= r <= 6283008`.
#[inline]
#[must_use]
pub const fn reduce32(a: i32) -> i32 {
    let t = (a + (1 << 22)) >> 23;
    a - t * Q
}

/// Add q if `a` is negative.
#[inline]
#[must_use]
pub const fn caddq(a: i32) -> i32 {
    a + ((a >> 31) & Q)
}

/// Standard representative in `[0, q)`.
#[inline]
#[must_use]
pub const fn freeze(a: i32) -> i32 {
    caddq(reduce32(a))
}
