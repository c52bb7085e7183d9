//! Constant-time conditional move and sign normalisation. No secret-dependent
//! branching or indexing.

use crate::Q;

/// Constant-time `i16` select: `*r = v` if `condition == 1`, unchanged if `0`.
#[inline]
pub fn cmov_int16(r: &mut i16, v: i16, condition: u16) {
    debug_assert!(condition <= 1, "cmov_int16: condition must be 0 or 1");

    let mask = core::hint::black_box(condition).wrapping_neg() as i16; // 0 or -1
    *r ^= mask & (*r ^ v);
}

/// Map a signed canonical representative `c in (-q, q)` to `[0, q)` by adding
/// `q` to negative inputs, without branching on `c`.
#[inline]
#[must_use]
pub fn signed_to_unsigned_q(c: i16) -> i16 {
    debug_assert!(c > -Q && c < Q, "signed_to_unsigned_q: input out of range");

    let mut r = c;
    cmov_int16(&mut r, c + Q, (c as u16) >> 15);

    debug_assert!(r >= 0 && r < Q);
    r
}
