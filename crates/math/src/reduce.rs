//! Montgomery and Barrett modular reduction for the ML-KEM field (q = 3329).

use crate::Q;

/// q^{-1} mod 2^{16} (Montgomery inverse).
pub const QINV: i16 = -3327;

/// 2^{16} mod q (Montgomery radix residue), centred.
pub const MONT: i16 = -1044;

/// 2^{32} mod q, the factor that moves a value into Montgomery form.
pub const R2_MOD_Q: i16 = 1353;

/// Largest `|a|` accepted by [`montgomery_reduce`] without `i32` overflow.
pub const MONTGOMERY_INPUT_MAX: i32 = i32::MAX - ((Q as i32) << 15);

/// Montgomery reduction: computes `a * R^{-1} mod q` where R = 2^{16}.
///
/// For `|a| <= MONTGOMERY_INPUT_MAX` the result satisfies
/// `|r| < |a| / 2^{16} + q/2 + 1`. In particular `|a| < q * 2^{15}` gives
/// `|r| < q`.
#[inline]
#[must_use]
pub const fn montgomery_reduce(a: i32) -> i16 {
    debug_assert!(
        a >= -MONTGOMERY_INPUT_MAX && a <= MONTGOMERY_INPUT_MAX,
        "montgomery_reduce: input overflows"
    );
    let t = (a as i16).wrapping_mul(QINV);
    ((a - (t as i32) * (Q as i32)) >> 16) as i16
}

/// Barrett reduction: centred reduction modulo q.
///
/// Accepts any `i16`. Output: `r in {-floor(q/2), ..., floor(q/2)}` with
/// `r \equiv a (mod q)`.
#[inline]
#[must_use]
pub const fn barrett_reduce(a: i16) -> i16 {
    const V: i32 = ((1i32 << 26) + (Q as i32) / 2) / (Q as i32); // 20159
    let t = (V * (a as i32) + (1 << 25)) >> 26;
    ((a as i32) - t * (Q as i32)) as i16
}

/// Field multiplication followed by Montgomery reduction: `a*b*R^{-1} mod q`.
///
/// Output is bounded by `q` when `|b| < q` or `|a * b| < q * 2^{15}`.
#[inline]
#[must_use]
pub const fn fqmul(a: i16, b: i16) -> i16 {
    montgomery_reduce((a as i32) * (b as i32))
}

/// Move a coefficient into Montgomery form: `a * R mod q`, `|r| < q`.
#[inline]
#[must_use]
pub const fn to_mont(a: i16) -> i16 {
    fqmul(a, R2_MOD_Q)
}
