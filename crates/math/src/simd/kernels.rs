use core::simd::{Simd, prelude::*};

use crate::{
    Q,
    reduce::{QINV, R2_MOD_Q},
};

/// Lane count used by kernel-level unit tests (16 x i16 = 256-bit).
#[cfg(test)]
pub(super) const DEFAULT_LANES: usize = 16;

/// Barrett reduction: `r \equiv a \pmod{q}`, centered `|r| <= q/2`.
#[inline]
#[must_use]
pub fn barrett_reduce_vec<const L: usize>(a: Simd<i16, L>) -> Simd<i16, L> {
    const V: i32 = 20159;
    let aw: Simd<i32, L> = a.cast();
    let t = (Simd::<i32, L>::splat(V) * aw + Simd::splat(1 << 25)) >> Simd::splat(26);
    (aw - t * Simd::splat(Q as i32)).cast::<i16>()
}

/// Montgomery reduction: `a * R^{-1} mod q`, `R = 2^{16}`.
#[inline]
#[must_use]
pub fn montgomery_reduce_vec<const L: usize>(a: Simd<i32, L>) -> Simd<i16, L> {
    let qinv = Simd::<i32, L>::splat(QINV as i32);
    let q = Simd::<i32, L>::splat(Q as i32);
    let s16 = Simd::splat(16);
    let a_lo = (a << s16) >> s16;
    let t = ((a_lo * qinv) << s16) >> s16;
    ((a - t * q) >> s16).cast::<i16>()
}

/// Field multiply: `a * b * R^{-1} mod q`.
#[inline]
#[must_use]
pub fn fqmul_vec<const L: usize>(a: Simd<i16, L>, b: Simd<i16, L>) -> Simd<i16, L> {
    montgomery_reduce_vec(a.cast::<i32>() * b.cast::<i32>())
}

/// Barrett-reduce, then lift negatives by `q`: unsigned canonical `[0, q)`.
#[inline]
#[must_use]
pub fn reduce_unsigned_vec<const L: usize>(a: Simd<i16, L>) -> Simd<i16, L> {
    let r = barrett_reduce_vec(a);
    let neg = r.simd_lt(Simd::splat(0));
    neg.select(r + Simd::splat(Q), r)
}

/// `a * R mod q`, `|r| < q`.
#[inline]
#[must_use]
pub fn tomont_vec<const L: usize>(a: Simd<i16, L>) -> Simd<i16, L> {
    fqmul_vec(a, Simd::splat(R2_MOD_Q))
}
