use core::simd::Simd;

use super::kernels::{barrett_reduce_vec, fqmul_vec};
use crate::reduce::{barrett_reduce, fqmul};

/// Forward butterfly: `(lo, hi) <- (lo + t, lo - t)` where `t = zeta * hi *
/// R^{-1}`. Lanes beyond the last full vector run the scalar formula.
#[inline]
pub fn butterfly_forward<const L: usize>(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
    debug_assert_eq!(lo.len(), hi.len());
    let n = lo.len();
    let z = Simd::<i16, L>::splat(zeta);
    let simd_end = n - (n % L);

    for i in (0..simd_end).step_by(L) {
        let a = Simd::<i16, L>::from_slice(&lo[i..]);
        let b = Simd::<i16, L>::from_slice(&hi[i..]);
        let t = fqmul_vec(z, b);
        (a + t).copy_to_slice(&mut lo[i..]);
        (a - t).copy_to_slice(&mut hi[i..]);
    }
    for i in simd_end..n {
        let t = fqmul(zeta, hi[i]);
        hi[i] = lo[i] - t;
        lo[i] += t;
    }
}

/// Inverse butterfly: `(lo, hi) <- (barrett(lo+hi), zeta*(hi-lo)*R^{-1})`.
#[inline]
pub fn butterfly_inverse<const L: usize>(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
    debug_assert_eq!(lo.len(), hi.len());
    let n = lo.len();
    let z = Simd::<i16, L>::splat(zeta);
    let simd_end = n - (n % L);

    for i in (0..simd_end).step_by(L) {
        let a = Simd::<i16, L>::from_slice(&lo[i..]);
        let b = Simd::<i16, L>::from_slice(&hi[i..]);
        barrett_reduce_vec(a + b).copy_to_slice(&mut lo[i..]);
        fqmul_vec(z, b - a).copy_to_slice(&mut hi[i..]);
    }
    for i in simd_end..n {
        let t = lo[i];
        lo[i] = barrett_reduce(t + hi[i]);
        hi[i] = fqmul(zeta, hi[i] - t);
    }
}
