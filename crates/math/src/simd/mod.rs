//! Portable-SIMD backends built on `core::simd` (nightly, feature `simd`).
//!
//! [`PortableSimd<L>`] runs the NTT butterflies, reduction, Montgomery
//! conversion and cached base multiplication `L` lanes of `i16` at a time.
//! Integer arithmetic is lane-for-lane the same as the scalar kernels, so
//! every instance is bit-identical to [`crate::Reference`].

mod butterfly;
mod kernels;
mod poly_ops;

pub use kernels::{barrett_reduce_vec, fqmul_vec, montgomery_reduce_vec};

use crate::{N, backend::Backend, sample};

/// Portable-SIMD kernels over `L` lanes of `i16`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortableSimd<const L: usize>;

impl<const L: usize> Backend for PortableSimd<L> {
    #[inline]
    fn ntt(r: &mut [i16; N]) {
        poly_ops::ntt::<L>(r);
    }

    #[inline]
    fn invntt_tomont(r: &mut [i16; N]) {
        poly_ops::invntt_tomont::<L>(r);
    }

    #[inline]
    fn poly_reduce(r: &mut [i16; N]) {
        poly_ops::poly_reduce::<L>(r);
    }

    #[inline]
    fn poly_tomont(r: &mut [i16; N]) {
        poly_ops::poly_tomont::<L>(r);
    }

    #[inline]
    fn mulcache_compute(x: &mut [i16; N / 2], b: &[i16; N]) {
        poly_ops::mulcache_compute::<L>(x, b);
    }

    #[inline]
    fn basemul_cached(r: &mut [i16; N], a: &[i16; N], b: &[i16; N], b_cache: &[i16; N / 2]) {
        poly_ops::basemul_acc_cached::<L, 1>(r, [a], [b], [b_cache]);
    }

    #[inline]
    fn basemul_acc_cached<const K: usize>(
        r: &mut [i16; N],
        a: [&[i16; N]; K],
        b: [&[i16; N]; K],
        b_cache: [&[i16; N / 2]; K],
    ) {
        poly_ops::basemul_acc_cached::<L, K>(r, a, b, b_cache);
    }

    // Rejection sampling compacts a data-dependent number of lanes and runs on
    // public data; the scalar loop is used for every lane width.
    #[inline]
    fn rej_uniform(r: &mut [i16], buf: &[u8]) -> usize {
        sample::rej_uniform(r, buf)
    }
}
