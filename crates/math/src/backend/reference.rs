use super::Backend;
use crate::{
    N, ntt,
    ct::signed_to_unsigned_q,
    reduce::{barrett_reduce, to_mont},
    sample,
};

/// Portable scalar kernels; the behaviour every other backend reproduces.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reference;

impl Backend for Reference {
    #[inline]
    fn ntt(r: &mut [i16; N]) {
        ntt::ntt(r);
    }

    #[inline]
    fn invntt_tomont(r: &mut [i16; N]) {
        ntt::invntt_tomont(r);
    }

    #[inline]
    fn poly_reduce(r: &mut [i16; N]) {
        for c in r.iter_mut() {
            *c = signed_to_unsigned_q(barrett_reduce(*c));
        }
    }

    #[inline]
    fn poly_tomont(r: &mut [i16; N]) {
        for c in r.iter_mut() {
            *c = to_mont(*c);
        }
    }

    #[inline]
    fn mulcache_compute(x: &mut [i16; N / 2], b: &[i16; N]) {
        ntt::mulcache_compute(x, b);
    }

    #[inline]
    fn basemul_cached(r: &mut [i16; N], a: &[i16; N], b: &[i16; N], b_cache: &[i16; N / 2]) {
        ntt::basemul_cached(r, a, b, b_cache);
    }

    #[inline]
    fn basemul_acc_cached<const K: usize>(
        r: &mut [i16; N],
        a: [&[i16; N]; K],
        b: [&[i16; N]; K],
        b_cache: [&[i16; N / 2]; K],
    ) {
        ntt::basemul_acc_cached(r, a, b, b_cache);
    }

    #[inline]
    fn rej_uniform(r: &mut [i16], buf: &[u8]) -> usize {
        sample::rej_uniform(r, buf)
    }
}
