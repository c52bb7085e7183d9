use core::simd::Simd;

use super::{
    butterfly::{butterfly_forward, butterfly_inverse},
    kernels::{fqmul_vec, montgomery_reduce_vec, reduce_unsigned_vec, tomont_vec},
};
use crate::{
    N,
    ntt::{INVNTT_SCALE, ZETAS},
};

/// Forward NTT with `L`-lane butterflies.
pub fn ntt<const L: usize>(r: &mut [i16; N]) {
    let mut k: usize = 1;
    let mut len = 128;
    while len >= 2 {
        for block in r.chunks_exact_mut(2 * len) {
            let (lo, hi) = block.split_at_mut(len);
            butterfly_forward::<L>(lo, hi, ZETAS[k]);
            k += 1;
        }
        len >>= 1;
    }
}

/// Inverse NTT with `L`-lane butterflies and the final Montgomery scale.
pub fn invntt_tomont<const L: usize>(r: &mut [i16; N]) {
    let mut k: usize = 127;
    let mut len = 2;
    while len <= 128 {
        for block in r.chunks_exact_mut(2 * len) {
            let (lo, hi) = block.split_at_mut(len);
            butterfly_inverse::<L>(lo, hi, ZETAS[k]);
            k = k.wrapping_sub(1);
        }
        len <<= 1;
    }
    let f = Simd::<i16, L>::splat(INVNTT_SCALE);
    for chunk in r.as_chunks_mut::<L>().0 {
        *chunk = fqmul_vec(Simd::from_array(*chunk), f).into();
    }
}

/// Reduce all `N` coefficients in-place to `[0, q)`.
pub fn poly_reduce<const L: usize>(c: &mut [i16; N]) {
    for ch in c.as_chunks_mut::<L>().0 {
        *ch = reduce_unsigned_vec(Simd::from_array(*ch)).into();
    }
}

/// Convert all coefficients to Montgomery domain: `c_i <- c_i * R mod q`.
pub fn poly_tomont<const L: usize>(c: &mut [i16; N]) {
    for ch in c.as_chunks_mut::<L>().0 {
        *ch = tomont_vec(Simd::from_array(*ch)).into();
    }
}

/// 4-way de-interleave (AOS→SOA) of `4L` consecutive coefficients: two
/// passes of 2-way deinterleave turn `[a0,a1,a2,a3, b0,b1,b2,b3, ...]` into
/// four `L`-wide role vectors.
#[inline]
fn deinterleave4<const L: usize>(x: &[i16]) -> [Simd<i16, L>; 4] {
    let (t0, t1) = Simd::<i16, L>::from_slice(x).deinterleave(Simd::from_slice(&x[L..]));
    let (t2, t3) =
        Simd::<i16, L>::from_slice(&x[2 * L..]).deinterleave(Simd::from_slice(&x[3 * L..]));
    let (x0, x2) = t0.deinterleave(t2);
    let (x1, x3) = t1.deinterleave(t3);
    [x0, x1, x2, x3]
}

/// Multiplication cache for `L` quadruples per step.
pub fn mulcache_compute<const L: usize>(x: &mut [i16; N / 2], b: &[i16; N]) {
    const { assert!(N.is_multiple_of(4 * L)) }
    for blk in (0..N / 4).step_by(L) {
        let [_, b1, _, b3] = deinterleave4::<L>(&b[4 * blk..]);
        let z = Simd::<i16, L>::from_slice(&ZETAS[64 + blk..]);
        let (lo, hi) = fqmul_vec(b1, z).interleave(fqmul_vec(b3, -z));
        lo.copy_to_slice(&mut x[2 * blk..]);
        hi.copy_to_slice(&mut x[2 * blk + L..]);
    }
}

/// `r = Σ_k a[k]·b[k]·R^{-1}`: `i32` products summed over `K`, one
/// Montgomery reduction per coefficient.
pub fn basemul_acc_cached<const L: usize, const K: usize>(
    r: &mut [i16; N],
    a: [&[i16; N]; K],
    b: [&[i16; N]; K],
    b_cache: [&[i16; N / 2]; K],
) {
    const { assert!(N.is_multiple_of(4 * L)) }
    for blk in (0..N / 4).step_by(L) {
        let base = 4 * blk;
        let mut acc = [Simd::<i32, L>::splat(0); 4];
        for ((a, b), c) in a.iter().zip(&b).zip(&b_cache) {
            let [a0, a1, a2, a3] = deinterleave4::<L>(&a[base..]).map(|v| v.cast::<i32>());
            let [b0, b1, b2, b3] = deinterleave4::<L>(&b[base..]).map(|v| v.cast::<i32>());
            let (c0, c1) = Simd::<i16, L>::from_slice(&c[2 * blk..])
                .deinterleave(Simd::from_slice(&c[2 * blk + L..]));
            let (c0, c1) = (c0.cast::<i32>(), c1.cast::<i32>());

            acc[0] += a0 * b0 + a1 * c0;
            acc[1] += a0 * b1 + a1 * b0;
            acc[2] += a2 * b2 + a3 * c1;
            acc[3] += a2 * b3 + a3 * b2;
        }
        let [r0, r1, r2, r3] = acc.map(montgomery_reduce_vec);

        // 4-way re-interleave (SOA→AOS): reverse the deinterleave.
        let (lo02, hi02) = r0.interleave(r2);
        let (lo13, hi13) = r1.interleave(r3);
        let (out0, out1) = lo02.interleave(lo13);
        let (out2, out3) = hi02.interleave(hi13);

        for (i, out) in [out0, out1, out2, out3].iter().enumerate() {
            out.copy_to_slice(&mut r[base + i * L..]);
        }
    }
}
