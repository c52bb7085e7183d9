//! Number-Theoretic Transform and base multiplication in `Z_q[X]/(X^2 - zeta)`.
//!
//! These are the scalar kernels behind [`crate::Reference`]; other backends
//! must reproduce them bit for bit.
//!
//! - [`ntt`]: forward NTT, standard order -> bit-reversed order.
//! - [`invntt_tomont`]: inverse NTT, output scaled by the Montgomery factor.
//! - [`mulcache_compute`] / [`basemul_cached`]: degree-1 products with the
//!   `b1 * zeta` terms precomputed once per operand.

use crate::{
    N, Q,
    reduce::{barrett_reduce, fqmul, montgomery_reduce},
};

const Q64: i64 = Q as i64;

/// Exclusive bound on `|c|` after [`ntt`], given input `|c| < q`.
pub const NTT_BOUND: i32 = 8 * Q as i32;

/// Exclusive bound on `|c|` after [`invntt_tomont`].
pub const INVNTT_BOUND: i32 = Q as i32;

/// Exclusive bound on `|c|` accepted by [`invntt_tomont`].
pub const INVNTT_INPUT_BOUND: i32 = 1 << 14;

/// Exclusive bound on the left operand of a base multiplication.
pub const BASEMUL_A_BOUND: i32 = 4096;

/// Exclusive bound on `|c|` after a single [`basemul_cached`].
pub const BASEMUL_BOUND: i32 = 3 * Q as i32 / 2;

const fn pow_mod(mut base: i64, mut exp: i64, modulus: i64) -> i64 {
    let mut result: i64 = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        exp >>= 1;
        base = base * base % modulus;
    }
    result
}

const fn bitrev7(x: usize) -> usize {
    ((x >> 6) & 1)
        | (((x >> 5) & 1) << 1)
        | (((x >> 4) & 1) << 2)
        | (((x >> 3) & 1) << 3)
        | (((x >> 2) & 1) << 4)
        | (((x >> 1) & 1) << 5)
        | ((x & 1) << 6)
}

/// Centred representative of `val mod q` in `[−(q−1)/2, (q−1)/2]`.
const fn centred(val: i64) -> i16 {
    if val > Q64 / 2 {
        (val - Q64) as i16
    } else {
        val as i16
    }
}

/// Twiddle factors in Montgomery form, from primitive 256th root ζ = 17,
/// bit-reversed indexing.
///
/// `ZETAS[i] = ζ^{BitRev₇(i)} · 2¹⁶  (mod q)`, centred to signed.
pub const ZETAS: [i16; 128] = {
    const ZETA: i64 = 17;
    const MONT: i64 = 1 << 16;

    let mut zetas = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        let val = pow_mod(ZETA, bitrev7(i) as i64, Q64) * MONT % Q64;
        zetas[i] = centred(val);
        i += 1;
    }
    zetas
};

/// R² · 128⁻¹ mod q, where R = 2¹⁶: the final inverse-NTT scale.
pub(crate) const INVNTT_SCALE: i16 =
    centred(pow_mod(2, 32, Q64) * pow_mod(128, Q64 - 2, Q64) % Q64);

/// Forward NTT (in-place). Standard order in, bit-reversed order out.
///
/// Each of the seven layers grows the bound by less than `q`.
pub fn ntt(r: &mut [i16; N]) {
    let mut k: usize = 1;
    let mut len = 128;
    while len >= 2 {
        for block in r.chunks_exact_mut(2 * len) {
            let zeta = ZETAS[k];
            k += 1;
            let (lo, hi) = block.split_at_mut(len);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = fqmul(zeta, *b);
                *b = *a - t;
                *a += t;
            }
        }
        len >>= 1;
    }
}

/// Inverse NTT (in-place). Bit-reversed in, standard order out,
/// each coefficient scaled by Montgomery factor `R = 2^{16}`.
pub fn invntt_tomont(r: &mut [i16; N]) {
    let mut k: usize = 127;
    let mut len = 2;
    while len <= 128 {
        for block in r.chunks_exact_mut(2 * len) {
            let zeta = ZETAS[k];
            k = k.wrapping_sub(1);
            let (lo, hi) = block.split_at_mut(len);
            for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
                let t = *a;
                *a = barrett_reduce(t + *b);
                *b = fqmul(zeta, *b - t);
            }
        }
        len <<= 1;
    }
    for c in r.iter_mut() {
        *c = fqmul(*c, INVNTT_SCALE);
    }
}

/// Precompute `x[2i] = b[4i+1]·ζ_i` and `x[2i+1] = b[4i+3]·(−ζ_i)` (Montgomery
/// products), with `ζ_i = ZETAS[64 + i]`.
pub fn mulcache_compute(x: &mut [i16; N / 2], b: &[i16; N]) {
    let (quads, _) = b.as_chunks::<4>();
    let (pairs, _) = x.as_chunks_mut::<2>();
    for ((cache, quad), &zeta) in pairs.iter_mut().zip(quads).zip(&ZETAS[64..]) {
        *cache = [fqmul(quad[1], zeta), fqmul(quad[3], -zeta)];
    }
}

/// The two unreduced degree-1 products for one quadruple, in `i32`.
#[inline]
pub(crate) fn basemul_quad(a: &[i16; 4], b: &[i16; 4], cache: &[i16; 2]) -> [i32; 4] {
    let [a0, a1, a2, a3] = a.map(i32::from);
    let [b0, b1, b2, b3] = b.map(i32::from);
    let [c0, c1] = cache.map(i32::from);
    [
        a0 * b0 + a1 * c0,
        a0 * b1 + a1 * b0,
        a2 * b2 + a3 * c1,
        a2 * b3 + a3 * b2,
    ]
}

/// NTT-domain product `r = a · b · R^{-1}` using `b`'s multiplication cache.
pub fn basemul_cached(r: &mut [i16; N], a: &[i16; N], b: &[i16; N], b_cache: &[i16; N / 2]) {
    let (out, _) = r.as_chunks_mut::<4>();
    let (aq, _) = a.as_chunks::<4>();
    let (bq, _) = b.as_chunks::<4>();
    let (cq, _) = b_cache.as_chunks::<2>();
    for (((o, a), b), c) in out.iter_mut().zip(aq).zip(bq).zip(cq) {
        *o = basemul_quad(a, b, c).map(montgomery_reduce);
    }
}

/// `r = Σ_k a[k] · b[k] · R^{-1}`, accumulating in `i32` and reducing once per
/// coefficient.
pub fn basemul_acc_cached<const K: usize>(
    r: &mut [i16; N],
    a: [&[i16; N]; K],
    b: [&[i16; N]; K],
    b_cache: [&[i16; N / 2]; K],
) {
    let mut acc = [0i32; N];
    for ((a, b), c) in a.into_iter().zip(b).zip(b_cache) {
        let (aq, _) = a.as_chunks::<4>();
        let (bq, _) = b.as_chunks::<4>();
        let (cq, _) = c.as_chunks::<2>();
        let (accq, _) = acc.as_chunks_mut::<4>();
        for (((s, a), b), c) in accq.iter_mut().zip(aq).zip(bq).zip(cq) {
            for (s, p) in s.iter_mut().zip(basemul_quad(a, b, c)) {
                *s += p;
            }
        }
    }
    for (o, s) in r.iter_mut().zip(acc) {
        *o = montgomery_reduce(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zetas_literals() {
        assert_eq!(ZETAS[0], -1044);
        assert_eq!(ZETAS[1], -758);
        assert_eq!(ZETAS[127], 1628);
        assert_eq!(INVNTT_SCALE, 1441);
    }

    #[test]
    fn ntt_inverse_ntt_roundtrip() {
        let mut a: [i16; N] = core::array::from_fn(|i| (i % 13) as i16);
        let original = a;
        ntt(&mut a);
        assert_ne!(a, original, "NTT should change coefficients");
        invntt_tomont(&mut a);

        for c in &mut a {
            *c = barrett_reduce(montgomery_reduce(*c as i32));
        }
        assert_eq!(a, original);
    }

    #[test]
    fn ntt_bound_holds_at_extremes() {
        for v in [Q - 1, -(Q - 1)] {
            let mut a = [v; N];
            ntt(&mut a);
            assert!(a.iter().all(|&c| (c as i32).abs() < NTT_BOUND));
        }
    }

    #[test]
    fn invntt_accepts_full_input_bound() {
        let mut a: [i16; N] =
            core::array::from_fn(|i| if i % 2 == 0 { 16383 } else { -16383 });
        invntt_tomont(&mut a);
        assert!(a.iter().all(|&c| (c as i32).abs() < INVNTT_BOUND));
    }

    fn schoolbook_mul(a: &[i16; N], b: &[i16; N]) -> [i16; N] {
        let mut c = [0i64; N];
        for (i, &ai) in a.iter().enumerate() {
            for (j, &bj) in b.iter().enumerate() {
                let prod = (ai as i64) * (bj as i64);
                if i + j < N {
                    c[i + j] += prod;
                } else {
                    c[i + j - N] -= prod;
                }
            }
        }
        c.map(|x| x.rem_euclid(Q64) as i16)
    }

    #[test]
    fn ntt_basemul_matches_schoolbook() {
        let a: [i16; N] = core::array::from_fn(|i| ((i * 7 + 3) % 100) as i16);
        let b: [i16; N] = core::array::from_fn(|i| ((i * 13 + 1) % 100) as i16 - 50);
        let expected = schoolbook_mul(&a, &b);

        let (mut an, mut bn) = (a, b);
        ntt(&mut an);
        ntt(&mut bn);
        let mut cache = [0i16; N / 2];
        mulcache_compute(&mut cache, &bn);
        let mut c = [0i16; N];
        basemul_cached(&mut c, &an, &bn, &cache);
        assert!(c.iter().all(|&x| (x as i32).abs() < BASEMUL_BOUND));
        invntt_tomont(&mut c);

        for (i, (&got, &exp)) in c.iter().zip(expected.iter()).enumerate() {
            assert_eq!(got.rem_euclid(Q), exp, "mismatch at {i}");
        }
    }

    #[test]
    fn accumulate_equals_sum_of_products() {
        let a: [[i16; N]; 3] =
            core::array::from_fn(|k| core::array::from_fn(|i| ((i * 31 + k * 7) % 4096) as i16));
        let b: [[i16; N]; 3] = core::array::from_fn(|k| {
            let mut p: [i16; N] = core::array::from_fn(|i| ((i * 17 + k) % 5) as i16 - 2);
            ntt(&mut p);
            p
        });
        let cache: [[i16; N / 2]; 3] = core::array::from_fn(|k| {
            let mut x = [0i16; N / 2];
            mulcache_compute(&mut x, &b[k]);
            x
        });

        let mut acc = [0i16; N];
        basemul_acc_cached(&mut acc, a.each_ref(), b.each_ref(), cache.each_ref());

        let mut expected = [0i32; N];
        for k in 0..3 {
            let mut r = [0i16; N];
            basemul_cached(&mut r, &a[k], &b[k], &cache[k]);
            for (e, &x) in expected.iter_mut().zip(&r) {
                *e += x as i32;
            }
        }
        for (i, (&got, &exp)) in acc.iter().zip(expected.iter()).enumerate() {
            assert_eq!(
                (got as i32 - exp).rem_euclid(Q as i32),
                0,
                "mismatch at {i}"
            );
        }
    }
}
