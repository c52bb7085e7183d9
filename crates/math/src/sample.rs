//! Deterministic sampling: sealed CBD noise traits, the seed-driven noise
//! pipelines, and rejection-uniform sampling from SHAKE-128.
//!
//! Noise is derived as `CBD_eta(SHAKE256(seed || nonce))`. The batched
//! variants run four nonces through one 4-lane sponge and produce exactly the
//! polynomials four single-lane calls would. PRF output is wiped after use.

use mlkem_keccak::{
    LANES, SHAKE128_RATE, shake128_absorb, shake128x4_absorb, shake256, shake256x4,
};
use zeroize::Zeroize;

use crate::{N, Q, SYMBYTES, backend, contract::assert_abs_bound};

mod sealed {
    pub trait Sealed {}
}

/// Sealed trait for CBD noise sampling width.
pub trait CbdWidth: sealed::Sealed {
    const ETA: usize;
    const BUF_BYTES: usize;

    /// Sample `N` coefficients in `[-ETA, ETA]` from `BUF_BYTES` uniform bytes.
    fn sample(r: &mut [i16; N], buf: &[u8]);
}

#[derive(Debug, Clone, Copy)]
pub struct Eta2;
#[derive(Debug, Clone, Copy)]
pub struct Eta3;

impl sealed::Sealed for Eta2 {}
impl CbdWidth for Eta2 {
    const ETA: usize = 2;
    const BUF_BYTES: usize = 2 * N / 4;

    #[inline]
    fn sample(r: &mut [i16; N], buf: &[u8]) {
        debug_assert!(buf.len() >= Self::BUF_BYTES);
        let (words, _) = buf.as_chunks::<4>();
        let (out, _) = r.as_chunks_mut::<8>();
        for (o, &w) in out.iter_mut().zip(words) {
            let t = u32::from_le_bytes(w);
            let d = (t & 0x5555_5555) + ((t >> 1) & 0x5555_5555);
            for (c, j) in o.iter_mut().zip(0..8) {
                let a = ((d >> (4 * j)) & 3) as i16;
                let b = ((d >> (4 * j + 2)) & 3) as i16;
                *c = a - b;
            }
        }
        assert_abs_bound!(r, Self::ETA + 1, "cbd2 output");
    }
}

impl sealed::Sealed for Eta3 {}
impl CbdWidth for Eta3 {
    const ETA: usize = 3;
    const BUF_BYTES: usize = 3 * N / 4;

    #[inline]
    fn sample(r: &mut [i16; N], buf: &[u8]) {
        debug_assert!(buf.len() >= Self::BUF_BYTES);
        let (triples, _) = buf.as_chunks::<3>();
        let (out, _) = r.as_chunks_mut::<4>();
        for (o, &[b0, b1, b2]) in out.iter_mut().zip(triples) {
            let t = u32::from_le_bytes([b0, b1, b2, 0]);
            let d = (t & 0x0024_9249) + ((t >> 1) & 0x0024_9249) + ((t >> 2) & 0x0024_9249);
            for (c, j) in o.iter_mut().zip(0..4) {
                let a = ((d >> (6 * j)) & 7) as i16;
                let b = ((d >> (6 * j + 3)) & 7) as i16;
                *c = a - b;
            }
        }
        assert_abs_bound!(r, Self::ETA + 1, "cbd3 output");
    }
}

/// PRF output size of the widest supported CBD.
const MAX_CBD_BYTES: usize = Eta3::BUF_BYTES;

fn prf_input(seed: &[u8; SYMBYTES], nonce: u8) -> [u8; SYMBYTES + 1] {
    let mut extkey = [0u8; SYMBYTES + 1];
    extkey[..SYMBYTES].copy_from_slice(seed);
    extkey[SYMBYTES] = nonce;
    extkey
}

/// Fill the first `len` bytes of each lane with `SHAKE256(seed || nonce_i)`.
fn prf_x4(
    bufs: &mut [[u8; MAX_CBD_BYTES]; LANES],
    len: usize,
    seed: &[u8; SYMBYTES],
    nonces: [u8; LANES],
) {
    let mut extkeys = nonces.map(|nonce| prf_input(seed, nonce));
    shake256x4(
        bufs.each_mut().map(|buf| &mut buf[..len]),
        extkeys.each_ref().map(|k| k.as_slice()),
    );
    extkeys.zeroize();
}

/// Single-lane noise: `r = CBD_eta(SHAKE256(seed || nonce))`.
pub fn getnoise<Eta: CbdWidth>(r: &mut [i16; N], seed: &[u8; SYMBYTES], nonce: u8) {
    let mut extkey = prf_input(seed, nonce);
    let mut buf = [0u8; MAX_CBD_BYTES];
    shake256(&mut buf[..Eta::BUF_BYTES], &extkey);
    Eta::sample(r, &buf[..Eta::BUF_BYTES]);
    buf.zeroize();
    extkey.zeroize();
}

/// Four noise polynomials of the same width from one batched PRF call.
pub fn getnoise_x4<Eta: CbdWidth>(
    r: [&mut [i16; N]; LANES],
    seed: &[u8; SYMBYTES],
    nonces: [u8; LANES],
) {
    let mut bufs = [[0u8; MAX_CBD_BYTES]; LANES];
    prf_x4(&mut bufs, Eta::BUF_BYTES, seed, nonces);
    for (r, buf) in r.into_iter().zip(&bufs) {
        Eta::sample(r, &buf[..Eta::BUF_BYTES]);
    }
    bufs.zeroize();
}

/// Mixed-width batch: outputs 0 and 1 use `Eta1`, outputs 2 and 3 use `Eta2`.
///
/// Every lane squeezes the longer of the two PRF lengths; SHAKE output is
/// prefix-stable, so each polynomial matches the single-lane result.
pub fn getnoise_eta1122_x4<Eta1: CbdWidth, Eta2: CbdWidth>(
    r: [&mut [i16; N]; LANES],
    seed: &[u8; SYMBYTES],
    nonces: [u8; LANES],
) {
    let len = Eta1::BUF_BYTES.max(Eta2::BUF_BYTES);
    let mut bufs = [[0u8; MAX_CBD_BYTES]; LANES];
    prf_x4(&mut bufs, len, seed, nonces);

    let [r0, r1, r2, r3] = r;
    Eta1::sample(r0, &bufs[0][..Eta1::BUF_BYTES]);
    Eta1::sample(r1, &bufs[1][..Eta1::BUF_BYTES]);
    Eta2::sample(r2, &bufs[2][..Eta2::BUF_BYTES]);
    Eta2::sample(r3, &bufs[3][..Eta2::BUF_BYTES]);
    bufs.zeroize();
}

/// Parse 3-byte groups of `buf` as two 12-bit candidates and keep those below
/// `q`, stopping when `r` is full. Returns the number of coefficients written.
///
/// Branches depend only on public (seed-expanded) data.
pub fn rej_uniform(r: &mut [i16], buf: &[u8]) -> usize {
    let mut ctr = 0;
    let (triples, _) = buf.as_chunks::<3>();
    for t in triples {
        if ctr >= r.len() {
            break;
        }
        let [b0, b1, b2] = t.map(u16::from);
        let val0 = (b0 | (b1 << 8)) & 0x0FFF;
        let val1 = (b1 >> 4) | (b2 << 4);
        if val0 < Q as u16 {
            r[ctr] = val0 as i16;
            ctr += 1;
        }
        if ctr < r.len() && val1 < Q as u16 {
            r[ctr] = val1 as i16;
            ctr += 1;
        }
    }
    ctr
}

/// SHAKE-128 blocks squeezed before the first rejection pass; enough for a
/// full polynomial with overwhelming probability.
const UNIFORM_NBLOCKS: usize = (12 * N / 8 * (1 << 12) / Q as usize).div_ceil(SHAKE128_RATE);

fn uniform_input(seed: &[u8; SYMBYTES], x: u8, y: u8) -> [u8; SYMBYTES + 2] {
    let mut input = [0u8; SYMBYTES + 2];
    input[..SYMBYTES].copy_from_slice(seed);
    input[SYMBYTES] = x;
    input[SYMBYTES + 1] = y;
    input
}

/// Uniform NTT-domain polynomial from `SHAKE128(seed || x || y)`.
pub fn sample_uniform(r: &mut [i16; N], seed: &[u8; SYMBYTES], x: u8, y: u8) {
    let mut reader = shake128_absorb(&uniform_input(seed, x, y));

    let mut buf = [0u8; UNIFORM_NBLOCKS * SHAKE128_RATE];
    for block in buf.as_chunks_mut::<SHAKE128_RATE>().0 {
        reader.squeeze_block(block);
    }
    let mut ctr = backend::rej_uniform(r, &buf);

    let mut block = [0u8; SHAKE128_RATE];
    while ctr < N {
        reader.squeeze_block(&mut block);
        ctr += backend::rej_uniform(&mut r[ctr..], &block);
    }
}

/// Four uniform polynomials from one 4-lane SHAKE-128; lane `i` absorbs
/// `seed || xy[i][0] || xy[i][1]`.
pub fn sample_uniform_x4(
    mut r: [&mut [i16; N]; LANES],
    seed: &[u8; SYMBYTES],
    xy: [[u8; 2]; LANES],
) {
    let inputs = xy.map(|[x, y]| uniform_input(seed, x, y));
    let mut reader = shake128x4_absorb(inputs.each_ref().map(|i| i.as_slice()));

    let mut bufs = [[0u8; UNIFORM_NBLOCKS * SHAKE128_RATE]; LANES];
    let mut blocks = [[0u8; SHAKE128_RATE]; LANES];
    for i in 0..UNIFORM_NBLOCKS {
        reader.squeeze_blocks(&mut blocks);
        for (buf, block) in bufs.iter_mut().zip(&blocks) {
            buf[i * SHAKE128_RATE..(i + 1) * SHAKE128_RATE].copy_from_slice(block);
        }
    }

    let mut ctrs = [0usize; LANES];
    for ((r, ctr), buf) in r.iter_mut().zip(&mut ctrs).zip(&bufs) {
        *ctr = backend::rej_uniform(&mut r[..], buf);
    }
    while ctrs.iter().any(|&ctr| ctr < N) {
        reader.squeeze_blocks(&mut blocks);
        for ((r, ctr), block) in r.iter_mut().zip(&mut ctrs).zip(&blocks) {
            *ctr += backend::rej_uniform(&mut r[*ctr..], block);
        }
    }
}
