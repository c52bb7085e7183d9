//! Scalar Keccak sponge.

use crate::{SHAKE_PAD, SHAKE128_RATE, SHAKE256_RATE};

const PLEN: usize = 25;

#[inline]
fn xor_bytes(state: &mut [u64; PLEN], data: &[u8]) {
    for (i, &b) in data.iter().enumerate() {
        state[i / 8] ^= u64::from(b) << (8 * (i % 8));
    }
}

#[inline]
fn extract_bytes(state: &[u64; PLEN], out: &mut [u8]) {
    for (i, o) in out.iter_mut().enumerate() {
        *o = (state[i / 8] >> (8 * (i % 8))) as u8;
    }
}

/// Absorb `input` and apply SHAKE padding. The final permutation is left to
/// the first squeeze.
fn absorb(state: &mut [u64; PLEN], input: &[u8], rate: usize) {
    let mut blocks = input.chunks_exact(rate);
    for block in &mut blocks {
        xor_bytes(state, block);
        keccak::f1600(state);
    }
    let tail = blocks.remainder();
    xor_bytes(state, tail);
    state[tail.len() / 8] ^= u64::from(SHAKE_PAD) << (8 * (tail.len() % 8));
    state[(rate - 1) / 8] ^= 0x80_u64 << (8 * ((rate - 1) % 8));
}

fn squeeze(state: &mut [u64; PLEN], out: &mut [u8], rate: usize) {
    for chunk in out.chunks_mut(rate) {
        keccak::f1600(state);
        extract_bytes(state, chunk);
    }
}

/// Incremental SHAKE-128 reader, squeezing one rate block at a time.
///
/// Created by [`shake128_absorb`].
#[derive(Clone)]
pub struct Shake128Reader {
    state: [u64; PLEN],
}

impl Shake128Reader {
    /// Squeeze the next 168-byte block.
    #[inline]
    pub fn squeeze_block(&mut self, out: &mut [u8; SHAKE128_RATE]) {
        keccak::f1600(&mut self.state);
        extract_bytes(&self.state, out);
    }
}

/// Absorb `input` into a fresh SHAKE-128 state.
#[must_use]
pub fn shake128_absorb(input: &[u8]) -> Shake128Reader {
    let mut state = [0u64; PLEN];
    absorb(&mut state, input, SHAKE128_RATE);
    Shake128Reader { state }
}

/// One-shot SHAKE-128: fill `out` from `input`.
pub fn shake128(out: &mut [u8], input: &[u8]) {
    let mut state = [0u64; PLEN];
    absorb(&mut state, input, SHAKE128_RATE);
    squeeze(&mut state, out, SHAKE128_RATE);
}

/// One-shot SHAKE-256: fill `out` from `input`.
pub fn shake256(out: &mut [u8], input: &[u8]) {
    let mut state = [0u64; PLEN];
    absorb(&mut state, input, SHAKE256_RATE);
    squeeze(&mut state, out, SHAKE256_RATE);
}
