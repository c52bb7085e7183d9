//! 4-way batched Keccak sponge.
//!
//! Four independent sponge states advance together. Inputs of one call must
//! share a length, and so must outputs; callers needing fewer than four
//! streams pad with dummy lanes and ignore their output.

use crate::{LANES, SHAKE_PAD, SHAKE128_RATE, SHAKE256_RATE};

const PLEN: usize = 25;

#[cfg(not(feature = "simd"))]
#[derive(Clone)]
struct State4([[u64; PLEN]; LANES]);

#[cfg(not(feature = "simd"))]
impl State4 {
    const fn new() -> Self {
        Self([[0u64; PLEN]; LANES])
    }

    #[inline]
    fn word_mut(&mut self, lane: usize, i: usize) -> &mut u64 {
        &mut self.0[lane][i]
    }

    #[inline]
    fn word(&self, lane: usize, i: usize) -> u64 {
        self.0[lane][i]
    }

    #[inline]
    fn permute(&mut self) {
        for s in &mut self.0 {
            keccak::f1600(s);
        }
    }
}

#[cfg(feature = "simd")]
#[derive(Clone)]
struct State4([core::simd::u64x4; PLEN]);

#[cfg(feature = "simd")]
impl State4 {
    const fn new() -> Self {
        Self([core::simd::u64x4::from_array([0; LANES]); PLEN])
    }

    #[inline]
    fn word_mut(&mut self, lane: usize, i: usize) -> &mut u64 {
        &mut self.0[i].as_mut_array()[lane]
    }

    #[inline]
    fn word(&self, lane: usize, i: usize) -> u64 {
        self.0[i].as_array()[lane]
    }

    #[inline]
    fn permute(&mut self) {
        keccak::simd::f1600x4(&mut self.0);
    }
}

impl State4 {
    fn xor_bytes(&mut self, lane: usize, data: &[u8]) {
        for (i, &b) in data.iter().enumerate() {
            *self.word_mut(lane, i / 8) ^= u64::from(b) << (8 * (i % 8));
        }
    }

    fn extract_bytes(&self, lane: usize, out: &mut [u8]) {
        for (i, o) in out.iter_mut().enumerate() {
            *o = (self.word(lane, i / 8) >> (8 * (i % 8))) as u8;
        }
    }

    fn absorb(&mut self, inputs: [&[u8]; LANES], rate: usize) {
        let len = inputs[0].len();
        debug_assert!(
            inputs.iter().all(|i| i.len() == len),
            "batched absorb: lane inputs differ in length"
        );

        let mut offset = 0;
        while offset + rate <= len {
            for (lane, input) in inputs.iter().enumerate() {
                self.xor_bytes(lane, &input[offset..offset + rate]);
            }
            self.permute();
            offset += rate;
        }
        let tail = len - offset;
        for (lane, input) in inputs.iter().enumerate() {
            self.xor_bytes(lane, &input[offset..]);
            *self.word_mut(lane, tail / 8) ^= u64::from(SHAKE_PAD) << (8 * (tail % 8));
            *self.word_mut(lane, (rate - 1) / 8) ^= 0x80_u64 << (8 * ((rate - 1) % 8));
        }
    }
}

/// 4-way SHAKE-128 reader.
///
/// Created by [`shake128x4_absorb`]. Each [`squeeze_blocks`](Self::squeeze_blocks)
/// runs one batched permutation and emits one 168-byte block per lane.
#[derive(Clone)]
pub struct Shake128x4Reader {
    state: State4,
}

impl Shake128x4Reader {
    /// Squeeze the next SHAKE-128 block from each of the four lanes.
    #[inline]
    pub fn squeeze_blocks(&mut self, out: &mut [[u8; SHAKE128_RATE]; LANES]) {
        self.state.permute();
        for (lane, block) in out.iter_mut().enumerate() {
            self.state.extract_bytes(lane, block);
        }
    }
}

/// Absorb four equal-length inputs into four SHAKE-128 states.
#[must_use]
pub fn shake128x4_absorb(inputs: [&[u8]; LANES]) -> Shake128x4Reader {
    let mut state = State4::new();
    state.absorb(inputs, SHAKE128_RATE);
    Shake128x4Reader { state }
}

/// 4-way one-shot SHAKE-256: lane `i` fills `outputs[i]` from `inputs[i]`.
///
/// All outputs must have the same length.
pub fn shake256x4(mut outputs: [&mut [u8]; LANES], inputs: [&[u8]; LANES]) {
    let out_len = outputs[0].len();
    debug_assert!(
        outputs.iter().all(|o| o.len() == out_len),
        "batched squeeze: lane outputs differ in length"
    );

    let mut state = State4::new();
    state.absorb(inputs, SHAKE256_RATE);

    let mut written = 0;
    while written < out_len {
        let chunk = (out_len - written).min(SHAKE256_RATE);
        state.permute();
        for (lane, out) in outputs.iter_mut().enumerate() {
            state.extract_bytes(lane, &mut out[written..written + chunk]);
        }
        written += chunk;
    }
}
