//! `mlkem-keccak`: SHAKE sponges feeding the ML-KEM samplers.
//!
//! Single-lane sponges ([`shake128_absorb`], [`shake128`], [`shake256`]) and
//! their 4-way batched siblings ([`shake128x4_absorb`], [`shake256x4`]). A
//! batched call absorbs four independent inputs into four interleaved states
//! and squeezes four independent streams; every lane is bit-identical to the
//! corresponding single-lane call.
//!
//! The Keccak-f\[1600\] permutation itself comes from the `keccak` crate. With
//! the `simd` feature the four lanes are permuted together through
//! `keccak::simd::f1600x4`.

#![no_std]
#![cfg_attr(feature = "simd", feature(portable_simd))]
#![deny(unsafe_code)]

mod keccak1x;
mod keccak4x;

/// SHAKE-128 rate in bytes.
pub const SHAKE128_RATE: usize = 168;

/// SHAKE-256 rate in bytes.
pub const SHAKE256_RATE: usize = 136;

/// Number of lanes in a batched sponge.
pub const LANES: usize = 4;

const SHAKE_PAD: u8 = 0x1F;

pub use keccak1x::{Shake128Reader, shake128, shake128_absorb, shake256};
pub use keccak4x::{Shake128x4Reader, shake128x4_absorb, shake256x4};
