//! `mlkem-arith`: polynomial-ring arithmetic for ML-KEM.
//!
//! `no_std`, zero-allocation arithmetic over `R_q = Z_q[X]/(X^{256}+1)` with
//! `q = 3329`. Sub-modules cover constant-time selection, modular reduction,
//! fixed-point compression, byte and message codecs, the Number-Theoretic
//! Transform with cached base multiplication, and seed-driven sampling.
//!
//! Kernels run through a process-wide [`Backend`] selected at runtime with
//! [`set_backend`]. Every backend is bit-exact with [`Reference`]; with the
//! `simd` feature (nightly) portable-SIMD backends are available as well.

#![no_std]
#![cfg_attr(feature = "simd", feature(portable_simd))]
#![deny(unsafe_code)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]

mod contract;

pub mod backend;
pub mod compress;
pub mod ct;
pub mod encode;
pub mod ntt;
pub mod params;
pub mod poly;
pub mod reduce;
pub mod sample;
#[cfg(feature = "simd")]
pub mod simd;

pub use backend::{Backend, BackendKind, Reference, backend, set_backend};
pub use params::{MlKem512, MlKem768, MlKem1024, ParameterSet};
pub use poly::{
    CachedNttPolynomial, CachedNttVector, MulCache, NttPolynomial, NttVector, Polynomial, Vector,
};

/// Polynomial ring degree.
pub const N: usize = 256;

/// Field modulus.
pub const Q: i16 = 3329;

/// Size in bytes of seeds and messages.
pub const SYMBYTES: usize = 32;

/// Size in bytes of a serialised polynomial (12 bits * 256 / 8).
pub const POLYBYTES: usize = 384;

/// Errors returned by the slice-accepting entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Input byte slice has the wrong length for the requested encoding.
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected}, got {actual}")
            }
        }
    }
}

impl core::error::Error for Error {}

#[inline]
pub(crate) const fn check_len(actual: usize, expected: usize) -> Result<(), Error> {
    if actual == expected {
        Ok(())
    } else {
        Err(Error::InvalidLength { expected, actual })
    }
}
