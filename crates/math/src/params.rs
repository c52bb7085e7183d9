//! ML-KEM parameter sets. [`ParameterSet`] trait and marker types
//! [`MlKem512`], [`MlKem768`], [`MlKem1024`].
//!
//! Each set names its module rank, noise widths and compression widths as
//! associated items, so arithmetic generic over `P: ParameterSet` picks the
//! right CBD and compression code at compile time.

use crate::{
    POLYBYTES,
    compress::{CompressWidth, CompressWidthParams, D4, D5, D10, D11},
    sample::{CbdWidth, Eta2, Eta3},
};

mod sealed {
    pub trait Sealed {}
}

/// ML-KEM parameter set implemented by `MlKem512`, `MlKem768`, `MlKem1024`.
pub trait ParameterSet: sealed::Sealed + 'static {
    /// Module rank (k = 2, 3, or 4).
    const K: usize;
    /// Human-readable name.
    const NAME: &'static str;

    /// CBD width for secret and key-generation noise.
    type Eta1: CbdWidth;
    /// CBD width for encryption noise.
    type Eta2: CbdWidth;
    /// Compression width of the vector ciphertext component.
    type Du: CompressWidth;
    /// Compression width of the scalar ciphertext component.
    type Dv: CompressWidth;

    /// K * POLYBYTES - serialised polynomial vector.
    const POLYVEC_BYTES: usize = Self::K * POLYBYTES;
    /// Compressed bytes for the polynomial vector (K * N * D_U / 8).
    const POLYVEC_COMPRESSED_BYTES: usize = Self::K * <Self::Du as CompressWidthParams>::POLY_BYTES;
    /// Compressed bytes for one polynomial (N * D_V / 8).
    const POLY_COMPRESSED_BYTES: usize = <Self::Dv as CompressWidthParams>::POLY_BYTES;
}

/// ML-KEM-512 parameter set (k = 2, NIST security level 1).
#[derive(Debug, Clone, Copy)]
pub struct MlKem512;

/// ML-KEM-768 parameter set (k = 3, NIST security level 3).
#[derive(Debug, Clone, Copy)]
pub struct MlKem768;

/// ML-KEM-1024 parameter set (k = 4, NIST security level 5).
#[derive(Debug, Clone, Copy)]
pub struct MlKem1024;

impl sealed::Sealed for MlKem512 {}
impl ParameterSet for MlKem512 {
    const K: usize = 2;
    const NAME: &'static str = "ML-KEM-512";
    type Eta1 = Eta3;
    type Eta2 = Eta2;
    type Du = D10;
    type Dv = D4;
}

impl sealed::Sealed for MlKem768 {}
impl ParameterSet for MlKem768 {
    const K: usize = 3;
    const NAME: &'static str = "ML-KEM-768";
    type Eta1 = Eta2;
    type Eta2 = Eta2;
    type Du = D10;
    type Dv = D4;
}

impl sealed::Sealed for MlKem1024 {}
impl ParameterSet for MlKem1024 {
    const K: usize = 4;
    const NAME: &'static str = "ML-KEM-1024";
    type Eta1 = Eta2;
    type Eta2 = Eta2;
    type Du = D11;
    type Dv = D5;
}
