//! Kernel backends and the process-wide backend selector.
//!
//! A [`Backend`] supplies the hot kernels: the two transforms, reduction,
//! Montgomery conversion, multiplication-cache construction, cached base
//! multiplication, and uniform rejection sampling. [`Reference`] is the
//! scalar implementation; every other backend must agree with it bit for bit
//! on all inputs that satisfy the documented bounds.
//!
//! The active backend is chosen at runtime with [`set_backend`] and applies
//! to every polynomial operation in the process. Switching backends never
//! changes results, only speed.

mod reference;

use core::{
    fmt::Display,
    sync::atomic::{AtomicU8, Ordering},
};

pub use reference::Reference;

use crate::{
    N, Q,
    contract::{assert_abs_bound, assert_bound},
    ntt::{BASEMUL_A_BOUND, BASEMUL_BOUND, INVNTT_BOUND, INVNTT_INPUT_BOUND, NTT_BOUND},
};

/// Kernel set behind every polynomial operation.
///
/// Preconditions and postconditions are those of the scalar kernels in
/// [`crate::ntt`] and [`crate::sample::rej_uniform`]; the dispatching
/// callers check them in debug builds.
pub trait Backend {
    /// Forward NTT, `|c| < q` in, `|c| < NTT_BOUND` out.
    fn ntt(r: &mut [i16; N]);
    /// Inverse NTT with Montgomery scaling, `|c| < 2^14` in, `|c| < q` out.
    fn invntt_tomont(r: &mut [i16; N]);
    /// Reduce every coefficient to its unsigned canonical representative.
    fn poly_reduce(r: &mut [i16; N]);
    /// Multiply every coefficient by `R mod q`, `|c| < q` out.
    fn poly_tomont(r: &mut [i16; N]);
    /// Build the multiplication cache of `b`.
    fn mulcache_compute(x: &mut [i16; N / 2], b: &[i16; N]);
    /// `r = a · b · R^{-1}` in the NTT domain.
    fn basemul_cached(r: &mut [i16; N], a: &[i16; N], b: &[i16; N], b_cache: &[i16; N / 2]);
    /// `r = Σ_k a[k] · b[k] · R^{-1}` with a single reduction per coefficient.
    fn basemul_acc_cached<const K: usize>(
        r: &mut [i16; N],
        a: [&[i16; N]; K],
        b: [&[i16; N]; K],
        b_cache: [&[i16; N / 2]; K],
    );
    /// Append accepted 12-bit samples from `buf` to `r`; returns the count.
    fn rej_uniform(r: &mut [i16], buf: &[u8]) -> usize;
}

/// Runtime-selectable backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BackendKind {
    /// Scalar kernels, available everywhere.
    Reference = 0,
    /// [`crate::simd::PortableSimd`] over 8 lanes.
    #[cfg(feature = "simd")]
    Simd8 = 8,
    /// [`crate::simd::PortableSimd`] over 16 lanes.
    #[cfg(feature = "simd")]
    Simd16 = 16,
    /// [`crate::simd::PortableSimd`] over 32 lanes.
    #[cfg(feature = "simd")]
    Simd32 = 32,
    /// [`crate::simd::PortableSimd`] over 64 lanes.
    #[cfg(feature = "simd")]
    Simd64 = 64,
}

impl BackendKind {
    /// Every backend compiled into this build.
    #[cfg(not(feature = "simd"))]
    pub const ALL: &'static [Self] = &[Self::Reference];

    /// Every backend compiled into this build.
    #[cfg(feature = "simd")]
    pub const ALL: &'static [Self] = &[
        Self::Reference,
        Self::Simd8,
        Self::Simd16,
        Self::Simd32,
        Self::Simd64,
    ];

    /// Short lowercase name, also used by `Display`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Reference => "reference",
            #[cfg(feature = "simd")]
            Self::Simd8 => "simd-8",
            #[cfg(feature = "simd")]
            Self::Simd16 => "simd-16",
            #[cfg(feature = "simd")]
            Self::Simd32 => "simd-32",
            #[cfg(feature = "simd")]
            Self::Simd64 => "simd-64",
        }
    }

    const fn from_raw(value: u8) -> Self {
        match value {
            #[cfg(feature = "simd")]
            8 => Self::Simd8,
            #[cfg(feature = "simd")]
            16 => Self::Simd16,
            #[cfg(feature = "simd")]
            32 => Self::Simd32,
            #[cfg(feature = "simd")]
            64 => Self::Simd64,
            _ => Self::Reference,
        }
    }
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

static BACKEND: AtomicU8 = AtomicU8::new(BackendKind::Reference as u8);

/// Set the global backend used by all polynomial / NTT operations.
pub fn set_backend(kind: BackendKind) {
    BACKEND.store(kind as u8, Ordering::Relaxed);
    #[cfg(feature = "tracing")]
    tracing::debug!(backend = %kind, "selected arithmetic backend");
}

/// The backend currently serving polynomial operations.
#[must_use]
pub fn backend() -> BackendKind {
    BackendKind::from_raw(BACKEND.load(Ordering::Relaxed))
}

/// Call a [`Backend`] method on whichever backend is currently selected.
macro_rules! dispatch {
    ($method:ident ( $($arg:expr),* $(,)? )) => {
        match $crate::backend::backend() {
            $crate::backend::BackendKind::Reference => {
                <$crate::backend::Reference as $crate::backend::Backend>::$method($($arg),*)
            }
            #[cfg(feature = "simd")]
            $crate::backend::BackendKind::Simd8 => {
                <$crate::simd::PortableSimd<8> as $crate::backend::Backend>::$method($($arg),*)
            }
            #[cfg(feature = "simd")]
            $crate::backend::BackendKind::Simd16 => {
                <$crate::simd::PortableSimd<16> as $crate::backend::Backend>::$method($($arg),*)
            }
            #[cfg(feature = "simd")]
            $crate::backend::BackendKind::Simd32 => {
                <$crate::simd::PortableSimd<32> as $crate::backend::Backend>::$method($($arg),*)
            }
            #[cfg(feature = "simd")]
            $crate::backend::BackendKind::Simd64 => {
                <$crate::simd::PortableSimd<64> as $crate::backend::Backend>::$method($($arg),*)
            }
        }
    };
}

pub(crate) fn ntt(r: &mut [i16; N]) {
    assert_abs_bound!(r, Q, "ntt input");
    dispatch!(ntt(r));
    assert_abs_bound!(r, NTT_BOUND, "ntt output");
}

pub(crate) fn invntt_tomont(r: &mut [i16; N]) {
    assert_abs_bound!(r, INVNTT_INPUT_BOUND, "invntt input");
    dispatch!(invntt_tomont(r));
    assert_abs_bound!(r, INVNTT_BOUND, "invntt output");
}

pub(crate) fn poly_reduce(r: &mut [i16; N]) {
    dispatch!(poly_reduce(r));
    assert_bound!(r, 0, Q, "reduce output");
}

pub(crate) fn poly_tomont(r: &mut [i16; N]) {
    dispatch!(poly_tomont(r));
    assert_abs_bound!(r, Q, "tomont output");
}

pub(crate) fn mulcache_compute(x: &mut [i16; N / 2], b: &[i16; N]) {
    dispatch!(mulcache_compute(x, b));
    assert_abs_bound!(x, Q, "mulcache output");
}

pub(crate) fn basemul_cached(
    r: &mut [i16; N],
    a: &[i16; N],
    b: &[i16; N],
    b_cache: &[i16; N / 2],
) {
    assert_abs_bound!(a, BASEMUL_A_BOUND, "basemul lhs");
    assert_abs_bound!(b, NTT_BOUND, "basemul rhs");
    assert_abs_bound!(b_cache, Q, "basemul cache");
    dispatch!(basemul_cached(r, a, b, b_cache));
    assert_abs_bound!(r, BASEMUL_BOUND, "basemul output");
}

pub(crate) fn basemul_acc_cached<const K: usize>(
    r: &mut [i16; N],
    a: [&[i16; N]; K],
    b: [&[i16; N]; K],
    b_cache: [&[i16; N / 2]; K],
) {
    const { assert!(K >= 1 && K <= 4, "vector rank must be 1..=4") }
    for k in 0..K {
        assert_abs_bound!(a[k], BASEMUL_A_BOUND, "basemul_acc lhs");
        assert_abs_bound!(b[k], NTT_BOUND, "basemul_acc rhs");
        assert_abs_bound!(b_cache[k], Q, "basemul_acc cache");
    }
    dispatch!(basemul_acc_cached(r, a, b, b_cache));
    assert_abs_bound!(r, NTT_BOUND, "basemul_acc output");
}

pub(crate) fn rej_uniform(r: &mut [i16], buf: &[u8]) -> usize {
    let ctr = dispatch!(rej_uniform(r, buf));
    debug_assert!(ctr <= r.len());
    assert_bound!(r[..ctr], 0, Q, "rej_uniform output");
    ctr
}
