use super::NttPolynomial;
use crate::N;

/// Precomputed `b[4i+1]·ζ_i` and `b[4i+3]·(−ζ_i)` products of one
/// NTT-domain polynomial, `|c| < q`.
#[derive(Clone, Copy)]
pub struct MulCache(pub(crate) [i16; N / 2]);

impl MulCache {
    pub(crate) const fn zero() -> Self {
        Self([0i16; N / 2])
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N / 2] {
        &self.0
    }
}

impl core::fmt::Debug for MulCache {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MulCache")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

/// An NTT-domain polynomial together with the [`MulCache`] derived from it.
#[derive(Clone, Copy, Debug)]
pub struct CachedNttPolynomial {
    pub(crate) poly: NttPolynomial,
    pub(crate) cache: MulCache,
}

impl CachedNttPolynomial {
    #[must_use]
    pub fn new(poly: NttPolynomial) -> Self {
        let cache = poly.mulcache();
        Self { poly, cache }
    }

    #[must_use]
    pub const fn poly(&self) -> &NttPolynomial {
        &self.poly
    }

    #[must_use]
    pub const fn cache(&self) -> &MulCache {
        &self.cache
    }

    /// Drop the cache and give the polynomial back for mutation.
    #[must_use]
    pub const fn into_inner(self) -> NttPolynomial {
        self.poly
    }
}

impl From<NttPolynomial> for CachedNttPolynomial {
    #[inline]
    fn from(poly: NttPolynomial) -> Self {
        Self::new(poly)
    }
}
