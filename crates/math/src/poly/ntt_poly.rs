use core::ops;

use mlkem_keccak::LANES;

use super::{CachedNttPolynomial, MulCache, Polynomial};
use crate::{Error, N, POLYBYTES, SYMBYTES, backend, encode, sample};

/// Polynomial in NTT (bit-reversed) domain.
#[derive(Clone, Copy)]
pub struct NttPolynomial(pub(crate) [i16; N]);

impl NttPolynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Inverse NTT; result is in Montgomery domain. Requires `|c| < 2^14`.
    #[must_use]
    pub fn ntt_inverse(mut self) -> Polynomial {
        backend::invntt_tomont(&mut self.0);
        Polynomial(self.0)
    }

    /// Reduce every coefficient to `[0, q)`.
    pub fn reduce(&mut self) {
        backend::poly_reduce(&mut self.0);
    }

    pub fn to_mont(&mut self) {
        backend::poly_tomont(&mut self.0);
    }

    #[must_use]
    pub fn mulcache(&self) -> MulCache {
        let mut cache = MulCache::zero();
        backend::mulcache_compute(&mut cache.0, &self.0);
        cache
    }

    /// Freeze this polynomial as the right-hand operand of repeated products.
    #[must_use]
    pub fn cached(self) -> CachedNttPolynomial {
        CachedNttPolynomial::new(self)
    }

    /// Pointwise basemul without a stored cache. Bit-identical to
    /// [`NttPolynomial::basemul_cached`] against `other.cached()`.
    #[must_use]
    pub fn basemul(&self, other: &Self) -> Self {
        let cache = other.mulcache();
        let mut r = Self::zero();
        backend::basemul_cached(&mut r.0, &self.0, &other.0, &cache.0);
        r
    }

    /// Pointwise basemul reusing `other`'s precomputed cache. Requires
    /// `|self| < 4096`; the result carries a factor `R^{-1}`.
    #[must_use]
    pub fn basemul_cached(&self, other: &CachedNttPolynomial) -> Self {
        let mut r = Self::zero();
        backend::basemul_cached(&mut r.0, &self.0, &other.poly.0, &other.cache.0);
        r
    }

    /// Serialize to bytes (12-bit packing, 384 bytes). Requires `|c| < q`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; POLYBYTES] {
        let mut r = [0u8; POLYBYTES];
        encode::coeffs_to_bytes(&mut r, &self.0);
        r
    }

    /// Deserialize from bytes (12-bit unpacking, coefficients `< 4096`).
    #[must_use]
    pub fn from_bytes(a: &[u8; POLYBYTES]) -> Self {
        let mut p = Self::zero();
        encode::bytes_to_coeffs(&mut p.0, a);
        p
    }

    /// Length-checked [`NttPolynomial::from_bytes`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if `a.len() != POLYBYTES`.
    pub fn try_from_bytes(a: &[u8]) -> Result<Self, Error> {
        let bytes = <&[u8; POLYBYTES]>::try_from(a).map_err(|_| Error::InvalidLength {
            expected: POLYBYTES,
            actual: a.len(),
        })?;
        Ok(Self::from_bytes(bytes))
    }

    /// Uniform polynomial from `SHAKE128(seed || x || y)`, coefficients in
    /// `[0, q)`.
    #[must_use]
    pub fn sample_uniform(seed: &[u8; SYMBYTES], x: u8, y: u8) -> Self {
        let mut p = Self::zero();
        sample::sample_uniform(&mut p.0, seed, x, y);
        p
    }

    /// Four [`NttPolynomial::sample_uniform`] results from one 4-lane sponge.
    #[must_use]
    pub fn sample_uniform_x4(seed: &[u8; SYMBYTES], xy: [[u8; 2]; LANES]) -> [Self; LANES] {
        let mut polys = [Self::zero(); LANES];
        sample::sample_uniform_x4(polys.each_mut().map(|p| &mut p.0), seed, xy);
        polys
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[i16; N] {
        &self.0
    }

    #[must_use]
    pub const fn coeffs_mut(&mut self) -> &mut [i16; N] {
        &mut self.0
    }
}

impl From<[i16; N]> for NttPolynomial {
    #[inline]
    fn from(coeffs: [i16; N]) -> Self {
        Self(coeffs)
    }
}

impl Default for NttPolynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl core::fmt::Debug for NttPolynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttPolynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl<'b> ops::Add<&'b NttPolynomial> for &NttPolynomial {
    type Output = NttPolynomial;
    #[inline]
    fn add(self, rhs: &'b NttPolynomial) -> NttPolynomial {
        let mut r = *self;
        r += rhs;
        r
    }
}

impl ops::AddAssign<&Self> for NttPolynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(&rhs.0) {
            *a += b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Q,
        reduce::{barrett_reduce, montgomery_reduce},
    };

    #[test]
    fn ntt_roundtrip() {
        let p = Polynomial(core::array::from_fn(|i| (i % 13) as i16));
        let original = p.0;

        let ntt_p = p.ntt();
        assert_ne!(ntt_p.0, original);

        let recovered = ntt_p.ntt_inverse();
        let coeffs = recovered.0.map(|c| barrett_reduce(montgomery_reduce(c as i32)));
        assert_eq!(coeffs, original);
    }

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let p = NttPolynomial(core::array::from_fn(|i| (i as i16 * 13) % (Q - 1)));
        let buf = p.to_bytes();
        let q = NttPolynomial::from_bytes(&buf);
        assert_eq!(p.0, q.0);
    }

    #[test]
    fn try_from_bytes_checks_length() {
        assert_eq!(
            NttPolynomial::try_from_bytes(&[0u8; POLYBYTES + 1]).unwrap_err(),
            Error::InvalidLength {
                expected: POLYBYTES,
                actual: POLYBYTES + 1
            }
        );
        assert!(NttPolynomial::try_from_bytes(&[0u8; POLYBYTES]).is_ok());
    }

    #[test]
    fn cached_basemul_matches_uncached() {
        let a = NttPolynomial(core::array::from_fn(|i| ((i * 31) % 4096) as i16));
        let b = Polynomial(core::array::from_fn(|i| ((i * 7) % 5) as i16 - 2)).ntt();
        let plain = a.basemul(&b);
        let cached = a.basemul_cached(&b.cached());
        assert_eq!(plain.0, cached.0);
    }

    #[test]
    fn inverse_ntt_at_input_bound() {
        let wide = NttPolynomial([16383; N]).ntt_inverse();
        let narrow = NttPolynomial([barrett_reduce(16383); N]).ntt_inverse();
        assert!(wide.0.iter().all(|&c| c.abs() < Q));
        assert_eq!(
            wide.0.map(|c| c.rem_euclid(Q)),
            narrow.0.map(|c| c.rem_euclid(Q))
        );
    }
}
