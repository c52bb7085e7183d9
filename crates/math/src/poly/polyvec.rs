use core::ops;

use zeroize::Zeroize;

use super::{CachedNttPolynomial, NttPolynomial, Polynomial};
use crate::{Error, POLYBYTES, backend, check_len, compress::CompressWidth, encode};

/// A vector of `K` polynomials in standard (coefficient) form.
#[derive(Clone, Copy, Debug)]
pub struct Vector<const K: usize> {
    pub(crate) polys: [Polynomial; K],
}

/// A vector of `K` polynomials in NTT domain.
#[derive(Clone, Copy, Debug)]
pub struct NttVector<const K: usize> {
    pub(crate) polys: [NttPolynomial; K],
}

/// A vector of `K` NTT-domain polynomials, each paired with its cache.
#[derive(Clone, Copy, Debug)]
pub struct CachedNttVector<const K: usize> {
    pub(crate) polys: [CachedNttPolynomial; K],
}

impl<const K: usize> Vector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [Polynomial::zero(); K],
        }
    }

    #[must_use]
    pub fn ntt(self) -> NttVector<K> {
        let polys = self.polys.map(Polynomial::ntt);
        NttVector { polys }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// Compress into `K * D::POLY_BYTES` bytes.
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        debug_assert_eq!(r.len(), K * D::POLY_BYTES);
        for (chunk, p) in r.chunks_exact_mut(D::POLY_BYTES).zip(&self.polys) {
            p.compress::<D>(chunk);
        }
    }

    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        debug_assert_eq!(a.len(), K * D::POLY_BYTES);
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(D::POLY_BYTES)) {
            *p = Polynomial::decompress::<D>(chunk);
        }
        v
    }

    /// Length-checked [`Vector::decompress`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if `a.len() != K * D::POLY_BYTES`.
    pub fn try_decompress<D: CompressWidth>(a: &[u8]) -> Result<Self, Error> {
        check_len(a.len(), K * D::POLY_BYTES)?;
        Ok(Self::decompress::<D>(a))
    }

    #[must_use]
    pub const fn polys(&self) -> &[Polynomial; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [Polynomial; K] {
        &mut self.polys
    }
}

impl<const K: usize> NttVector<K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [NttPolynomial::zero(); K],
        }
    }

    #[must_use]
    pub fn ntt_inverse(self) -> Vector<K> {
        let polys = self.polys.map(NttPolynomial::ntt_inverse);
        Vector { polys }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    pub fn to_mont(&mut self) {
        for p in &mut self.polys {
            p.to_mont();
        }
    }

    #[must_use]
    pub fn cached(self) -> CachedNttVector<K> {
        CachedNttVector {
            polys: self.polys.map(NttPolynomial::cached),
        }
    }

    /// [`NttVector::basemul_acc_cached`] for a right operand used only once;
    /// computes the caches on the fly.
    #[must_use]
    pub fn basemul_acc(&self, other: &Self) -> NttPolynomial {
        self.basemul_acc_cached(&other.cached())
    }

    /// `sum_i(self[i] * other[i])` in NTT domain, accumulated in 32 bits and
    /// Montgomery-reduced once per coefficient.
    ///
    /// Requires `|self| < 4096`. The result carries a factor `R^{-1}` and is
    /// not reduced.
    #[must_use]
    pub fn basemul_acc_cached(&self, other: &CachedNttVector<K>) -> NttPolynomial {
        let mut r = NttPolynomial::zero();
        backend::basemul_acc_cached(
            &mut r.0,
            self.polys.each_ref().map(|p| &p.0),
            other.polys.each_ref().map(|p| &p.poly.0),
            other.polys.each_ref().map(|p| &p.cache.0),
        );
        r
    }

    /// Serialize to `K * 384` bytes (12-bit packing).
    pub fn to_bytes(&self, r: &mut [u8]) {
        debug_assert_eq!(r.len(), K * POLYBYTES);
        for (chunk, p) in r.as_chunks_mut::<POLYBYTES>().0.iter_mut().zip(&self.polys) {
            encode::coeffs_to_bytes(chunk, &p.0);
        }
    }

    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        debug_assert_eq!(a.len(), K * POLYBYTES);
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.as_chunks::<POLYBYTES>().0) {
            *p = NttPolynomial::from_bytes(chunk);
        }
        v
    }

    /// Length-checked [`NttVector::from_bytes`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if `a.len() != K * POLYBYTES`.
    pub fn try_from_bytes(a: &[u8]) -> Result<Self, Error> {
        check_len(a.len(), K * POLYBYTES)?;
        Ok(Self::from_bytes(a))
    }

    #[must_use]
    pub const fn polys(&self) -> &[NttPolynomial; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [NttPolynomial; K] {
        &mut self.polys
    }
}

impl<const K: usize> CachedNttVector<K> {
    #[must_use]
    pub const fn polys(&self) -> &[CachedNttPolynomial; K] {
        &self.polys
    }

    #[must_use]
    pub fn into_inner(self) -> NttVector<K> {
        NttVector {
            polys: self.polys.map(CachedNttPolynomial::into_inner),
        }
    }
}

impl<const K: usize> From<[Polynomial; K]> for Vector<K> {
    fn from(polys: [Polynomial; K]) -> Self {
        Self { polys }
    }
}

impl<const K: usize> From<[NttPolynomial; K]> for NttVector<K> {
    fn from(polys: [NttPolynomial; K]) -> Self {
        Self { polys }
    }
}

impl<const K: usize> From<NttVector<K>> for CachedNttVector<K> {
    fn from(v: NttVector<K>) -> Self {
        v.cached()
    }
}

impl<'b, const K: usize> ops::Add<&'b Vector<K>> for &Vector<K> {
    type Output = Vector<K>;
    fn add(self, rhs: &'b Vector<K>) -> Vector<K> {
        let mut r = *self;
        r += rhs;
        r
    }
}

impl<const K: usize> ops::AddAssign<&Self> for Vector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(&rhs.polys) {
            *a += b;
        }
    }
}

impl<const K: usize> ops::SubAssign<&Self> for Vector<K> {
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(&rhs.polys) {
            *a -= b;
        }
    }
}

impl<const K: usize> ops::AddAssign<&Self> for NttVector<K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(&rhs.polys) {
            *a += b;
        }
    }
}

impl<const K: usize> Default for Vector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> Default for NttVector<K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<const K: usize> Zeroize for Vector<K> {
    fn zeroize(&mut self) {
        for p in &mut self.polys {
            p.zeroize();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        N, Q,
        compress::{D10, D11},
    };

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let mut v = NttVector::<3>::zero();
        for (k, p) in v.polys.iter_mut().enumerate() {
            p.0 = core::array::from_fn(|i| ((k * N + i) as i16 * 7) % (Q - 1));
        }
        let mut buf = [0u8; 3 * POLYBYTES];
        v.to_bytes(&mut buf);
        let v2 = NttVector::<3>::from_bytes(&buf);
        for k in 0..3 {
            assert_eq!(v.polys[k].0, v2.polys[k].0, "poly {k} mismatch");
        }
    }

    #[test]
    fn try_from_bytes_checks_length() {
        assert_eq!(
            NttVector::<2>::try_from_bytes(&[0u8; 3 * POLYBYTES]).unwrap_err(),
            Error::InvalidLength {
                expected: 2 * POLYBYTES,
                actual: 3 * POLYBYTES
            }
        );
    }

    #[test]
    fn add_zero_identity() {
        let mut v = Vector::<2>::zero();
        v.polys[0].0[0] = 42;
        v.polys[1].0[255] = 100;
        let zero = Vector::<2>::zero();
        let result = &v + &zero;
        assert_eq!(result.polys[0].0[0], 42);
        assert_eq!(result.polys[1].0[255], 100);
    }

    #[test]
    fn vector_compress_roundtrip_error() {
        let mut v = Vector::<4>::zero();
        for (k, p) in v.polys.iter_mut().enumerate() {
            p.0 = core::array::from_fn(|i| ((k * N + i) * 13 % Q as usize) as i16);
        }
        let mut buf = [0u8; 4 * 352];
        v.compress::<D11>(&mut buf);
        let w = Vector::<4>::decompress::<D11>(&buf);
        for (p, r) in v.polys.iter().zip(&w.polys) {
            for (&a, &b) in p.0.iter().zip(&r.0) {
                let d = (a - b).rem_euclid(Q);
                assert!(d.min(Q - d) <= 1);
            }
        }
        assert!(Vector::<4>::try_decompress::<D10>(&buf).is_err());
    }

    #[test]
    fn accumulate_matches_sum_of_basemuls() {
        let a = NttVector::<3> {
            polys: core::array::from_fn(|k| {
                NttPolynomial(core::array::from_fn(|i| ((i * 41 + k * 5) % 4096) as i16))
            }),
        };
        let b = Vector::<3> {
            polys: core::array::from_fn(|k| {
                Polynomial(core::array::from_fn(|i| ((i * 3 + k) % 7) as i16 - 3))
            }),
        }
        .ntt()
        .cached();

        let acc = a.basemul_acc_cached(&b);
        assert_eq!(a.basemul_acc(&b.into_inner()).0, acc.0);
        for i in 0..N {
            let expected: i32 = (0..3)
                .map(|k| a.polys[k].basemul_cached(&b.polys[k]).0[i] as i32)
                .sum();
            assert_eq!(
                (acc.0[i] as i32 - expected).rem_euclid(Q as i32),
                0,
                "coefficient {i}"
            );
        }
    }
}
