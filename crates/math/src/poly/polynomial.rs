use core::ops;

use mlkem_keccak::LANES;
use zeroize::Zeroize;

use super::NttPolynomial;
use crate::{
    Error, N, SYMBYTES, backend, check_len,
    compress::CompressWidth,
    encode,
    sample::{self, CbdWidth},
};

/// Polynomial in standard (coefficient) form over `R_q = Z_q[X]/(X^{256}+1)`.
#[derive(Clone, Copy)]
pub struct Polynomial(pub(crate) [i16; N]);

impl Polynomial {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([0i16; N])
    }

    /// Consuming forward NTT transform. Requires `|c| < q`.
    #[must_use]
    pub fn ntt(mut self) -> NttPolynomial {
        backend::ntt(&mut self.0);
        NttPolynomial(self.0)
    }

    /// Reduce every coefficient to `[0, q)`.
    pub fn reduce(&mut self) {
        backend::poly_reduce(&mut self.0);
    }

    /// Multiply by the Montgomery factor `R = 2^16`.
    pub fn to_mont(&mut self) {
        backend::poly_tomont(&mut self.0);
    }

    /// Compress reduced coefficients to `D` bits into `D::POLY_BYTES` bytes.
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        D::compress_poly(r, &self.0);
    }

    /// Decompress `D::POLY_BYTES` bytes. Coefficients land in `[0, q)`.
    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut p = Self::zero();
        D::decompress_poly(&mut p.0, a);
        p
    }

    /// Length-checked [`Polynomial::decompress`].
    ///
    /// # Errors
    ///
    /// [`Error::InvalidLength`] if `a.len() != D::POLY_BYTES`.
    pub fn try_decompress<D: CompressWidth>(a: &[u8]) -> Result<Self, Error> {
        check_len(a.len(), D::POLY_BYTES)?;
        Ok(Self::decompress::<D>(a))
    }

    /// Decode a 32-byte message into a polynomial.
    #[must_use]
    pub fn from_message(msg: &[u8; SYMBYTES]) -> Self {
        let mut p = Self::zero();
        encode::message_to_coeffs(&mut p.0, msg);
        p
    }

    /// Encode a reduced polynomial to a 32-byte message.
    #[must_use]
    pub fn to_message(&self) -> [u8; SYMBYTES] {
        let mut msg = [0u8; SYMBYTES];
        encode::coeffs_to_message(&mut msg, &self.0);
        msg
    }

    /// Sample noise polynomial via the sealed [`CbdWidth`] trait.
    #[must_use]
    pub fn sample_cbd<Eta: CbdWidth>(buf: &[u8]) -> Self {
        let mut p = Self::zero();
        Eta::sample(&mut p.0, buf);
        p
    }

    /// `CBD_eta(SHAKE256(seed || nonce))`.
    #[must_use]
    pub fn getnoise<Eta: CbdWidth>(seed: &[u8; SYMBYTES], nonce: u8) -> Self {
        let mut p = Self::zero();
        sample::getnoise::<Eta>(&mut p.0, seed, nonce);
        p
    }

    /// Four [`Polynomial::getnoise`] results from one batched sponge call.
    #[must_use]
    pub fn getnoise_x4<Eta: CbdWidth>(seed: &[u8; SYMBYTES], nonces: [u8; LANES]) -> [Self; LANES] {
        let mut polys = [Self::zero(); LANES];
        sample::getnoise_x4::<Eta>(polys.each_mut().map(|p| &mut p.0), seed, nonces);
        polys
    }

    /// Batched noise where the first two outputs use `Eta1` and the last two
    /// use `Eta2`.
    #[must_use]
    pub fn getnoise_eta1122_x4<Eta1: CbdWidth, Eta2: CbdWidth>(
        seed: &[u8; SYMBYTES],
        nonces: [u8; LANES],
    ) -> [Self; LANES] {
        let mut polys = [Self::zero(); LANES];
        sample::getnoise_eta1122_x4::<Eta1, Eta2>(
            polys.each_mut().map(|p| &mut p.0),
            seed,
            nonces,
        );
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

impl From<[i16; N]> for Polynomial {
    #[inline]
    fn from(coeffs: [i16; N]) -> Self {
        Self(coeffs)
    }
}

impl Default for Polynomial {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl Zeroize for Polynomial {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl<'b> ops::Add<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn add(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = *self;
        r += rhs;
        r
    }
}

impl<'b> ops::Sub<&'b Polynomial> for &Polynomial {
    type Output = Polynomial;
    #[inline]
    fn sub(self, rhs: &'b Polynomial) -> Polynomial {
        let mut r = *self;
        r -= rhs;
        r
    }
}

impl ops::AddAssign<&Self> for Polynomial {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(&rhs.0) {
            *a += b;
        }
    }
}

impl ops::SubAssign<&Self> for Polynomial {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(&rhs.0) {
            *a -= b;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Q,
        compress::{D4, D5},
        sample::{Eta2, Eta3},
    };

    #[test]
    fn add_sub_inverse() {
        let a = Polynomial(core::array::from_fn(|i| (i as i16) % Q));
        let b = Polynomial(core::array::from_fn(|i| ((N - i) as i16) % Q));
        let sum = &a + &b;
        let recovered = &sum - &b;
        assert_eq!(a.0, recovered.0);
    }

    #[test]
    fn msg_roundtrip() {
        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i * 37) as u8);
        let p = Polynomial::from_message(&msg);
        let recovered = p.to_message();
        assert_eq!(msg, recovered);
    }

    #[test]
    fn reduce_is_unsigned_canonical() {
        let mut p = Polynomial(core::array::from_fn(|i| {
            (i as i16).wrapping_mul(257).wrapping_sub(30000)
        }));
        let before = p.0;
        p.reduce();
        for (i, (&x, &y)) in before.iter().zip(p.0.iter()).enumerate() {
            assert!((0..Q).contains(&y), "index {i}: {y}");
            assert_eq!((x as i32 - y as i32).rem_euclid(Q as i32), 0, "index {i}");
        }
    }

    #[test]
    fn reduce_full_i16_range() {
        let mut p = Polynomial([i16::MAX; N]);
        p.reduce();
        assert_eq!(p.0, [32767 % Q; N]);
        let mut p = Polynomial([i16::MIN; N]);
        p.reduce();
        assert_eq!(p.0, [522; N]);
    }

    #[test]
    fn try_decompress_checks_length() {
        assert_eq!(
            Polynomial::try_decompress::<D4>(&[0u8; 127]).unwrap_err(),
            Error::InvalidLength {
                expected: 128,
                actual: 127
            }
        );
        let p = Polynomial::try_decompress::<D5>(&[0xFFu8; 160]).unwrap();
        assert!(p.0.iter().all(|&c| (0..Q).contains(&c)));
    }

    #[test]
    fn getnoise_batch_matches_single() {
        let seed = [7u8; SYMBYTES];
        let batch = Polynomial::getnoise_eta1122_x4::<Eta3, Eta2>(&seed, [0, 1, 2, 3]);
        assert_eq!(batch[0].0, Polynomial::getnoise::<Eta3>(&seed, 0).0);
        assert_eq!(batch[3].0, Polynomial::getnoise::<Eta2>(&seed, 3).0);
    }

    #[test]
    fn zeroize_clears() {
        let mut p = Polynomial::getnoise::<Eta2>(&[1u8; SYMBYTES], 9);
        p.zeroize();
        assert_eq!(p.0, [0i16; N]);
    }
}
