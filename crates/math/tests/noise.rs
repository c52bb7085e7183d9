//! Samplers checked against a bit-level reference built on the `sha3` crate.

use mlkem_arith::{
    N, NttPolynomial, Polynomial, Q, SYMBYTES,
    sample::{Eta2, Eta3},
};
use proptest::prelude::*;
use sha3::{
    Shake128, Shake256,
    digest::{ExtendableOutput, Update, XofReader},
};

fn bit(buf: &[u8], i: usize) -> i16 {
    ((buf[i / 8] >> (i % 8)) & 1) as i16
}

/// `CBD_eta(SHAKE256(seed || nonce))`, one bit at a time.
fn cbd_reference(seed: &[u8; SYMBYTES], nonce: u8, eta: usize) -> [i16; N] {
    let mut buf = vec![0u8; 64 * eta];
    let mut xof = Shake256::default();
    xof.update(seed);
    xof.update(&[nonce]);
    xof.finalize_xof().read(&mut buf);

    core::array::from_fn(|i| {
        let base = 2 * eta * i;
        let a: i16 = (0..eta).map(|j| bit(&buf, base + j)).sum();
        let b: i16 = (0..eta).map(|j| bit(&buf, base + eta + j)).sum();
        a - b
    })
}

/// Rejection sampling over an unbounded `SHAKE128(seed || x || y)` stream.
fn uniform_reference(seed: &[u8; SYMBYTES], x: u8, y: u8) -> [i16; N] {
    let mut xof = Shake128::default();
    xof.update(seed);
    xof.update(&[x, y]);
    let mut reader = xof.finalize_xof();

    let mut out = [0i16; N];
    let mut ctr = 0;
    while ctr < N {
        let mut t = [0u8; 3];
        reader.read(&mut t);
        let [b0, b1, b2] = t.map(u16::from);
        for val in [(b0 | (b1 << 8)) & 0x0FFF, (b1 >> 4) | (b2 << 4)] {
            if ctr < N && val < Q as u16 {
                out[ctr] = val as i16;
                ctr += 1;
            }
        }
    }
    out
}

#[test]
fn zero_seed_noise() {
    let seed = [0u8; SYMBYTES];
    for nonce in [0, 1, 255] {
        assert_eq!(
            Polynomial::getnoise::<Eta2>(&seed, nonce).coeffs(),
            &cbd_reference(&seed, nonce, 2)
        );
        assert_eq!(
            Polynomial::getnoise::<Eta3>(&seed, nonce).coeffs(),
            &cbd_reference(&seed, nonce, 3)
        );
    }
}

#[test]
fn zero_seed_uniform() {
    let seed = [0u8; SYMBYTES];
    for (x, y) in [(0, 0), (0, 1), (1, 0), (3, 3)] {
        assert_eq!(
            NttPolynomial::sample_uniform(&seed, x, y).coeffs(),
            &uniform_reference(&seed, x, y)
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn noise_matches_reference(seed in any::<[u8; SYMBYTES]>(), nonce in any::<u8>()) {
        let eta2 = Polynomial::getnoise::<Eta2>(&seed, nonce);
        let eta3 = Polynomial::getnoise::<Eta3>(&seed, nonce);
        let expected2 = cbd_reference(&seed, nonce, 2);
        let expected3 = cbd_reference(&seed, nonce, 3);
        prop_assert_eq!(eta2.coeffs(), &expected2);
        prop_assert_eq!(eta3.coeffs(), &expected3);
    }

    #[test]
    fn batched_noise_matches_reference(seed in any::<[u8; SYMBYTES]>(), nonces in any::<[u8; 4]>()) {
        let polys = Polynomial::getnoise_eta1122_x4::<Eta3, Eta2>(&seed, nonces);
        for (lane, p) in polys.iter().enumerate() {
            let eta = if lane < 2 { 3 } else { 2 };
            let expected = cbd_reference(&seed, nonces[lane], eta);
            prop_assert_eq!(p.coeffs(), &expected);
        }
    }

    #[test]
    fn uniform_matches_reference(seed in any::<[u8; SYMBYTES]>(), x in any::<u8>(), y in any::<u8>()) {
        let p = NttPolynomial::sample_uniform(&seed, x, y);
        let expected = uniform_reference(&seed, x, y);
        prop_assert_eq!(p.coeffs(), &expected);
    }
}
