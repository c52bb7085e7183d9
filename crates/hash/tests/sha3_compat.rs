//! Cross-check every sponge entry point against the RustCrypto `sha3` crate.

use mlkem_keccak::{
    LANES, SHAKE128_RATE, shake128, shake128_absorb, shake128x4_absorb, shake256, shake256x4,
};
use proptest::prelude::*;
use sha3::{
    Shake128, Shake256,
    digest::{ExtendableOutput, Update, XofReader},
};

fn sha3_shake128(input: &[u8], out: &mut [u8]) {
    Shake128::default().chain(input).finalize_xof().read(out);
}

fn sha3_shake256(input: &[u8], out: &mut [u8]) {
    Shake256::default().chain(input).finalize_xof().read(out);
}

#[test]
fn shake128_empty_input() {
    let mut ours = [0u8; 64];
    let mut theirs = [0u8; 64];
    shake128(&mut ours, &[]);
    sha3_shake128(&[], &mut theirs);
    assert_eq!(ours, theirs);
}

proptest! {
    #[test]
    fn shake128_matches(input in prop::collection::vec(any::<u8>(), 0..400), out_len in 1usize..600) {
        let mut ours = vec![0u8; out_len];
        let mut theirs = vec![0u8; out_len];
        shake128(&mut ours, &input);
        sha3_shake128(&input, &mut theirs);
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn shake256_matches(input in prop::collection::vec(any::<u8>(), 0..400), out_len in 1usize..600) {
        let mut ours = vec![0u8; out_len];
        let mut theirs = vec![0u8; out_len];
        shake256(&mut ours, &input);
        sha3_shake256(&input, &mut theirs);
        prop_assert_eq!(ours, theirs);
    }

    #[test]
    fn shake128_reader_matches(input in prop::collection::vec(any::<u8>(), 0..200)) {
        let mut reader = shake128_absorb(&input);
        let mut theirs = [0u8; 3 * SHAKE128_RATE];
        sha3_shake128(&input, &mut theirs);
        for block in theirs.chunks_exact(SHAKE128_RATE) {
            let mut ours = [0u8; SHAKE128_RATE];
            reader.squeeze_block(&mut ours);
            prop_assert_eq!(&ours[..], block);
        }
    }

    #[test]
    fn shake256x4_matches(seed in any::<[u8; 32]>(), nonces in any::<[u8; 4]>(), out_len in 1usize..400) {
        let inputs: [[u8; 33]; LANES] = core::array::from_fn(|lane| {
            let mut buf = [0u8; 33];
            buf[..32].copy_from_slice(&seed);
            buf[32] = nonces[lane];
            buf
        });
        let mut outs: [Vec<u8>; LANES] = core::array::from_fn(|_| vec![0u8; out_len]);
        {
            let [o0, o1, o2, o3] = &mut outs;
            shake256x4(
                [o0.as_mut_slice(), o1.as_mut_slice(), o2.as_mut_slice(), o3.as_mut_slice()],
                [&inputs[0], &inputs[1], &inputs[2], &inputs[3]],
            );
        }
        for lane in 0..LANES {
            let mut expected = vec![0u8; out_len];
            sha3_shake256(&inputs[lane], &mut expected);
            prop_assert_eq!(&outs[lane], &expected, "lane {}", lane);
        }
    }

    #[test]
    fn shake128x4_matches(seed in any::<[u8; 32]>(), xy in any::<[(u8, u8); 4]>()) {
        let inputs: [[u8; 34]; LANES] = core::array::from_fn(|lane| {
            let mut buf = [0u8; 34];
            buf[..32].copy_from_slice(&seed);
            buf[32] = xy[lane].0;
            buf[33] = xy[lane].1;
            buf
        });
        let mut reader = shake128x4_absorb([&inputs[0], &inputs[1], &inputs[2], &inputs[3]]);
        let mut blocks = [[[0u8; SHAKE128_RATE]; LANES]; 2];
        for b in &mut blocks {
            reader.squeeze_blocks(b);
        }
        for lane in 0..LANES {
            let mut expected = [0u8; 2 * SHAKE128_RATE];
            sha3_shake128(&inputs[lane], &mut expected);
            prop_assert_eq!(&blocks[0][lane][..], &expected[..SHAKE128_RATE]);
            prop_assert_eq!(&blocks[1][lane][..], &expected[SHAKE128_RATE..]);
        }
    }
}
