//! Polynomial byte-level encoding (12-bit packing) and message encode/decode.

use crate::{
    N, POLYBYTES, Q, SYMBYTES,
    compress::{CompressWidth, D1},
    contract::{assert_abs_bound, assert_bound},
    ct::signed_to_unsigned_q,
};

/// Pack signed canonical coefficients (`|c| < q`) into 384 bytes, two
/// coefficients per three bytes, little-endian bit order.
pub fn coeffs_to_bytes(r: &mut [u8; POLYBYTES], a: &[i16; N]) {
    assert_abs_bound!(a, Q, "to_bytes input");
    let (pairs, _) = a.as_chunks::<2>();
    let (out, _) = r.as_chunks_mut::<3>();
    for (o, &[c0, c1]) in out.iter_mut().zip(pairs) {
        let t0 = signed_to_unsigned_q(c0) as u16;
        let t1 = signed_to_unsigned_q(c1) as u16;
        *o = [t0 as u8, ((t0 >> 8) | (t1 << 4)) as u8, (t1 >> 4) as u8];
    }
}

/// Unpack 384 bytes into 12-bit coefficients in `[0, 4096)`.
///
/// Byte strings that did not come from [`coeffs_to_bytes`] may decode to
/// values `>= q`; reduce afterwards if canonical input is needed.
pub fn bytes_to_coeffs(r: &mut [i16; N], a: &[u8; POLYBYTES]) {
    let (triples, _) = a.as_chunks::<3>();
    let (out, _) = r.as_chunks_mut::<2>();
    for (o, b) in out.iter_mut().zip(triples) {
        let b = b.map(u16::from);
        *o = [b[0] | ((b[1] & 0x0F) << 8), (b[1] >> 4) | (b[2] << 4)].map(|x| x as i16);
    }
    assert_bound!(r, 0, 4096, "from_bytes output");
}

/// Decode an unsigned canonical polynomial to a 32-byte message, one bit per
/// coefficient (`compress_d1`).
pub fn coeffs_to_message(msg: &mut [u8; SYMBYTES], a: &[i16; N]) {
    D1::compress_poly(msg, a);
}

/// Encode a 32-byte message: bit `i` becomes coefficient `i` equal to `0` or
/// `(q + 1) / 2`.
pub fn message_to_coeffs(r: &mut [i16; N], msg: &[u8; SYMBYTES]) {
    D1::decompress_poly(r, msg);
}
