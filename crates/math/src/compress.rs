//! Sealed compression-width traits and compress/decompress operations.
//!
//! Each compression width (D=1,4,5,10,11) is a zero-sized marker type
//! implementing [`CompressWidth`], eliminating runtime dispatch.
//!
//! Compression never divides: every width uses a multiply-and-shift that
//! equals `floor((u * 2^d + floor(q/2)) / q) mod 2^d` for all `u in [0, q)`.
//! The narrow widths fit a `u32` reciprocal; D10/D11 use the Barrett
//! reciprocal `ceil(2^40 / q)` in `u64`.

use crate::{
    N, Q, SYMBYTES,
    contract::{assert_bound, assert_len},
    ct::cmov_int16,
};

mod sealed {
    pub trait Sealed {}
}

pub trait CompressWidthParams: sealed::Sealed {
    const D: u32;
    const POLY_BYTES: usize;

    /// Compress one unsigned canonical coefficient to `D` bits.
    fn compress_coeff(u: u16) -> u16;

    /// `(y * q + 2^{D-1}) >> D`, the representative of `y` in `[0, q)`.
    #[inline]
    #[must_use]
    fn decompress_coeff(y: u16) -> u16 {
        debug_assert!(y < (1 << Self::D), "decompress: input exceeds width");
        (((y as u32) * (Q as u32) + (1u32 << (Self::D - 1))) >> Self::D) as u16
    }
}

pub trait CompressWidth: CompressWidthParams {
    /// Pack `N` unsigned canonical coefficients into `POLY_BYTES` bytes.
    fn compress_poly(r: &mut [u8], coeffs: &[i16; N]);
    /// Unpack `POLY_BYTES` bytes into `N` coefficients in `[0, q)`.
    fn decompress_poly(coeffs: &mut [i16; N], a: &[u8]);
}

macro_rules! compress_width {
    ($($name:ident: $d:expr, $poly_bytes:expr, |$u:ident| $compress:expr;)*) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name;
            impl sealed::Sealed for $name {}
            impl CompressWidthParams for $name {
                const D: u32 = $d;
                const POLY_BYTES: usize = $poly_bytes;

                #[inline]
                fn compress_coeff($u: u16) -> u16 {
                    debug_assert!($u < Q as u16, "compress: input not canonical");
                    let t: u16 = $compress;
                    t & ((1u16 << $d) - 1)
                }
            }
        )*
    };
}

/// ceil(2^40 / q).
const COMPRESS_BARRETT_M: u64 = (1u64 << 40).div_ceil(Q as u64);

compress_width!(
    D1: 1, SYMBYTES, |u| ((((u as u32) << 1) + 1665).wrapping_mul(80635) >> 28) as u16;
    D4: 4, 128, |u| ((((u as u32) << 4) + 1665).wrapping_mul(80635) >> 28) as u16;
    D5: 5, 160, |u| ((((u as u32) << 5) + 1664).wrapping_mul(40318) >> 27) as u16;
    D10: 10, 320, |u| (((((u as u64) << 10) + 1664) * COMPRESS_BARRETT_M) >> 40) as u16;
    D11: 11, 352, |u| (((((u as u64) << 11) + 1664) * COMPRESS_BARRETT_M) >> 40) as u16;
);

#[inline]
fn compress_all<D: CompressWidthParams>(a: &[i16; N]) -> [u16; N] {
    assert_bound!(a, 0, Q, "compress input");
    a.map(|c| D::compress_coeff(c as u16))
}

#[inline]
fn decompress_all<D: CompressWidthParams>(t: &[u16; N]) -> [i16; N] {
    let r = t.map(|y| D::decompress_coeff(y) as i16);
    assert_bound!(r, 0, Q, "decompress output");
    r
}

impl CompressWidth for D1 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        assert_len!(r, Self::POLY_BYTES);
        let t = compress_all::<Self>(a);
        let (chunks, _) = t.as_chunks::<8>();
        for (byte, chunk) in r.iter_mut().zip(chunks) {
            let mut b = 0u8;
            for (&c, j) in chunk.iter().zip(0..8) {
                b |= (c as u8) << j;
            }
            *byte = b;
        }
    }

    fn decompress_poly(r: &mut [i16; N], msg: &[u8]) {
        assert_len!(msg, Self::POLY_BYTES);
        let (chunks, _) = r.as_chunks_mut::<8>();
        for (chunk, &byte) in chunks.iter_mut().zip(msg) {
            for (c, j) in chunk.iter_mut().zip(0..8) {
                *c = 0;
                cmov_int16(c, (Q + 1) / 2, ((byte >> j) & 1) as u16);
            }
        }
        assert_bound!(r, 0, Q, "message decode output");
    }
}

impl CompressWidth for D4 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        assert_len!(r, Self::POLY_BYTES);
        let t = compress_all::<Self>(a);
        let (chunks, _) = t.as_chunks::<2>();
        for (byte, &[lo, hi]) in r.iter_mut().zip(chunks) {
            *byte = (lo as u8) | ((hi as u8) << 4);
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        assert_len!(a, Self::POLY_BYTES);
        let mut t = [0u16; N];
        let (chunks, _) = t.as_chunks_mut::<2>();
        for (chunk, &byte) in chunks.iter_mut().zip(a) {
            *chunk = [byte & 0x0F, byte >> 4].map(u16::from);
        }
        *r = decompress_all::<Self>(&t);
    }
}

impl CompressWidth for D5 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        assert_len!(r, Self::POLY_BYTES);
        let t = compress_all::<Self>(a);
        let (in_chunks, _) = t.as_chunks::<8>();
        let (out_chunks, _) = r.as_chunks_mut::<5>();
        for (o, chunk) in out_chunks.iter_mut().zip(in_chunks) {
            let s = chunk.map(|x| x as u8);
            *o = [
                s[0] | (s[1] << 5),
                (s[1] >> 3) | (s[2] << 2) | (s[3] << 7),
                (s[3] >> 1) | (s[4] << 4),
                (s[4] >> 4) | (s[5] << 1) | (s[6] << 6),
                (s[6] >> 2) | (s[7] << 3),
            ];
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        assert_len!(a, Self::POLY_BYTES);
        let mut t = [0u16; N];
        let (in_chunks, _) = a.as_chunks::<5>();
        let (out_chunks, _) = t.as_chunks_mut::<8>();
        for (o, b) in out_chunks.iter_mut().zip(in_chunks) {
            *o = [
                (b[0] & 0x1F),
                ((b[0] >> 5) | ((b[1] & 0x03) << 3)),
                ((b[1] >> 2) & 0x1F),
                ((b[1] >> 7) | ((b[2] & 0x0F) << 1)),
                ((b[2] >> 4) | ((b[3] & 0x01) << 4)),
                ((b[3] >> 1) & 0x1F),
                ((b[3] >> 6) | ((b[4] & 0x07) << 2)),
                (b[4] >> 3),
            ]
            .map(u16::from);
        }
        *r = decompress_all::<Self>(&t);
    }
}

impl CompressWidth for D10 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        assert_len!(r, Self::POLY_BYTES);
        let t = compress_all::<Self>(a);
        let (in_chunks, _) = t.as_chunks::<4>();
        let (out_chunks, _) = r.as_chunks_mut::<5>();
        for (o, s) in out_chunks.iter_mut().zip(in_chunks) {
            *o = [
                s[0],
                ((s[0] >> 8) | (s[1] << 2)),
                ((s[1] >> 6) | (s[2] << 4)),
                ((s[2] >> 4) | (s[3] << 6)),
                (s[3] >> 2),
            ]
            .map(|x| x as u8);
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        assert_len!(a, Self::POLY_BYTES);
        let mut t = [0u16; N];
        let (in_chunks, _) = a.as_chunks::<5>();
        let (out_chunks, _) = t.as_chunks_mut::<4>();
        for (o, chunk) in out_chunks.iter_mut().zip(in_chunks) {
            let b = chunk.map(u16::from);
            *o = [
                (b[0] | ((b[1] & 0x03) << 8)),
                ((b[1] >> 2) | ((b[2] & 0x0F) << 6)),
                ((b[2] >> 4) | ((b[3] & 0x3F) << 4)),
                ((b[3] >> 6) | (b[4] << 2)),
            ];
        }
        *r = decompress_all::<Self>(&t);
    }
}

impl CompressWidth for D11 {
    fn compress_poly(r: &mut [u8], a: &[i16; N]) {
        assert_len!(r, Self::POLY_BYTES);
        let t = compress_all::<Self>(a);
        let (in_chunks, _) = t.as_chunks::<8>();
        let (out_chunks, _) = r.as_chunks_mut::<11>();
        for (o, s) in out_chunks.iter_mut().zip(in_chunks) {
            *o = [
                s[0],
                ((s[0] >> 8) | (s[1] << 3)),
                ((s[1] >> 5) | (s[2] << 6)),
                (s[2] >> 2),
                ((s[2] >> 10) | (s[3] << 1)),
                ((s[3] >> 7) | (s[4] << 4)),
                ((s[4] >> 4) | (s[5] << 7)),
                (s[5] >> 1),
                ((s[5] >> 9) | (s[6] << 2)),
                ((s[6] >> 6) | (s[7] << 5)),
                (s[7] >> 3),
            ]
            .map(|x| x as u8);
        }
    }

    fn decompress_poly(r: &mut [i16; N], a: &[u8]) {
        assert_len!(a, Self::POLY_BYTES);
        let mut t = [0u16; N];
        let (in_chunks, _) = a.as_chunks::<11>();
        let (out_chunks, _) = t.as_chunks_mut::<8>();
        for (o, chunk) in out_chunks.iter_mut().zip(in_chunks) {
            let b = chunk.map(u16::from);
            *o = [
                (b[0] | ((b[1] & 0x07) << 8)),
                ((b[1] >> 3) | ((b[2] & 0x3F) << 5)),
                ((b[2] >> 6) | (b[3] << 2) | ((b[4] & 0x01) << 10)),
                ((b[4] >> 1) | ((b[5] & 0x0F) << 7)),
                ((b[5] >> 4) | ((b[6] & 0x7F) << 4)),
                ((b[6] >> 7) | (b[7] << 1) | ((b[8] & 0x03) << 9)),
                ((b[8] >> 2) | ((b[9] & 0x1F) << 6)),
                ((b[9] >> 5) | (b[10] << 3)),
            ];
        }
        *r = decompress_all::<Self>(&t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn exact_compress(u: u16, d: u32) -> u16 {
        let t = ((u as u32) << d).wrapping_add((Q as u32) / 2) / (Q as u32);
        (t & ((1u32 << d) - 1)) as u16
    }

    fn exact_for_all<D: CompressWidthParams>() {
        for u in 0..Q as u16 {
            assert_eq!(
                D::compress_coeff(u),
                exact_compress(u, D::D),
                "D={} mismatch at u={u}",
                D::D
            );
        }
    }

    #[test]
    fn fixed_point_compress_is_exact() {
        exact_for_all::<D1>();
        exact_for_all::<D4>();
        exact_for_all::<D5>();
        exact_for_all::<D10>();
        exact_for_all::<D11>();
    }

    #[test]
    fn decompress_literals() {
        assert_eq!(D1::decompress_coeff(1), 1665);
        assert_eq!(D4::decompress_coeff(0), 0);
        assert_eq!(D4::decompress_coeff(15), 3121);
        assert_eq!(D11::decompress_coeff(2047), 3327);
    }

    fn packing_is_bijective<D: CompressWidth>() {
        // Every byte string decodes to values that re-encode to the same bytes.
        let bytes: [u8; 352] = core::array::from_fn(|i| (i * 73 + 11) as u8);
        let bytes = &bytes[..D::POLY_BYTES];
        let mut coeffs = [0i16; N];
        D::decompress_poly(&mut coeffs, bytes);
        let mut again = [0u8; 352];
        D::compress_poly(&mut again[..D::POLY_BYTES], &coeffs);
        assert_eq!(&again[..D::POLY_BYTES], bytes, "D={}", D::D);
    }

    #[test]
    fn packed_layouts_are_bijective() {
        packing_is_bijective::<D1>();
        packing_is_bijective::<D4>();
        packing_is_bijective::<D5>();
        packing_is_bijective::<D10>();
        packing_is_bijective::<D11>();
    }
}
