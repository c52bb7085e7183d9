//! Debug-build bound checks on coefficient arrays.
//!
//! Public routines state the coefficient ranges they accept and produce with
//! these macros. Both expand to `debug_assert!`, so release builds skip them.

/// Every coefficient satisfies `|c| < bound`.
macro_rules! assert_abs_bound {
    ($coeffs:expr, $bound:expr, $what:literal $(,)?) => {
        debug_assert!(
            $crate::contract::abs_below(&$coeffs[..], $bound as i32),
            "{}: coefficient outside (-{}, {})",
            $what,
            $bound,
            $bound,
        )
    };
}

/// Every coefficient satisfies `lo <= c < hi`.
macro_rules! assert_bound {
    ($coeffs:expr, $lo:expr, $hi:expr, $what:literal $(,)?) => {
        debug_assert!(
            $crate::contract::within(&$coeffs[..], $lo as i32, $hi as i32),
            "{}: coefficient outside [{}, {})",
            $what,
            $lo,
            $hi,
        )
    };
}

/// A byte buffer has exactly the length its encoding requires.
macro_rules! assert_len {
    ($buf:expr, $len:expr $(,)?) => {
        debug_assert_eq!($buf.len(), $len, "buffer length mismatch")
    };
}

pub(crate) use {assert_abs_bound, assert_bound, assert_len};

#[inline]
pub(crate) fn abs_below(coeffs: &[i16], bound: i32) -> bool {
    coeffs.iter().all(|&c| (c as i32).abs() < bound)
}

#[inline]
pub(crate) fn within(coeffs: &[i16], lo: i32, hi: i32) -> bool {
    coeffs.iter().all(|&c| (lo..hi).contains(&(c as i32)))
}
