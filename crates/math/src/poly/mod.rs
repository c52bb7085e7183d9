//! Domain-separated polynomial types.
//!
//! [`Polynomial`] represents a polynomial in standard (coefficient) form.
//! [`NttPolynomial`] represents a polynomial in NTT (bit-reversed) form.
//! The NTT transform is a consuming operation that produces the other type,
//! preventing accidental misuse of domain-mismatched polynomials.
//!
//! [`CachedNttPolynomial`] pairs an NTT-domain operand with its
//! [`MulCache`]. The cache is computed on construction and the operand can
//! no longer be mutated, so a stale cache cannot be observed.

mod cached;
mod ntt_poly;
mod polynomial;
mod polyvec;

pub use cached::{CachedNttPolynomial, MulCache};
pub use ntt_poly::NttPolynomial;
pub use polynomial::Polynomial;
pub use polyvec::{CachedNttVector, NttVector, Vector};
