//! Implementations of the two finite fields used by Edwards25519.
//!
//! `GF25519` is the base field (integers modulo p = 2^255 - 19), over
//! which curve point coordinates are defined. `ModL` is the scalar field
//! (integers modulo the prime order L of the curve subgroup of
//! interest).
//!
//! Both types follow the same conventions:
//!
//!  - An instance encapsulates a field element, as a `Copy` value.
//!
//!  - The constant values `Self::ZERO` and `Self::ONE` contain the
//!    elements of value 0 and 1, respectively.
//!
//!  - Usual arithmetic operators can be used (`+`, `-`, `*`, unary `-`,
//!    and the compound assignments); `GF25519` also supports `/` (division
//!    by zero yields zero). Operators accept both values and references.
//!
//!  - Function `set_cond(&mut self, a: &Self, ctl: u32)` copies `a` into
//!    the instance if `ctl` is 0xFFFFFFFF, and leaves it unmodified if
//!    `ctl` is 0x00000000. Function `select(a0, a1, ctl)` returns a copy
//!    of `a0` or `a1` accordingly.
//!
//!  - Function `equals(self, rhs: Self) -> u32` returns 0xFFFFFFFF on
//!    equality, 0x00000000 otherwise; `iszero()` is the specialized
//!    comparison with zero. `PartialEq` is deliberately not implemented.
//!
//!  - Function `encode32(self) -> [u8; 32]` produces the canonical
//!    unsigned little-endian encoding. Function `decode32(buf)` returns
//!    the decoded value and a `u32` status; it fails (status 0x00000000,
//!    value zero) if the slice does not have length exactly 32 or the
//!    value is not canonical. Function `decode_reduce(buf)` accepts any
//!    length and reduces the integer modulo the field order; it never
//!    fails.
//!
//! All operations are constant-time. Only the length of input slices
//! may leak through timing-based side channels.

pub mod gf25519;
pub mod modl;

pub use gf25519::GF25519;
pub use modl::ModL;
