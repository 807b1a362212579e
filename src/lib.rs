//! Edsig25519 is a Rust library for Ed25519 signatures with explicit
//! subgroup handling.
//!
//! This library implements the Edwards25519 curve (field and scalar
//! arithmetic, point encoding and decoding, group operations) and the
//! "pure" Ed25519 signature scheme of RFC 8032 on top of it. The focus
//! is on how degenerate inputs are treated: point decoding rejects all
//! non-canonical encodings, points can be classified by subgroup
//! membership (`subgroup::classify()`), and signature verification
//! applies a caller-chosen `SubgroupPolicy` to public keys and `R`
//! values that are not in the subgroup of prime order L.
//!
//! The base field GF(2^255-19) and the scalar field (integers modulo L)
//! are defined in `backend` (re-exported by `field`). Curve points are
//! in `ed25519`, signatures in `eddsa`. The eight points of the torsion
//! subgroup are listed in `torsion`, as constants that test suites can
//! feed to a verifier.
//!
//! The hash function used by signatures is a type parameter: any
//! `Digest` implementation with a 64-byte output can be used, with
//! `sha2::Sha512` for standard Ed25519.
//!
//! # Usage
//!
//! The library is `no_std`. By default, it compiles against the standard
//! library, which only adds `std::error::Error` implementations for the
//! error types. Optional feature `zeroize` clears secret key material
//! when key pairs are dropped.
//!
//! # Conventions
//!
//! All implemented functions should be strictly constant-time, unless
//! explicitly documented otherwise (non-constant-time functions normally
//! have "vartime" in their name). In order to avoid unwanted side-channel
//! leaks, Booleans are avoided for secret values. All functions that
//! return or use a potentially secret Boolean value use the `u32` type;
//! the convention is that 0xFFFFFFFF means "true", and 0x00000000 means
//! "false". No other value shall be used, for they would lead to
//! unpredictable results. Similarly, the `Eq` or `PartialEq` traits are
//! not implemented on field elements and curve points.
//!
//! Algebraic operations on field elements and curve points are performed
//! with the usual operators (e.g. `+`); appropriate traits are defined
//! so that structure types and pointers to structure types can be used
//! more or less interchangeably. Functions that modify the object on
//! which they are called have a name in `set_*()` (e.g. for a curve
//! point `P`, `P.set_double()` modifies the point in place, while
//! `P.double()` leaves `P` unmodified and returns the double as a new
//! instance).
//!
//! Operations that can fail in a way the caller must handle (decoding,
//! signature verification) also have variants returning a `Result`, with
//! the error types of `errors`; these variants leak the failure reason
//! through timing, and are meant for public data.

#![no_std]

#[cfg(any(test, feature = "std"))]
#[macro_use]
extern crate std;

pub use rand_core::{CryptoRng, RngCore, Error as RngError};

#[macro_use]
mod macros;

pub mod backend;
pub mod field;
pub mod errors;
pub mod ed25519;
pub mod subgroup;
pub mod eddsa;
pub mod torsion;

pub use errors::{DecodeError, VerifyError};
pub use eddsa::{Engine, KeyPair, PublicKey, Signature};
pub use subgroup::{Classification, SubgroupPolicy};
