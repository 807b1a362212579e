//! Finite fields.
//!
//! This module re-exports the base field of Edwards25519 (`GF25519`) and
//! its scalar field (`ModL`), both implemented in `backend`.

pub use crate::backend::{GF25519, ModL};
