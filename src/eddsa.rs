//! Ed25519 signatures.
//!
//! This module implements the "pure" Ed25519 signature scheme of
//! [RFC 8032] (no context, no pre-hashing). The 64-byte hash function
//! is a type parameter `D` (any `Digest` implementation with a 64-byte
//! output); standard Ed25519 uses `sha2::Sha512`, and signatures made
//! with another hash function are not interoperable with standard
//! Ed25519.
//!
//! A `KeyPair` is derived from a 32-byte seed. It contains the secret
//! scalar, the nonce derivation prefix, and the `PublicKey`. Signing is
//! deterministic and constant-time.
//!
//! Verification checks the cofactored equation `8*S*B = 8*R + 8*k*A`.
//! When both `A` and `R` are in the prime-order subgroup, this is the
//! same as the cofactorless equation. Public keys and `R` points outside
//! of that subgroup are accepted or rejected according to the
//! `SubgroupPolicy` provided by the caller. Encodings are always
//! required to be canonical.
//!
//! `Engine` binds a hash function and a policy together, for callers
//! who prefer not to repeat them on every call.
//!
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

#![allow(non_snake_case)]

use core::convert::TryFrom;
use core::fmt;
use core::marker::PhantomData;

use sha2::digest::{consts::U64, Digest};
use rand_core::{CryptoRng, RngCore};
#[cfg(feature = "zeroize")]
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ed25519::{Point, Scalar};
use crate::errors::{DecodeError, VerifyError};
use crate::subgroup::{classify, SubgroupPolicy};

/// An Ed25519 key pair (private key and matching public key).
///
/// The seed, the secret scalar and the nonce prefix are not directly
/// accessible; only the seed can be exported (with `seed()`).
#[derive(Clone)]
pub struct KeyPair {
    seed: [u8; 32],             // source seed
    s: Scalar,                  // secret scalar
    prefix: [u8; 32],           // second half of H(seed)
    pub public_key: PublicKey,  // public key
}

/// An Ed25519 public key.
///
/// It wraps around the curve point, but also includes a copy of the
/// encoded point. The point and its encoded version can be accessed
/// directly; if modified, then the two values MUST match.
#[derive(Clone, Copy, Debug)]
pub struct PublicKey {
    pub point: Point,
    pub encoded: [u8; 32],
}

/// An Ed25519 signature: the encoded point `R` (32 bytes) followed by
/// the scalar `S` (32 bytes, little-endian).
///
/// No validation happens when a signature is built from bytes; `R` and
/// `S` are decoded (and checked) during verification.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Signature([u8; 64]);

/// Computes the challenge `k = H(R || A || m) mod L`.
fn challenge<D>(R_enc: &[u8], A_enc: &[u8; 32], m: &[u8]) -> Scalar
    where D: Digest<OutputSize = U64>
{
    let mut sh = D::new();
    sh.update(R_enc);
    sh.update(A_enc);
    sh.update(m);
    Scalar::decode_reduce(&sh.finalize())
}

impl KeyPair {

    /// Generates a new key pair from a cryptographically secure RNG.
    pub fn generate<D, T>(rng: &mut T) -> Self
        where D: Digest<OutputSize = U64>, T: CryptoRng + RngCore
    {
        let mut seed = [0u8; 32];
        rng.fill_bytes(&mut seed);
        Self::from_seed::<D>(&seed)
    }

    /// Derives a key pair from the provided seed (RFC 8032, section
    /// 5.1.5).
    pub fn from_seed<D>(seed: &[u8; 32]) -> Self
        where D: Digest<OutputSize = U64>
    {
        let mut sh = D::new();
        sh.update(seed);
        let mut hh = sh.finalize();

        // Prune the first half and decode it as a scalar (with
        // reduction).
        hh[0] &= 0xF8;
        hh[31] &= 0x7F;
        hh[31] |= 0x40;
        let s = Scalar::decode_reduce(&hh[..32]);

        let mut prefix = [0u8; 32];
        prefix[..].copy_from_slice(&hh[32..]);

        let public_key = PublicKey::from_point(&Point::mulgen(&s));
        Self { seed: *seed, s, prefix, public_key }
    }

    /// Returns a copy of the seed this key pair was derived from.
    pub fn seed(&self) -> [u8; 32] {
        self.seed
    }

    /// Signs a message (RFC 8032, section 5.1.6).
    ///
    /// `D` MUST be the hash function that was used to derive the key
    /// pair.
    pub fn sign<D>(&self, m: &[u8]) -> Signature
        where D: Digest<OutputSize = U64>
    {
        // H(prefix || m) -> scalar r
        let mut sh = D::new();
        sh.update(&self.prefix);
        sh.update(m);
        let r = Scalar::decode_reduce(&sh.finalize());

        // R = r*B
        let R_enc = Point::mulgen(&r).encode();

        // S = r + k*s mod L
        let k = challenge::<D>(&R_enc, &self.public_key.encoded, m);
        let S = r + k * self.s;

        let mut sig = [0u8; 64];
        sig[..32].copy_from_slice(&R_enc);
        sig[32..].copy_from_slice(&S.encode32());
        Signature(sig)
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for KeyPair {
    fn zeroize(&mut self) {
        self.seed.zeroize();
        self.s.zeroize();
        self.prefix.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl Drop for KeyPair {
    fn drop(&mut self) {
        self.zeroize();
    }
}

#[cfg(feature = "zeroize")]
impl ZeroizeOnDrop for KeyPair {}

impl Signature {

    /// Wraps 64 bytes as a signature.
    pub fn from_bytes(bytes: &[u8; 64]) -> Self {
        Signature(*bytes)
    }

    /// Wraps a slice as a signature; the slice must have length exactly
    /// 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        <[u8; 64]>::try_from(bytes).map(Signature).map_err(|_| {
            DecodeError::InvalidLength { expected: 64, actual: bytes.len() }
        })
    }

    /// Returns the 64 bytes of this signature.
    pub fn to_bytes(&self) -> [u8; 64] {
        self.0
    }

    /// Returns the encoded `R` point (first 32 bytes).
    pub fn r_bytes(&self) -> &[u8] {
        &self.0[..32]
    }

    /// Returns the encoded `S` scalar (last 32 bytes).
    pub fn s_bytes(&self) -> &[u8] {
        &self.0[32..]
    }
}

impl PublicKey {

    /// Creates an instance from a curve point.
    pub fn from_point(point: &Point) -> Self {
        Self { point: *point, encoded: point.encode() }
    }

    /// Decodes the provided bytes as a public key.
    ///
    /// Decoding fails if the slice does not have length exactly 32
    /// bytes, or if the bytes are not the canonical encoding of a curve
    /// point. Success does not imply that the point is in the subgroup
    /// of prime order L: the neutral, low-order and mixed-order points
    /// are decoded as well (see `subgroup::classify()`).
    pub fn decode(buf: &[u8]) -> Result<PublicKey, DecodeError> {
        let point = Point::decode(buf)?;
        let mut encoded = [0u8; 32];
        encoded[..].copy_from_slice(buf);
        Ok(Self { point, encoded })
    }

    /// Encodes the key into exactly 32 bytes.
    ///
    /// This simply returns the contents of the `encoded` field.
    pub fn encode(self) -> [u8; 32] {
        self.encoded
    }

    /// Verifies a signature on a message.
    ///
    /// Errors:
    ///
    ///  - `BadEncoding` if `R` is not a canonically encoded curve point,
    ///    or `S` is not lower than L;
    ///
    ///  - `EquationMismatch` if the verification equation does not hold;
    ///
    ///  - `SubgroupViolation` if the equation holds but the policy does
    ///    not admit the public key or `R`.
    ///
    /// All checks are computed before the outcome is selected, so that
    /// the amount of work does not depend on which check failed. This
    /// function is not constant-time; it assumes that the public key and
    /// the signature are public data.
    pub fn verify<D>(&self, m: &[u8], sig: &Signature, policy: SubgroupPolicy)
        -> Result<(), VerifyError>
        where D: Digest<OutputSize = U64>
    {
        let R_enc = sig.r_bytes();
        let R_res = Point::decode(R_enc);
        let R = R_res.unwrap_or(Point::NEUTRAL);
        let (S, S_ok) = Scalar::decode32(sig.s_bytes());

        let k = challenge::<D>(R_enc, &self.encoded, m);
        let eq_ok = self.point.verify_helper_vartime(&R, &S, &k);
        let admitted = policy.admits(classify(&self.point))
            & policy.admits(classify(&R));

        R_res?;
        if S_ok == 0 {
            return Err(VerifyError::BadEncoding(DecodeError::NonCanonical));
        }
        if eq_ok == 0 {
            return Err(VerifyError::EquationMismatch);
        }
        if !admitted {
            return Err(VerifyError::SubgroupViolation);
        }
        Ok(())
    }

    /// Verifies a signature given as raw bytes, against a public key
    /// also given as raw bytes.
    ///
    /// The public key must be 32 bytes and the signature 64 bytes;
    /// otherwise, `BadEncoding(InvalidLength)` is returned. A public key
    /// which cannot be decoded yields `BadEncoding` after the rest of the
    /// verification has been performed against the neutral point.
    pub fn verify_bytes<D>(pk: &[u8], m: &[u8], sig: &[u8],
                           policy: SubgroupPolicy)
        -> Result<(), VerifyError>
        where D: Digest<OutputSize = U64>
    {
        let sig = Signature::from_slice(sig)?;
        let enc = <[u8; 32]>::try_from(pk).map_err(|_| {
            DecodeError::InvalidLength { expected: 32, actual: pk.len() }
        })?;
        match PublicKey::decode(&enc) {
            Ok(pkey) => pkey.verify::<D>(m, &sig, policy),
            Err(e) => {
                let pkey = PublicKey { point: Point::NEUTRAL, encoded: enc };
                // The result is unused, but the call must not be removed
                // as dead code: it keeps this path as long as the one
                // with a valid public key.
                core::hint::black_box(pkey.verify::<D>(m, &sig, policy));
                Err(VerifyError::BadEncoding(e))
            }
        }
    }
}

/// Signature engine bound to a hash function `D` and a subgroup policy.
///
/// ```ignore
/// let engine = Engine::<Sha512>::new(SubgroupPolicy::Strict);
/// let sig = engine.sign(&seed, b"message");
/// engine.verify(&engine.keygen(&seed).public_key.encode(), b"message",
///     &sig.to_bytes())?;
/// ```
pub struct Engine<D> {
    policy: SubgroupPolicy,
    hash: PhantomData<fn() -> D>,
}

impl<D> Clone for Engine<D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Engine<D> {}

impl<D> fmt::Debug for Engine<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine").field("policy", &self.policy).finish()
    }
}

impl<D> Engine<D> where D: Digest<OutputSize = U64> {

    /// Creates an engine with the provided verification policy.
    pub fn new(policy: SubgroupPolicy) -> Self {
        Self { policy, hash: PhantomData }
    }

    /// Returns the verification policy of this engine.
    pub fn policy(&self) -> SubgroupPolicy {
        self.policy
    }

    /// Derives a key pair from a seed.
    pub fn keygen(&self, seed: &[u8; 32]) -> KeyPair {
        KeyPair::from_seed::<D>(seed)
    }

    /// Derives a key pair from a seed, and signs a message with it.
    pub fn sign(&self, seed: &[u8; 32], m: &[u8]) -> Signature {
        self.keygen(seed).sign::<D>(m)
    }

    /// Signs a message with an existing key pair.
    pub fn sign_with(&self, kp: &KeyPair, m: &[u8]) -> Signature {
        kp.sign::<D>(m)
    }

    /// Verifies a signature (64 bytes) on a message against a public key
    /// (32 bytes), under this engine's policy.
    pub fn verify(&self, pk: &[u8], m: &[u8], sig: &[u8])
        -> Result<(), VerifyError>
    {
        PublicKey::verify_bytes::<D>(pk, m, sig, self.policy)
    }
}
