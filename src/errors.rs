//! Errors which may occur when decoding points, scalars and signatures,
//! or when verifying signatures.

use core::fmt;
use core::fmt::Display;

/// Failure to decode a curve point (or a signature component).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DecodeError {
    /// The bytes are a canonical encoding of a y coordinate, but there
    /// is no matching x coordinate on the curve.
    NotOnCurve,
    /// The encoding is not the unique canonical one: the y coordinate
    /// (or the scalar) is not lower than its modulus, or the sign bit is
    /// set for x = 0.
    NonCanonical,
    /// The source slice does not have the expected length.
    InvalidLength {
        expected: usize,
        actual: usize,
    },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            DecodeError::NotOnCurve
                => write!(f, "Encoded value is not a curve point"),
            DecodeError::NonCanonical
                => write!(f, "Encoding is not canonical"),
            DecodeError::InvalidLength { expected, actual }
                => write!(f, "Expected {} bytes, got {}", expected, actual),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}

/// Failure to verify a signature.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum VerifyError {
    /// The public key, the `R` point, or the `S` scalar could not be
    /// decoded.
    BadEncoding(DecodeError),
    /// The public key or `R` is not in the prime-order subgroup, and the
    /// verification policy is strict.
    SubgroupViolation,
    /// The verification equation was not satisfied.
    EquationMismatch,
}

impl Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            VerifyError::BadEncoding(e)
                => write!(f, "Invalid signature or key encoding: {}", e),
            VerifyError::SubgroupViolation
                => write!(f, "Point outside of the prime-order subgroup"),
            VerifyError::EquationMismatch
                => write!(f, "Verification equation was not satisfied"),
        }
    }
}

impl From<DecodeError> for VerifyError {
    fn from(e: DecodeError) -> VerifyError {
        VerifyError::BadEncoding(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for VerifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            VerifyError::BadEncoding(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(all(test, feature = "std"))]
mod tests {

    use super::{DecodeError, VerifyError};
    use std::error::Error;
    use std::string::ToString;

    #[test]
    fn display_and_source() {
        let e = DecodeError::InvalidLength { expected: 32, actual: 31 };
        assert_eq!(e.to_string(), "Expected 32 bytes, got 31");

        let v: VerifyError = DecodeError::NonCanonical.into();
        assert_eq!(v, VerifyError::BadEncoding(DecodeError::NonCanonical));
        assert!(v.source().is_some());
        assert!(VerifyError::EquationMismatch.source().is_none());
        assert_eq!(v.to_string(),
            "Invalid signature or key encoding: Encoding is not canonical");
    }
}
