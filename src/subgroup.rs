//! Subgroup classification of curve points.
//!
//! The edwards25519 group has order `8*L`; it is the direct sum of the
//! subgroup of prime order `L` (generated by the conventional base point)
//! and the torsion subgroup of order 8 (cyclic). Any point can thus be
//! written uniquely as `P + T` with `P` in the prime-order subgroup and
//! `T` in the torsion subgroup; `classify()` reports which components
//! are nonzero, and the order of `T` when `P` is the neutral.
//!
//! Ed25519 verifiers disagree on how to handle public keys and `R` values
//! with a nonzero torsion component. `SubgroupPolicy` makes that choice
//! explicit.

#![allow(non_snake_case)]

use crate::ed25519::Point;

/// Subgroup membership of a curve point.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Classification {
    /// The neutral point (order 1).
    Identity,
    /// A point of order 2, 4 or 8 (in the torsion subgroup, but not the
    /// neutral).
    LowOrder { order: u8 },
    /// A point of order `L` (in the prime-order subgroup, but not the
    /// neutral).
    PrimeOrder,
    /// A point with both a nonzero torsion component and a nonzero
    /// prime-order component.
    Mixed,
}

/// Classifies a point.
///
/// All membership tests (three doublings and one multiplication by
/// `L`) are computed for every input; only the final selection of the
/// variant depends on their results.
pub fn classify(P: &Point) -> Classification {
    let P2 = P.double();
    let P4 = P2.double();
    let P8 = P4.double();
    let n1 = P.isneutral();
    let n2 = P2.isneutral();
    let n4 = P4.isneutral();
    let n8 = P8.isneutral();
    let sub = P.is_in_subgroup();

    if n1 != 0 {
        Classification::Identity
    } else if n2 != 0 {
        Classification::LowOrder { order: 2 }
    } else if n4 != 0 {
        Classification::LowOrder { order: 4 }
    } else if n8 != 0 {
        Classification::LowOrder { order: 8 }
    } else if sub != 0 {
        Classification::PrimeOrder
    } else {
        Classification::Mixed
    }
}

/// Acceptance rule for public keys and `R` points during verification.
///
/// There is no default: callers must pick one explicitly.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum SubgroupPolicy {
    /// Only points of prime order `L` are accepted; the neutral, the
    /// low-order points and the mixed-order points are rejected.
    Strict,
    /// Every canonically encoded curve point is accepted, whatever its
    /// subgroup membership. This matches lenient historical verifiers.
    Permissive,
}

impl SubgroupPolicy {

    /// Returns `true` if a point with classification `c` is acceptable
    /// under this policy.
    pub fn admits(self, c: Classification) -> bool {
        match self {
            SubgroupPolicy::Strict => c == Classification::PrimeOrder,
            SubgroupPolicy::Permissive => true,
        }
    }
}

#[cfg(test)]
mod tests {

    use super::{classify, Classification, SubgroupPolicy};
    use crate::ed25519::{Point, Scalar};
    use crate::torsion::{torsion_points, TORSION_ORDERS};

    #[test]
    fn classify_torsion() {
        let tt = torsion_points();
        for i in 0..8 {
            let c = classify(&tt[i]);
            if TORSION_ORDERS[i] == 1 {
                assert_eq!(c, Classification::Identity);
            } else {
                assert_eq!(c, Classification::LowOrder {
                    order: TORSION_ORDERS[i] });
            }
            assert!(SubgroupPolicy::Permissive.admits(c));
            assert!(!SubgroupPolicy::Strict.admits(c));
        }
    }

    #[test]
    fn classify_prime_and_mixed() {
        let P = Point::mulgen(&Scalar::from_u64(0x1234_5678_9ABC));
        assert_eq!(classify(&P), Classification::PrimeOrder);
        assert_eq!(classify(&Point::BASE), Classification::PrimeOrder);
        assert!(SubgroupPolicy::Strict.admits(classify(&P)));

        let tt = torsion_points();
        for i in 1..8 {
            let Q = P + tt[i];
            assert_eq!(classify(&Q), Classification::Mixed);
            assert!(!SubgroupPolicy::Strict.admits(classify(&Q)));
            assert!(SubgroupPolicy::Permissive.admits(classify(&Q)));
        }
    }
}
