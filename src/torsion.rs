//! The torsion subgroup of edwards25519.
//!
//! The eight points whose order divides the cofactor 8 are listed here
//! by their canonical encodings. All of them decode successfully; none
//! of them is in the subgroup of prime order L, except the neutral. They
//! are the usual test inputs for checking how a verifier deals with
//! degenerate public keys and `R` values: under `SubgroupPolicy::Strict`
//! all of them must be rejected, while `SubgroupPolicy::Permissive`
//! accepts them.

#![allow(non_snake_case)]

use crate::ed25519::Point;

/// Encodings of the eight points of the torsion subgroup.
///
/// Orders are given by `TORSION_ORDERS` (same index).
pub const TORSION_SUBGROUP: [[u8; 32]; 8] = [
    // (0, 1), the neutral
    [ 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00 ],
    [ 0xC7, 0x17, 0x6A, 0x70, 0x3D, 0x4D, 0xD8, 0x4F,
      0xBA, 0x3C, 0x0B, 0x76, 0x0D, 0x10, 0x67, 0x0F,
      0x2A, 0x20, 0x53, 0xFA, 0x2C, 0x39, 0xCC, 0xC6,
      0x4E, 0xC7, 0xFD, 0x77, 0x92, 0xAC, 0x03, 0x7A ],
    // (-sqrt(-1), 0)
    [ 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80 ],
    [ 0x26, 0xE8, 0x95, 0x8F, 0xC2, 0xB2, 0x27, 0xB0,
      0x45, 0xC3, 0xF4, 0x89, 0xF2, 0xEF, 0x98, 0xF0,
      0xD5, 0xDF, 0xAC, 0x05, 0xD3, 0xC6, 0x33, 0x39,
      0xB1, 0x38, 0x02, 0x88, 0x6D, 0x53, 0xFC, 0x05 ],
    // (0, -1)
    [ 0xEC, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
      0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
      0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
      0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F ],
    [ 0x26, 0xE8, 0x95, 0x8F, 0xC2, 0xB2, 0x27, 0xB0,
      0x45, 0xC3, 0xF4, 0x89, 0xF2, 0xEF, 0x98, 0xF0,
      0xD5, 0xDF, 0xAC, 0x05, 0xD3, 0xC6, 0x33, 0x39,
      0xB1, 0x38, 0x02, 0x88, 0x6D, 0x53, 0xFC, 0x85 ],
    // (sqrt(-1), 0)
    [ 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
      0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00 ],
    [ 0xC7, 0x17, 0x6A, 0x70, 0x3D, 0x4D, 0xD8, 0x4F,
      0xBA, 0x3C, 0x0B, 0x76, 0x0D, 0x10, 0x67, 0x0F,
      0x2A, 0x20, 0x53, 0xFA, 0x2C, 0x39, 0xCC, 0xC6,
      0x4E, 0xC7, 0xFD, 0x77, 0x92, 0xAC, 0x03, 0xFA ],
];

/// Order of each point of `TORSION_SUBGROUP`.
pub const TORSION_ORDERS: [u8; 8] = [ 1, 8, 4, 8, 2, 8, 4, 8 ];

/// Decodes the torsion subgroup points.
pub fn torsion_points() -> [Point; 8] {
    let mut tt = [Point::NEUTRAL; 8];
    for i in 0..8 {
        // Each entry is a canonical encoding, so decoding cannot fail;
        // a failed decoding would leave the neutral in place.
        tt[i].set_decode(&TORSION_SUBGROUP[i]);
    }
    tt
}

#[cfg(test)]
mod tests {

    use super::{torsion_points, TORSION_ORDERS, TORSION_SUBGROUP};
    use crate::ed25519::Point;

    #[test]
    fn decode_all() {
        for i in 0..8 {
            let P = Point::decode(&TORSION_SUBGROUP[i]).unwrap();
            assert_eq!(P.encode(), TORSION_SUBGROUP[i]);
            assert!(P.has_low_order() == 0xFFFFFFFF);
        }
    }

    #[test]
    fn orders() {
        let tt = torsion_points();
        for i in 0..8 {
            let n = TORSION_ORDERS[i] as u64;
            assert!(tt[i].mul_small(n).isneutral() == 0xFFFFFFFF);
            if n > 1 {
                assert!(tt[i].mul_small(n / 2).isneutral() == 0);
            }
        }

        // Distinct points, closed under addition.
        for i in 0..8 {
            for j in 0..8 {
                assert_eq!(tt[i].equals(tt[j]) != 0, i == j);
                let S = tt[i] + tt[j];
                assert!(tt.iter().any(|T| T.equals(S) == 0xFFFFFFFF));
            }
        }
    }
}
