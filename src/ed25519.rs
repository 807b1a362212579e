//! Edwards25519 curve implementation.
//!
//! This module implements group operations on the twisted Edwards curve
//! of equation `-x^2 + y^2 = 1 + d*x^2*y^2`, over the finite field
//! GF(2^255 - 19), for the constant `d` = -121665/121666. This curve is
//! described in [RFC 7748]; the Ed25519 signature algorithm, which
//! operates on that curve, is described in [RFC 8032] (see the `eddsa`
//! module).
//!
//! The curve has order `8*L` for a prime integer `L` slightly greater
//! than 2^252. The conventional base point generates the subgroup of
//! order `L`. The eight points whose order divides the cofactor 8 form
//! the torsion subgroup (see `torsion`); the `subgroup` module tells
//! these cases apart.
//!
//! A curve point is represented by the `Point` structure, in extended
//! coordinates. `Point` instances can be added and subtracted with the
//! usual operators, and multiplied by a `Scalar` (integer modulo `L`)
//! with `*`. Points are encoded over 32 bytes; encoding is canonical,
//! and decoding enforces canonicality.
//!
//! [RFC 7748]: https://datatracker.ietf.org/doc/html/rfc7748
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

// Projective/fractional coordinates traditionally use uppercase letters,
// using lowercase only for affine coordinates.
#![allow(non_snake_case)]

use core::convert::TryFrom;

use crate::errors::DecodeError;
use crate::field::{GF25519, ModL};

/// Integers modulo L = 2^252 + 27742317777372353535851937790883648493.
///
/// L is the prime order of the subgroup of interest in edwards25519.
/// The complete curve contains 8*L points.
pub type Scalar = ModL;

/// A point on the twisted Edwards curve edwards25519.
///
/// Coordinates are extended: `x = X/Z`, `y = Y/Z`, and `x*y = T/Z`.
#[derive(Clone, Copy, Debug)]
pub struct Point {
    pub(crate) X: GF25519,
    pub(crate) Y: GF25519,
    pub(crate) Z: GF25519,
    pub(crate) T: GF25519,
}

impl Point {

    /// The group neutral (identity point) in the curve.
    ///
    /// Affine coordinates of the neutral are (0,1).
    pub const NEUTRAL: Self = Self {
        X: GF25519::ZERO,
        Y: GF25519::ONE,
        Z: GF25519::ONE,
        T: GF25519::ZERO,
    };

    /// The conventional base point in the curve.
    ///
    /// This point generates the subgroup of prime order L.
    pub const BASE: Self = Self {
        X: GF25519::w64be(
            0x216936D3CD6E53FE, 0xC0A4E231FDD6DC5C,
            0x692CC7609525A7B2, 0xC9562D608F25D51A),
        Y: GF25519::w64be(
            0x6666666666666666, 0x6666666666666666,
            0x6666666666666666, 0x6666666666666658),
        Z: GF25519::ONE,
        T: GF25519::w64be(
            0x67875F0FD78B7665, 0x66EA4E8E64ABE37D,
            0x20F09F80775152F5, 0x6DDE8AB3A5B7DDA3),
    };

    /// Curve equation parameter d = -121665 / 121666.
    pub(crate) const D: GF25519 = GF25519::w64be(
        0x52036CEE2B6FFE73, 0x8CC740797779E898,
        0x00700A4D4141D8AB, 0x75EB4DCA135978A3);

    /// 2*d
    const D2: GF25519 = GF25519::w64be(
        0x2406D9DC56DFFCE7, 0x198E80F2EEF3D130,
        0x00E0149A8283B156, 0xEBD69B9426B2F159);

    /// Decodes a point, reporting canonicality and curve membership
    /// separately.
    ///
    /// Returned values are `(canonical, on_curve)`, each 0xFFFFFFFF or
    /// 0x00000000. The point is set to the neutral unless both are
    /// 0xFFFFFFFF. Decoding is constant-time.
    pub(crate) fn set_decode_parts(&mut self, buf: &[u8; 32]) -> (u32, u32) {
        // RFC 8032, section 5.1.3.

        // Extract and clear the sign-of-x bit.
        let mut bb = *buf;
        let sign_x = ((bb[31] >> 7) as u32).wrapping_neg();
        bb[31] &= 0x7F;

        // Decode y; this fails if the value is not lower than p.
        let (mut y, mut canonical) = GF25519::decode32(&bb[..]);

        // x^2 = (y^2 - 1)/(d*y^2 + 1)
        let y2 = y.square();
        let u = y2 - GF25519::ONE;
        let v = Self::D * y2 + GF25519::ONE;
        let (mut x, on_curve) = GF25519::sqrt_ratio(&u, &v);

        // x = 0 with the sign bit set is a second encoding of (0, y).
        canonical &= !(x.iszero() & sign_x);

        // Choose the root with the requested sign.
        let nx = -x;
        x.set_cond(&nx, x.is_negative() ^ sign_x);

        let ok = canonical & on_curve;
        x.set_cond(&GF25519::ZERO, !ok);
        y.set_cond(&GF25519::ONE, !ok);

        self.X = x;
        self.Y = y;
        self.Z = GF25519::ONE;
        self.T = x * y;
        (canonical, on_curve)
    }

    /// Tries to decode a point from bytes.
    ///
    /// If the source slice has not length exactly 32 bytes, or if the
    /// bytes are not the canonical encoding of a curve point, then
    /// decoding fails. On success, 0xFFFFFFFF is returned; on failure,
    /// 0x00000000 is returned and this point is set to the neutral.
    ///
    /// If the source length is exactly 32 bytes, then the decoding
    /// outcome (success or failure) should remain hidden from
    /// timing-based side channels.
    pub fn set_decode(&mut self, buf: &[u8]) -> u32 {
        match <&[u8; 32]>::try_from(buf) {
            Ok(bb) => {
                let (c, r) = self.set_decode_parts(bb);
                c & r
            }
            Err(_) => {
                *self = Self::NEUTRAL;
                0
            }
        }
    }

    /// Decodes a point from bytes.
    ///
    /// Decoding fails with `DecodeError::NonCanonical` if the y
    /// coordinate is not lower than p (even when its reduced value would
    /// be valid), or if the sign bit is set while x = 0; it fails with
    /// `DecodeError::NotOnCurve` if no x coordinate matches y. Since the
    /// error is returned as a value, the outcome leaks through timing;
    /// use `set_decode()` to avoid that.
    pub fn decode(buf: &[u8]) -> Result<Point, DecodeError> {
        let bb = <&[u8; 32]>::try_from(buf).map_err(|_| {
            DecodeError::InvalidLength { expected: 32, actual: buf.len() }
        })?;
        let mut P = Point::NEUTRAL;
        let (canonical, on_curve) = P.set_decode_parts(bb);
        if canonical == 0 {
            Err(DecodeError::NonCanonical)
        } else if on_curve == 0 {
            Err(DecodeError::NotOnCurve)
        } else {
            Ok(P)
        }
    }

    /// Encodes this point into exactly 32 bytes.
    ///
    /// Encoding is always canonical.
    pub fn encode(self) -> [u8; 32] {
        let iZ = self.Z.invert();
        let (x, y) = (self.X * iZ, self.Y * iZ);
        let mut r = y.encode32();
        r[31] |= (x.encode32()[0] & 1) << 7;
        r
    }

    /// Adds another point (`rhs`) to this point.
    fn set_add(&mut self, rhs: &Self) {
        let (X1, Y1, Z1, T1) = (&self.X, &self.Y, &self.Z, &self.T);
        let (X2, Y2, Z2, T2) = (&rhs.X, &rhs.Y, &rhs.Z, &rhs.T);

        // Formulas from RFC 8032, section 5.1.4. They are complete: they
        // work for all inputs, including doublings and low-order points.
        let A = (Y1 - X1) * (Y2 - X2);
        let B = (Y1 + X1) * (Y2 + X2);
        let C = T1 * Self::D2 * T2;
        let D = (Z1 + Z1) * Z2;
        let E = B - A;
        let F = D - C;
        let G = D + C;
        let H = B + A;
        self.X = E * F;
        self.Y = G * H;
        self.T = E * H;
        self.Z = F * G;
    }

    /// Subtract another point (`rhs`) from this point.
    fn set_sub(&mut self, rhs: &Self) {
        self.set_add(&-rhs);
    }

    /// Doubles this point (in place).
    pub fn set_double(&mut self) {
        let (X, Y, Z) = (&self.X, &self.Y, &self.Z);

        // Formulas from RFC 8032, section 5.1.4 (special doubling case).
        let A = X.square();
        let B = Y.square();
        let C = Z.square() + Z.square();
        let H = A + B;
        let E = H - (X + Y).square();
        let G = A - B;
        let F = C + G;
        self.X = E * F;
        self.Y = G * H;
        self.T = E * H;
        self.Z = F * G;
    }

    #[inline(always)]
    pub fn double(self) -> Self {
        let mut r = self;
        r.set_double();
        r
    }

    /// Doubles this point n times (in place).
    pub fn set_xdouble(&mut self, n: u32) {
        for _ in 0..n {
            self.set_double();
        }
    }

    #[inline(always)]
    pub fn xdouble(self, n: u32) -> Self {
        let mut r = self;
        r.set_xdouble(n);
        r
    }

    /// Negates this point (in place).
    #[inline(always)]
    pub fn set_neg(&mut self) {
        self.X.set_neg();
        self.T.set_neg();
    }

    /// Multiplies this point by a small integer.
    ///
    /// This operation is constant-time with regard to the source point,
    /// but NOT with regard to the multiplier; the multiplier `n` MUST
    /// NOT be secret.
    pub fn set_mul_small(&mut self, n: u64) {
        if n == 0 {
            *self = Self::NEUTRAL;
            return;
        }
        let P = *self;
        let nlen = 64 - n.leading_zeros();
        for i in (0..(nlen - 1)).rev() {
            self.set_double();
            if ((n >> i) & 1) != 0 {
                self.set_add(&P);
            }
        }
    }

    #[inline(always)]
    pub fn mul_small(self, n: u64) -> Self {
        let mut r = self;
        r.set_mul_small(n);
        r
    }

    /// Compares two points for equality.
    ///
    /// Returned value is 0xFFFFFFFF if the two points are equal,
    /// 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        (self.X * rhs.Z).equals(rhs.X * self.Z)
        & (self.Y * rhs.Z).equals(rhs.Y * self.Z)
    }

    /// Tests whether this point is the neutral.
    ///
    /// Returned value is 0xFFFFFFFF for the neutral, 0x00000000
    /// otherwise.
    #[inline(always)]
    pub fn isneutral(self) -> u32 {
        // The neutral is the only point with y == 1.
        self.Y.equals(self.Z)
    }

    /// Tests whether this point is a low-order point, i.e. a point of
    /// order 1, 2, 4 or 8.
    ///
    /// Returned value is 0xFFFFFFFF for a low order point (including the
    /// neutral), 0x00000000 otherwise.
    #[inline]
    pub fn has_low_order(self) -> u32 {
        self.xdouble(3).isneutral()
    }

    /// Tests whether this point is in the subgroup of prime order `L`.
    ///
    /// Returned value is 0xFFFFFFFF for a point in the prime-order
    /// subgroup (the neutral included), 0x00000000 otherwise. This costs
    /// about one point multiplication.
    pub fn is_in_subgroup(self) -> u32 {
        // L*P = (L - 1)*P + P; -1 mod L is L - 1, and multiplication
        // by a scalar processes it as an integer in the 0..L-1 range.
        (self * (-Scalar::ONE) + self).isneutral()
    }

    /// Conditionally copies the provided point (`P`) into `self`.
    ///
    /// `ctl` MUST be equal to 0x00000000 (no copy) or 0xFFFFFFFF (copy).
    #[inline]
    pub fn set_cond(&mut self, P: &Self, ctl: u32) {
        self.X.set_cond(&P.X, ctl);
        self.Y.set_cond(&P.Y, ctl);
        self.Z.set_cond(&P.Z, ctl);
        self.T.set_cond(&P.T, ctl);
    }

    /// Returns a point equal to `P0` (if `ctl` = 0x00000000) or `P1` (if
    /// `ctl` = 0xFFFFFFFF).
    #[inline(always)]
    pub fn select(P0: &Self, P1: &Self, ctl: u32) -> Self {
        let mut P = *P0;
        P.set_cond(P1, ctl);
        P
    }

    /// Maps this point to the birationally equivalent Montgomery curve
    /// (Curve25519) and returns the encoded u coordinate, as used by
    /// X25519.
    ///
    /// The neutral maps to u = 0.
    pub fn to_montgomery_u(&self) -> [u8; 32] {
        // u = (1 + y)/(1 - y) = (Z + Y)/(Z - Y)
        ((self.Z + self.Y) / (self.Z - self.Y)).encode32()
    }

    // Window of 16 points: win[i] = i*P.
    fn window(P: &Self) -> [Self; 16] {
        let mut win = [Self::NEUTRAL; 16];
        win[1] = *P;
        for i in 2..16 {
            win[i] = if (i & 1) == 0 {
                win[i >> 1].double()
            } else {
                win[i - 1] + P
            };
        }
        win
    }

    /// Lookups a point from a window (constant-time).
    fn lookup(win: &[Self; 16], k: u32) -> Self {
        let mut P = Self::NEUTRAL;
        for i in 1..16 {
            // (w | -w) has its top bit set if and only if w != 0.
            let w = (i as u32) ^ k;
            let m = ((w | w.wrapping_neg()) >> 31).wrapping_sub(1);
            P.set_cond(&win[i], m);
        }
        P
    }

    // Extracts 4-bit digit number i (0 to 63) from an encoded scalar.
    #[inline(always)]
    fn nibble(bb: &[u8; 32], i: usize) -> u32 {
        ((bb[i >> 1] >> ((i & 1) << 2)) & 0x0F) as u32
    }

    /// Multiplies this point by a scalar (in place).
    ///
    /// This operation is constant-time with regard to both the point
    /// and the scalar value. If the point is not in the prime-order
    /// subgroup, then what is computed is the product of the point by
    /// the scalar considered as an integer in the 0 to L-1 range.
    pub fn set_mul(&mut self, n: &Scalar) {
        let win = Self::window(self);
        let bb = n.encode32();
        *self = Self::lookup(&win, Self::nibble(&bb, 63));
        for i in (0..63).rev() {
            self.set_xdouble(4);
            self.set_add(&Self::lookup(&win, Self::nibble(&bb, i)));
        }
    }

    /// Creates a point by multiplying the conventional generator by the
    /// provided scalar.
    ///
    /// This operation is constant-time.
    #[inline]
    pub fn mulgen(n: &Scalar) -> Self {
        let mut P = Self::BASE;
        P.set_mul(n);
        P
    }

    /// Given scalars `u` and `v`, sets this point to `u*self + v*B`
    /// (with `B` being the conventional generator).
    ///
    /// THIS FUNCTION IS NOT CONSTANT-TIME; it shall be used only with
    /// public data.
    pub fn set_mul_add_mulgen_vartime(&mut self, u: &Scalar, v: &Scalar) {
        let winP = Self::window(self);
        let winB = Self::window(&Self::BASE);
        let bu = u.encode32();
        let bv = v.encode32();
        let mut started = false;
        *self = Self::NEUTRAL;
        for i in (0..64).rev() {
            if started {
                self.set_xdouble(4);
            }
            let e1 = Self::nibble(&bu, i) as usize;
            let e2 = Self::nibble(&bv, i) as usize;
            if e1 != 0 {
                self.set_add(&winP[e1]);
                started = true;
            }
            if e2 != 0 {
                self.set_add(&winB[e2]);
                started = true;
            }
        }
    }

    #[inline(always)]
    pub fn mul_add_mulgen_vartime(self, u: &Scalar, v: &Scalar) -> Self {
        let mut R = self;
        R.set_mul_add_mulgen_vartime(u, v);
        R
    }

    /// Checks the cofactored Ed25519 verification equation
    /// `8*s*B = 8*R + 8*k*A`, with `A` being this point.
    ///
    /// Returned value is 0xFFFFFFFF on match, 0x00000000 otherwise.
    ///
    /// THIS FUNCTION IS NOT CONSTANT-TIME with regard to the scalars;
    /// it shall be used only with public data.
    pub fn verify_helper_vartime(self, R: &Point, s: &Scalar, k: &Scalar)
        -> u32
    {
        // T = s*B - k*A - R; the equation holds if and only if T has
        // low order.
        let T = self.mul_add_mulgen_vartime(&-k, s) - R;
        T.has_low_order()
    }
}

impl_binop!(Point, Add, add, AddAssign, add_assign, set_add);
impl_binop!(Point, Sub, sub, SubAssign, sub_assign, set_sub);
impl_neg!(Point, set_neg);

impl core::ops::Mul<Scalar> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Scalar) -> Point {
        let mut r = self;
        r.set_mul(&other);
        r
    }
}

impl core::ops::Mul<&Scalar> for Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Scalar) -> Point {
        let mut r = self;
        r.set_mul(other);
        r
    }
}

impl core::ops::Mul<Scalar> for &Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Scalar) -> Point {
        let mut r = *self;
        r.set_mul(&other);
        r
    }
}

impl core::ops::Mul<&Scalar> for &Point {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Scalar) -> Point {
        let mut r = *self;
        r.set_mul(other);
        r
    }
}

impl core::ops::MulAssign<Scalar> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: Scalar) {
        self.set_mul(&other);
    }
}

impl core::ops::MulAssign<&Scalar> for Point {
    #[inline(always)]
    fn mul_assign(&mut self, other: &Scalar) {
        self.set_mul(other);
    }
}

impl core::ops::Mul<Point> for Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Point) -> Point {
        let mut r = other;
        r.set_mul(&self);
        r
    }
}

impl core::ops::Mul<&Point> for Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Point) -> Point {
        let mut r = *other;
        r.set_mul(&self);
        r
    }
}

impl core::ops::Mul<Point> for &Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: Point) -> Point {
        let mut r = other;
        r.set_mul(self);
        r
    }
}

impl core::ops::Mul<&Point> for &Scalar {
    type Output = Point;

    #[inline(always)]
    fn mul(self, other: &Point) -> Point {
        let mut r = *other;
        r.set_mul(self);
        r
    }
}
