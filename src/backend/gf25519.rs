use core::convert::TryFrom;

/// An element of GF(2^255 - 19).
///
/// Internally, the value is split over five limbs in base 2^51. Limbs
/// are only partially reduced: each limb is lower than 2^51 + 2^20 after
/// any public operation. The canonical value (in the 0 to p-1 range) is
/// computed only when encoding or comparing.
#[derive(Clone, Copy, Debug)]
pub struct GF25519([u64; 5]);

// 2^51 - 1
const M51: u64 = 0x0007FFFFFFFFFFFF;

#[inline(always)]
fn umul(x: u64, y: u64) -> u128 {
    (x as u128) * (y as u128)
}

// Expands a u32 mask (0x00000000 or 0xFFFFFFFF) into a u64 mask.
#[inline(always)]
fn mask64(ctl: u32) -> u64 {
    ((ctl as u64) << 32) | (ctl as u64)
}

impl GF25519 {

    pub const ZERO: Self = Self([ 0, 0, 0, 0, 0 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0, 0 ]);

    /// 2^256 mod p (used when reducing inputs longer than 32 bytes).
    const T256: Self = Self([ 38, 0, 0, 0, 0 ]);

    /// Limbs of 16*p, added before subtractions so that limbs never
    /// go negative.
    const P16: [u64; 5] = [
        16 * (M51 - 18), 16 * M51, 16 * M51, 16 * M51, 16 * M51,
    ];

    /// Creates an element from four 64-bit limbs (little-endian order).
    ///
    /// Any 256-bit value is accepted; it is implicitly reduced modulo p.
    pub const fn w64le(x0: u64, x1: u64, x2: u64, x3: u64) -> Self {
        Self([
            x0 & M51,
            ((x0 >> 51) | (x1 << 13)) & M51,
            ((x1 >> 38) | (x2 << 26)) & M51,
            ((x2 >> 25) | (x3 << 39)) & M51,
            x3 >> 12,
        ])
    }

    /// Creates an element from four 64-bit limbs (big-endian order).
    ///
    /// Any 256-bit value is accepted; it is implicitly reduced modulo p.
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self::w64le(x0, x1, x2, x3)
    }

    #[inline]
    pub fn from_u64(x: u64) -> Self {
        Self([ x & M51, x >> 51, 0, 0, 0 ])
    }

    // Propagates carries so that each limb is lower than 2^51 + 2^17.
    // Source limbs must be lower than 2^63.
    #[inline(always)]
    fn carry_propagate(l: &mut [u64; 5]) {
        let c0 = l[0] >> 51;
        let c1 = l[1] >> 51;
        let c2 = l[2] >> 51;
        let c3 = l[3] >> 51;
        let c4 = l[4] >> 51;
        l[0] = (l[0] & M51) + 19 * c4;
        l[1] = (l[1] & M51) + c0;
        l[2] = (l[2] & M51) + c1;
        l[3] = (l[3] & M51) + c2;
        l[4] = (l[4] & M51) + c3;
    }

    #[inline]
    fn set_add(&mut self, rhs: &Self) {
        for i in 0..5 {
            self.0[i] += rhs.0[i];
        }
        Self::carry_propagate(&mut self.0);
    }

    #[inline]
    fn set_sub(&mut self, rhs: &Self) {
        for i in 0..5 {
            self.0[i] = (self.0[i] + Self::P16[i]) - rhs.0[i];
        }
        Self::carry_propagate(&mut self.0);
    }

    /// Negates this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        for i in 0..5 {
            self.0[i] = Self::P16[i] - self.0[i];
        }
        Self::carry_propagate(&mut self.0);
    }

    // Multiplication of two elements (limbs must be lower than 2^54).
    // Each partial sum is lower than 5*19*2^108 < 2^115.
    fn set_mul(&mut self, rhs: &Self) {
        let (a0, a1, a2, a3, a4) =
            (self.0[0], self.0[1], self.0[2], self.0[3], self.0[4]);
        let (b0, b1, b2, b3, b4) =
            (rhs.0[0], rhs.0[1], rhs.0[2], rhs.0[3], rhs.0[4]);
        let (b1_19, b2_19, b3_19, b4_19) =
            (b1 * 19, b2 * 19, b3 * 19, b4 * 19);

        let c0 = umul(a0, b0) + umul(a1, b4_19) + umul(a2, b3_19)
            + umul(a3, b2_19) + umul(a4, b1_19);
        let c1 = umul(a0, b1) + umul(a1, b0) + umul(a2, b4_19)
            + umul(a3, b3_19) + umul(a4, b2_19);
        let c2 = umul(a0, b2) + umul(a1, b1) + umul(a2, b0)
            + umul(a3, b4_19) + umul(a4, b3_19);
        let c3 = umul(a0, b3) + umul(a1, b2) + umul(a2, b1)
            + umul(a3, b0) + umul(a4, b4_19);
        let c4 = umul(a0, b4) + umul(a1, b3) + umul(a2, b2)
            + umul(a3, b1) + umul(a4, b0);

        self.0 = Self::reduce_wide(c0, c1, c2, c3, c4);
    }

    #[inline(always)]
    fn reduce_wide(c0: u128, c1: u128, c2: u128, c3: u128, c4: u128)
        -> [u64; 5]
    {
        let c1 = c1 + (c0 >> 51);
        let c2 = c2 + (c1 >> 51);
        let c3 = c3 + (c2 >> 51);
        let c4 = c4 + (c3 >> 51);
        let t0 = ((c0 as u64) & M51) as u128 + (c4 >> 51) * 19;
        let r0 = (t0 as u64) & M51;
        let r1 = ((c1 as u64) & M51) + ((t0 >> 51) as u64);
        [ r0, r1, (c2 as u64) & M51, (c3 as u64) & M51, (c4 as u64) & M51 ]
    }

    /// Squares this value (in place).
    #[inline]
    pub fn set_square(&mut self) {
        let a = *self;
        self.set_mul(&a);
    }

    #[inline(always)]
    pub fn square(self) -> Self {
        let mut r = self;
        r.set_square();
        r
    }

    /// Squares this value `n` times (in place).
    pub fn set_xsquare(&mut self, n: u32) {
        for _ in 0..n {
            self.set_square();
        }
    }

    #[inline(always)]
    pub fn xsquare(self, n: u32) -> Self {
        let mut r = self;
        r.set_xsquare(n);
        r
    }

    /// Returns `(x^(2^250 - 1), x^11)`, the common prefix of the
    /// exponentiation chains for inversion and square roots.
    fn pow22501(self) -> (Self, Self) {
        let t0 = self.square();                 // x^2
        let t1 = t0.xsquare(2) * self;          // x^9
        let t2 = t0 * t1;                       // x^11
        let t3 = t2.square() * t1;              // x^(2^5 - 1)
        let t4 = t3.xsquare(5) * t3;            // x^(2^10 - 1)
        let t5 = t4.xsquare(10) * t4;           // x^(2^20 - 1)
        let t6 = t5.xsquare(20) * t5;           // x^(2^40 - 1)
        let t7 = t6.xsquare(10) * t4;           // x^(2^50 - 1)
        let t8 = t7.xsquare(50) * t7;           // x^(2^100 - 1)
        let t9 = t8.xsquare(100) * t8;          // x^(2^200 - 1)
        let t10 = t9.xsquare(50) * t7;          // x^(2^250 - 1)
        (t10, t2)
    }

    /// Inverts this value (in place).
    ///
    /// Inversion uses Fermat's little theorem (raising to the power
    /// p - 2), so it is constant-time. Zero is "inverted" into zero.
    pub fn set_invert(&mut self) {
        let (t, x11) = self.pow22501();
        // 2^255 - 21 = (2^250 - 1)*2^5 + 11
        *self = t.xsquare(5) * x11;
    }

    #[inline(always)]
    pub fn invert(self) -> Self {
        let mut r = self;
        r.set_invert();
        r
    }

    fn set_div(&mut self, rhs: &Self) {
        self.set_mul(&rhs.invert());
    }

    /// Raises this value to the power (p - 5)/8 = 2^252 - 3.
    fn pow_p58(self) -> Self {
        let (t, _) = self.pow22501();
        t.xsquare(2) * self
    }

    /// Computes a square root of `u/v`.
    ///
    /// On success, the root and 0xFFFFFFFF are returned. If `u/v` is not
    /// a square (or if `v` is zero but `u` is not), then 0x00000000 is
    /// returned, and the returned element is unspecified. If `u` is
    /// zero, then the result is zero and the call succeeds.
    pub fn sqrt_ratio(u: &Self, v: &Self) -> (Self, u32) {
        // x = u*v^3*(u*v^7)^((p-5)/8)   (RFC 8032, section 5.1.3)
        let v3 = v.square() * v;
        let v7 = v3.square() * v;
        let mut x = u * v3 * (u * v7).pow_p58();

        // If v*x^2 = u, then x is a root. If v*x^2 = -u, then x*sqrt(-1)
        // is a root. Otherwise, there is no root.
        let w = v * x.square();
        let r1 = w.equals(*u);
        let r2 = w.equals(-u);
        x.set_cond(&(x * Self::SQRT_M1), r2);
        (x, r1 | r2)
    }

    /// 2^((p-1)/4), a square root of -1.
    pub const SQRT_M1: Self = Self::w64be(
        0x2B8324804FC1DF0B, 0x2B4D00993DFBD7A7,
        0x2F431806AD2FE478, 0xC4EE1B274A0EA0B0);

    /// Sets this value to `a` if `ctl` is 0xFFFFFFFF; leaves it unchanged
    /// if `ctl` is 0x00000000.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = mask64(ctl);
        for i in 0..5 {
            self.0[i] ^= cw & (self.0[i] ^ a.0[i]);
        }
    }

    /// Returns `a0` (if `ctl` is 0x00000000) or `a1` (if `ctl` is
    /// 0xFFFFFFFF).
    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    /// Exchanges `a` and `b` if `ctl` is 0xFFFFFFFF.
    #[inline]
    pub fn cswap(a: &mut Self, b: &mut Self, ctl: u32) {
        let cw = mask64(ctl);
        for i in 0..5 {
            let t = cw & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }

    // Fully reduces the value into limbs lower than 2^51 that represent
    // an integer in the 0 to p-1 range.
    fn canonical_limbs(self) -> [u64; 5] {
        let mut l = self.0;
        Self::carry_propagate(&mut l);
        Self::carry_propagate(&mut l);

        // The value h is now lower than 2^255 + 2^52. We compute
        // q = floor((h + 19) / 2^255), which is 1 if h >= p, and 0
        // otherwise; then h - q*p is the canonical value.
        let mut q = (l[0] + 19) >> 51;
        q = (l[1] + q) >> 51;
        q = (l[2] + q) >> 51;
        q = (l[3] + q) >> 51;
        q = (l[4] + q) >> 51;

        l[0] += 19 * q;
        l[1] += l[0] >> 51;
        l[0] &= M51;
        l[2] += l[1] >> 51;
        l[1] &= M51;
        l[3] += l[2] >> 51;
        l[2] &= M51;
        l[4] += l[3] >> 51;
        l[3] &= M51;
        // The carry out of the top limb is q*2^255, which we drop.
        l[4] &= M51;
        l
    }

    /// Encodes this value over exactly 32 bytes (unsigned little-endian).
    ///
    /// Encoding is canonical: the top bit of the last byte is always 0.
    pub fn encode32(self) -> [u8; 32] {
        let l = self.canonical_limbs();
        let w = [
            l[0] | (l[1] << 51),
            (l[1] >> 13) | (l[2] << 38),
            (l[2] >> 26) | (l[3] << 25),
            (l[3] >> 39) | (l[4] << 12),
        ];
        let mut r = [0u8; 32];
        for i in 0..4 {
            r[(8 * i)..(8 * i + 8)].copy_from_slice(&w[i].to_le_bytes());
        }
        r
    }

    // Loads 32 bytes into limbs, without reduction; the top bit is
    // returned separately.
    fn load32(buf: &[u8; 32]) -> ([u64; 5], u64) {
        let mut w = [0u64; 4];
        for i in 0..4 {
            let b = <[u8; 8]>::try_from(&buf[(8 * i)..(8 * i + 8)])
                .unwrap_or([0u8; 8]);
            w[i] = u64::from_le_bytes(b);
        }
        let l = [
            w[0] & M51,
            ((w[0] >> 51) | (w[1] << 13)) & M51,
            ((w[1] >> 38) | (w[2] << 26)) & M51,
            ((w[2] >> 25) | (w[3] << 39)) & M51,
            (w[3] >> 12) & M51,
        ];
        (l, w[3] >> 63)
    }

    /// Decodes 32 bytes (unsigned little-endian) as a field element.
    ///
    /// Decoding fails if the slice does not have length exactly 32 bytes,
    /// or if the value is not canonical (i.e. not lower than p; this
    /// includes all values with the top bit set). On success, 0xFFFFFFFF
    /// is returned; on failure, this element is set to zero and
    /// 0x00000000 is returned. With a 32-byte input, the outcome is not
    /// leaked through timing.
    pub fn set_decode32(&mut self, buf: &[u8]) -> u32 {
        let bb = match <&[u8; 32]>::try_from(buf) {
            Ok(bb) => bb,
            Err(_) => {
                *self = Self::ZERO;
                return 0;
            }
        };
        let (l, _) = Self::load32(bb);
        self.0 = l;

        // The value is canonical if and only if re-encoding it yields
        // the same bytes (encode32() never sets the top bit, and always
        // reduces modulo p).
        let r = bytes_eq(&self.encode32(), bb);
        self.set_cond(&Self::ZERO, !r);
        r
    }

    #[inline]
    pub fn decode32(buf: &[u8]) -> (Self, u32) {
        let mut x = Self::ZERO;
        let r = x.set_decode32(buf);
        (x, r)
    }

    /// Decodes bytes (unsigned little-endian) with reduction modulo p.
    ///
    /// Inputs of any length are accepted; decoding never fails.
    pub fn set_decode_reduce(&mut self, buf: &[u8]) {
        *self = Self::ZERO;
        let mut n = buf.len();
        if n == 0 {
            return;
        }

        // Process the input by chunks of 32 bytes, from the most
        // significant to the least significant; the top chunk may be
        // partial.
        let mut j = n & 31;
        if j == 0 {
            j = 32;
        }
        let mut tmp = [0u8; 32];
        tmp[..j].copy_from_slice(&buf[(n - j)..]);
        *self = Self::reduce_chunk(&tmp);
        n -= j;
        while n > 0 {
            n -= 32;
            tmp.copy_from_slice(&buf[n..(n + 32)]);
            *self = *self * Self::T256 + Self::reduce_chunk(&tmp);
        }
    }

    #[inline]
    pub fn decode_reduce(buf: &[u8]) -> Self {
        let mut x = Self::ZERO;
        x.set_decode_reduce(buf);
        x
    }

    // A 256-bit chunk, reduced: bit 255 has weight 2^255 = 19 mod p.
    fn reduce_chunk(buf: &[u8; 32]) -> Self {
        let (mut l, top) = Self::load32(buf);
        l[0] += 19 * top;
        Self(l)
    }

    /// Returns 0xFFFFFFFF if this value is zero, 0x00000000 otherwise.
    #[inline]
    pub fn iszero(self) -> u32 {
        bytes_eq(&self.encode32(), &[0u8; 32])
    }

    /// Returns 0xFFFFFFFF if both values are equal, 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        (self - rhs).iszero()
    }

    /// Returns 0xFFFFFFFF if the canonical value is odd ("negative" in
    /// the RFC 8032 sense), 0x00000000 otherwise.
    #[inline]
    pub fn is_negative(self) -> u32 {
        ((self.encode32()[0] & 1) as u32).wrapping_neg()
    }
}

/// Constant-time comparison of two 32-byte arrays; returns 0xFFFFFFFF
/// on equality, 0x00000000 otherwise.
#[inline]
pub(crate) fn bytes_eq(a: &[u8; 32], b: &[u8; 32]) -> u32 {
    let mut d = 0u32;
    for i in 0..32 {
        d |= (a[i] ^ b[i]) as u32;
    }
    ((d | d.wrapping_neg()) >> 31).wrapping_sub(1)
}

impl_binop!(GF25519, Add, add, AddAssign, add_assign, set_add);
impl_binop!(GF25519, Sub, sub, SubAssign, sub_assign, set_sub);
impl_binop!(GF25519, Mul, mul, MulAssign, mul_assign, set_mul);
impl_binop!(GF25519, Div, div, DivAssign, div_assign, set_div);
impl_neg!(GF25519, set_neg);

#[cfg(test)]
mod tests {

    use super::GF25519;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Digest};

    fn modulus() -> BigInt {
        (BigInt::from(1) << 255) - BigInt::from(19)
    }

    fn to_big(x: GF25519) -> BigInt {
        BigInt::from_bytes_le(Sign::Plus, &x.encode32())
    }

    // va and vb must be 32 bytes each in length.
    fn check_gf_ops(va: &[u8], vb: &[u8]) {
        let zp = modulus();
        let a = GF25519::decode_reduce(va);
        let b = GF25519::decode_reduce(vb);
        let za = BigInt::from_bytes_le(Sign::Plus, va);
        let zb = BigInt::from_bytes_le(Sign::Plus, vb);

        assert!(to_big(a) == &za % &zp);
        assert!(to_big(b) == &zb % &zp);
        assert!(to_big(a + b) == (&za + &zb) % &zp);
        assert!(to_big(a - b) == ((&zp << 2) + &za - &zb) % &zp);
        assert!(to_big(-a) == ((&zp << 2) - &za) % &zp);
        assert!(to_big(a * b) == (&za * &zb) % &zp);
        assert!(to_big(a.square()) == (&za * &za) % &zp);

        let c = a / b;
        if b.iszero() == 0 {
            assert!(to_big(c * b) == &za % &zp);
        } else {
            assert!(c.iszero() == 0xFFFFFFFF);
        }

        let (s, ok) = GF25519::sqrt_ratio(&a, &b);
        if ok != 0 {
            assert!((s.square() * b).equals(a) == 0xFFFFFFFF);
        } else {
            // sqrt(-1) is not a square, so sqrt(-1)*u/v must be one.
            let (_, ok2) = GF25519::sqrt_ratio(&(a * GF25519::SQRT_M1), &b);
            assert!(ok2 == 0xFFFFFFFF);
        }

        // Canonical decoding round-trips the encoding.
        let (d, r) = GF25519::decode32(&a.encode32());
        assert!(r == 0xFFFFFFFF);
        assert!(d.equals(a) == 0xFFFFFFFF);
    }

    #[test]
    fn gf_ops() {
        let mut sh = Sha256::new();
        for i in 0..300 {
            sh.update(((2 * i + 0) as u64).to_le_bytes());
            let va = sh.finalize_reset();
            sh.update(((2 * i + 1) as u64).to_le_bytes());
            let vb = sh.finalize_reset();
            check_gf_ops(&va, &vb);
        }

        // Edge values around the modulus.
        let mut pm1 = [0xFFu8; 32];
        pm1[0] = 0xEC;
        pm1[31] = 0x7F;
        let zero = [0u8; 32];
        let mut one = [0u8; 32];
        one[0] = 1;
        check_gf_ops(&pm1, &pm1);
        check_gf_ops(&pm1, &one);
        check_gf_ops(&zero, &pm1);
        check_gf_ops(&[0xFFu8; 32], &[0xFFu8; 32]);
    }

    #[test]
    fn decode32_canonical() {
        // p - 1 is canonical.
        let mut buf = [0xFFu8; 32];
        buf[0] = 0xEC;
        buf[31] = 0x7F;
        let (x, r) = GF25519::decode32(&buf);
        assert!(r == 0xFFFFFFFF);
        assert!((x + GF25519::ONE).iszero() == 0xFFFFFFFF);

        // p, p + 1 and 2^255 - 1 are not.
        for v in [0xEDu8, 0xEE, 0xFF].iter() {
            buf[0] = *v;
            let (x, r) = GF25519::decode32(&buf);
            assert!(r == 0);
            assert!(x.iszero() == 0xFFFFFFFF);
        }

        // Top bit set is rejected.
        let mut buf = [0u8; 32];
        buf[31] = 0x80;
        assert!(GF25519::decode32(&buf).1 == 0);

        // Wrong length is rejected.
        assert!(GF25519::decode32(&[0u8; 31]).1 == 0);
        assert!(GF25519::decode32(&[0u8; 33]).1 == 0);
    }

    #[test]
    fn decode_reduce_long() {
        let zp = modulus();
        let mut sh = Sha256::new();
        let mut buf = [0u8; 96];
        for i in 0..3 {
            sh.update((i as u64).to_le_bytes());
            buf[(32 * i)..(32 * i + 32)].copy_from_slice(&sh.finalize_reset());
        }
        for n in [0usize, 1, 31, 32, 33, 64, 71, 96].iter() {
            let x = GF25519::decode_reduce(&buf[..*n]);
            let z = BigInt::from_bytes_le(Sign::Plus, &buf[..*n]) % &zp;
            assert!(to_big(x) == z);
        }
    }

    #[test]
    fn sqrt_m1() {
        assert!((GF25519::SQRT_M1.square() + GF25519::ONE).iszero()
            == 0xFFFFFFFF);
    }

    #[test]
    fn cond_ops() {
        let a = GF25519::from_u64(7);
        let b = GF25519::from_u64(11);
        assert!(GF25519::select(&a, &b, 0).equals(a) == 0xFFFFFFFF);
        assert!(GF25519::select(&a, &b, 0xFFFFFFFF).equals(b) == 0xFFFFFFFF);
        let (mut c, mut d) = (a, b);
        GF25519::cswap(&mut c, &mut d, 0);
        assert!(c.equals(a) == 0xFFFFFFFF && d.equals(b) == 0xFFFFFFFF);
        GF25519::cswap(&mut c, &mut d, 0xFFFFFFFF);
        assert!(c.equals(b) == 0xFFFFFFFF && d.equals(a) == 0xFFFFFFFF);
        assert!(a.is_negative() == 0xFFFFFFFF);
        assert!((-a).is_negative() == 0);
    }
}
