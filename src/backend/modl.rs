use core::convert::TryFrom;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Integers modulo L = 2^252 + 27742317777372353535851937790883648493.
///
/// The value is kept in four 64-bit limbs (little-endian), always fully
/// reduced in the 0 to L-1 range. Multiplications use Montgomery
/// reduction internally (with R = 2^256), but the stored value is the
/// plain integer, so encoding and decoding are straightforward.
#[derive(Clone, Copy, Debug)]
pub struct ModL([u64; 4]);

#[inline(always)]
fn mask64(ctl: u32) -> u64 {
    ((ctl as u64) << 32) | (ctl as u64)
}

#[inline(always)]
fn adc(x: u64, y: u64, c: u64) -> (u64, u64) {
    let z = (x as u128) + (y as u128) + (c as u128);
    (z as u64, (z >> 64) as u64)
}

// Returns (x - y - b, borrow) with borrow in { 0, 1 }.
#[inline(always)]
fn sbb(x: u64, y: u64, b: u64) -> (u64, u64) {
    let z = (x as u128).wrapping_sub((y as u128) + (b as u128));
    (z as u64, ((z >> 64) as u64) & 1)
}

impl ModL {

    pub const ZERO: Self = Self([ 0, 0, 0, 0 ]);
    pub const ONE: Self = Self([ 1, 0, 0, 0 ]);

    /// The modulus L.
    pub const MODULUS: [u64; 4] = [
        0x5812631A5CF5D3ED, 0x14DEF9DEA2F79CD6,
        0x0000000000000000, 0x1000000000000000,
    ];

    // -1/L mod 2^64
    const N0I: u64 = 0xD2B51DA312547E1B;

    // 2^256 mod L
    const R1: Self = Self([
        0xD6EC31748D98951D, 0xC6EF5BF4737DCF70,
        0xFFFFFFFFFFFFFFFE, 0x0FFFFFFFFFFFFFFF,
    ]);

    // 2^512 mod L
    const R2: Self = Self([
        0xA40611E3449C0F01, 0xD00E1BA768859347,
        0xCEEC73D217F5BE65, 0x0399411B7C309A3D,
    ]);

    /// Creates a scalar from a 64-bit integer.
    #[inline]
    pub fn from_u64(x: u64) -> Self {
        Self([ x, 0, 0, 0 ])
    }

    /// Creates a constant scalar from four 64-bit words (big-endian
    /// order, most significant first). The value MUST be lower than L;
    /// this is not checked.
    pub const fn w64be(x3: u64, x2: u64, x1: u64, x0: u64) -> Self {
        Self([ x0, x1, x2, x3 ])
    }

    // Subtracts L if the limbs (which must represent a value lower than
    // 2*L) are not lower than L.
    #[inline(always)]
    fn cond_sub_modulus(t: [u64; 4]) -> [u64; 4] {
        let mut d = [0u64; 4];
        let mut b = 0;
        for i in 0..4 {
            let (z, bb) = sbb(t[i], Self::MODULUS[i], b);
            d[i] = z;
            b = bb;
        }
        // b == 1 means t < L: keep t.
        let keep = mask64((b as u32).wrapping_neg());
        let mut r = [0u64; 4];
        for i in 0..4 {
            r[i] = d[i] ^ (keep & (d[i] ^ t[i]));
        }
        r
    }

    fn set_add(&mut self, rhs: &Self) {
        // Both operands are lower than L < 2^253; the sum fits.
        let mut t = [0u64; 4];
        let mut c = 0;
        for i in 0..4 {
            let (z, cc) = adc(self.0[i], rhs.0[i], c);
            t[i] = z;
            c = cc;
        }
        self.0 = Self::cond_sub_modulus(t);
    }

    fn set_sub(&mut self, rhs: &Self) {
        let mut t = [0u64; 4];
        let mut b = 0;
        for i in 0..4 {
            let (z, bb) = sbb(self.0[i], rhs.0[i], b);
            t[i] = z;
            b = bb;
        }
        // On borrow, add back L.
        let m = mask64((b as u32).wrapping_neg());
        let mut c = 0;
        for i in 0..4 {
            let (z, cc) = adc(t[i], Self::MODULUS[i] & m, c);
            t[i] = z;
            c = cc;
        }
        self.0 = t;
    }

    /// Negates this value (in place).
    #[inline]
    pub fn set_neg(&mut self) {
        let mut r = Self::ZERO;
        r.set_sub(self);
        *self = r;
    }

    // Montgomery multiplication: returns a*b/2^256 mod L, fully reduced.
    // Operand a can be any 256-bit value; operand b MUST be lower than L.
    fn montymul(a: &[u64; 4], b: &[u64; 4]) -> [u64; 4] {
        // Invariant: t < a + L < 2^257 at the end of each outer
        // iteration; the final value is lower than 2*L.
        let mut t = [0u64; 6];
        for i in 0..4 {
            let mut c = 0;
            for j in 0..4 {
                let z = (t[j] as u128)
                    + (a[j] as u128) * (b[i] as u128) + (c as u128);
                t[j] = z as u64;
                c = (z >> 64) as u64;
            }
            let (z, cc) = adc(t[4], c, 0);
            t[4] = z;
            t[5] = cc;

            let m = t[0].wrapping_mul(Self::N0I);
            let z = (t[0] as u128) + (m as u128) * (Self::MODULUS[0] as u128);
            let mut c = (z >> 64) as u64;
            for j in 1..4 {
                let z = (t[j] as u128)
                    + (m as u128) * (Self::MODULUS[j] as u128) + (c as u128);
                t[j - 1] = z as u64;
                c = (z >> 64) as u64;
            }
            let (z, cc) = adc(t[4], c, 0);
            t[3] = z;
            t[4] = t[5] + cc;
        }
        Self::cond_sub_modulus([ t[0], t[1], t[2], t[3] ])
    }

    fn set_mul(&mut self, rhs: &Self) {
        // montymul(a, b) = a*b/R; a second multiplication by R^2 mod L
        // removes the extra 1/R factor.
        let t = Self::montymul(&self.0, &rhs.0);
        self.0 = Self::montymul(&t, &Self::R2.0);
    }

    #[inline(always)]
    pub fn square(self) -> Self {
        self * self
    }

    /// Sets this value to `a` if `ctl` is 0xFFFFFFFF; leaves it unchanged
    /// if `ctl` is 0x00000000.
    #[inline]
    pub fn set_cond(&mut self, a: &Self, ctl: u32) {
        let cw = mask64(ctl);
        for i in 0..4 {
            self.0[i] ^= cw & (self.0[i] ^ a.0[i]);
        }
    }

    #[inline(always)]
    pub fn select(a0: &Self, a1: &Self, ctl: u32) -> Self {
        let mut r = *a0;
        r.set_cond(a1, ctl);
        r
    }

    /// Returns 0xFFFFFFFF if both values are equal, 0x00000000 otherwise.
    #[inline]
    pub fn equals(self, rhs: Self) -> u32 {
        let mut d = 0;
        for i in 0..4 {
            d |= self.0[i] ^ rhs.0[i];
        }
        (((d | d.wrapping_neg()) >> 63) as u32).wrapping_sub(1)
    }

    #[inline]
    pub fn iszero(self) -> u32 {
        self.equals(Self::ZERO)
    }

    /// Encodes this scalar over exactly 32 bytes (unsigned little-endian).
    pub fn encode32(self) -> [u8; 32] {
        let mut r = [0u8; 32];
        for i in 0..4 {
            r[(8 * i)..(8 * i + 8)].copy_from_slice(&self.0[i].to_le_bytes());
        }
        r
    }

    fn load32(buf: &[u8; 32]) -> [u64; 4] {
        let mut w = [0u64; 4];
        for i in 0..4 {
            let b = <[u8; 8]>::try_from(&buf[(8 * i)..(8 * i + 8)])
                .unwrap_or([0u8; 8]);
            w[i] = u64::from_le_bytes(b);
        }
        w
    }

    /// Decodes a scalar from exactly 32 bytes (unsigned little-endian).
    ///
    /// Decoding fails if the slice length is not 32, or if the value is
    /// not lower than L. On success, 0xFFFFFFFF is returned; on failure,
    /// this scalar is set to zero and 0x00000000 is returned. With a
    /// 32-byte input, the outcome does not leak through timing.
    pub fn set_decode32(&mut self, buf: &[u8]) -> u32 {
        let bb = match <&[u8; 32]>::try_from(buf) {
            Ok(bb) => bb,
            Err(_) => {
                *self = Self::ZERO;
                return 0;
            }
        };
        let w = Self::load32(bb);

        // The value is canonical if w - L borrows.
        let mut b = 0;
        for i in 0..4 {
            let (_, bb) = sbb(w[i], Self::MODULUS[i], b);
            b = bb;
        }
        let r = (b as u32).wrapping_neg();
        let m = mask64(r);
        for i in 0..4 {
            self.0[i] = w[i] & m;
        }
        r
    }

    #[inline]
    pub fn decode32(buf: &[u8]) -> (Self, u32) {
        let mut x = Self::ZERO;
        let r = x.set_decode32(buf);
        (x, r)
    }

    /// Decodes bytes (unsigned little-endian) with reduction modulo L.
    ///
    /// Inputs of any length are accepted (e.g. 64-byte hash outputs);
    /// decoding never fails.
    pub fn set_decode_reduce(&mut self, buf: &[u8]) {
        *self = Self::ZERO;
        let mut n = buf.len();
        if n == 0 {
            return;
        }

        // Horner evaluation over 32-byte chunks, top chunk first:
        //   acc <- acc*2^256 + chunk
        // with montymul(acc, R2) = acc*2^256 mod L, and
        // montymul(chunk, R1) = chunk mod L.
        let mut j = n & 31;
        if j == 0 {
            j = 32;
        }
        let mut tmp = [0u8; 32];
        tmp[..j].copy_from_slice(&buf[(n - j)..]);
        self.0 = Self::montymul(&Self::load32(&tmp), &Self::R1.0);
        n -= j;
        while n > 0 {
            n -= 32;
            tmp.copy_from_slice(&buf[n..(n + 32)]);
            let hi = Self(Self::montymul(&self.0, &Self::R2.0));
            let lo = Self(Self::montymul(&Self::load32(&tmp), &Self::R1.0));
            *self = hi + lo;
        }
    }

    #[inline]
    pub fn decode_reduce(buf: &[u8]) -> Self {
        let mut x = Self::ZERO;
        x.set_decode_reduce(buf);
        x
    }
}

impl_binop!(ModL, Add, add, AddAssign, add_assign, set_add);
impl_binop!(ModL, Sub, sub, SubAssign, sub_assign, set_sub);
impl_binop!(ModL, Mul, mul, MulAssign, mul_assign, set_mul);
impl_neg!(ModL, set_neg);

#[cfg(feature = "zeroize")]
impl Zeroize for ModL {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

#[cfg(test)]
mod tests {

    use super::ModL;
    use num_bigint::{BigInt, Sign};
    use sha2::{Sha256, Sha512, Digest};

    fn order() -> BigInt {
        (BigInt::from(1) << 252)
            + "27742317777372353535851937790883648493"
                .parse::<BigInt>().unwrap()
    }

    fn to_big(x: ModL) -> BigInt {
        BigInt::from_bytes_le(Sign::Plus, &x.encode32())
    }

    #[test]
    fn modulus_constant() {
        let mut bb = [0u8; 32];
        for i in 0..4 {
            bb[(8 * i)..(8 * i + 8)]
                .copy_from_slice(&ModL::MODULUS[i].to_le_bytes());
        }
        assert!(BigInt::from_bytes_le(Sign::Plus, &bb) == order());
    }

    #[test]
    fn modl_ops() {
        let zl = order();
        let mut sh = Sha512::new();
        for i in 0..300 {
            sh.update(((2 * i + 0) as u64).to_le_bytes());
            let va = sh.finalize_reset();
            sh.update(((2 * i + 1) as u64).to_le_bytes());
            let vb = sh.finalize_reset();

            // 64-byte reduction.
            let a = ModL::decode_reduce(&va);
            let b = ModL::decode_reduce(&vb[..32]);
            let za = BigInt::from_bytes_le(Sign::Plus, &va) % &zl;
            let zb = BigInt::from_bytes_le(Sign::Plus, &vb[..32]) % &zl;
            assert!(to_big(a) == za);
            assert!(to_big(b) == zb);

            assert!(to_big(a + b) == (&za + &zb) % &zl);
            assert!(to_big(a - b) == (&zl + &za - &zb) % &zl);
            assert!(to_big(-a) == (&zl - &za) % &zl);
            assert!(to_big(a * b) == (&za * &zb) % &zl);
            assert!(to_big(a.square()) == (&za * &za) % &zl);

            let (c, r) = ModL::decode32(&a.encode32());
            assert!(r == 0xFFFFFFFF);
            assert!(c.equals(a) == 0xFFFFFFFF);
        }
    }

    #[test]
    fn decode_reduce_lengths() {
        let zl = order();
        let mut sh = Sha256::new();
        let mut buf = [0u8; 100];
        for i in 0..4 {
            sh.update((i as u64).to_le_bytes());
            let v = sh.finalize_reset();
            let n = core::cmp::min(32, 100 - 32 * i);
            buf[(32 * i)..(32 * i + n)].copy_from_slice(&v[..n]);
        }
        for n in [0usize, 1, 17, 32, 33, 64, 65, 100].iter() {
            let x = ModL::decode_reduce(&buf[..*n]);
            let z = BigInt::from_bytes_le(Sign::Plus, &buf[..*n]) % &zl;
            assert!(to_big(x) == z);
        }
        let x = ModL::decode_reduce(&[0xFFu8; 64]);
        let z = BigInt::from_bytes_le(Sign::Plus, &[0xFFu8; 64]) % &zl;
        assert!(to_big(x) == z);
    }

    #[test]
    fn decode32_range() {
        let mut bb = [0u8; 32];
        for i in 0..4 {
            bb[(8 * i)..(8 * i + 8)]
                .copy_from_slice(&ModL::MODULUS[i].to_le_bytes());
        }

        // L itself is rejected; L - 1 is accepted.
        let (x, r) = ModL::decode32(&bb);
        assert!(r == 0 && x.iszero() == 0xFFFFFFFF);
        bb[0] -= 1;
        let (x, r) = ModL::decode32(&bb);
        assert!(r == 0xFFFFFFFF);
        assert!((x + ModL::ONE).iszero() == 0xFFFFFFFF);

        assert!(ModL::decode32(&[0xFFu8; 32]).1 == 0);
        assert!(ModL::decode32(&[0u8; 32]).1 == 0xFFFFFFFF);
        assert!(ModL::decode32(&[0u8; 31]).1 == 0);
    }
}
