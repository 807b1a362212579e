// Operator implementations for all combinations of values and references.
// Each operator forwards to the corresponding in-place `set_*()` method,
// which must take `&mut self` and `&Self`.

macro_rules! impl_binop {
    ($t:ty, $tr:ident, $f:ident, $tra:ident, $fa:ident, $set:ident) => {
        impl core::ops::$tr<$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn $f(self, other: $t) -> $t {
                let mut r = self;
                r.$set(&other);
                r
            }
        }

        impl core::ops::$tr<&$t> for $t {
            type Output = $t;

            #[inline(always)]
            fn $f(self, other: &$t) -> $t {
                let mut r = self;
                r.$set(other);
                r
            }
        }

        impl core::ops::$tr<$t> for &$t {
            type Output = $t;

            #[inline(always)]
            fn $f(self, other: $t) -> $t {
                let mut r = *self;
                r.$set(&other);
                r
            }
        }

        impl core::ops::$tr<&$t> for &$t {
            type Output = $t;

            #[inline(always)]
            fn $f(self, other: &$t) -> $t {
                let mut r = *self;
                r.$set(other);
                r
            }
        }

        impl core::ops::$tra<$t> for $t {
            #[inline(always)]
            fn $fa(&mut self, other: $t) {
                self.$set(&other);
            }
        }

        impl core::ops::$tra<&$t> for $t {
            #[inline(always)]
            fn $fa(&mut self, other: &$t) {
                self.$set(other);
            }
        }
    };
}

macro_rules! impl_neg {
    ($t:ty, $set:ident) => {
        impl core::ops::Neg for $t {
            type Output = $t;

            #[inline(always)]
            fn neg(self) -> $t {
                let mut r = self;
                r.$set();
                r
            }
        }

        impl core::ops::Neg for &$t {
            type Output = $t;

            #[inline(always)]
            fn neg(self) -> $t {
                let mut r = *self;
                r.$set();
                r
            }
        }
    };
}
