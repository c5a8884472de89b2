//! Macros for the Montgomery-form prime field types.

/// Implements arithmetic, encodings and trait impls for a newtype around
/// four little-endian `u64` limbs holding a value in Montgomery form.
///
/// The type must provide an inherent `sqrt(&self) -> CtOption<Self>`.
macro_rules! impl_montgomery_field {
    (
        name: $fe:ident,
        modulus: $modulus:expr,
        m_inv: $m_inv:expr,
        r2: $r2:expr,
        modulus_minus_two: $exp:expr
    ) => {
        impl $fe {
            /// Zero element.
            pub const ZERO: Self = Self([0; 4]);

            /// Multiplicative identity.
            pub const ONE: Self = Self::from_u64(1);

            /// Converts canonical limbs into Montgomery form without checking
            /// they are below the modulus.
            pub(crate) const fn from_canonical_unchecked(limbs: [u64; 4]) -> Self {
                Self($crate::arithmetic::util::montgomery_mul(
                    &limbs, &$r2, &$modulus, $m_inv,
                ))
            }

            /// Returns the canonical (non-Montgomery) limbs of this element.
            pub(crate) const fn to_canonical(&self) -> [u64; 4] {
                let w = [self.0[0], self.0[1], self.0[2], self.0[3], 0, 0, 0, 0];
                $crate::arithmetic::util::montgomery_reduce(&w, &$modulus, $m_inv)
            }

            /// Decode from big-endian hex. Intended for constants.
            ///
            /// # Panics
            ///
            /// - When hex is malformed or longer than 64 digits
            /// - If the value overflows the modulus
            pub const fn from_hex(hex: &str) -> Self {
                let limbs = $crate::arithmetic::util::hex_to_limbs(hex);
                assert!(
                    $crate::arithmetic::util::lt_mask(&limbs, &$modulus) != 0,
                    "hex overflows the modulus"
                );
                Self::from_canonical_unchecked(limbs)
            }

            /// Convert a `u64` into an element.
            pub const fn from_u64(w: u64) -> Self {
                Self::from_canonical_unchecked([w, 0, 0, 0])
            }

            /// Attempts to parse the given byte array as a big-endian integer.
            ///
            /// Returns `None` if the value is not below the modulus.
            pub fn from_bytes(bytes: &$crate::FieldBytes) -> CtOption<Self> {
                let limbs = $crate::arithmetic::util::limbs_from_be_bytes(bytes);
                Self::from_limbs(limbs)
            }

            /// Decode from a [`U256`](crate::U256), which must be below the
            /// modulus.
            pub fn from_uint(uint: &$crate::U256) -> CtOption<Self> {
                use $crate::elliptic_curve::bigint::ArrayEncoding;
                Self::from_bytes(&uint.to_be_byte_array())
            }

            pub(crate) fn from_limbs(limbs: [u64; 4]) -> CtOption<Self> {
                let in_range = $crate::arithmetic::util::lt_mask(&limbs, &$modulus);
                CtOption::new(
                    Self::from_canonical_unchecked(limbs),
                    Choice::from((in_range & 1) as u8),
                )
            }

            /// Returns the big-endian encoding of this element.
            pub fn to_bytes(&self) -> $crate::FieldBytes {
                let mut bytes = $crate::FieldBytes::default();
                $crate::arithmetic::util::limbs_to_be_bytes(&self.to_canonical(), &mut bytes);
                bytes
            }

            /// Returns the canonical value as a [`U256`](crate::U256).
            pub fn to_uint(&self) -> $crate::U256 {
                use $crate::elliptic_curve::bigint::ArrayEncoding;
                $crate::U256::from_be_byte_array(self.to_bytes())
            }

            /// Determine if this element is zero.
            pub fn is_zero(&self) -> Choice {
                self.ct_eq(&Self::ZERO)
            }

            /// Is the canonical value odd?
            pub fn is_odd(&self) -> Choice {
                Choice::from((self.to_canonical()[0] & 1) as u8)
            }

            /// Is the canonical value even?
            pub fn is_even(&self) -> Choice {
                !self.is_odd()
            }

            /// Returns `self + rhs`.
            pub const fn add(&self, rhs: &Self) -> Self {
                Self($crate::arithmetic::util::add_mod(&self.0, &rhs.0, &$modulus))
            }

            /// Returns `self - rhs`.
            pub const fn sub(&self, rhs: &Self) -> Self {
                Self($crate::arithmetic::util::sub_mod(&self.0, &rhs.0, &$modulus))
            }

            /// Returns `2 * self`.
            pub const fn double(&self) -> Self {
                self.add(self)
            }

            /// Returns `-self`.
            pub const fn neg(&self) -> Self {
                Self::sub(&Self::ZERO, self)
            }

            /// Returns `self * rhs`.
            pub const fn multiply(&self, rhs: &Self) -> Self {
                Self($crate::arithmetic::util::montgomery_mul(
                    &self.0, &rhs.0, &$modulus, $m_inv,
                ))
            }

            /// Returns `self * self`.
            pub const fn square(&self) -> Self {
                self.multiply(self)
            }

            /// Returns `self^exp`, where `exp` is a little-endian integer exponent.
            ///
            /// **This operation is variable time with respect to the exponent `exp`.**
            ///
            /// If the exponent is fixed, this operation is constant time.
            pub const fn pow_vartime(&self, exp: &[u64]) -> Self {
                let mut res = Self::ONE;

                let mut i = exp.len();
                while i > 0 {
                    i -= 1;

                    let mut j = 64;
                    while j > 0 {
                        j -= 1;
                        res = res.square();

                        if ((exp[i] >> j) & 1) == 1 {
                            res = res.multiply(self);
                        }
                    }
                }

                res
            }

            /// Returns the multiplicative inverse of self, if self is non-zero.
            pub fn invert(&self) -> CtOption<Self> {
                CtOption::new(self.invert_unchecked(), !self.is_zero())
            }

            /// Returns the multiplicative inverse of self, or
            /// [`Error::Domain`](crate::Error::Domain) when self is zero.
            pub fn try_invert(&self) -> $crate::Result<Self> {
                Option::from(self.invert()).ok_or($crate::Error::Domain)
            }

            /// Fermat inversion: `self^(m - 2)`. Returns zero for zero.
            pub(crate) const fn invert_unchecked(&self) -> Self {
                self.pow_vartime(&$exp)
            }
        }

        impl Field for $fe {
            const ZERO: Self = Self::ZERO;
            const ONE: Self = Self::ONE;

            fn random(mut rng: impl RngCore) -> Self {
                let mut bytes = $crate::FieldBytes::default();

                // Rejection sampling on 252-bit candidates. Each draw is
                // accepted with probability above one half.
                loop {
                    rng.fill_bytes(&mut bytes);
                    bytes[0] &= 0x0f;
                    if let Some(fe) = Self::from_bytes(&bytes).into() {
                        return fe;
                    }
                }
            }

            fn is_zero(&self) -> Choice {
                <$fe>::is_zero(self)
            }

            #[must_use]
            fn square(&self) -> Self {
                <$fe>::square(self)
            }

            #[must_use]
            fn double(&self) -> Self {
                <$fe>::double(self)
            }

            fn invert(&self) -> CtOption<Self> {
                <$fe>::invert(self)
            }

            fn sqrt(&self) -> CtOption<Self> {
                <$fe>::sqrt(self)
            }

            fn sqrt_ratio(num: &Self, div: &Self) -> (Choice, Self) {
                ff::helpers::sqrt_ratio_generic(num, div)
            }
        }

        field_op!($fe, Add, add, add);
        field_op!($fe, Sub, sub, sub);
        field_op!($fe, Mul, mul, multiply);

        impl AddAssign<$fe> for $fe {
            #[inline]
            fn add_assign(&mut self, other: $fe) {
                *self = <$fe>::add(self, &other);
            }
        }

        impl AddAssign<&$fe> for $fe {
            #[inline]
            fn add_assign(&mut self, other: &$fe) {
                *self = <$fe>::add(self, other);
            }
        }

        impl SubAssign<$fe> for $fe {
            #[inline]
            fn sub_assign(&mut self, other: $fe) {
                *self = <$fe>::sub(self, &other);
            }
        }

        impl SubAssign<&$fe> for $fe {
            #[inline]
            fn sub_assign(&mut self, other: &$fe) {
                *self = <$fe>::sub(self, other);
            }
        }

        impl MulAssign<$fe> for $fe {
            #[inline]
            fn mul_assign(&mut self, other: $fe) {
                *self = <$fe>::multiply(self, &other);
            }
        }

        impl MulAssign<&$fe> for $fe {
            #[inline]
            fn mul_assign(&mut self, other: &$fe) {
                *self = <$fe>::multiply(self, other);
            }
        }

        impl Neg for $fe {
            type Output = $fe;

            #[inline]
            fn neg(self) -> $fe {
                <$fe>::neg(&self)
            }
        }

        impl Neg for &$fe {
            type Output = $fe;

            #[inline]
            fn neg(self) -> $fe {
                <$fe>::neg(self)
            }
        }

        impl Sum for $fe {
            fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.reduce(core::ops::Add::add).unwrap_or(Self::ZERO)
            }
        }

        impl<'a> Sum<&'a $fe> for $fe {
            fn sum<I: Iterator<Item = &'a $fe>>(iter: I) -> Self {
                iter.copied().sum()
            }
        }

        impl Product for $fe {
            fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
                iter.reduce(core::ops::Mul::mul).unwrap_or(Self::ONE)
            }
        }

        impl<'a> Product<&'a $fe> for $fe {
            fn product<I: Iterator<Item = &'a $fe>>(iter: I) -> Self {
                iter.copied().product()
            }
        }

        impl ConditionallySelectable for $fe {
            fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
                Self([
                    u64::conditional_select(&a.0[0], &b.0[0], choice),
                    u64::conditional_select(&a.0[1], &b.0[1], choice),
                    u64::conditional_select(&a.0[2], &b.0[2], choice),
                    u64::conditional_select(&a.0[3], &b.0[3], choice),
                ])
            }
        }

        impl ConstantTimeEq for $fe {
            fn ct_eq(&self, other: &Self) -> Choice {
                self.0.ct_eq(&other.0)
            }
        }

        impl PartialEq for $fe {
            fn eq(&self, other: &Self) -> bool {
                self.ct_eq(other).into()
            }
        }

        impl Eq for $fe {}

        impl Default for $fe {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl DefaultIsZeroes for $fe {}

        impl From<u32> for $fe {
            fn from(n: u32) -> $fe {
                Self::from_u64(n.into())
            }
        }

        impl From<u64> for $fe {
            fn from(n: u64) -> $fe {
                Self::from_u64(n)
            }
        }

        impl From<$fe> for $crate::FieldBytes {
            fn from(fe: $fe) -> Self {
                fe.to_bytes()
            }
        }

        impl From<&$fe> for $crate::FieldBytes {
            fn from(fe: &$fe) -> Self {
                fe.to_bytes()
            }
        }

        impl From<$fe> for $crate::U256 {
            fn from(fe: $fe) -> Self {
                fe.to_uint()
            }
        }

        impl From<&$fe> for $crate::U256 {
            fn from(fe: &$fe) -> Self {
                fe.to_uint()
            }
        }

        impl fmt::Debug for $fe {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}(0x", stringify!($fe))?;
                for byte in self.to_bytes() {
                    write!(f, "{:02X}", byte)?;
                }
                write!(f, ")")
            }
        }

        /// Decimal rendering of the canonical value.
        impl fmt::Display for $fe {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                $crate::arithmetic::util::fmt_decimal(&self.to_canonical(), f)
            }
        }

        impl fmt::LowerHex for $fe {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                $crate::arithmetic::util::fmt_hex(&self.to_canonical(), f, false)
            }
        }

        impl fmt::UpperHex for $fe {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                $crate::arithmetic::util::fmt_hex(&self.to_canonical(), f, true)
            }
        }

        /// Parses decimal, or hexadecimal with a `0x` prefix.
        impl core::str::FromStr for $fe {
            type Err = $crate::Error;

            fn from_str(s: &str) -> $crate::Result<Self> {
                let limbs =
                    $crate::arithmetic::util::parse_limbs(s).ok_or($crate::Error::Domain)?;
                Option::from(Self::from_limbs(limbs)).ok_or($crate::Error::Domain)
            }
        }
    };
}

/// Implements a binary operator for owned and borrowed operands.
macro_rules! field_op {
    ($fe:ident, $op:tt, $func:ident, $inner_func:ident) => {
        impl $op for $fe {
            type Output = $fe;

            #[inline]
            fn $func(self, rhs: $fe) -> $fe {
                <$fe>::$inner_func(&self, &rhs)
            }
        }

        impl $op<&$fe> for $fe {
            type Output = $fe;

            #[inline]
            fn $func(self, rhs: &$fe) -> $fe {
                <$fe>::$inner_func(&self, rhs)
            }
        }

        impl $op<&$fe> for &$fe {
            type Output = $fe;

            #[inline]
            fn $func(self, rhs: &$fe) -> $fe {
                <$fe>::$inner_func(self, rhs)
            }
        }
    };
}

/// Field axiom tests shared by the base and scalar fields.
#[cfg(test)]
macro_rules! test_field_arithmetic {
    ($fe:ident, $modulus_hex:expr) => {
        #[test]
        fn zero_is_additive_identity() {
            let zero = $fe::ZERO;
            let one = $fe::ONE;
            assert_eq!(zero.add(&zero), zero);
            assert_eq!(one.add(&zero), one);
        }

        #[test]
        fn one_is_multiplicative_identity() {
            let one = $fe::ONE;
            assert_eq!(one.multiply(&one), one);
        }

        #[test]
        fn invert() {
            let one = $fe::ONE;
            assert_eq!(one.invert().unwrap(), one);

            let three = one + &one + &one;
            let inv_three = three.invert().unwrap();
            assert_eq!(three * &inv_three, one);

            let minus_three = -three;
            let inv_minus_three = minus_three.invert().unwrap();
            assert_eq!(inv_minus_three, -inv_three);
            assert_eq!(three * &inv_minus_three, -one);

            assert!(bool::from($fe::ZERO.invert().is_none()));
            assert_eq!($fe::ZERO.try_invert(), Err(crate::Error::Domain));
        }

        #[test]
        fn sqrt() {
            for &n in &[1u64, 4, 9, 16, 25, 36, 49, 64] {
                let fe = $fe::from(n);
                let sqrt = elliptic_curve::ff::Field::sqrt(&fe).unwrap();
                assert_eq!(sqrt.square(), fe);
            }
        }

        #[test]
        fn two_inv_constant() {
            use elliptic_curve::ff::PrimeField;
            assert_eq!($fe::from(2u32) * $fe::TWO_INV, $fe::ONE);
        }

        #[test]
        fn root_of_unity_constant() {
            use elliptic_curve::ff::PrimeField;
            assert_eq!($fe::ROOT_OF_UNITY * $fe::ROOT_OF_UNITY_INV, $fe::ONE);
            let mut x = $fe::ROOT_OF_UNITY;
            for _ in 0..$fe::S {
                x = x.square();
            }
            assert_eq!(x, $fe::ONE);
        }

        #[test]
        fn modulus_wraps_to_zero() {
            let minus_one = -$fe::ONE;
            assert_eq!(minus_one + $fe::ONE, $fe::ZERO);
            assert_eq!(format!("{:x}", minus_one + $fe::from(2u32)), "1");
        }

        #[test]
        fn from_bytes_rejects_modulus() {
            let modulus = crate::arithmetic::util::hex_to_limbs($modulus_hex);
            let mut bytes = crate::FieldBytes::default();
            crate::arithmetic::util::limbs_to_be_bytes(&modulus, &mut bytes);
            assert!(bool::from($fe::from_bytes(&bytes).is_none()));
        }

        #[test]
        fn bytes_roundtrip() {
            let fe = $fe::from(0x0123_4567_89ab_cdefu64);
            let bytes = fe.to_bytes();
            assert_eq!(&bytes[24..], &[0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef]);
            assert_eq!($fe::from_bytes(&bytes).unwrap(), fe);
        }

        #[test]
        fn multiplication_matches_biguint() {
            use crate::arithmetic::util::{biguint_to_bytes, bytes_to_biguint};
            use num_bigint::BigUint;
            use num_traits::Num;

            let modulus = BigUint::from_str_radix($modulus_hex, 16).unwrap();
            let a = $fe::from_hex("07c1e9550e66958296d11b60f8e8e7a7ad990d07fa65d5f7652c4a6c87d4e3cc");
            let b = $fe::from_hex("06f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89");

            let a_big = bytes_to_biguint(&a.to_bytes().into());
            let b_big = bytes_to_biguint(&b.to_bytes().into());

            let product = biguint_to_bytes(&((&a_big * &b_big) % &modulus));
            assert_eq!((a * b).to_bytes().as_slice(), &product);

            let sum = biguint_to_bytes(&((&a_big + &b_big) % &modulus));
            assert_eq!((a + b).to_bytes().as_slice(), &sum);

            let diff = biguint_to_bytes(&((&a_big + &modulus - &b_big) % &modulus));
            assert_eq!((a - b).to_bytes().as_slice(), &diff);
        }

        #[test]
        fn decimal_and_hex_text() {
            let fe: $fe = "1234567890".parse().unwrap();
            assert_eq!(fe, $fe::from(1234567890u64));
            assert_eq!(format!("{}", fe), "1234567890");
            assert_eq!(format!("{:#x}", fe), "0x499602d2");
            assert_eq!(format!("{:X}", fe), "499602D2");
            assert_eq!("0x499602d2".parse::<$fe>().unwrap(), fe);
            assert_eq!("0x".parse::<$fe>(), Err(crate::Error::Domain));
            assert_eq!(
                concat!("0x", $modulus_hex).parse::<$fe>(),
                Err(crate::Error::Domain)
            );
        }
    };
}
