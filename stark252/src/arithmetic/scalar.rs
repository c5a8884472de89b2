//! Scalar field arithmetic modulo n = 3618502788666131213697322783095070105526743751716087489154079457884512865583

use crate::{FieldBytes, Stark, U256, arithmetic::util};
use core::{
    cmp::Ordering,
    fmt,
    iter::{Product, Sum},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, ShrAssign, Sub, SubAssign},
};
use elliptic_curve::{
    ScalarPrimitive,
    bigint::ArrayEncoding,
    ff::{self, Field, PrimeField},
    ops::{Invert, Reduce},
    rand_core::RngCore,
    scalar::{FromUintUnchecked, IsHigh},
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
    zeroize::DefaultIsZeroes,
};

/// Order of the curve group as a hex string.
pub(crate) const ORDER_HEX: &str =
    "0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f";

/// n = 0x0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f
pub(crate) const ORDER: [u64; 4] = [
    0x1e66_a241_adc6_4d2f,
    0xb781_126d_cae7_b232,
    0xffff_ffff_ffff_ffff,
    0x0800_0000_0000_0010,
];

/// -n^-1 mod 2^64
const M_INV: u64 = 0xbb6b_3c4c_e8bd_e631;

/// R^2 = 2^512 mod n
const R2: [u64; 4] = [
    0x6021_b3f1_ea1c_688d,
    0x509c_f64d_14ce_60b9,
    0xbaf0_ab4c_f78b_babb,
    0x07d9_e57c_2333_766e,
];

/// n - 2
const ORDER_MINUS_TWO: [u64; 4] = [
    0x1e66_a241_adc6_4d2d,
    0xb781_126d_cae7_b232,
    0xffff_ffff_ffff_ffff,
    0x0800_0000_0000_0010,
];

/// n >> 1
const FRAC_ORDER_2: [u64; 4] = [
    0x0f33_5120_d6e3_2697,
    0xdbc0_8936_e573_d919,
    0x7fff_ffff_ffff_ffff,
    0x0400_0000_0000_0008,
];

/// (n + 1) / 4, the square root exponent as n = 3 mod 4
const SQRT_EXP: [u64; 4] = [
    0x8799_a890_6b71_934c,
    0xede0_449b_72b9_ec8c,
    0x3fff_ffff_ffff_ffff,
    0x0200_0000_0000_0004,
];

/// Scalars are elements in the finite field modulo n.
///
/// Private keys, nonces, message hashes and signature components are all
/// scalars once they have been range checked.
///
/// # Trait impls
///
/// Much of the important functionality of scalars is provided by traits from
/// the [`ff`](https://docs.rs/ff/) crate, which is re-exported as
/// `stark252::elliptic_curve::ff`:
///
/// - [`Field`] - represents elements of finite fields and provides:
///   - [`Field::random`] - generate a random scalar
///   - `double`, `square`, and `invert` operations
///   - Bounds for [`Add`], [`Sub`], [`Mul`], and [`Neg`] (as well as `*Assign` equivalents)
///   - Bounds for [`ConditionallySelectable`] from the `subtle` crate
/// - [`PrimeField`] - represents elements of prime fields and provides:
///   - `from_repr`/`to_repr` for converting field elements from/to big integers.
///   - `multiplicative_generator` and `root_of_unity` constants.
///
/// Scalars print as decimal with `{}` and as hex with `{:x}`/`{:#x}`, which
/// is how signature components are usually exchanged between
/// implementations.
#[derive(Clone, Copy)]
pub struct Scalar(pub(crate) [u64; 4]);

impl_montgomery_field! {
    name: Scalar,
    modulus: ORDER,
    m_inv: M_INV,
    r2: R2,
    modulus_minus_two: ORDER_MINUS_TWO
}

impl Scalar {
    /// Returns the square root of self mod n, or `None` if no square root
    /// exists.
    pub fn sqrt(&self) -> CtOption<Self> {
        // Note: `pow_vartime` is constant-time with respect to `self`
        let sqrt = self.pow_vartime(&SQRT_EXP);
        CtOption::new(sqrt, sqrt.square().ct_eq(self))
    }

    /// Is the canonical value strictly below `bound`? Constant time.
    #[cfg_attr(not(feature = "ecdsa"), allow(dead_code))]
    pub(crate) fn ct_lt_limbs(&self, bound: &[u64; 4]) -> Choice {
        let mask = util::lt_mask(&self.to_canonical(), bound);
        Choice::from((mask & 1) as u8)
    }
}

impl AsRef<Scalar> for Scalar {
    fn as_ref(&self) -> &Scalar {
        self
    }
}

impl FromUintUnchecked for Scalar {
    type Uint = U256;

    /// The conversion into Montgomery form reduces any 256-bit input mod n.
    fn from_uint_unchecked(uint: U256) -> Self {
        Self::from_canonical_unchecked(util::limbs_from_be_bytes(&uint.to_be_byte_array()))
    }
}

impl Invert for Scalar {
    type Output = CtOption<Self>;

    fn invert(&self) -> CtOption<Self> {
        Scalar::invert(self)
    }
}

impl IsHigh for Scalar {
    fn is_high(&self) -> Choice {
        let mask = util::lt_mask(&FRAC_ORDER_2, &self.to_canonical());
        Choice::from((mask & 1) as u8)
    }
}

impl ShrAssign<usize> for Scalar {
    fn shr_assign(&mut self, rhs: usize) {
        *self = Self::from_uint_unchecked(self.to_uint() >> rhs);
    }
}

impl PartialOrd for Scalar {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Scalar {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_uint().cmp(&other.to_uint())
    }
}

impl Reduce<U256> for Scalar {
    type Bytes = FieldBytes;

    fn reduce(w: U256) -> Self {
        Self::from_uint_unchecked(w)
    }

    fn reduce_bytes(bytes: &FieldBytes) -> Self {
        Self::from_canonical_unchecked(util::limbs_from_be_bytes(bytes))
    }
}

impl From<ScalarPrimitive<Stark>> for Scalar {
    fn from(w: ScalarPrimitive<Stark>) -> Self {
        Scalar::from(&w)
    }
}

impl From<&ScalarPrimitive<Stark>> for Scalar {
    fn from(w: &ScalarPrimitive<Stark>) -> Scalar {
        Scalar::from_uint_unchecked(*w.as_uint())
    }
}

impl From<Scalar> for ScalarPrimitive<Stark> {
    fn from(scalar: Scalar) -> ScalarPrimitive<Stark> {
        ScalarPrimitive::from(&scalar)
    }
}

impl From<&Scalar> for ScalarPrimitive<Stark> {
    fn from(scalar: &Scalar) -> ScalarPrimitive<Stark> {
        ScalarPrimitive::from_uint_unchecked(scalar.to_uint())
    }
}

impl PrimeField for Scalar {
    type Repr = FieldBytes;

    const MODULUS: &'static str = ORDER_HEX;
    const NUM_BITS: u32 = 252;
    const CAPACITY: u32 = 251;
    const TWO_INV: Self =
        Self::from_hex("04000000000000087fffffffffffffffdbc08936e573d9190f335120d6e32698");
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(3);
    const S: u32 = 1;
    const ROOT_OF_UNITY: Self =
        Self::from_hex("0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2e");
    const ROOT_OF_UNITY_INV: Self = Self::ROOT_OF_UNITY;
    const DELTA: Self = Self::from_u64(9);

    fn from_repr(bytes: FieldBytes) -> CtOption<Self> {
        Self::from_bytes(&bytes)
    }

    fn to_repr(&self) -> FieldBytes {
        self.to_bytes()
    }

    fn is_odd(&self) -> Choice {
        Scalar::is_odd(self)
    }
}
