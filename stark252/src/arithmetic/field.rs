//! Field arithmetic modulo p = 2^251 + 17·2^192 + 1
//!
//! Elements are kept in Montgomery form on four 64-bit limbs.

use core::{
    fmt,
    iter::{Product, Sum},
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};
use elliptic_curve::{
    ff::{self, Field, PrimeField},
    rand_core::RngCore,
    subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption},
    zeroize::DefaultIsZeroes,
};

/// Field modulus as a hex string.
pub(crate) const MODULUS_HEX: &str =
    "0800000000000011000000000000000000000000000000000000000000000001";

/// p = 0x0800000000000011000000000000000000000000000000000000000000000001
pub(crate) const MODULUS: [u64; 4] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_0000,
    0x0000_0000_0000_0000,
    0x0800_0000_0000_0011,
];

/// -p^-1 mod 2^64
const M_INV: u64 = 0xffff_ffff_ffff_ffff;

/// R^2 = 2^512 mod p
const R2: [u64; 4] = [
    0xffff_fd73_7e00_0401,
    0x0000_0001_330f_ffff,
    0xffff_ffff_ff6f_8000,
    0x07ff_d4ab_5e00_8810,
];

/// p - 2
const MODULUS_MINUS_TWO: [u64; 4] = [
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0xffff_ffff_ffff_ffff,
    0x0800_0000_0000_0010,
];

/// (t - 1) / 2 where p - 1 = 2^192 · t
const T_MINUS_ONE_DIV_TWO: [u64; 4] = [0x0400_0000_0000_0008, 0, 0, 0];

/// Element of the Stark curve's base field, used for point coordinates.
///
/// Besides the [`Field`] and [`PrimeField`] impls, elements render as
/// decimal through [`Display`](fmt::Display), as hex through
/// [`LowerHex`](fmt::LowerHex) and [`UpperHex`](fmt::UpperHex), and parse
/// from either via [`FromStr`](core::str::FromStr).
#[derive(Clone, Copy)]
pub struct FieldElement(pub(crate) [u64; 4]);

impl_montgomery_field! {
    name: FieldElement,
    modulus: MODULUS,
    m_inv: M_INV,
    r2: R2,
    modulus_minus_two: MODULUS_MINUS_TWO
}

impl FieldElement {
    /// Returns the square root of self mod p, or `None` if no square root
    /// exists.
    ///
    /// Tonelli-Shanks with `S = 192`; constant time.
    pub fn sqrt(&self) -> CtOption<Self> {
        ff::helpers::sqrt_tonelli_shanks(self, T_MINUS_ONE_DIV_TWO)
    }
}

impl PrimeField for FieldElement {
    type Repr = crate::FieldBytes;

    const MODULUS: &'static str = MODULUS_HEX;
    const NUM_BITS: u32 = 252;
    const CAPACITY: u32 = 251;
    const TWO_INV: Self =
        Self::from_hex("0400000000000008800000000000000000000000000000000000000000000001");
    const MULTIPLICATIVE_GENERATOR: Self = Self::from_u64(3);
    const S: u32 = 192;
    const ROOT_OF_UNITY: Self =
        Self::from_hex("005282db87529cfa3f0464519c8b0fa5ad187148e11a61616070024f42f8ef94");
    const ROOT_OF_UNITY_INV: Self =
        Self::from_hex("003ae6a386329b25973ebc68dbf446534e6428affe8c0f24d90af58616019ce1");
    const DELTA: Self =
        Self::from_hex("00f66926e0ff773515a10661aa1f4d7e5cd6a000cc515a33cea96fa9c5262e50");

    fn from_repr(bytes: crate::FieldBytes) -> CtOption<Self> {
        Self::from_bytes(&bytes)
    }

    fn to_repr(&self) -> crate::FieldBytes {
        self.to_bytes()
    }

    fn is_odd(&self) -> Choice {
        FieldElement::is_odd(self)
    }
}
