#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

//! ## Usage
//!
#![cfg_attr(feature = "ecdsa", doc = "```")]
#![cfg_attr(not(feature = "ecdsa"), doc = "```ignore")]
//! # fn main() -> stark252::Result<()> {
//! use stark252::{U256, ecdsa::{SigningKey, verify}};
//!
//! let signing_key = SigningKey::from_uint(&U256::from_be_hex(
//!     "057b78c7a6db039233ad693bfb625d974de43dda3928c6ab83e58879f02efb83",
//! ))?;
//! let msg_hash = U256::from_u64(1234567890);
//!
//! let (signature, _recovery_id) = signing_key.sign_prehash_recoverable(&msg_hash)?;
//! println!("r = {}", signature.r());
//! println!("s = {:#x}", signature.s());
//!
//! let verifying_key = signing_key.verifying_key();
//! assert!(verify(
//!     verifying_key.as_affine(),
//!     &msg_hash,
//!     &signature.r().to_uint(),
//!     &signature.s().to_uint(),
//! ));
//! # Ok(())
//! # }
//! ```

#[cfg(feature = "alloc")]
#[allow(unused_extern_crates)]
extern crate alloc;

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

mod error;

#[cfg(feature = "arithmetic")]
pub mod arithmetic;

#[cfg(feature = "ecdsa")]
pub mod ecdsa;

#[cfg(feature = "ecdsa")]
pub mod rfc6979;

#[cfg(feature = "test-vectors")]
pub mod test_vectors;

pub use crate::error::{Error, Result};
pub use elliptic_curve::{self, bigint::U256, consts::U32, generic_array::GenericArray};

#[cfg(feature = "arithmetic")]
pub use arithmetic::{AffinePoint, FieldElement, ProjectivePoint, Scalar};

use elliptic_curve::{FieldBytesEncoding, PrimeCurve};

/// Stark curve: the short Weierstrass curve `y² = x³ + x + β` over the
/// 252-bit prime field used by Starknet.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, PartialOrd, Ord)]
pub struct Stark;

impl elliptic_curve::Curve for Stark {
    /// 32-byte serialized field elements.
    type FieldBytesSize = U32;

    /// 256-bit integer type used for internally representing field elements.
    type Uint = U256;

    /// Order of the curve group.
    const ORDER: U256 = ORDER;
}

impl PrimeCurve for Stark {}

impl FieldBytesEncoding<Stark> for U256 {}

/// Big-endian encoding of a field element or scalar.
pub type FieldBytes = elliptic_curve::FieldBytes<Stark>;

/// Modulus of the base field: p = 2^251 + 17·2^192 + 1.
pub const MODULUS: U256 =
    U256::from_be_hex("0800000000000011000000000000000000000000000000000000000000000001");

/// Order of the curve group, i.e. the scalar modulus.
pub const ORDER: U256 =
    U256::from_be_hex("0800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f");

/// 2^251. Message hashes and both signature components must lie below it.
pub const ELEMENT_UPPER_BOUND: U256 =
    U256::from_be_hex("0800000000000000000000000000000000000000000000000000000000000000");
