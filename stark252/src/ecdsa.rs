//! Stark ECDSA: deterministic signatures over the Stark curve.
//!
//! Unlike ECDSA over the NIST or SEC curves, the message hash is not
//! reduced or truncated: it must already be an integer below 2^251, and
//! both signature components are held to the same bound.
//!
//! ## Usage
//!
#![cfg_attr(feature = "std", doc = "```")]
#![cfg_attr(not(feature = "std"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use stark252::{
//!     U256,
//!     ecdsa::{SigningKey, VerifyingKey},
//! };
//!
//! // Signing
//! let signing_key: SigningKey =
//!     "0x57b78c7a6db039233ad693bfb625d974de43dda3928c6ab83e58879f02efb83".parse()?;
//! let msg_hash = U256::from_u64(1234567890);
//! let (signature, recovery_id) = signing_key.sign_prehash_recoverable(&msg_hash)?;
//! assert_eq!(
//!     signature.r().to_string(),
//!     "3240950061682243928613768836163090838314083950135367255118430160442737398631"
//! );
//!
//! // Verifying
//! let verifying_key = signing_key.verifying_key();
//! assert!(verifying_key.verify_hash(&msg_hash, &signature));
//!
//! // Recovering the public key
//! let recovered = VerifyingKey::recover_from_prehash(&msg_hash, &signature, recovery_id)?;
//! assert_eq!(&recovered, verifying_key);
//! # Ok(())
//! # }
//! ```

mod signing;
mod verifying;

pub use signature;

pub use self::{signing::SigningKey, verifying::VerifyingKey};

use crate::{
    AffinePoint, ELEMENT_UPPER_BOUND, Error, FieldBytes, ProjectivePoint, Result, Scalar, U256,
};
use core::fmt::{self, Debug};
use elliptic_curve::{
    bigint::ArrayEncoding,
    point::DecompressPoint,
    subtle::{Choice, CtOption},
    zeroize::Zeroize,
};
use signature::SignatureEncoding;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Limbs of 2^251, least significant first.
pub(crate) const ELEMENT_UPPER_BOUND_LIMBS: [u64; 4] = [0, 0, 0, 0x0800_0000_0000_0000];

/// Stark ECDSA signature serialized as bytes: `r || s`, both big endian.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// Stark ECDSA signature.
///
/// Both components are guaranteed to lie in `[1, 2^251)`.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// Size of an encoded signature in bytes.
    pub const BYTE_SIZE: usize = 64;

    /// Create a [`Signature`] from its `r` and `s` components.
    ///
    /// Returns [`Error::Domain`] unless both lie in `[1, 2^251)`.
    pub fn from_scalars(r: Scalar, s: Scalar) -> Result<Self> {
        if is_signature_component(&r) && is_signature_component(&s) {
            Ok(Self { r, s })
        } else {
            Err(Error::Domain)
        }
    }

    /// Create a [`Signature`] from integer `r` and `s` components.
    pub fn from_uints(r: &U256, s: &U256) -> Result<Self> {
        let r = bounded_scalar(r).ok_or(Error::Domain)?;
        let s = bounded_scalar(s).ok_or(Error::Domain)?;
        Self::from_scalars(r, s)
    }

    /// Parse a signature from a byte array.
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let (r_bytes, s_bytes) = bytes.split_at(Self::BYTE_SIZE / 2);
        let r = U256::from_be_slice(r_bytes);
        let s = U256::from_be_slice(s_bytes);
        Self::from_uints(&r, &s)
    }

    /// Parse a signature from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes = SignatureBytes::try_from(bytes).map_err(|_| Error::Domain)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(Self::BYTE_SIZE / 2);
        r_bytes.copy_from_slice(&self.r.to_bytes());
        s_bytes.copy_from_slice(&self.s.to_bytes());
        ret
    }

    /// Get the `r` component of this signature.
    pub fn r(&self) -> Scalar {
        self.r
    }

    /// Get the `s` component of this signature.
    pub fn s(&self) -> Scalar {
        self.s
    }

    /// Split the signature into its `r` and `s` scalars.
    pub fn split_scalars(&self) -> (Scalar, Scalar) {
        (self.r, self.s)
    }

    /// Convert this signature into a byte vector.
    #[cfg(feature = "alloc")]
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "stark252::ecdsa::Signature({:X})", self)
    }
}

/// Lowercase hex of the 64-byte encoding.
impl fmt::LowerHex for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Uppercase hex of the 64-byte encoding.
impl fmt::UpperHex for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:X}", self)
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}

impl TryFrom<SignatureBytes> for Signature {
    type Error = signature::Error;

    fn try_from(signature: SignatureBytes) -> signature::Result<Signature> {
        Ok(Signature::from_bytes(&signature)?)
    }
}

impl TryFrom<&SignatureBytes> for Signature {
    type Error = signature::Error;

    fn try_from(signature: &SignatureBytes) -> signature::Result<Signature> {
        Ok(Signature::from_bytes(signature)?)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> signature::Result<Signature> {
        Ok(Signature::from_slice(bytes)?)
    }
}

/// Parity of the y-coordinate of the nonce point `R = [k] G`.
///
/// Together with a [`Signature`] it identifies the signer's public key, see
/// [`VerifyingKey::recover_from_prehash`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct RecoveryId(u8);

impl RecoveryId {
    /// Maximum supported value for the recovery ID (inclusive).
    pub const MAX: u8 = 1;

    /// Create a new [`RecoveryId`] from the parity of `R.y`.
    pub const fn new(is_y_odd: bool) -> Self {
        Self(is_y_odd as u8)
    }

    /// Did `R` have an odd y-coordinate?
    pub const fn is_y_odd(self) -> bool {
        self.0 == 1
    }

    /// Convert a `u8` into a [`RecoveryId`].
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if byte <= Self::MAX {
            Some(Self(byte))
        } else {
            None
        }
    }

    /// Convert this [`RecoveryId`] into a `u8`.
    pub const fn to_byte(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RecoveryId {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        Self::from_byte(byte).ok_or(Error::Domain)
    }
}

impl From<RecoveryId> for u8 {
    fn from(id: RecoveryId) -> u8 {
        id.0
    }
}

/// Compute the public key `[d] G` for `private_key`.
///
/// Returns [`Error::InvalidKey`] unless `1 <= private_key < n`.
pub fn get_public_key(private_key: &U256) -> Result<AffinePoint> {
    Ok(*SigningKey::from_uint(private_key)?.verifying_key().as_affine())
}

/// Sign `msg_hash` with `private_key` using the caller-supplied nonce `k`.
///
/// - [`Error::InvalidKey`] unless `1 <= private_key < n`
/// - [`Error::InvalidHash`] unless `msg_hash < 2^251`
/// - [`Error::RetryNonce`] if `k` is not in `[1, n)` or yields a component
///   outside `[1, 2^251)`
///
/// Callers without their own nonce source should use
/// [`SigningKey::sign_prehash_recoverable`], which derives `k` with RFC6979.
pub fn sign(private_key: &U256, msg_hash: &U256, k: &U256) -> Result<Signature> {
    let mut d = Option::<Scalar>::from(
        Scalar::from_uint(private_key).and_then(|d| CtOption::new(d, !d.is_zero())),
    )
    .ok_or(Error::InvalidKey)?;

    let result = bounded_scalar(msg_hash)
        .ok_or(Error::InvalidHash)
        .and_then(|z| {
            let mut k = Option::<Scalar>::from(Scalar::from_uint(k)).ok_or(Error::RetryNonce)?;
            let result = signing::sign_prehashed(&d, &z, &k);
            k.zeroize();
            result
        });

    d.zeroize();
    result.map(|(signature, _)| signature)
}

/// Check that `(r, s)` is a signature of `msg_hash` under `public_key`.
///
/// Out-of-range inputs are not errors: they simply fail to verify.
pub fn verify(public_key: &AffinePoint, msg_hash: &U256, r: &U256, s: &U256) -> bool {
    verifying::verify_prehashed(&ProjectivePoint::from(*public_key), msg_hash, r, s)
}

/// Like [`verify`], but the public key is known only by its x-coordinate.
///
/// Both points with that x-coordinate are tried.
pub fn verify_x_only(public_key_x: &U256, msg_hash: &U256, r: &U256, s: &U256) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_x(public_key_x) else {
        return false;
    };

    let q = ProjectivePoint::from(verifying_key.as_affine());
    verifying::verify_prehashed(&q, msg_hash, r, s)
        || verifying::verify_prehashed(&-q, msg_hash, r, s)
}

/// Recover the public key that produced `(r, s)` over `msg_hash`.
pub fn recover(msg_hash: &U256, r: &U256, s: &U256, recovery_id: RecoveryId) -> Result<AffinePoint> {
    let signature = Signature::from_uints(r, s)?;
    let verifying_key = VerifyingKey::recover_from_prehash(msg_hash, &signature, recovery_id)?;
    Ok(*verifying_key.as_affine())
}

/// Convert `x` to a scalar if `x < 2^251`.
pub(crate) fn bounded_scalar(x: &U256) -> Option<Scalar> {
    if x >= &ELEMENT_UPPER_BOUND {
        return None;
    }

    Scalar::from_uint(x).into()
}

/// Is `x` a valid signature component, i.e. in `[1, 2^251)`?
pub(crate) fn is_signature_component(x: &Scalar) -> bool {
    (!x.is_zero() & x.ct_lt_limbs(&ELEMENT_UPPER_BOUND_LIMBS)).into()
}

/// Interpret a prehash of at most 32 bytes as a big endian integer.
pub(crate) fn prehash_to_uint(prehash: &[u8]) -> Result<U256> {
    if prehash.len() > FieldBytes::default().len() {
        return Err(Error::InvalidHash);
    }

    let mut bytes = FieldBytes::default();
    let offset = bytes.len() - prehash.len();
    bytes[offset..].copy_from_slice(prehash);
    Ok(U256::from_be_byte_array(bytes))
}

/// Lift the x-coordinate `r` back to the nonce point with the given parity.
pub(crate) fn lift_r(r: &Scalar, recovery_id: RecoveryId) -> Option<AffinePoint> {
    let y_is_odd = Choice::from(recovery_id.to_byte());
    AffinePoint::decompress(&r.to_bytes(), y_is_odd).into()
}
