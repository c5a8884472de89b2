//! Support for Stark ECDSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! 1: reject d unless 1 <= d < n, and z unless 0 <= z < 2^251
//! 2: derive k from (d, z, seed) with RFC6979, seed = none, 1, 2, ...
//! 3: calculate R = [k]G and r = R.x, retry if not 1 <= r < 2^251
//! 4: calculate s = k^-1 (z + r·d) mod n, retry if not 1 <= s < 2^251
//!    or if s^-1 mod n >= 2^251
//! 5: the signature is (r, s), and the recovery id is the parity of R.y
//! ```

#![allow(non_snake_case)]

use super::{
    ELEMENT_UPPER_BOUND_LIMBS, RecoveryId, Signature, VerifyingKey, bounded_scalar,
    is_signature_component, prehash_to_uint,
};
use crate::{
    Error, FieldBytes, ProjectivePoint, Result, Scalar, U256,
    rfc6979::{generate_k_scalar, strip_leading_zeros},
};
use core::{
    fmt::{self, Debug},
    str::FromStr,
};
use elliptic_curve::{
    bigint::ArrayEncoding,
    ff::Field,
    ops::MulByGenerator,
    point::AffineCoordinates,
    rand_core::CryptoRngCore,
    subtle::{Choice, ConstantTimeEq},
    zeroize::{Zeroize, ZeroizeOnDrop},
};
use signature::{KeypairRef, hazmat::PrehashSigner};

/// Stark ECDSA secret key used for signing message hashes.
///
/// ## Usage
///
/// Sign a message hash with [`SigningKey::sign_prehash_recoverable`], or
/// through the [`PrehashSigner`] trait from the [`signature`] crate with the
/// hash given as big endian bytes.
///
/// The secret scalar is zeroized on drop and never shown by [`Debug`].
#[derive(Clone)]
pub struct SigningKey {
    /// Secret scalar `d`.
    secret_scalar: Scalar,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Generate a random signing key.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        loop {
            let candidate = Scalar::random(&mut *rng);

            if let Ok(signing_key) = Self::from_scalar(candidate) {
                return signing_key;
            }
        }
    }

    /// Create a signing key from a secret scalar.
    ///
    /// Returns [`Error::InvalidKey`] if the scalar is zero.
    pub fn from_scalar(secret_scalar: Scalar) -> Result<Self> {
        if secret_scalar.is_zero().into() {
            return Err(Error::InvalidKey);
        }

        let public_key = ProjectivePoint::mul_by_generator(&secret_scalar).to_affine();
        let verifying_key = VerifyingKey::from_affine(public_key)?;

        Ok(Self {
            secret_scalar,
            verifying_key,
        })
    }

    /// Create a signing key from an integer, which must lie in `[1, n)`.
    pub fn from_uint(private_key: &U256) -> Result<Self> {
        let secret_scalar =
            Option::<Scalar>::from(Scalar::from_uint(private_key)).ok_or(Error::InvalidKey)?;
        Self::from_scalar(secret_scalar)
    }

    /// Parse signing key from big endian-encoded bytes.
    pub fn from_bytes(bytes: &FieldBytes) -> Result<Self> {
        let secret_scalar =
            Option::<Scalar>::from(Scalar::from_bytes(bytes)).ok_or(Error::InvalidKey)?;
        Self::from_scalar(secret_scalar)
    }

    /// Parse signing key from a big endian-encoded byte slice of 32 bytes.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != FieldBytes::default().len() {
            return Err(Error::InvalidKey);
        }

        Self::from_bytes(FieldBytes::from_slice(slice))
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> FieldBytes {
        self.secret_scalar.to_bytes()
    }

    /// Borrow the secret [`Scalar`] value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_scalar(&self) -> &Scalar {
        &self.secret_scalar
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Sign `msg_hash`, deriving the nonce with RFC6979.
    ///
    /// When a nonce is rejected, a fresh one is derived with the next seed
    /// value, so the result is deterministic for a given key and hash.
    ///
    /// Returns [`Error::InvalidHash`] unless `msg_hash < 2^251`.
    pub fn sign_prehash_recoverable(&self, msg_hash: &U256) -> Result<(Signature, RecoveryId)> {
        let z = bounded_scalar(msg_hash).ok_or(Error::InvalidHash)?;

        // A zero seed encodes as no extra data.
        let mut seed = U256::ZERO;

        loop {
            let mut k = generate_k_scalar(
                &self.secret_scalar,
                &z,
                strip_leading_zeros(&seed.to_be_byte_array()),
            );
            let result = sign_prehashed(&self.secret_scalar, &z, &k);
            k.zeroize();

            match result {
                Err(Error::RetryNonce) => seed = seed.wrapping_add(&U256::ONE),
                result => return result,
            }
        }
    }

    /// Sign `msg_hash` with the caller-supplied nonce `k`.
    ///
    /// Returns [`Error::RetryNonce`] if `k` is zero or produces a component
    /// outside `[1, 2^251)`.
    pub fn sign_prehash_with_k(
        &self,
        msg_hash: &U256,
        k: &Scalar,
    ) -> Result<(Signature, RecoveryId)> {
        let z = bounded_scalar(msg_hash).ok_or(Error::InvalidHash)?;
        sign_prehashed(&self.secret_scalar, &z, k)
    }
}

//
// `*Signer` trait impls
//

impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        let (signature, _) = self.sign_prehash_recoverable(&prehash_to_uint(prehash)?)?;
        Ok(signature)
    }
}

impl PrehashSigner<(Signature, RecoveryId)> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<(Signature, RecoveryId)> {
        Ok(self.sign_prehash_recoverable(&prehash_to_uint(prehash)?)?)
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_scalar.ct_eq(&other.secret_scalar)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.secret_scalar.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}

/// Constant-time comparison
impl Eq for SigningKey {}
impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        self.ct_eq(other).into()
    }
}

/// Parse a private key written in decimal or as `0x`-prefixed hex.
impl FromStr for SigningKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let secret_scalar = Scalar::from_str(s).map_err(|_| Error::InvalidKey)?;
        Self::from_scalar(secret_scalar)
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}

/// Compute a signature over the message hash `z` with secret `d` and nonce
/// `k`.
pub(crate) fn sign_prehashed(d: &Scalar, z: &Scalar, k: &Scalar) -> Result<(Signature, RecoveryId)> {
    if k.is_zero().into() {
        return Err(Error::RetryNonce);
    }

    // 3: calculate R = [k]G and r = R.x
    let R = ProjectivePoint::mul_by_generator(k).to_affine();
    let r = Option::<Scalar>::from(Scalar::from_bytes(&R.x()))
        .filter(is_signature_component)
        .ok_or(Error::RetryNonce)?;

    // 4: calculate s = k^-1 (z + r·d) mod n
    let k_inv = Option::<Scalar>::from(k.invert()).ok_or(Error::RetryNonce)?;
    let s = k_inv * (*z + r * d);

    if !is_signature_component(&s) {
        return Err(Error::RetryNonce);
    }

    // Verifiers reject s unless s^-1 also lies below 2^251.
    let w = Option::<Scalar>::from(s.invert()).ok_or(Error::RetryNonce)?;
    if !bool::from(w.ct_lt_limbs(&ELEMENT_UPPER_BOUND_LIMBS)) {
        return Err(Error::RetryNonce);
    }

    // 5: the recovery id is the parity of R.y
    let recovery_id = RecoveryId::new(R.y_is_odd().into());
    Ok((Signature::from_scalars(r, s)?, recovery_id))
}
