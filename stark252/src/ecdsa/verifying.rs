//! Support for verifying Stark ECDSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! 1: verify whether z in [0, 2^251), r in [1, 2^251) and s in [1, 2^251)
//! 2: calculate w = s^-1 mod n, verification failed unless w in [1, 2^251)
//! 3: calculate u1 = z·w mod n and u2 = r·w mod n
//! 4: calculate the point (x1, y1) = [u1]G + [u2]Q
//! 5: verification pass if (x1, y1) is not the identity and x1 = r
//! ```
//!
//! Every value involved is public, so the variable-time multiplication is
//! used throughout.

use super::{
    ELEMENT_UPPER_BOUND_LIMBS, RecoveryId, Signature, bounded_scalar, lift_r, prehash_to_uint,
};
use crate::{
    AffinePoint, Error, FieldElement, ProjectivePoint, Result, Scalar, U256,
    arithmetic::{self, lincomb_vartime},
};
use elliptic_curve::{
    bigint::ArrayEncoding,
    point::{AffineCoordinates, DecompressPoint},
    subtle::Choice,
};
use signature::hazmat::PrehashVerifier;

/// Stark ECDSA public key used for verifying signatures.
///
/// ## Usage
///
/// Use [`VerifyingKey::verify_hash`] with an integer message hash, or the
/// [`PrehashVerifier`] trait from the [`signature`] crate with the hash given
/// as big endian bytes.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VerifyingKey {
    /// Public key point `Q = [d] G`.
    point: AffinePoint,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from an affine point.
    ///
    /// Returns [`Error::Domain`] if the given affine point is the additive
    /// identity (a.k.a. point at infinity).
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if point.is_identity().into() {
            return Err(Error::Domain);
        }

        Ok(Self { point })
    }

    /// Initialize [`VerifyingKey`] from the coordinates of a curve point.
    pub fn from_coordinates(x: &U256, y: &U256) -> Result<Self> {
        let x = Option::<FieldElement>::from(FieldElement::from_uint(x)).ok_or(Error::Domain)?;
        let y = Option::<FieldElement>::from(FieldElement::from_uint(y)).ok_or(Error::Domain)?;
        Self::from_affine(arithmetic::from_coordinates(x, y)?)
    }

    /// Initialize [`VerifyingKey`] from an x-coordinate alone, picking the
    /// point with an even y-coordinate.
    ///
    /// The other candidate is its negation. [`verify_x_only`](super::verify_x_only)
    /// accepts signatures made under either.
    pub fn from_x(x: &U256) -> Result<Self> {
        let point = Option::<AffinePoint>::from(AffinePoint::decompress(
            &x.to_be_byte_array(),
            Choice::from(0),
        ))
        .ok_or(Error::Domain)?;

        Self::from_affine(point)
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// Affine coordinates `(x, y)` of the public key.
    pub fn coordinates(&self) -> (FieldElement, FieldElement) {
        // Never the identity, which has no affine coordinates.
        arithmetic::coordinates(&self.point).unwrap_or_default()
    }

    /// Does `signature` verify for `msg_hash` under this key?
    pub fn verify_hash(&self, msg_hash: &U256, signature: &Signature) -> bool {
        verify_prehashed(
            &ProjectivePoint::from(self.point),
            msg_hash,
            &signature.r().to_uint(),
            &signature.s().to_uint(),
        )
    }

    /// Recover the [`VerifyingKey`] which produced `signature` over
    /// `msg_hash`:
    ///
    /// ```text
    /// Q = r^-1 ([s]R - [z]G)
    /// ```
    ///
    /// where `R` is the curve point with x-coordinate `r` and the y parity
    /// given by `recovery_id`.
    ///
    /// Returns [`Error::InvalidHash`] unless `msg_hash < 2^251`, and
    /// [`Error::Domain`] if no key can be recovered.
    pub fn recover_from_prehash(
        msg_hash: &U256,
        signature: &Signature,
        recovery_id: RecoveryId,
    ) -> Result<Self> {
        let z = bounded_scalar(msg_hash).ok_or(Error::InvalidHash)?;
        let (r, s) = signature.split_scalars();

        let big_r = lift_r(&r, recovery_id).ok_or(Error::Domain)?;
        let r_inv = Option::<Scalar>::from(r.invert()).ok_or(Error::Domain)?;
        let u1 = -(r_inv * z);
        let u2 = r_inv * s;

        let point = lincomb_vartime(
            &ProjectivePoint::GENERATOR,
            &u1,
            &ProjectivePoint::from(big_r),
            &u2,
        );
        let verifying_key = Self::from_affine(point.to_affine())?;

        // Keys are only returned if the signature verifies under them.
        if verifying_key.verify_hash(msg_hash, signature) {
            Ok(verifying_key)
        } else {
            Err(Error::Domain)
        }
    }
}

//
// `*Verifier` trait impls
//

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        let msg_hash = prehash_to_uint(prehash)?;

        if self.verify_hash(&msg_hash, signature) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

//
// Other trait impls
//

impl AsRef<AffinePoint> for VerifyingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

impl From<VerifyingKey> for AffinePoint {
    fn from(verifying_key: VerifyingKey) -> AffinePoint {
        verifying_key.point
    }
}

impl From<&VerifyingKey> for AffinePoint {
    fn from(verifying_key: &VerifyingKey) -> AffinePoint {
        verifying_key.point
    }
}

impl TryFrom<AffinePoint> for VerifyingKey {
    type Error = Error;

    fn try_from(point: AffinePoint) -> Result<Self> {
        Self::from_affine(point)
    }
}

/// Verify `(r, s)` over `msg_hash` under the public key `q`.
pub(crate) fn verify_prehashed(q: &ProjectivePoint, msg_hash: &U256, r: &U256, s: &U256) -> bool {
    // 1: verify whether z in [0, 2^251), r in [1, 2^251) and s in [1, 2^251)
    let Some(z) = bounded_scalar(msg_hash) else {
        return false;
    };
    let Ok(signature) = Signature::from_uints(r, s) else {
        return false;
    };
    let (r, s) = signature.split_scalars();

    // 2: calculate w = s^-1 mod n, verification failed unless w in [1, 2^251)
    let Some(w) = Option::<Scalar>::from(s.invert()) else {
        return false;
    };
    if !bool::from(w.ct_lt_limbs(&ELEMENT_UPPER_BOUND_LIMBS)) {
        return false;
    }

    // 3: calculate u1 = z·w mod n and u2 = r·w mod n
    let u1 = z * w;
    let u2 = r * w;

    // 4: calculate the point (x1, y1) = [u1]G + [u2]Q
    let point = lincomb_vartime(&ProjectivePoint::GENERATOR, &u1, q, &u2).to_affine();

    // 5: verification pass if (x1, y1) is not the identity and x1 = r
    !bool::from(point.is_identity()) && point.x() == r.to_bytes()
}

#[cfg(test)]
mod tests {
    use super::VerifyingKey;
    use crate::{AffinePoint, ELEMENT_UPPER_BOUND, Error, MODULUS, U256, ecdsa::SigningKey};
    use elliptic_curve::point::AffineCoordinates;
    use signature::hazmat::{PrehashSigner, PrehashVerifier};

    const PRIVATE_KEY: U256 =
        U256::from_be_hex("057b78c7a6db039233ad693bfb625d974de43dda3928c6ab83e58879f02efb83");

    const PUBLIC_KEY_X: U256 =
        U256::from_be_hex("04202c10aee2ad4dd3d0dfaf66de02e340da3bead4ce963bc459095a6fb66eca");

    const PUBLIC_KEY_Y: U256 =
        U256::from_be_hex("070f72af4e9bc1ff9bf49097ced228fb305118bd0baf1f77b16b7d64d1dde203");

    #[test]
    fn identity_is_not_a_key() {
        assert_eq!(
            VerifyingKey::from_affine(AffinePoint::IDENTITY),
            Err(Error::Domain)
        );
    }

    #[test]
    fn public_key_coordinates() {
        let signing_key = SigningKey::from_uint(&PRIVATE_KEY).unwrap();
        let expected = VerifyingKey::from_coordinates(&PUBLIC_KEY_X, &PUBLIC_KEY_Y).unwrap();
        assert_eq!(signing_key.verifying_key(), &expected);

        let (x, y) = expected.coordinates();
        assert_eq!((x.to_uint(), y.to_uint()), (PUBLIC_KEY_X, PUBLIC_KEY_Y));

        assert_eq!(
            VerifyingKey::from_coordinates(&PUBLIC_KEY_X, &PUBLIC_KEY_X),
            Err(Error::Domain)
        );
        assert_eq!(
            VerifyingKey::from_coordinates(&MODULUS, &PUBLIC_KEY_Y),
            Err(Error::Domain)
        );
    }

    #[test]
    fn from_x_picks_even_y() {
        let key = VerifyingKey::from_x(&PUBLIC_KEY_X).unwrap();
        assert!(!bool::from(key.as_affine().y_is_odd()));
        assert_eq!(key.coordinates().0.to_uint(), PUBLIC_KEY_X);

        // x = 0 is not on the curve
        assert_eq!(VerifyingKey::from_x(&U256::ZERO), Err(Error::Domain));
        assert_eq!(VerifyingKey::from_x(&MODULUS), Err(Error::Domain));
    }

    #[test]
    fn prehash_verifier_roundtrip() {
        let signing_key = SigningKey::from_uint(&PRIVATE_KEY).unwrap();
        let prehash = [0x42u8; 31];
        let signature: crate::ecdsa::Signature = signing_key.sign_prehash(&prehash).unwrap();

        let verifying_key = signing_key.verifying_key();
        assert!(verifying_key.verify_prehash(&prehash, &signature).is_ok());
        assert!(verifying_key.verify_prehash(&[0x43u8; 31], &signature).is_err());
    }

    #[test]
    fn unsignable_hash_never_verifies() {
        let signing_key = SigningKey::from_uint(&PRIVATE_KEY).unwrap();
        let (signature, recovery_id) = signing_key
            .sign_prehash_recoverable(&U256::from_u64(7))
            .unwrap();

        assert!(
            !signing_key
                .verifying_key()
                .verify_hash(&ELEMENT_UPPER_BOUND, &signature)
        );
        assert_eq!(
            VerifyingKey::recover_from_prehash(&ELEMENT_UPPER_BOUND, &signature, recovery_id),
            Err(Error::InvalidHash)
        );
    }
}
