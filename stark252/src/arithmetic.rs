//! Pure Rust implementation of group operations on the Stark curve.
//!
//! Curve parameters are the ones used by Starknet:
//! <https://docs.starknet.io/architecture-and-concepts/cryptography/>
//!
//! ```text
//! y² = x³ + α·x + β  (mod p)
//!
//! p = 2^251 + 17·2^192 + 1
//! α = 1
//! β = 0x6f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89
//! n = 0x800000000000010ffffffffffffffffb781126dcae7b2321e66a241adc64d2f
//! ```
//!
//! Point formulas come from [`primeorder`]. Since α is neither 0 nor -3 the
//! curve uses the generic complete formulas.

#[macro_use]
mod macros;

pub mod field;
pub mod scalar;
pub(crate) mod util;
mod vartime;

pub use self::{
    field::FieldElement,
    scalar::Scalar,
    vartime::{lincomb_vartime, mul_vartime},
};

use crate::{Error, Result, Stark};
use elliptic_curve::{
    CurveArithmetic, PrimeCurveArithmetic,
    sec1::{EncodedPoint, FromEncodedPoint, ToEncodedPoint},
};
use primeorder::{PrimeCurveParams, point_arithmetic};

/// Elliptic curve point in affine coordinates.
pub type AffinePoint = primeorder::AffinePoint<Stark>;

/// Elliptic curve point in projective coordinates.
pub type ProjectivePoint = primeorder::ProjectivePoint<Stark>;

impl CurveArithmetic for Stark {
    type AffinePoint = AffinePoint;
    type ProjectivePoint = ProjectivePoint;
    type Scalar = Scalar;
}

impl PrimeCurveArithmetic for Stark {
    type CurveGroup = ProjectivePoint;
}

impl PrimeCurveParams for Stark {
    type FieldElement = FieldElement;
    type PointArithmetic = point_arithmetic::EquationAIsGeneric;

    /// a = 1
    const EQUATION_A: FieldElement = FieldElement::ONE;

    /// b = 0x06f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89
    const EQUATION_B: FieldElement =
        FieldElement::from_hex("06f21413efbe40de150e596d72f7a8c5609ad26c15c915c1f4cdfcb99cee9e89");

    /// Base point of the Stark curve.
    const GENERATOR: (FieldElement, FieldElement) = (
        FieldElement::from_hex("01ef15c18599971b7beced415a40f0c7deacfd9b0d1819e03d723d8bc943cfca"),
        FieldElement::from_hex("005668060aa49730b7be4801df46ec62de53ecd11abe43a32873000c36e8dc1f"),
    );
}

/// Create a point from its affine coordinates.
///
/// Returns [`Error::Domain`] if `(x, y)` does not satisfy `y² = x³ + x + β`.
pub fn from_coordinates(x: FieldElement, y: FieldElement) -> Result<AffinePoint> {
    let encoded = EncodedPoint::<Stark>::from_affine_coordinates(&x.to_bytes(), &y.to_bytes(), false);
    Option::from(AffinePoint::from_encoded_point(&encoded)).ok_or(Error::Domain)
}

/// Affine coordinates of `point`, or `None` for the identity.
pub fn coordinates(point: &AffinePoint) -> Option<(FieldElement, FieldElement)> {
    let encoded = point.to_encoded_point(false);
    let x = Option::<FieldElement>::from(FieldElement::from_bytes(encoded.x()?))?;
    let y = Option::<FieldElement>::from(FieldElement::from_bytes(encoded.y()?))?;
    Some((x, y))
}

#[cfg(test)]
mod tests {
    use super::{AffinePoint, FieldElement, ProjectivePoint, Scalar, coordinates, from_coordinates};
    use crate::{Error, Stark};
    use elliptic_curve::{
        Group,
        ops::MulByGenerator,
        point::{AffineCoordinates, DecompressPoint},
        subtle::Choice,
    };
    use primeorder::PrimeCurveParams;

    #[test]
    fn generator_is_on_curve() {
        let (x, y) = Stark::GENERATOR;
        assert_eq!(from_coordinates(x, y), Ok(AffinePoint::GENERATOR));
        assert_eq!(coordinates(&AffinePoint::GENERATOR), Some((x, y)));
    }

    #[test]
    fn off_curve_point_is_rejected() {
        let (x, y) = Stark::GENERATOR;
        assert_eq!(from_coordinates(x, y + FieldElement::ONE), Err(Error::Domain));
        assert_eq!(from_coordinates(FieldElement::ZERO, FieldElement::ZERO), Err(Error::Domain));
    }

    #[test]
    fn identity_has_no_coordinates() {
        assert_eq!(coordinates(&AffinePoint::IDENTITY), None);
        assert!(bool::from(AffinePoint::IDENTITY.is_identity()));
        assert!(!bool::from(AffinePoint::GENERATOR.is_identity()));
    }

    #[test]
    fn decompress_generator() {
        let g = AffinePoint::GENERATOR;
        let decompressed = AffinePoint::decompress(&g.x(), g.y_is_odd()).unwrap();
        assert_eq!(decompressed, g);

        let negated = AffinePoint::decompress(&g.x(), !g.y_is_odd()).unwrap();
        assert_eq!(negated, -g);
    }

    #[test]
    fn decompress_rejects_non_residue() {
        // x = 0 gives y² = b, and b is not a square mod p
        let x = FieldElement::ZERO.to_bytes();
        assert!(bool::from(AffinePoint::decompress(&x, Choice::from(0)).is_none()));
    }

    #[test]
    fn affine_to_projective() {
        let basepoint_affine = AffinePoint::GENERATOR;
        let basepoint_projective = ProjectivePoint::GENERATOR;

        assert_eq!(ProjectivePoint::from(basepoint_affine), basepoint_projective);
        assert_eq!(basepoint_projective.to_affine(), basepoint_affine);
        assert!(bool::from(ProjectivePoint::IDENTITY.to_affine().is_identity()));
    }

    #[test]
    fn projective_mixed_addition() {
        let g = ProjectivePoint::GENERATOR;
        let g_affine = AffinePoint::GENERATOR;

        assert_eq!(ProjectivePoint::IDENTITY + &g_affine, g);
        assert_eq!(g + &g_affine, g + &g);
        assert_eq!(g + &AffinePoint::IDENTITY, g);
        assert_eq!(g - &g, ProjectivePoint::IDENTITY);
    }

    #[test]
    fn doubling_matches_addition() {
        let g = ProjectivePoint::GENERATOR;
        let mut p = g;
        for _ in 0..8 {
            assert_eq!(p.double(), p + &p);
            p = p.double() + &g;
        }
        assert_eq!(ProjectivePoint::IDENTITY.double(), ProjectivePoint::IDENTITY);
    }

    #[test]
    fn scalar_multiplication_small_multiples() {
        let g = ProjectivePoint::GENERATOR;
        let mut expected = ProjectivePoint::IDENTITY;
        for k in 0u64..40 {
            assert_eq!(g * Scalar::from(k), expected);
            expected += &g;
        }
    }

    #[test]
    fn scalar_multiplication_by_order_minus_one() {
        let g = ProjectivePoint::GENERATOR;
        assert_eq!(g * (-Scalar::ONE), -g);
        assert!(bool::from((g * (-Scalar::ONE) + &g).is_identity()));
    }

    #[test]
    fn scalar_multiplication_distributes() {
        let g = ProjectivePoint::GENERATOR;
        let a = Scalar::from_hex("07c1e9550e66958296d11b60f8e8e7a7ad990d07fa65d5f7652c4a6c87d4e3cc");
        let b = Scalar::from(0xdead_beef_u64);
        assert_eq!(g * (a + b), g * a + g * b);
        assert_eq!((g * a) * b, g * (a * b));
    }

    #[test]
    fn known_public_key() {
        let d = Scalar::from_hex("03c1e9550e66958296d11b60f8e8e7a7ad990d07fa65d5f7652c4a6c87d4e3cc");
        let q = ProjectivePoint::mul_by_generator(&d).to_affine();
        assert_eq!(
            q.x(),
            FieldElement::from_hex("077a3b314db07c45076d11f62b6f9e748a39790441823307743cf00d6597ea43")
                .to_bytes()
        );
    }

    #[test]
    fn group_generator_and_double() {
        assert_eq!(ProjectivePoint::generator(), ProjectivePoint::GENERATOR);
        assert_eq!(
            ProjectivePoint::GENERATOR.double(),
            ProjectivePoint::GENERATOR * Scalar::from(2u64)
        );
        assert_eq!(Scalar::ONE.double(), Scalar::from(2u64));
    }
}
