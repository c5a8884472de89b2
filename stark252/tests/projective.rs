//! Projective arithmetic tests.

#![cfg(feature = "arithmetic")]

use elliptic_curve::{
    Group,
    ff::PrimeField,
    ops::{LinearCombination, MulByGenerator},
    point::{AffineCoordinates, DecompressPoint},
};
use proptest::prelude::*;
use stark252::{
    AffinePoint, ProjectivePoint, Scalar,
    arithmetic::{coordinates, from_coordinates, lincomb_vartime, mul_vartime},
};

prop_compose! {
    fn scalar()(bytes in any::<[u8; 32]>()) -> Scalar {
        let mut bytes = bytes;
        bytes[0] &= 0x07;
        Scalar::from_repr(bytes.into()).unwrap()
    }
}

#[test]
fn generator_has_prime_order() {
    let n_minus_one = -Scalar::ONE;
    let p = ProjectivePoint::GENERATOR * n_minus_one;
    assert_eq!(p, -ProjectivePoint::GENERATOR);
    assert!(bool::from((p + ProjectivePoint::GENERATOR).is_identity()));
}

#[test]
fn affine_identity_roundtrip() {
    assert_eq!(ProjectivePoint::IDENTITY.to_affine(), AffinePoint::IDENTITY);
    assert_eq!(
        ProjectivePoint::from(AffinePoint::IDENTITY),
        ProjectivePoint::IDENTITY
    );
}

proptest! {
    #[test]
    fn mul_matches_vartime(k in scalar()) {
        let g = ProjectivePoint::GENERATOR;
        prop_assert_eq!(g * k, mul_vartime(&g, &k));
        prop_assert_eq!(ProjectivePoint::mul_by_generator(&k), g * k);
    }

    #[test]
    fn mul_distributes_over_add(a in scalar(), b in scalar()) {
        let g = ProjectivePoint::GENERATOR;
        prop_assert_eq!(g * (a + b), g * a + g * b);
    }

    #[test]
    fn lincomb_matches_separate_products(a in scalar(), b in scalar(), c in scalar()) {
        let g = ProjectivePoint::GENERATOR;
        let q = g * c;
        prop_assert_eq!(
            lincomb_vartime(&g, &a, &q, &b),
            g * a + q * b
        );
        prop_assert_eq!(
            lincomb_vartime(&g, &a, &q, &b),
            ProjectivePoint::lincomb(&g, &a, &q, &b)
        );
    }

    #[test]
    fn add_mixed_matches_add(a in scalar(), b in scalar()) {
        let p = ProjectivePoint::GENERATOR * a;
        let q = (ProjectivePoint::GENERATOR * b).to_affine();
        prop_assert_eq!(p + q, p + ProjectivePoint::from(q));
        prop_assert_eq!(p - q, p - ProjectivePoint::from(q));
    }

    #[test]
    fn results_are_on_curve(a in scalar()) {
        let p = (ProjectivePoint::GENERATOR * a).to_affine();
        let decompressed = AffinePoint::decompress(&p.x(), p.y_is_odd());

        if bool::from(p.is_identity()) {
            prop_assert!(a == Scalar::ZERO);
        } else {
            prop_assert_eq!(decompressed.unwrap(), p);
            let (x, y) = coordinates(&p).unwrap();
            prop_assert_eq!(from_coordinates(x, y), Ok(p));
            prop_assert!(from_coordinates(x, -y).is_ok());
            prop_assert!(from_coordinates(x, y.double()).is_err());
        }
    }

    #[test]
    fn double_matches_add(a in scalar()) {
        let p = ProjectivePoint::GENERATOR * a;
        prop_assert_eq!(p.double(), p + p);
    }
}
