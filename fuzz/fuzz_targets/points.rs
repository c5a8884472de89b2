#![no_main]
use elliptic_curve::{Field, Group, point::DecompressPoint};
use libfuzzer_sys::fuzz_target;
use rand_chacha::{ChaChaRng, rand_core::SeedableRng};
use stark252::{
    AffinePoint, ProjectivePoint, Scalar,
    arithmetic::{coordinates, from_coordinates, mul_vartime},
};

fn test_group<G: Group>(p1: G, p2: G, s: G::Scalar) {
    // Test point arithmetic
    let sum = p1 + p2;
    let scalar_mul = p1 * s;

    // Test that addition and doubling are consistent
    assert!(p1.double() == p1 + p1 - G::identity());

    // Test that negation works correctly
    assert!(sum + (-sum) == G::identity());

    // Test scalar multiplication distributive property
    assert!(scalar_mul + scalar_mul == p1 * (s + s));
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 96 {
        return;
    }

    let mut rng = ChaChaRng::from_seed(data[0..32].try_into().unwrap());

    let pp1 = ProjectivePoint::random(&mut rng);

    // Arbitrary x-coordinates decompress about half of the time.
    let mut x_bytes: [u8; 32] = data[32..64].try_into().unwrap();
    x_bytes[0] &= 0x07;
    let ap1 = Option::<AffinePoint>::from(AffinePoint::decompress(
        &x_bytes.into(),
        (data[64] & 1).into(),
    ))
    .unwrap_or(AffinePoint::GENERATOR);
    let (x, y) = coordinates(&ap1).unwrap();
    assert_eq!(from_coordinates(x, y), Ok(ap1));

    let mut scalar_bytes: [u8; 32] = data[64..96].try_into().unwrap();
    scalar_bytes[0] &= 0x07;
    let scalar = Option::<Scalar>::from(Scalar::from_bytes(&scalar_bytes.into()))
        .unwrap_or_else(|| Scalar::random(&mut rng));

    let pp2 = ProjectivePoint::from(ap1);
    test_group(pp1 + pp2, pp1 + ap1, scalar);

    assert_eq!(mul_vartime(&pp2, &scalar), pp2 * scalar);
});
