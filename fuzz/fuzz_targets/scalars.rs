#![no_main]
use elliptic_curve::{Field, PrimeField};
use libfuzzer_sys::fuzz_target;
use rand_chacha::{ChaChaRng, rand_core::SeedableRng};
use stark252::{FieldElement, Scalar};

fn test_field<F: PrimeField>(fe1: F, fe2: F, fe3: F) {
    // Associativity
    assert_eq!(fe1 + (fe2 + fe3), (fe1 + fe2) + fe3);
    assert_eq!(fe1 * (fe2 * fe3), (fe1 * fe2) * fe3);

    // Commutativity
    assert_eq!(fe1 + fe2, fe2 + fe1);
    assert_eq!(fe1 * fe2, fe2 * fe1);

    // Identity
    assert_eq!(fe1 + F::ZERO, fe1);
    assert_eq!(fe1 * F::ONE, fe1);
    assert_eq!(fe1 - fe1, F::ZERO);

    // Distributivity
    assert_eq!(fe1 * (fe2 + fe3), fe1 * fe2 + fe1 * fe3);

    // Inverse, square, sqrt
    assert_eq!(fe1 + (-fe1), F::ZERO);
    let fe1_sq = fe1.square();
    if !bool::from(fe1.is_zero()) {
        assert_eq!(fe1_sq * fe1.invert().unwrap(), fe1);
        assert_eq!(fe1_sq.sqrt().unwrap().square(), fe1_sq);
    }

    // Double, even, odd
    let fe1_double: F = fe1.double();
    assert_eq!(fe1_double, fe1 + fe1);
    assert_ne!(
        bool::from(fe1_double.is_odd()),
        bool::from(fe1_double.is_even())
    );

    // Encoding
    assert_eq!(F::from_repr(fe2.to_repr()).unwrap(), fe2);
}

/// Top nibble cleared so every 32-byte chunk is below both moduli.
fn chunk(data: &[u8], offset: usize) -> [u8; 32] {
    let mut bytes: [u8; 32] = data[offset..offset + 32].try_into().unwrap();
    bytes[0] &= 0x07;
    bytes
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 128 {
        return;
    }

    let mut rng = ChaChaRng::from_seed(data[0..32].try_into().unwrap());

    let fe1 = FieldElement::from_bytes(&chunk(data, 32).into()).unwrap();
    let fe2 = FieldElement::from_bytes(&chunk(data, 64).into()).unwrap();
    let fe3 = FieldElement::random(&mut rng);
    test_field(fe1, fe2, fe3);

    let s1 = Scalar::from_bytes(&chunk(data, 64).into()).unwrap();
    let s2 = Scalar::from_bytes(&chunk(data, 96).into()).unwrap();
    let s3 = Scalar::random(&mut rng);
    test_field(s1, s2, s3);
});
