//! Variable-time scalar multiplication.
//!
//! ⚠️ WARNING!
//!
//! Everything here branches on the bits of the scalar and on table
//! indices. Use it for signature verification and public key recovery,
//! where every scalar is public. Private keys and nonces go through the
//! constant-time [`Mul`](core::ops::Mul) impls of [`ProjectivePoint`].

use super::{ProjectivePoint, Scalar};
use elliptic_curve::point::Double;

/// Number of 4-bit digits needed for a 252-bit scalar.
const DIGITS: usize = 63;

/// Splits `k` into little-endian 4-bit digits.
fn digits(k: &Scalar) -> [u8; DIGITS] {
    let bytes = k.to_bytes();
    let mut out = [0u8; DIGITS];

    for (i, digit) in out.iter_mut().enumerate() {
        let byte = bytes[31 - i / 2];
        *digit = if i % 2 == 0 { byte & 0xf } else { byte >> 4 };
    }

    out
}

/// Returns `[0, p, 2p, ..., 15p]`.
fn window_table(p: &ProjectivePoint) -> [ProjectivePoint; 16] {
    let mut table = [ProjectivePoint::IDENTITY; 16];
    table[1] = *p;

    for i in 2..16 {
        table[i] = if i % 2 == 0 {
            table[i / 2].double()
        } else {
            table[i - 1].add(p)
        };
    }

    table
}

/// Returns `[k] p`. **Variable time**: for public scalars only.
pub fn mul_vartime(p: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
    let table = window_table(p);
    let mut q = ProjectivePoint::IDENTITY;

    for (i, &digit) in digits(k).iter().enumerate().rev() {
        if digit != 0 {
            q = q.add(&table[digit as usize]);
        }
        if i != 0 {
            q = q.double().double().double().double();
        }
    }

    q
}

/// Returns `[k] x + [l] y`, sharing the doublings between both terms.
///
/// **Variable time**: for public scalars only.
pub fn lincomb_vartime(
    x: &ProjectivePoint,
    k: &Scalar,
    y: &ProjectivePoint,
    l: &Scalar,
) -> ProjectivePoint {
    let x_table = window_table(x);
    let y_table = window_table(y);
    let k_digits = digits(k);
    let l_digits = digits(l);

    // Skip the leading zero digits common to both scalars.
    let top = (0..DIGITS)
        .rev()
        .find(|&i| k_digits[i] != 0 || l_digits[i] != 0);

    let Some(top) = top else {
        return ProjectivePoint::IDENTITY;
    };

    let mut q = ProjectivePoint::IDENTITY;

    for i in (0..=top).rev() {
        if k_digits[i] != 0 {
            q = q.add(&x_table[k_digits[i] as usize]);
        }
        if l_digits[i] != 0 {
            q = q.add(&y_table[l_digits[i] as usize]);
        }
        if i != 0 {
            q = q.double().double().double().double();
        }
    }

    q
}
