//! Deterministic nonce generation for Stark ECDSA, following
//! [RFC6979 § 3.2] with HMAC-SHA-256.
//!
//! The group order has 252 bits while HMAC-SHA-256 yields 256, so each
//! candidate is the top 252 bits of the DRBG output (`bits2int`). A candidate
//! is accepted once it lies in `[1, n)`.
//!
//! The DRBG is seeded with:
//!
//! - `x`: the private key as 32 big-endian bytes
//! - `h`: the message hash as 32 big-endian bytes
//! - extra data: the minimal big-endian encoding of the optional seed, empty
//!   when the seed is absent or zero
//!
//! This matches the nonces produced by the Starknet signing libraries.
//!
//! [RFC6979 § 3.2]: https://datatracker.ietf.org/doc/html/rfc6979#section-3.2

use crate::{Error, FieldBytes, Result, U256, arithmetic::Scalar};
use elliptic_curve::{bigint::ArrayEncoding, subtle::CtOption, zeroize::Zeroize};
use ::rfc6979::HmacDrbg;
use sha2::Sha256;

/// Derive the nonce `k` for signing `msg_hash` with `private_key`.
///
/// `seed` is extra entropy mixed into the derivation. Signers that hit
/// [`Error::RetryNonce`] call this again with a different seed.
///
/// Returns [`Error::InvalidKey`] unless `1 <= private_key < n`, and
/// [`Error::InvalidHash`] unless `msg_hash < n`.
pub fn generate_k(private_key: &U256, msg_hash: &U256, seed: Option<&U256>) -> Result<Scalar> {
    let mut x = Option::<Scalar>::from(
        Scalar::from_uint(private_key).and_then(|x| CtOption::new(x, !x.is_zero())),
    )
    .ok_or(Error::InvalidKey)?;

    let h = match Option::<Scalar>::from(Scalar::from_uint(msg_hash)) {
        Some(h) => h,
        None => {
            x.zeroize();
            return Err(Error::InvalidHash);
        }
    };

    let seed_bytes = seed.map(ArrayEncoding::to_be_byte_array).unwrap_or_default();
    let k = generate_k_scalar(&x, &h, strip_leading_zeros(&seed_bytes));
    x.zeroize();
    Ok(k)
}

/// Derive `k` from an already validated private key and message hash.
pub(crate) fn generate_k_scalar(x: &Scalar, h: &Scalar, extra: &[u8]) -> Scalar {
    let mut x_bytes = x.to_bytes();
    let mut drbg = HmacDrbg::<Sha256>::new(&x_bytes, &h.to_bytes(), extra);
    x_bytes.as_mut_slice().zeroize();

    let mut t = FieldBytes::default();

    loop {
        drbg.fill_bytes(&mut t);
        let k = Scalar::from_bytes(&bits2int(&t));
        t.as_mut_slice().zeroize();

        if let Some(k) = Option::<Scalar>::from(k.and_then(|k| CtOption::new(k, !k.is_zero()))) {
            return k;
        }
    }
}

/// Minimal big-endian encoding: leading zero bytes removed.
pub(crate) fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}

/// Keep the leftmost 252 bits of a 256-bit string.
fn bits2int(t: &FieldBytes) -> FieldBytes {
    let mut out = FieldBytes::default();
    let mut carry = 0u8;

    for (o, &b) in out.iter_mut().zip(t.iter()) {
        *o = (carry << 4) | (b >> 4);
        carry = b & 0x0f;
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{bits2int, generate_k, generate_k_scalar, strip_leading_zeros};
    use crate::{Error, FieldBytes, U256, arithmetic::Scalar};
    use hex_literal::hex;
    use ::rfc6979::HmacDrbg;
    use elliptic_curve::bigint::ArrayEncoding;
    use sha2::{Digest, Sha256};

    const PRIVATE_KEY: U256 =
        U256::from_be_hex("057b78c7a6db039233ad693bfb625d974de43dda3928c6ab83e58879f02efb83");

    /// RFC6979 Appendix A.2.5: P-256 with SHA-256, message "sample".
    ///
    /// The first DRBG output is the accepted nonce for that curve.
    #[test]
    fn rfc6979_appendix_a25_first_output() {
        let x = hex!("c9afa9d845ba75166b5c215767b1d6934e50c3db36e89b127b8a622b120f6721");
        let h = Sha256::digest(b"sample");
        let expected_k = hex!("a6e3c57dd01abe90086538398355dd4c3b17aa873382b0f24d6129493d8aad60");

        let mut drbg = HmacDrbg::<Sha256>::new(&x, &h, &[]);
        let mut k = [0u8; 32];
        drbg.fill_bytes(&mut k);
        assert_eq!(k, expected_k);
    }

    #[test]
    fn scalar_derivation_matches_checked_entry_point() {
        let msg_hash = U256::from_u64(1234567890);
        let x = Scalar::from_uint(&PRIVATE_KEY).unwrap();
        let h = Scalar::from_uint(&msg_hash).unwrap();
        let seed = U256::from_u64(0x0100);
        let seed_bytes = seed.to_be_byte_array();

        assert_eq!(
            generate_k(&PRIVATE_KEY, &msg_hash, Some(&seed)),
            Ok(generate_k_scalar(&x, &h, &[0x01, 0x00]))
        );
        assert_eq!(strip_leading_zeros(&seed_bytes), &[0x01, 0x00]);
    }

    #[test]
    fn bits2int_drops_low_nibble() {
        let mut t = FieldBytes::default();
        t[0] = 0xab;
        t[31] = 0xcd;
        let out = bits2int(&t);
        assert_eq!(out[0], 0x0a);
        assert_eq!(out[1], 0xb0);
        assert_eq!(out[31], 0x0c);
    }

    #[test]
    fn strip_leading_zeros_is_minimal() {
        assert_eq!(strip_leading_zeros(&[0, 0, 1, 0]), &[1, 0]);
        assert_eq!(strip_leading_zeros(&[0, 0]), &[] as &[u8]);
        assert_eq!(strip_leading_zeros(&[]), &[] as &[u8]);
    }

    #[test]
    fn known_nonces() {
        let cases = [
            (
                U256::from_u64(1234567890),
                "07ecd8b9fe02257a2a7ef667c3fd765eaba15344ee35727f65219d1195f3c93a",
            ),
            (
                U256::from_u64(9876543210),
                "05aeaac074cbbcd3731916b42b96aa2972feb50bb11b8bb54c61f2a22df7dd44",
            ),
            (
                U256::from_be_hex(
                    "07d16ef5eea6de709df0e53413fa16a14ff65d3b2e2433b7f2c684c0d13015be",
                ),
                "053e7e2b395ac0eb452e1cd8a4cd9a6383aed13d5c16a122ebf4ab55e78429f3",
            ),
        ];

        for (msg_hash, k) in &cases {
            assert_eq!(
                generate_k(&PRIVATE_KEY, msg_hash, None),
                Ok(Scalar::from_hex(k))
            );
        }
    }

    #[test]
    fn zero_seed_is_no_seed() {
        let msg_hash = U256::from_u64(42);
        assert_eq!(
            generate_k(&PRIVATE_KEY, &msg_hash, Some(&U256::ZERO)),
            generate_k(&PRIVATE_KEY, &msg_hash, None)
        );
    }

    #[test]
    fn seed_changes_nonce() {
        let msg_hash = U256::from_u64(42);
        let k0 = generate_k(&PRIVATE_KEY, &msg_hash, None);
        let k1 = generate_k(&PRIVATE_KEY, &msg_hash, Some(&U256::ONE));
        let k2 = generate_k(&PRIVATE_KEY, &msg_hash, Some(&U256::from_u64(2)));
        assert_ne!(k0, k1);
        assert_ne!(k1, k2);
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        let msg_hash = U256::from_u64(1);
        assert_eq!(
            generate_k(&U256::ZERO, &msg_hash, None),
            Err(Error::InvalidKey)
        );
        assert_eq!(
            generate_k(&crate::ORDER, &msg_hash, None),
            Err(Error::InvalidKey)
        );
        assert_eq!(
            generate_k(&PRIVATE_KEY, &crate::ORDER, None),
            Err(Error::InvalidHash)
        );
    }
}
