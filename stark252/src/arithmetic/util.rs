//! Helper functions for 4x64-bit limb arithmetic.
//!
//! Limbs are little-endian: `limbs[0]` holds the least significant word.

use core::fmt;

#[cfg(test)]
use num_bigint::{BigUint, ToBigUint};
#[cfg(test)]
use num_traits::cast::ToPrimitive;

/// Computes `a + b + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn adc(a: u64, b: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + (b as u128) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a - (b + borrow)`, returning the result along with the new borrow.
///
/// The borrow is either `0` or `u64::MAX`.
#[inline(always)]
pub(crate) const fn sbb(a: u64, b: u64, borrow: u64) -> (u64, u64) {
    let ret = (a as u128).wrapping_sub((b as u128) + ((borrow >> 63) as u128));
    (ret as u64, (ret >> 64) as u64)
}

/// Computes `a + (b * c) + carry`, returning the result along with the new carry.
#[inline(always)]
pub(crate) const fn mac(a: u64, b: u64, c: u64, carry: u64) -> (u64, u64) {
    let ret = (a as u128) + ((b as u128) * (c as u128)) + (carry as u128);
    (ret as u64, (ret >> 64) as u64)
}

/// Returns `u64::MAX` if `a < b`, and `0` otherwise. Constant time.
#[inline]
pub(crate) const fn lt_mask(a: &[u64; 4], b: &[u64; 4]) -> u64 {
    let (_, borrow) = sbb(a[0], b[0], 0);
    let (_, borrow) = sbb(a[1], b[1], borrow);
    let (_, borrow) = sbb(a[2], b[2], borrow);
    let (_, borrow) = sbb(a[3], b[3], borrow);
    borrow
}

/// Computes `l - r`, adding `modulus` back when the subtraction underflows.
///
/// `l` carries a fifth word so the sum of two reduced values fits.
#[inline]
const fn sub_inner(l: &[u64; 5], r: &[u64; 4], modulus: &[u64; 4]) -> [u64; 4] {
    let (w0, borrow) = sbb(l[0], r[0], 0);
    let (w1, borrow) = sbb(l[1], r[1], borrow);
    let (w2, borrow) = sbb(l[2], r[2], borrow);
    let (w3, borrow) = sbb(l[3], r[3], borrow);
    let (_, borrow) = sbb(l[4], 0, borrow);

    // If underflow occurred on the final word, borrow = 0xfff...fff, otherwise
    // borrow = 0x000...000. Thus, we use it as a mask to conditionally add the
    // modulus.
    let (w0, carry) = adc(w0, modulus[0] & borrow, 0);
    let (w1, carry) = adc(w1, modulus[1] & borrow, carry);
    let (w2, carry) = adc(w2, modulus[2] & borrow, carry);
    let (w3, _) = adc(w3, modulus[3] & borrow, carry);

    [w0, w1, w2, w3]
}

/// Returns `a + b mod m` for reduced inputs.
#[inline]
pub(crate) const fn add_mod(a: &[u64; 4], b: &[u64; 4], modulus: &[u64; 4]) -> [u64; 4] {
    let (w0, carry) = adc(a[0], b[0], 0);
    let (w1, carry) = adc(a[1], b[1], carry);
    let (w2, carry) = adc(a[2], b[2], carry);
    let (w3, w4) = adc(a[3], b[3], carry);
    sub_inner(&[w0, w1, w2, w3, w4], modulus, modulus)
}

/// Returns `a - b mod m` for reduced inputs.
#[inline]
pub(crate) const fn sub_mod(a: &[u64; 4], b: &[u64; 4], modulus: &[u64; 4]) -> [u64; 4] {
    sub_inner(&[a[0], a[1], a[2], a[3], 0], b, modulus)
}

/// Montgomery reduction: returns `w * R^-1 mod m` where `R = 2^256`.
///
/// `m_inv` is `-m^-1 mod 2^64`. Requires `w < m * R`.
pub(crate) const fn montgomery_reduce(w: &[u64; 8], modulus: &[u64; 4], m_inv: u64) -> [u64; 4] {
    let mut r = *w;
    let mut carry2 = 0;

    let mut i = 0;
    while i < 4 {
        let u = r[i].wrapping_mul(m_inv);
        let (_, mut carry) = mac(r[i], u, modulus[0], 0);

        let mut j = 1;
        while j < 4 {
            let (t, c) = mac(r[i + j], u, modulus[j], carry);
            r[i + j] = t;
            carry = c;
            j += 1;
        }

        let (t, c) = adc(r[i + 4], carry2, carry);
        r[i + 4] = t;
        carry2 = c;
        i += 1;
    }

    sub_inner(&[r[4], r[5], r[6], r[7], carry2], modulus, modulus)
}

/// Montgomery multiplication: returns `a * b * R^-1 mod m`.
pub(crate) const fn montgomery_mul(
    a: &[u64; 4],
    b: &[u64; 4],
    modulus: &[u64; 4],
    m_inv: u64,
) -> [u64; 4] {
    let mut w = [0u64; 8];

    // Schoolbook multiplication.
    let mut i = 0;
    while i < 4 {
        let mut carry = 0;
        let mut j = 0;
        while j < 4 {
            let (t, c) = mac(w[i + j], a[i], b[j], carry);
            w[i + j] = t;
            carry = c;
            j += 1;
        }
        w[i + 4] = carry;
        i += 1;
    }

    montgomery_reduce(&w, modulus, m_inv)
}

/// Parses up to 64 big-endian hex digits into limbs.
///
/// Intended for constants; panics on malformed input.
pub(crate) const fn hex_to_limbs(hex: &str) -> [u64; 4] {
    let bytes = hex.as_bytes();
    assert!(!bytes.is_empty() && bytes.len() <= 64, "hex is the wrong length");

    let mut limbs = [0u64; 4];
    let mut i = 0;
    while i < bytes.len() {
        let nibble = match bytes[bytes.len() - 1 - i] {
            c @ b'0'..=b'9' => c - b'0',
            c @ b'a'..=b'f' => c - b'a' + 10,
            c @ b'A'..=b'F' => c - b'A' + 10,
            _ => panic!("invalid hex digit"),
        };
        limbs[i / 16] |= (nibble as u64) << ((i % 16) * 4);
        i += 1;
    }
    limbs
}

/// Decodes a 32-byte big-endian integer into limbs.
pub(crate) fn limbs_from_be_bytes(bytes: &[u8]) -> [u64; 4] {
    debug_assert_eq!(bytes.len(), 32);
    let mut limbs = [0u64; 4];
    for (limb, chunk) in limbs.iter_mut().zip(bytes.chunks_exact(8).rev()) {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        *limb = u64::from_be_bytes(word);
    }
    limbs
}

/// Encodes limbs as a 32-byte big-endian integer.
pub(crate) fn limbs_to_be_bytes(limbs: &[u64; 4], out: &mut [u8]) {
    debug_assert_eq!(out.len(), 32);
    for (chunk, limb) in out.chunks_exact_mut(8).rev().zip(limbs.iter()) {
        chunk.copy_from_slice(&limb.to_be_bytes());
    }
}

/// Parses a `0x`-prefixed hexadecimal or a plain decimal string.
///
/// Returns `None` on malformed input or when the value overflows 256 bits.
pub(crate) fn parse_limbs(s: &str) -> Option<[u64; 4]> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => parse_radix(hex, 16),
        None => parse_radix(s, 10),
    }
}

fn parse_radix(digits: &str, radix: u32) -> Option<[u64; 4]> {
    if digits.is_empty() {
        return None;
    }

    let mut limbs = [0u64; 4];
    for c in digits.chars() {
        let digit = u64::from(c.to_digit(radix)?);
        let mut carry = digit;
        for limb in limbs.iter_mut() {
            let (w, c) = mac(carry, *limb, u64::from(radix), 0);
            *limb = w;
            carry = c;
        }
        if carry != 0 {
            return None;
        }
    }
    Some(limbs)
}

/// Writes limbs in decimal. Variable time.
pub(crate) fn fmt_decimal(limbs: &[u64; 4], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Largest power of ten fitting in a word.
    const CHUNK: u128 = 10_000_000_000_000_000_000;

    let mut buf = [b'0'; 80];
    let mut pos = buf.len();
    let mut n = *limbs;

    loop {
        let mut rem = 0u128;
        for limb in n.iter_mut().rev() {
            let cur = (rem << 64) | u128::from(*limb);
            *limb = (cur / CHUNK) as u64;
            rem = cur % CHUNK;
        }

        let last = n == [0; 4];
        let mut chunk = rem as u64;
        for _ in 0..19 {
            pos -= 1;
            buf[pos] = b'0' + (chunk % 10) as u8;
            chunk /= 10;
            if last && chunk == 0 {
                break;
            }
        }

        if last {
            break;
        }
    }

    let digits = core::str::from_utf8(&buf[pos..]).map_err(|_| fmt::Error)?;
    f.pad_integral(true, "", digits)
}

/// Writes limbs as hex without leading zeros. `{:#x}` adds a `0x` prefix.
pub(crate) fn fmt_hex(limbs: &[u64; 4], f: &mut fmt::Formatter<'_>, upper: bool) -> fmt::Result {
    let alphabet: &[u8; 16] = if upper {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };

    let mut buf = [0u8; 64];
    for (i, c) in buf.iter_mut().enumerate() {
        let nibble = (limbs[3 - i / 16] >> (60 - (i % 16) * 4)) & 0xf;
        *c = alphabet[nibble as usize];
    }

    let start = buf.iter().position(|&c| c != b'0').unwrap_or(buf.len() - 1);
    let digits = core::str::from_utf8(&buf[start..]).map_err(|_| fmt::Error)?;
    f.pad_integral(true, "0x", digits)
}

/// Converts a byte array (big-endian) to BigUint.
#[cfg(test)]
pub(crate) fn bytes_to_biguint(bytes: &[u8; 32]) -> BigUint {
    bytes
        .iter()
        .enumerate()
        .map(|(i, w)| w.to_biguint().unwrap() << ((31 - i) * 8))
        .sum()
}

/// Converts a BigUint to a byte array (big-endian).
#[cfg(test)]
pub(crate) fn biguint_to_bytes(x: &BigUint) -> [u8; 32] {
    let mask = BigUint::from(u8::MAX);
    let mut bytes = [0u8; 32];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = ((x >> ((31 - i) * 8)) & &mask).to_u8().unwrap();
    }
    bytes
}
