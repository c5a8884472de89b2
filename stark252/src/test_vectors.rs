//! Stark ECDSA test vectors.
//!
//! Nonces are the RFC6979 derivation used by Starknet signers. All values
//! are 32-byte big endian integers.

use hex_literal::hex;

/// Stark ECDSA test vector.
pub struct TestVector {
    /// Private key.
    pub d: &'static [u8; 32],

    /// Public key x-coordinate.
    pub q_x: &'static [u8; 32],

    /// Public key y-coordinate.
    pub q_y: &'static [u8; 32],

    /// Nonce derived with RFC6979.
    pub k: &'static [u8; 32],

    /// Message hash.
    pub m: &'static [u8; 32],

    /// Signature `r` component.
    pub r: &'static [u8; 32],

    /// Signature `s` component.
    pub s: &'static [u8; 32],

    /// Parity of `R.y`.
    pub v: u8,
}

/// Stark ECDSA test vectors
pub const ECDSA_TEST_VECTORS: &[TestVector] = &[
    TestVector {
        d: &hex!("057b78c7a6db039233ad693bfb625d974de43dda3928c6ab83e58879f02efb83"),
        q_x: &hex!("04202c10aee2ad4dd3d0dfaf66de02e340da3bead4ce963bc459095a6fb66eca"),
        q_y: &hex!("070f72af4e9bc1ff9bf49097ced228fb305118bd0baf1f77b16b7d64d1dde203"),
        k: &hex!("07ecd8b9fe02257a2a7ef667c3fd765eaba15344ee35727f65219d1195f3c93a"),
        m: &hex!("00000000000000000000000000000000000000000000000000000000499602d2"),
        r: &hex!("072a500f0754015b0a8006902126008b6b2339c14fc38513ce1ba47c52419367"),
        s: &hex!("05ba5f4d6338321765831df56a1ab85734cc6f10f57ea9da836b1adf7de67a46"),
        v: 1,
    },
    TestVector {
        d: &hex!("057b78c7a6db039233ad693bfb625d974de43dda3928c6ab83e58879f02efb83"),
        q_x: &hex!("04202c10aee2ad4dd3d0dfaf66de02e340da3bead4ce963bc459095a6fb66eca"),
        q_y: &hex!("070f72af4e9bc1ff9bf49097ced228fb305118bd0baf1f77b16b7d64d1dde203"),
        k: &hex!("05aeaac074cbbcd3731916b42b96aa2972feb50bb11b8bb54c61f2a22df7dd44"),
        m: &hex!("000000000000000000000000000000000000000000000000000000024cb016ea"),
        r: &hex!("00be2afaa0d582af674bb42fbe2b2400f3f345e2d69a22ea23a55bef2d165876"),
        s: &hex!("07a308ad739b17c0116b8d2b989e1dd2f1ed60459f70451d41afe913f083930a"),
        v: 1,
    },
    TestVector {
        d: &hex!("057b78c7a6db039233ad693bfb625d974de43dda3928c6ab83e58879f02efb83"),
        q_x: &hex!("04202c10aee2ad4dd3d0dfaf66de02e340da3bead4ce963bc459095a6fb66eca"),
        q_y: &hex!("070f72af4e9bc1ff9bf49097ced228fb305118bd0baf1f77b16b7d64d1dde203"),
        k: &hex!("053e7e2b395ac0eb452e1cd8a4cd9a6383aed13d5c16a122ebf4ab55e78429f3"),
        m: &hex!("07d16ef5eea6de709df0e53413fa16a14ff65d3b2e2433b7f2c684c0d13015be"),
        r: &hex!("072188496c0f0a129138d3374bd11d27b8d580d62791296940527f1ea5126a7d"),
        s: &hex!("05a4eeb32d29e64f402e34b8113802fc0ceab7c866f3b922783484042c8ab38d"),
        v: 0,
    },
];
