//! Signs the reference message hashes and prints `k`, `r`, `s` and the
//! recovery bit in decimal and hex, for comparison with other Starknet
//! signers.

use stark252::{
    U256,
    ecdsa::{SigningKey, verify},
    rfc6979::generate_k,
};

const PRIVATE_KEY: &str = "0x57b78c7a6db039233ad693bfb625d974de43dda3928c6ab83e58879f02efb83";

const MSG_HASHES: [U256; 3] = [
    U256::from_u64(1234567890),
    U256::from_u64(9876543210),
    U256::from_be_hex("07d16ef5eea6de709df0e53413fa16a14ff65d3b2e2433b7f2c684c0d13015be"),
];

fn main() {
    let signing_key: SigningKey = PRIVATE_KEY.parse().unwrap();
    let public_key = signing_key.verifying_key().as_affine();
    let private_key = signing_key.as_scalar().to_uint();
    let (x, y) = signing_key.verifying_key().coordinates();

    println!("public key x: {:#x}", x);
    println!("public key y: {:#x}", y);

    for msg_hash in &MSG_HASHES {
        let k = generate_k(&private_key, msg_hash, None).unwrap();
        let (signature, recovery_id) = signing_key.sign_prehash_recoverable(msg_hash).unwrap();
        let (r, s) = signature.split_scalars();

        println!();
        println!("msg_hash: {}", msg_hash);
        println!("k: {} ({:#x})", k, k);
        println!("r: {} ({:#x})", r, r);
        println!("s: {} ({:#x})", s, s);
        println!("v: {}", recovery_id.to_byte());
        println!("signature: {}", signature);
        println!(
            "verified: {}",
            verify(public_key, msg_hash, &r.to_uint(), &s.to_uint())
        );
    }
}
