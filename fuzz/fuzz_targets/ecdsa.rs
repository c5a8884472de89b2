#![no_main]
use libfuzzer_sys::fuzz_target;
use stark252::{
    ELEMENT_UPPER_BOUND, U256,
    ecdsa::{SigningKey, recover, verify},
};

fuzz_target!(|data: &[u8]| {
    if data.len() < 96 {
        return;
    }

    let private_key = U256::from_be_slice(&data[0..32]);
    let msg_hash = U256::from_be_slice(&data[32..64]);

    let Ok(signing_key) = SigningKey::from_uint(&private_key) else {
        return;
    };

    let public_key = signing_key.verifying_key().as_affine();

    // Arbitrary (r, s) pairs never panic and essentially never verify.
    let r = U256::from_be_slice(&data[64..96]);
    let _ = verify(public_key, &msg_hash, &r, &msg_hash);

    match signing_key.sign_prehash_recoverable(&msg_hash) {
        Ok((signature, recovery_id)) => {
            let r = signature.r().to_uint();
            let s = signature.s().to_uint();
            assert!(verify(public_key, &msg_hash, &r, &s));
            assert_eq!(recover(&msg_hash, &r, &s, recovery_id).unwrap(), *public_key);
        }
        Err(_) => assert!(msg_hash >= ELEMENT_UPPER_BOUND),
    }
});
