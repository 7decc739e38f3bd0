//! # Crypto Scenarios
//!
//! 1. **Signature correctness** - sign/verify, bit flips rejected
//! 2. **Hybrid DH** - both sides derive the same secret from Ed25519 keys
//! 3. **BLS aggregate vs partial** - an aggregate missing one signature fails

#[cfg(test)]
mod tests {
    use bw_crypto::signatures::{generate, sign, verify};
    use bw_crypto::{
        aggregate, compress, curve_base_mult, ed25519_calc_secret, ed_sk_to_curve_sk,
        ed_vk_to_curve_pk, verify_aggregate, verify_compressed, BlsKeyPair, BlsPublicKey,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xB055_0A7E)
    }

    // =========================================================================
    // ED25519
    // =========================================================================

    #[test]
    fn test_free_function_sign_verify() {
        let mut rng = rng();
        let (sk, vk) = generate(&mut rng);
        let message = b"publish castle/kitchen/temp";

        let signature = sign(&sk, &vk, message).unwrap();
        assert!(verify(&vk, signature.as_bytes(), message));

        let mut tampered = message.to_vec();
        tampered[0] ^= 0x01;
        assert!(!verify(&vk, signature.as_bytes(), &tampered));

        let mut bad_sig = *signature.as_bytes();
        bad_sig[63] ^= 0x80;
        assert!(!verify(&vk, &bad_sig, message));
    }

    #[test]
    fn test_sign_refuses_foreign_vk() {
        let mut rng = rng();
        let (sk, _) = generate(&mut rng);
        let (_, other_vk) = generate(&mut rng);
        assert!(sign(&sk, &other_vk, b"m").is_err());
    }

    // =========================================================================
    // HYBRID DH
    // =========================================================================

    #[test]
    fn test_dh_symmetry_and_conversion() {
        let mut rng = rng();
        let (a_sk, a_vk) = generate(&mut rng);
        let (b_sk, b_vk) = generate(&mut rng);

        assert_eq!(
            curve_base_mult(&ed_sk_to_curve_sk(&a_sk)),
            ed_vk_to_curve_pk(&a_vk).unwrap()
        );

        let ab = ed25519_calc_secret(&a_sk, &b_vk).unwrap();
        let ba = ed25519_calc_secret(&b_sk, &a_vk).unwrap();
        assert_eq!(ab.as_bytes(), ba.as_bytes());

        let (c_sk, _) = generate(&mut rng);
        let cb = ed25519_calc_secret(&c_sk, &b_vk).unwrap();
        assert_ne!(ab.as_bytes(), cb.as_bytes());
    }

    // =========================================================================
    // BLS AGGREGATE
    // =========================================================================

    #[test]
    fn scenario_6_bls_aggregate_vs_partial() {
        let mut rng = rng();
        let keys: Vec<BlsKeyPair> = (0..3)
            .map(|_| BlsKeyPair::generate(&mut rng).unwrap())
            .collect();
        let public_keys: Vec<BlsPublicKey> = keys.iter().map(BlsKeyPair::public_key).collect();
        let messages: [&[u8]; 3] = [b"dot one", b"dot two", b"dot three"];

        let signatures: Vec<_> = keys
            .iter()
            .zip(messages)
            .map(|(key, message)| key.sign(message))
            .collect();

        let full = aggregate(&signatures).unwrap();
        assert!(verify_aggregate(&public_keys, &messages, &full));

        let partial = aggregate(&signatures[..2]).unwrap();
        assert!(!verify_aggregate(&public_keys, &messages, &partial));

        assert!(verify_compressed(&public_keys, &messages, &compress(&full)));
        assert!(!verify_compressed(&public_keys, &messages, &compress(&partial)));
    }

    #[test]
    fn test_bls_duplicate_messages_rejected() {
        let mut rng = rng();
        let a = BlsKeyPair::generate(&mut rng).unwrap();
        let b = BlsKeyPair::generate(&mut rng).unwrap();
        let messages: [&[u8]; 2] = [b"same", b"same"];

        let sig = aggregate(&[a.sign(messages[0]), b.sign(messages[1])]).unwrap();
        assert!(!verify_aggregate(
            &[a.public_key(), b.public_key()],
            &messages,
            &sig
        ));
    }
}
