//! # Authorization Flow
//!
//! A delegation chain end to end:
//!
//! 1. The namespace owner grants `castle/*` to a manager.
//! 2. The manager grants `castle/+/temp` to a sensor.
//! 3. The sensor publishes on `castle/kitchen/temp`, carrying both DOTs as
//!    routing objects and one compressed BLS aggregate over them.
//! 4. The router parses the frame, folds the DOT URIs with `restrict_by`,
//!    checks the topic is covered, and verifies the aggregate.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bw_crypto::bls::BLS_PUBLIC_LEN;
    use bw_crypto::{
        aggregate, compress, verify_compressed, BlsKeyPair, BlsPublicKey, XOnlyBlsSignature,
    };
    use bw_uri::{matches, restrict_by, RestrictionCache};
    use bw_wire::{
        read_frame, ro, Command, Frame, FrameBuilder, ObjectRegistry, OpaquePayloadObject,
        OpaqueRoutingObject, WireConfig,
    };
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    /// DOT body: granter's BLS key followed by the granted URI.
    fn dot_body(granter: &BlsKeyPair, uri: &str) -> Vec<u8> {
        let mut body = granter.public_key().to_bytes().to_vec();
        body.extend_from_slice(uri.as_bytes());
        body
    }

    struct Chain {
        owner: BlsKeyPair,
        manager: BlsKeyPair,
    }

    impl Chain {
        fn new() -> Self {
            let mut rng = StdRng::seed_from_u64(7);
            Self {
                owner: BlsKeyPair::generate(&mut rng).unwrap(),
                manager: BlsKeyPair::generate(&mut rng).unwrap(),
            }
        }

        /// Publish frame carrying `grants` as DOTs signed along the chain.
        fn publish(&self, topic: &str, grants: [&str; 2], signers: &[&BlsKeyPair]) -> Frame {
            let dots = [dot_body(&self.owner, grants[0]), dot_body(&self.manager, grants[1])];
            let signatures: Vec<_> = signers
                .iter()
                .zip(&dots)
                .map(|(key, dot)| key.sign(dot))
                .collect();
            let chain_sig = compress(&aggregate(&signatures).unwrap());

            let mut builder = FrameBuilder::new(Command::PUBLISH, 1)
                .header("uri", topic.to_string())
                .header("chain-sig", chain_sig.as_bytes().to_vec());
            for dot in dots {
                builder = builder.routing_object(Arc::new(OpaqueRoutingObject::new(ro::ACCESS_DOT, dot)));
            }
            builder
                .payload_object(Arc::new(OpaquePayloadObject::new(0x4000_0000, "21.5")))
                .build()
                .unwrap()
        }
    }

    #[derive(Debug, PartialEq, Eq)]
    enum Decision {
        Deliver(String),
        OutOfScope,
        BadSignature,
    }

    /// What a router does with an incoming publish.
    async fn authorize(wire: &[u8], cache: &RestrictionCache) -> Decision {
        let registry = ObjectRegistry::with_defaults();
        let mut input = wire;
        let frame = read_frame(&mut input, &registry, &WireConfig::default())
            .await
            .unwrap();

        let topic = std::str::from_utf8(frame.header("uri").unwrap()).unwrap().to_string();
        let raw_sig: [u8; 48] = frame.header("chain-sig").unwrap().as_ref().try_into().unwrap();

        let mut keys = Vec::new();
        let mut messages = Vec::new();
        let mut granted: Option<String> = None;
        for dot in frame.routing_objects().iter().filter(|r| r.ro_num() == ro::ACCESS_DOT) {
            let body = dot.content();
            keys.push(BlsPublicKey::from_bytes(&body[..BLS_PUBLIC_LEN]).unwrap());
            messages.push(body);

            let uri = std::str::from_utf8(&body[BLS_PUBLIC_LEN..]).unwrap();
            granted = Some(match granted {
                None => uri.to_string(),
                Some(acc) => match cache.restrict(&acc, uri) {
                    Ok(narrowed) => narrowed,
                    Err(_) => return Decision::OutOfScope,
                },
            });
        }

        if !verify_compressed(&keys, &messages, &XOnlyBlsSignature::from_bytes(raw_sig)) {
            return Decision::BadSignature;
        }

        match granted {
            Some(pattern) if matches(&pattern, &topic) => {
                Decision::Deliver(restrict_by(&pattern, &topic).unwrap())
            }
            _ => Decision::OutOfScope,
        }
    }

    // =========================================================================
    // FLOWS
    // =========================================================================

    #[tokio::test]
    async fn test_valid_chain_delivers() {
        let chain = Chain::new();
        let frame = chain.publish(
            "castle/kitchen/temp",
            ["castle/*", "castle/+/temp"],
            &[&chain.owner, &chain.manager],
        );
        let cache = RestrictionCache::new(64).unwrap();

        let decision = authorize(&frame.to_bytes(), &cache).await;
        assert_eq!(decision, Decision::Deliver("castle/kitchen/temp".to_string()));
    }

    #[tokio::test]
    async fn test_topic_outside_grant_is_refused() {
        let chain = Chain::new();
        let frame = chain.publish(
            "castle/kitchen/humidity",
            ["castle/*", "castle/+/temp"],
            &[&chain.owner, &chain.manager],
        );
        let cache = RestrictionCache::new(64).unwrap();

        assert_eq!(authorize(&frame.to_bytes(), &cache).await, Decision::OutOfScope);
    }

    #[tokio::test]
    async fn test_disjoint_delegation_is_refused() {
        let chain = Chain::new();
        let frame = chain.publish(
            "castle/kitchen/temp",
            ["castle/*", "garden/+/temp"],
            &[&chain.owner, &chain.manager],
        );
        let cache = RestrictionCache::new(64).unwrap();

        assert_eq!(authorize(&frame.to_bytes(), &cache).await, Decision::OutOfScope);
    }

    #[tokio::test]
    async fn test_forged_link_fails_aggregate() {
        let chain = Chain::new();
        // The manager signs the owner's DOT as well as its own.
        let frame = chain.publish(
            "castle/kitchen/temp",
            ["castle/*", "castle/+/temp"],
            &[&chain.manager, &chain.manager],
        );
        let cache = RestrictionCache::new(64).unwrap();

        assert_eq!(authorize(&frame.to_bytes(), &cache).await, Decision::BadSignature);
    }

    #[tokio::test]
    async fn test_repeated_publishes_hit_cache() {
        let chain = Chain::new();
        let frame = chain.publish(
            "castle/hall/temp",
            ["castle/*", "castle/+/temp"],
            &[&chain.owner, &chain.manager],
        );
        let wire = frame.to_bytes();
        let cache = RestrictionCache::new(64).unwrap();

        for _ in 0..3 {
            assert!(matches!(authorize(&wire, &cache).await, Decision::Deliver(_)));
        }
        let stats = cache.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 2);
    }
}
