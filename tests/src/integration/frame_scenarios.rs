//! # Frame Scenarios
//!
//! Frames moving over real async streams, with objects that the default
//! registry validates.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use bw_crypto::Ed25519KeyPair;
    use bw_wire::{
        ro, Command, Expiry, Frame, FrameBuilder, FrameReader, ObjectRegistry,
        OpaquePayloadObject, OriginVk, ResponseStatus, WireConfig, WireError,
    };
    use tokio::io::{duplex, AsyncWriteExt, BufReader};

    fn origin(frame: &Frame) -> Option<&OriginVk> {
        frame
            .routing_objects()
            .iter()
            .find(|r| r.ro_num() == ro::ORIGIN_VK)
            .and_then(|r| r.as_any().downcast_ref::<OriginVk>())
    }

    // =========================================================================
    // SCENARIO 5
    // =========================================================================

    #[tokio::test]
    async fn scenario_5_frame_roundtrip() {
        let frame = FrameBuilder::new(Command::SUBSCRIBE, 7)
            .header("origin", vec![0x00, 0xff, 0x0a])
            .payload_object(Arc::new(OpaquePayloadObject::new(0x0201_0003, "hello")))
            .build()
            .unwrap();

        let (mut client, server) = duplex(1024);
        frame.write_to(&mut client).await.unwrap();
        drop(client);

        let registry = ObjectRegistry::with_defaults();
        let mut reader = FrameReader::new(BufReader::new(server), &registry);
        let parsed = reader.next_frame().await.unwrap().unwrap();

        assert_eq!(parsed, frame);
        assert_eq!(parsed.command().as_str(), "subs");
        assert_eq!(parsed.seqno(), 7);
        assert_eq!(parsed.headers().len(), 1);
        assert_eq!(parsed.headers()[0].key, "origin");
        assert_eq!(parsed.headers()[0].value.as_ref(), &[0x00, 0xff, 0x0a]);
        assert_eq!(parsed.payload_objects()[0].po_num().value(), 0x0201_0003);
        assert_eq!(parsed.payload_objects()[0].po_num().to_dot(), "2.0.1.3");
        assert_eq!(parsed.payload_objects()[0].content(), b"hello");

        assert!(reader.next_frame().await.unwrap().is_none());
    }

    // =========================================================================
    // SIGNED PUBLISH
    // =========================================================================

    #[tokio::test]
    async fn test_signed_publish_verifies_at_receiver() {
        let entity = Ed25519KeyPair::from_seed([0x42; 32]);
        let body = b"21.5C".to_vec();
        let signature = entity.sign(&body);

        let frame = FrameBuilder::new(Command::PUBLISH, 100)
            .header("uri", "castle/kitchen/temp")
            .header("sig", signature.as_bytes().to_vec())
            .routing_object(Arc::new(OriginVk::new(entity.public_key())))
            .routing_object(Arc::new(Expiry::new(i64::MAX)))
            .payload_object(Arc::new(OpaquePayloadObject::new(0x4000_0000, body.clone())))
            .build()
            .unwrap();

        let wire = frame.to_bytes();
        let registry = ObjectRegistry::with_defaults();
        let parsed = bw_wire::read_frame(&mut wire.as_ref(), &registry, &WireConfig::default())
            .await
            .unwrap();

        let origin = origin(&parsed).expect("origin vk present");
        let sig = parsed.header("sig").unwrap();
        let po = &parsed.payload_objects()[0];
        assert!(bw_crypto::signatures::verify(
            origin.key().as_bytes(),
            sig,
            po.content()
        ));

        let expiry = parsed.routing_objects()[1]
            .as_any()
            .downcast_ref::<Expiry>()
            .unwrap();
        assert!(!expiry.is_expired(0));
    }

    #[tokio::test]
    async fn test_origin_vk_off_curve_fails_whole_frame() {
        // y = 2 has no matching x on edwards25519.
        let mut bogus = [0u8; 32];
        bogus[0] = 2;
        let frame = FrameBuilder::new(Command::PUBLISH, 1)
            .routing_object(Arc::new(bw_wire::OpaqueRoutingObject::new(ro::ORIGIN_VK, bogus.to_vec())))
            .build()
            .unwrap();

        let wire = frame.to_bytes();
        let registry = ObjectRegistry::with_defaults();
        let err = bw_wire::read_frame(&mut wire.as_ref(), &registry, &WireConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, WireError::BadRoutingObject { ro_num: 0x50, .. }));
    }

    // =========================================================================
    // REQUEST / RESPONSE
    // =========================================================================

    #[tokio::test]
    async fn test_response_echoes_seqno() {
        let (client, server) = duplex(256);
        let (client_read, mut client_write) = tokio::io::split(client);
        let (server_read, mut server_write) = tokio::io::split(server);
        let registry = ObjectRegistry::with_defaults();

        FrameBuilder::new(Command::QUERY, 31)
            .header("uri", "castle/!meta")
            .write_to(&mut client_write)
            .await
            .unwrap();

        let mut server_reader = FrameReader::new(BufReader::new(server_read), &registry);
        let request = server_reader.read_frame().await.unwrap();
        assert_eq!(request.command(), Command::QUERY);

        FrameBuilder::response(request.seqno(), ResponseStatus::Error, "no permission")
            .write_to(&mut server_write)
            .await
            .unwrap();
        server_write.shutdown().await.unwrap();

        let mut client_reader = FrameReader::new(BufReader::new(client_read), &registry);
        let response = client_reader.read_frame().await.unwrap();
        assert_eq!(response.command(), Command::RESPONSE);
        assert_eq!(response.seqno(), 31);
        assert_eq!(response.status(), Some(ResponseStatus::Error));
        assert_eq!(response.reason().unwrap().as_ref(), b"no permission");
    }
}
