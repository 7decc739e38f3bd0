//! Routing and payload objects.
//!
//! Frames carry opaque typed blobs. Routing objects (DOTs, DChains, entities,
//! origin keys, expiry) steer delivery and authorisation; payload objects are
//! the message body. Both are demultiplexed by a numeric kind and must hand
//! back exactly the bytes they were loaded from.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bw_crypto::Ed25519PublicKey;
use bytes::Bytes;

use crate::domain::ponum::PoNum;
use crate::error::ObjectError;

/// Routing object kinds.
pub mod ro {
    pub const ACCESS_DCHAIN_HASH: u8 = 0x01;
    pub const ACCESS_DCHAIN: u8 = 0x02;
    pub const PERMISSION_DCHAIN_HASH: u8 = 0x11;
    pub const PERMISSION_DCHAIN: u8 = 0x12;
    pub const ACCESS_DOT: u8 = 0x20;
    pub const PERMISSION_DOT: u8 = 0x21;
    pub const ENTITY: u8 = 0x30;
    pub const ENTITY_WITH_KEY: u8 = 0x32;
    pub const EXPIRY: u8 = 0x40;
    pub const ORIGIN_VK: u8 = 0x50;
    pub const REVOCATION: u8 = 0x80;

    /// Kinds whose bodies are carried without interpretation by the codec.
    pub const OPAQUE_KINDS: &[u8] = &[
        ACCESS_DCHAIN_HASH,
        ACCESS_DCHAIN,
        PERMISSION_DCHAIN_HASH,
        PERMISSION_DCHAIN,
        ACCESS_DOT,
        PERMISSION_DOT,
        ENTITY,
        ENTITY_WITH_KEY,
        REVOCATION,
    ];
}

/// A routing object carried in a frame.
pub trait RoutingObject: fmt::Debug + Send + Sync + 'static {
    fn ro_num(&self) -> u8;

    /// The exact bytes this object was loaded from or will serialise to.
    fn content(&self) -> &[u8];

    fn as_any(&self) -> &dyn Any;
}

/// A payload object carried in a frame.
pub trait PayloadObject: fmt::Debug + Send + Sync + 'static {
    fn po_num(&self) -> PoNum;

    /// The exact bytes this object was loaded from or will serialise to.
    fn content(&self) -> &[u8];

    fn as_any(&self) -> &dyn Any;
}

pub type RoutingObjectRef = Arc<dyn RoutingObject>;
pub type PayloadObjectRef = Arc<dyn PayloadObject>;

// =============================================================================
// OPAQUE OBJECTS
// =============================================================================

/// Routing object whose body the codec does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueRoutingObject {
    ro_num: u8,
    body: Bytes,
}

impl OpaqueRoutingObject {
    pub fn new(ro_num: u8, body: impl Into<Bytes>) -> Self {
        Self {
            ro_num,
            body: body.into(),
        }
    }

    /// Registry loader.
    pub fn load(ro_num: u8, body: Bytes) -> Result<RoutingObjectRef, ObjectError> {
        Ok(Arc::new(Self { ro_num, body }))
    }
}

impl RoutingObject for OpaqueRoutingObject {
    fn ro_num(&self) -> u8 {
        self.ro_num
    }

    fn content(&self) -> &[u8] {
        &self.body
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Payload object whose body the codec does not interpret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaquePayloadObject {
    po_num: PoNum,
    body: Bytes,
}

impl OpaquePayloadObject {
    pub fn new(po_num: impl Into<PoNum>, body: impl Into<Bytes>) -> Self {
        Self {
            po_num: po_num.into(),
            body: body.into(),
        }
    }

    /// Registry loader.
    pub fn load(po_num: PoNum, body: Bytes) -> Result<PayloadObjectRef, ObjectError> {
        Ok(Arc::new(Self { po_num, body }))
    }
}

impl PayloadObject for OpaquePayloadObject {
    fn po_num(&self) -> PoNum {
        self.po_num
    }

    fn content(&self) -> &[u8] {
        &self.body
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// ORIGIN VERIFYING KEY
// =============================================================================

/// The Ed25519 verifying key of the entity a message claims to come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginVk {
    key: Ed25519PublicKey,
    body: Bytes,
}

impl OriginVk {
    pub fn new(key: Ed25519PublicKey) -> Self {
        let body = Bytes::copy_from_slice(key.as_bytes());
        Self { key, body }
    }

    pub fn key(&self) -> &Ed25519PublicKey {
        &self.key
    }

    /// Registry loader. The body must be a 32-byte point on the curve.
    pub fn load(_ro_num: u8, body: Bytes) -> Result<RoutingObjectRef, ObjectError> {
        if body.len() != 32 {
            return Err(ObjectError::WrongLength {
                expected: 32,
                actual: body.len(),
            });
        }
        let key = Ed25519PublicKey::from_slice(&body).map_err(|_| ObjectError::InvalidKey)?;
        Ok(Arc::new(Self { key, body }))
    }
}

impl RoutingObject for OriginVk {
    fn ro_num(&self) -> u8 {
        ro::ORIGIN_VK
    }

    fn content(&self) -> &[u8] {
        &self.body
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// =============================================================================
// EXPIRY
// =============================================================================

/// Absolute expiry of a message, in nanoseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry {
    at_nanos: i64,
    body: Bytes,
}

impl Expiry {
    pub fn new(at_nanos: i64) -> Self {
        Self {
            at_nanos,
            body: Bytes::copy_from_slice(&at_nanos.to_le_bytes()),
        }
    }

    pub fn at_nanos(&self) -> i64 {
        self.at_nanos
    }

    pub fn is_expired(&self, now_nanos: i64) -> bool {
        now_nanos >= self.at_nanos
    }

    /// Registry loader. The body is an 8-byte little-endian timestamp.
    pub fn load(_ro_num: u8, body: Bytes) -> Result<RoutingObjectRef, ObjectError> {
        let raw: [u8; 8] = body.as_ref().try_into().map_err(|_| ObjectError::WrongLength {
            expected: 8,
            actual: body.len(),
        })?;
        Ok(Arc::new(Self {
            at_nanos: i64::from_le_bytes(raw),
            body,
        }))
    }
}

impl RoutingObject for Expiry {
    fn ro_num(&self) -> u8 {
        ro::EXPIRY
    }

    fn content(&self) -> &[u8] {
        &self.body
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
