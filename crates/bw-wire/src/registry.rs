//! Kind → constructor tables for routing and payload objects.
//!
//! A registry is populated once at startup and then only borrowed by the
//! parser. Nothing here is global; callers that want different kinds build a
//! different registry.

use std::collections::HashMap;

use bytes::Bytes;
use tracing::debug;

use crate::domain::objects::{
    ro, Expiry, OpaquePayloadObject, OpaqueRoutingObject, OriginVk, PayloadObject,
    PayloadObjectRef, RoutingObject, RoutingObjectRef,
};
use crate::domain::PoNum;
use crate::error::{ObjectError, Result, WireError};

/// Builds a routing object from its kind and body.
pub type RoutingLoader = fn(u8, Bytes) -> std::result::Result<RoutingObjectRef, ObjectError>;

/// Builds a payload object from its number and body.
pub type PayloadLoader = fn(PoNum, Bytes) -> std::result::Result<PayloadObjectRef, ObjectError>;

#[derive(Debug, Clone, Default)]
pub struct ObjectRegistry {
    routing: HashMap<u8, RoutingLoader>,
    payload: HashMap<PoNum, PayloadLoader>,
    payload_fallback: Option<PayloadLoader>,
}

impl ObjectRegistry {
    /// An empty registry: every object kind is refused.
    pub fn new() -> Self {
        Self::default()
    }

    /// The BOSSWAVE routing-object kinds, plus opaque loading for any payload.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for &kind in ro::OPAQUE_KINDS {
            registry.register_routing(kind, OpaqueRoutingObject::load);
        }
        registry.register_routing(ro::ORIGIN_VK, OriginVk::load);
        registry.register_routing(ro::EXPIRY, Expiry::load);
        registry.set_payload_fallback(OpaquePayloadObject::load);
        registry
    }

    /// Register a loader, replacing any previous one for the same kind.
    pub fn register_routing(&mut self, ro_num: u8, loader: RoutingLoader) -> &mut Self {
        debug!(ro_num, "Registered routing object loader");
        self.routing.insert(ro_num, loader);
        self
    }

    pub fn register_payload(&mut self, po_num: impl Into<PoNum>, loader: PayloadLoader) -> &mut Self {
        let po_num = po_num.into();
        debug!(%po_num, "Registered payload object loader");
        self.payload.insert(po_num, loader);
        self
    }

    /// Loader used for payload numbers with no specific registration.
    pub fn set_payload_fallback(&mut self, loader: PayloadLoader) -> &mut Self {
        debug!("Registered payload fallback loader");
        self.payload_fallback = Some(loader);
        self
    }

    pub fn has_routing(&self, ro_num: u8) -> bool {
        self.routing.contains_key(&ro_num)
    }

    pub fn load_routing_object(&self, ro_num: u8, body: Bytes) -> Result<RoutingObjectRef> {
        let loader = self
            .routing
            .get(&ro_num)
            .ok_or(WireError::BadRoutingObject {
                ro_num,
                reason: ObjectError::Unregistered,
            })?;
        let object = loader(ro_num, body)
            .map_err(|reason| WireError::BadRoutingObject { ro_num, reason })?;
        if object.ro_num() != ro_num {
            return Err(WireError::BadRoutingObject {
                ro_num,
                reason: ObjectError::Invalid(format!(
                    "loader produced kind 0x{:02x}",
                    object.ro_num()
                )),
            });
        }
        Ok(object)
    }

    pub fn load_payload_object(&self, po_num: PoNum, body: Bytes) -> Result<PayloadObjectRef> {
        let loader = self
            .payload
            .get(&po_num)
            .or(self.payload_fallback.as_ref())
            .ok_or(WireError::BadPayloadObject {
                po_num,
                reason: ObjectError::Unregistered,
            })?;
        let object = loader(po_num, body)
            .map_err(|reason| WireError::BadPayloadObject { po_num, reason })?;
        if object.po_num() != po_num {
            return Err(WireError::BadPayloadObject {
                po_num,
                reason: ObjectError::Invalid(format!(
                    "loader produced number {}",
                    object.po_num()
                )),
            });
        }
        Ok(object)
    }
}
