//! Frame domain: commands, payload numbers, objects and frames.

pub mod command;
pub mod frame;
pub mod objects;
pub mod ponum;

pub use command::Command;
pub use frame::{
    is_valid_header_key, Frame, FrameBuilder, Header, ResponseStatus, FIXED_HEADER_LEN,
    MAX_ENCODED_LENGTH, MAX_ENTRY_LINE, TERMINATOR_LEN,
};
pub use objects::{
    ro, Expiry, OpaquePayloadObject, OpaqueRoutingObject, OriginVk, PayloadObject,
    PayloadObjectRef, RoutingObject, RoutingObjectRef,
};
pub use ponum::{po_num_from_dot, po_num_to_dot, PoNum};
