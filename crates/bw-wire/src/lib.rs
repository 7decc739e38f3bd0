//! # BOSSWAVE Frame Codec
//!
//! Clients and routers exchange frames: a four-byte command, a sequence
//! number, named headers, routing objects and payload objects, framed by a
//! fixed 27-byte header line and the literal terminator `end\n`.
//!
//! ```text
//! <cmd:4> SP <length:10> SP <seqno:10> LF
//! kv SP <key> SP <len> LF <value> LF
//! ro SP <ro_num> SP <len> LF <body> LF
//! po SP <int>:<a.b.c.d> SP <len> LF <body> LF
//! end LF
//! ```
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `Frame`, `FrameBuilder`, `Command`, `PoNum`,
//!   routing/payload object traits and the built-in object kinds
//! - **Registry** (`registry`): kind → loader tables, built once and borrowed
//!   by the parser
//! - **Codec** (`codec/`): async parser over `AsyncBufRead`, serialiser over
//!   `AsyncWrite`
//! - **Config** (`config`): ceilings applied to untrusted input
//!
//! ## Usage Example
//!
//! ```
//! use std::sync::Arc;
//! use bw_wire::{read_frame, Command, FrameBuilder, ObjectRegistry, OpaquePayloadObject, WireConfig};
//!
//! # tokio_test_block(async {
//! let frame = FrameBuilder::new(Command::PUBLISH, 1)
//!     .header("uri", "castle/kitchen/temp")
//!     .payload_object(Arc::new(OpaquePayloadObject::new(0x4000_0000, "21.5")))
//!     .build()?;
//!
//! let wire = frame.to_bytes();
//! let registry = ObjectRegistry::with_defaults();
//! let parsed = read_frame(&mut wire.as_ref(), &registry, &WireConfig::default()).await?;
//! assert_eq!(parsed, frame);
//! # Ok::<(), bw_wire::WireError>(())
//! # }).unwrap();
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

pub mod codec;
pub mod config;
pub mod domain;
pub mod error;
pub mod registry;

pub use codec::{read_frame, FrameReader};
pub use config::WireConfig;
pub use domain::{
    po_num_from_dot, po_num_to_dot, ro, Command, Expiry, Frame, FrameBuilder, Header,
    OpaquePayloadObject, OpaqueRoutingObject, OriginVk, PayloadObject, PayloadObjectRef, PoNum,
    ResponseStatus, RoutingObject, RoutingObjectRef, MAX_ENTRY_LINE,
};
pub use error::{ObjectError, Result, WireError};
pub use registry::{ObjectRegistry, PayloadLoader, RoutingLoader};
