//! # BOSSWAVE Crypto - Entity Identity and Aggregate Signatures
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `signatures` | Ed25519 | Entity identity, DOT and message signing |
//! | `dh` | Ed25519 → X25519 | Shared secrets between entities |
//! | `bls` | BLS12-381 (`min_sig`) | Aggregating the signatures of a DOT chain |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, strict verification
//! - **X25519**: Low-order peer keys rejected
//! - **BLS**: Messages must be distinct; equality on group elements is constant-time
//!
//! Every operation is a pure function over its inputs plus a caller-supplied
//! entropy source. Verification answers `bool` and never panics on malformed input.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bls;
pub mod dh;
pub mod errors;
pub mod signatures;

// Re-exports
pub use bls::{
    aggregate, compress, verify_aggregate, verify_compressed, BlsKeyPair, BlsPublicKey,
    BlsSignature, XOnlyBlsSignature,
};
pub use dh::{
    curve_base_mult, ed25519_calc_secret, ed_sk_to_curve_sk, ed_vk_to_curve_pk, CurveKeyPair,
    CurveSecretKey, SharedSecret,
};
pub use errors::CryptoError;
pub use signatures::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
