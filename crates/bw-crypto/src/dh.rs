//! # Hybrid Diffie-Hellman over Entity Keys
//!
//! Entities only publish Ed25519 verifying keys. Two entities derive a shared
//! X25519 secret by mapping their Edwards keys onto the Montgomery form of
//! Curve25519 (the birational map `u = (1 + y) / (1 - y)`).
//!
//! For any Ed25519 keypair `(sk, vk)`:
//!
//! ```text
//! curve_base_mult(ed_sk_to_curve_sk(sk)) == ed_vk_to_curve_pk(vk)
//! ```

use std::fmt;

use ed25519_dalek::{SigningKey, VerifyingKey};
use x25519_dalek::{PublicKey, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::signatures::{Ed25519KeyPair, ED25519_PUBLIC_LEN, ED25519_SECRET_LEN};
use crate::CryptoError;

/// Length of a Curve25519 scalar or point.
pub const CURVE25519_LEN: usize = 32;

/// Curve25519 secret scalar (clamped), wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct CurveSecretKey([u8; CURVE25519_LEN]);

impl CurveSecretKey {
    /// Wrap raw scalar bytes. Clamping is applied at use by X25519.
    pub fn from_bytes(bytes: [u8; CURVE25519_LEN]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; CURVE25519_LEN] {
        &self.0
    }
}

impl fmt::Debug for CurveSecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CurveSecretKey(..)")
    }
}

/// X25519 shared secret, wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret([u8; CURVE25519_LEN]);

impl SharedSecret {
    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; CURVE25519_LEN] {
        &self.0
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret(..)")
    }
}

/// Curve25519 keypair derived from an entity's Ed25519 keypair.
#[derive(Debug, Clone)]
pub struct CurveKeyPair {
    /// Montgomery secret scalar
    pub secret: CurveSecretKey,
    /// Montgomery u-coordinate
    pub public: [u8; CURVE25519_LEN],
}

impl CurveKeyPair {
    /// Convert an Ed25519 keypair.
    pub fn from_ed25519(keypair: &Ed25519KeyPair) -> Self {
        let secret = scalar_from_signing_key(keypair.signing_key());
        let public = keypair.signing_key().verifying_key().to_montgomery().to_bytes();
        Self { secret, public }
    }
}

fn scalar_from_signing_key(signing_key: &SigningKey) -> CurveSecretKey {
    let mut scalar = signing_key.to_scalar_bytes();
    scalar[0] &= 248;
    scalar[31] &= 127;
    scalar[31] |= 64;
    CurveSecretKey(scalar)
}

/// Map an Ed25519 secret seed to the matching Curve25519 secret scalar.
///
/// The scalar is the clamped low half of `SHA-512(seed)`, the same scalar
/// Ed25519 signs with.
pub fn ed_sk_to_curve_sk(ed_sk: &[u8; ED25519_SECRET_LEN]) -> CurveSecretKey {
    scalar_from_signing_key(&SigningKey::from_bytes(ed_sk))
}

/// Map an Ed25519 verifying key to its Curve25519 u-coordinate.
pub fn ed_vk_to_curve_pk(
    ed_vk: &[u8; ED25519_PUBLIC_LEN],
) -> Result<[u8; CURVE25519_LEN], CryptoError> {
    let verifying_key =
        VerifyingKey::from_bytes(ed_vk).map_err(|_| CryptoError::InvalidPublicKey)?;
    Ok(verifying_key.to_montgomery().to_bytes())
}

/// X25519 scalar multiplication by the base point.
pub fn curve_base_mult(curve_sk: &CurveSecretKey) -> [u8; CURVE25519_LEN] {
    let secret = StaticSecret::from(curve_sk.0);
    PublicKey::from(&secret).to_bytes()
}

/// Derive the X25519 secret shared between `ed_sk_a` and the holder of `ed_vk_b`.
///
/// Symmetric: `calc(a_sk, b_vk) == calc(b_sk, a_vk)`. Low-order peer keys,
/// which would force an all-zero secret, are rejected.
pub fn ed25519_calc_secret(
    ed_sk_a: &[u8; ED25519_SECRET_LEN],
    ed_vk_b: &[u8; ED25519_PUBLIC_LEN],
) -> Result<SharedSecret, CryptoError> {
    let peer = PublicKey::from(ed_vk_to_curve_pk(ed_vk_b)?);
    let secret = StaticSecret::from(ed_sk_to_curve_sk(ed_sk_a).0);
    let shared = secret.diffie_hellman(&peer);
    if !shared.was_contributory() {
        tracing::debug!("rejecting low-order peer key in hybrid DH");
        return Err(CryptoError::InvalidPublicKey);
    }
    Ok(SharedSecret(shared.to_bytes()))
}
