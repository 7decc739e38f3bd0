//! # Ed25519 Entity Signatures
//!
//! Every BOSSWAVE entity is named by its Ed25519 verifying key. DOTs, entity
//! descriptors and message origins are all signed with this scheme.
//!
//! ## Security Properties
//!
//! - Deterministic nonces (no RNG at signing time)
//! - Strict verification: small-order keys and non-canonical `S` are rejected
//! - Malformed keys or signatures never panic, they simply fail to verify

use std::fmt;

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use rand::{CryptoRng, RngCore};
use subtle::ConstantTimeEq;

use crate::CryptoError;

/// Length of an Ed25519 secret seed.
pub const ED25519_SECRET_LEN: usize = 32;
/// Length of an Ed25519 verifying key.
pub const ED25519_PUBLIC_LEN: usize = 32;
/// Length of an Ed25519 signature.
pub const ED25519_SIGNATURE_LEN: usize = 64;

/// Ed25519 public key (32 bytes, compressed Edwards point).
#[derive(Clone, Copy, Debug)]
pub struct Ed25519PublicKey([u8; ED25519_PUBLIC_LEN]);

impl Ed25519PublicKey {
    /// Create from bytes, checking that they decode to a curve point.
    pub fn from_bytes(bytes: [u8; ED25519_PUBLIC_LEN]) -> Result<Self, CryptoError> {
        VerifyingKey::from_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Create from a slice of unknown length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        let array: [u8; ED25519_PUBLIC_LEN] =
            bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                expected: ED25519_PUBLIC_LEN,
                actual: bytes.len(),
            })?;
        Self::from_bytes(array)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; ED25519_PUBLIC_LEN] {
        &self.0
    }

    /// Verify a signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
        verifying_key.verify_strict(message, &sig).is_ok()
    }
}

impl PartialEq for Ed25519PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Ed25519PublicKey {}

/// Ed25519 signature (64 bytes).
#[derive(Clone, Copy, Debug)]
pub struct Ed25519Signature([u8; ED25519_SIGNATURE_LEN]);

impl Ed25519Signature {
    /// Create from bytes.
    pub fn from_bytes(bytes: [u8; ED25519_SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Create from a slice of unknown length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        bytes
            .try_into()
            .map(Self)
            .map_err(|_| CryptoError::InvalidSignature)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; ED25519_SIGNATURE_LEN] {
        &self.0
    }
}

impl PartialEq for Ed25519Signature {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for Ed25519Signature {}

/// Ed25519 keypair.
///
/// The secret half is wiped on drop by `ed25519-dalek`.
pub struct Ed25519KeyPair {
    signing_key: SigningKey,
}

impl Ed25519KeyPair {
    /// Generate a keypair from a 32-byte seed drawn from `rng`.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        Self {
            signing_key: SigningKey::generate(rng),
        }
    }

    /// Create from secret seed (32 bytes).
    pub fn from_seed(seed: [u8; ED25519_SECRET_LEN]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&seed),
        }
    }

    /// Create from a seed and the verifying key it is claimed to produce.
    pub fn from_keypair_bytes(
        secret: &[u8; ED25519_SECRET_LEN],
        public: &[u8; ED25519_PUBLIC_LEN],
    ) -> Result<Self, CryptoError> {
        let mut joined = [0u8; ED25519_SECRET_LEN + ED25519_PUBLIC_LEN];
        joined[..ED25519_SECRET_LEN].copy_from_slice(secret);
        joined[ED25519_SECRET_LEN..].copy_from_slice(public);
        let result = SigningKey::from_keypair_bytes(&joined);
        zeroize::Zeroize::zeroize(&mut joined);
        result
            .map(|signing_key| Self { signing_key })
            .map_err(|_| CryptoError::KeyMismatch)
    }

    /// Get public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign a message (deterministic - no RNG needed).
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.signing_key.sign(message).to_bytes())
    }

    /// Get secret seed (for serialization).
    pub fn to_seed(&self) -> [u8; ED25519_SECRET_LEN] {
        self.signing_key.to_bytes()
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.signing_key
    }
}

impl fmt::Debug for Ed25519KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Generate a fresh `(sk, vk)` pair.
pub fn generate<R: RngCore + CryptoRng>(
    rng: &mut R,
) -> ([u8; ED25519_SECRET_LEN], [u8; ED25519_PUBLIC_LEN]) {
    let keypair = Ed25519KeyPair::generate(rng);
    (keypair.to_seed(), *keypair.public_key().as_bytes())
}

/// Sign `message` with `sk`, refusing if `vk` is not the matching verifying key.
pub fn sign(
    sk: &[u8; ED25519_SECRET_LEN],
    vk: &[u8; ED25519_PUBLIC_LEN],
    message: &[u8],
) -> Result<Ed25519Signature, CryptoError> {
    Ed25519KeyPair::from_keypair_bytes(sk, vk).map(|keypair| keypair.sign(message))
}

/// Verify `signature` over `message` under `vk`.
///
/// Wrong lengths, off-curve keys and malformed signatures all yield `false`.
pub fn verify(vk: &[u8], signature: &[u8], message: &[u8]) -> bool {
    let Ok(public_key) = Ed25519PublicKey::from_slice(vk) else {
        tracing::trace!(len = vk.len(), "rejecting malformed ed25519 verifying key");
        return false;
    };
    let Ok(signature) = Ed25519Signature::from_slice(signature) else {
        return false;
    };
    public_key.verify(message, &signature)
}
