//! BLS12-381 Aggregate Signatures
//!
//! Aggregates the signatures covering a chain of DOTs into one group element.
//!
//! Uses blst's `min_sig` variant:
//! - Signatures are on G1 (96 bytes uncompressed, 48 bytes compressed)
//! - Public keys are on G2 (96 bytes compressed)
//!
//! Each signer signs a different message (the DOT it grants), so aggregate
//! verification is the multi-message pairing check
//! `e(σ, g) = Π e(H(mᵢ), pkᵢ)`. Messages MUST be pairwise distinct; a
//! repeated message makes verification fail before any pairing is computed.

use std::collections::HashSet;
use std::fmt;

use blst::min_sig::{AggregateSignature, PublicKey, SecretKey, Signature};
use blst::BLST_ERROR;
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha256};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::CryptoError;

/// Domain separation tag: hash-to-G1, basic scheme (distinct messages).
const DST: &[u8] = b"BLS_SIG_BLS12381G1_XMD:SHA-256_SSWU_RO_NUL_";

/// Length of a BLS secret scalar.
pub const BLS_SECRET_LEN: usize = 32;
/// Length of a compressed G2 public key.
pub const BLS_PUBLIC_LEN: usize = 96;
/// Length of an uncompressed G1 signature.
pub const BLS_SIGNATURE_LEN: usize = 96;
/// Length of a compressed (x-only) G1 signature.
pub const BLS_COMPRESSED_LEN: usize = 48;

/// Sign-of-y flag in the first byte of a compressed G1 encoding.
const Y_SIGN_FLAG: u8 = 0x20;

/// BLS public key (`g·x` in G2).
#[derive(Clone, Debug)]
pub struct BlsPublicKey(PublicKey);

impl BlsPublicKey {
    /// Create from 96-byte compressed representation, validating the point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let key = PublicKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        key.validate().map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(key))
    }

    /// Serialize to 96-byte compressed form.
    pub fn to_bytes(&self) -> [u8; BLS_PUBLIC_LEN] {
        self.0.to_bytes()
    }

    /// Verify a single signature against this public key.
    pub fn verify(&self, message: &[u8], signature: &BlsSignature) -> bool {
        signature.0.verify(true, message, DST, &[], &self.0, true) == BLST_ERROR::BLST_SUCCESS
    }
}

impl PartialEq for BlsPublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes().ct_eq(&other.to_bytes()).into()
    }
}

impl Eq for BlsPublicKey {}

/// BLS signature (`x·H(m)` in G1).
#[derive(Clone, Debug)]
pub struct BlsSignature(Signature);

impl BlsSignature {
    /// Create from either the 96-byte uncompressed or 48-byte compressed form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        Signature::from_bytes(bytes)
            .map(BlsSignature)
            .map_err(|_| CryptoError::InvalidSignature)
    }

    /// Serialize to the 96-byte uncompressed form.
    pub fn to_bytes(&self) -> [u8; BLS_SIGNATURE_LEN] {
        self.0.serialize()
    }

    /// Serialize to the 48-byte compressed form (x plus sign-of-y flag).
    pub fn to_compressed(&self) -> [u8; BLS_COMPRESSED_LEN] {
        self.0.to_bytes()
    }
}

impl PartialEq for BlsSignature {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes().ct_eq(&other.to_bytes()).into()
    }
}

impl Eq for BlsSignature {}

/// A signature reduced to its x-coordinate; the sign of y is discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct XOnlyBlsSignature([u8; BLS_COMPRESSED_LEN]);

impl XOnlyBlsSignature {
    /// Wrap raw bytes (the y-sign flag is cleared).
    pub fn from_bytes(mut bytes: [u8; BLS_COMPRESSED_LEN]) -> Self {
        bytes[0] &= !Y_SIGN_FLAG;
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; BLS_COMPRESSED_LEN] {
        &self.0
    }

    /// The two points sharing this x-coordinate, `σ` and `-σ`.
    fn candidates(&self) -> [[u8; BLS_COMPRESSED_LEN]; 2] {
        let mut positive = self.0;
        let mut negative = self.0;
        positive[0] &= !Y_SIGN_FLAG;
        negative[0] |= Y_SIGN_FLAG;
        [positive, negative]
    }
}

/// BLS key pair for signing operations.
pub struct BlsKeyPair {
    secret: SecretKey,
    public: BlsPublicKey,
}

impl BlsKeyPair {
    /// Generate a new key pair from 32 bytes of key material drawn from `rng`.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self, CryptoError> {
        let mut ikm = [0u8; 32];
        rng.fill_bytes(&mut ikm);
        let secret = SecretKey::key_gen(&ikm, &[]);
        ikm.zeroize();
        let secret =
            secret.map_err(|e| CryptoError::KeyGenerationFailed(format!("{e:?}")))?;
        let public = BlsPublicKey(secret.sk_to_pk());
        Ok(Self { secret, public })
    }

    /// Create from existing secret key bytes.
    pub fn from_secret_bytes(bytes: &[u8; BLS_SECRET_LEN]) -> Result<Self, CryptoError> {
        let secret = SecretKey::from_bytes(bytes).map_err(|_| CryptoError::InvalidPrivateKey)?;
        let public = BlsPublicKey(secret.sk_to_pk());
        Ok(Self { secret, public })
    }

    /// Sign a message.
    pub fn sign(&self, message: &[u8]) -> BlsSignature {
        BlsSignature(self.secret.sign(message, DST, &[]))
    }

    /// Get the public key.
    pub fn public_key(&self) -> BlsPublicKey {
        self.public.clone()
    }

    /// Get the secret key bytes.
    pub fn secret_bytes(&self) -> [u8; BLS_SECRET_LEN] {
        self.secret.to_bytes()
    }
}

impl fmt::Debug for BlsKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlsKeyPair")
            .field("public", &hex::encode(&self.public.to_bytes()[..4]))
            .finish_non_exhaustive()
    }
}

/// Sum signatures in G1.
pub fn aggregate(signatures: &[BlsSignature]) -> Result<BlsSignature, CryptoError> {
    if signatures.is_empty() {
        return Err(CryptoError::InvalidInput("empty signature list".into()));
    }
    let refs: Vec<&Signature> = signatures.iter().map(|s| &s.0).collect();
    AggregateSignature::aggregate(&refs, true)
        .map(|agg| BlsSignature(agg.to_signature()))
        .map_err(|_| CryptoError::AggregationFailed)
}

/// Retain only the x-coordinate of `signature`.
pub fn compress(signature: &BlsSignature) -> XOnlyBlsSignature {
    XOnlyBlsSignature::from_bytes(signature.to_compressed())
}

/// Whether all messages are pairwise distinct, compared by SHA-256.
fn messages_distinct(messages: &[&[u8]]) -> bool {
    let mut seen = HashSet::with_capacity(messages.len());
    messages
        .iter()
        .all(|m| seen.insert(<[u8; 32]>::from(Sha256::digest(m))))
}

/// Shape and distinctness checks shared by both aggregate verifiers.
fn precheck(public_keys: &[BlsPublicKey], messages: &[&[u8]]) -> bool {
    if public_keys.is_empty() || public_keys.len() != messages.len() {
        tracing::debug!(
            keys = public_keys.len(),
            messages = messages.len(),
            "aggregate verification with mismatched inputs"
        );
        return false;
    }
    if !messages_distinct(messages) {
        tracing::debug!(
            messages = messages.len(),
            "aggregate verification with duplicate messages"
        );
        return false;
    }
    true
}

fn pairing_check(signature: &Signature, public_keys: &[BlsPublicKey], messages: &[&[u8]]) -> bool {
    let pk_refs: Vec<&PublicKey> = public_keys.iter().map(|pk| &pk.0).collect();
    signature.aggregate_verify(true, messages, DST, &pk_refs, true) == BLST_ERROR::BLST_SUCCESS
}

/// Verify an aggregate signature over `(public_keys[i], messages[i])` pairs.
///
/// Returns `false` if the lists are empty or of different lengths, or if any
/// two messages are equal.
pub fn verify_aggregate(
    public_keys: &[BlsPublicKey],
    messages: &[&[u8]],
    signature: &BlsSignature,
) -> bool {
    precheck(public_keys, messages) && pairing_check(&signature.0, public_keys, messages)
}

/// Verify an x-only aggregate signature.
///
/// Both `σ` and `-σ` are tested and the outcomes combined without branching
/// on which one succeeded.
pub fn verify_compressed(
    public_keys: &[BlsPublicKey],
    messages: &[&[u8]],
    signature: &XOnlyBlsSignature,
) -> bool {
    if !precheck(public_keys, messages) {
        return false;
    }
    let mut accepted = Choice::from(0u8);
    for candidate in signature.candidates() {
        let ok = match Signature::uncompress(&candidate) {
            Ok(point) => pairing_check(&point, public_keys, messages),
            Err(_) => false,
        };
        accepted |= Choice::from(u8::from(ok));
    }
    accepted.into()
}
