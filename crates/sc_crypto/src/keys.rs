//! Identity key management
//!
//! Each installation has exactly ONE long-term X25519 keypair.  The public
//! half is announced to peers (base64 on the wire); the private half never
//! leaves local storage.
//!
//! Key-stability policy (NON-NEGOTIABLE)
//! -------------------------------------
//! A valid stored keypair is never silently regenerated: remote peers keep
//! encrypting to the announced public key, so replacing it would orphan
//! every existing conversation.  Enforcement lives in `sc_store::keyring`;
//! this module only produces and restores the key material.

use base64::{engine::general_purpose::STANDARD, Engine};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey as X25519Public, StaticSecret};
use zeroize::ZeroizeOnDrop;

use crate::error::CryptoError;

/// X25519 keys are 32 bytes, public and private alike.
pub const KEY_LEN: usize = 32;

/// 32-byte X25519 public key, standard base64 on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicKey(pub [u8; KEY_LEN]);

impl PublicKey {
    pub fn to_b64(&self) -> String {
        STANDARD.encode(self.0)
    }

    pub fn from_b64(s: &str) -> Result<Self, CryptoError> {
        let bytes = STANDARD.decode(s)?;
        let arr: [u8; KEY_LEN] = bytes.try_into().map_err(|b: Vec<u8>| {
            CryptoError::InvalidKey(format!("Public key must be {KEY_LEN} bytes, got {}", b.len()))
        })?;
        Ok(Self(arr))
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Long-term identity keypair.  Drop clears the private half via ZeroizeOnDrop.
#[derive(ZeroizeOnDrop)]
pub struct IdentityKeypair {
    #[zeroize(skip)]
    public: PublicKey,
    secret_bytes: [u8; KEY_LEN],
}

impl IdentityKeypair {
    /// Generate a fresh keypair from the OS CSPRNG.
    pub fn generate() -> Self {
        let secret = StaticSecret::random_from_rng(OsRng);
        let public = PublicKey(X25519Public::from(&secret).to_bytes());
        Self { public, secret_bytes: secret.to_bytes() }
    }

    /// Restore a keypair from the stored 32-byte private half.  The public
    /// half is re-derived, so the two can never disagree.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; KEY_LEN] = bytes.try_into().map_err(|_| {
            CryptoError::InvalidKey(format!(
                "Private key must be {KEY_LEN} bytes, got {}",
                bytes.len()
            ))
        })?;
        let secret = StaticSecret::from(arr);
        let public = PublicKey(X25519Public::from(&secret).to_bytes());
        Ok(Self { public, secret_bytes: arr })
    }

    pub fn public(&self) -> &PublicKey {
        &self.public
    }

    /// Export the public key in base64 for announcement.
    pub fn public_b64(&self) -> String {
        self.public.to_b64()
    }

    pub fn secret_bytes(&self) -> &[u8; KEY_LEN] {
        &self.secret_bytes
    }
}
