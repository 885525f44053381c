//! Pairwise shared-secret derivation
//!
//! X25519 Diffie-Hellman over (our private key, their public key), then
//! HKDF-SHA256 with a fixed protocol salt so the result is a uniform
//! 32-byte AEAD key.  The raw DH output is symmetric, and salt and info
//! are constants, so both sides of a conversation derive the same key:
//!
//!   derive(a_priv, b_pub) == derive(b_priv, a_pub)
//!
//! The secret is never persisted; callers recompute it per operation.

use hkdf::Hkdf;
use sha2::Sha256;
use x25519_dalek::{PublicKey as X25519Public, StaticSecret};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::CryptoError;
use crate::keys::{IdentityKeypair, PublicKey, KEY_LEN};

const HKDF_SALT: &[u8] = b"securechat-e2ee-v1";
const HKDF_INFO: &[u8] = b"envelope-key";

/// 32-byte pairwise AEAD key.  Zeroized on drop, never serialized.
#[derive(ZeroizeOnDrop)]
pub struct SharedSecret([u8; KEY_LEN]);

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

// No Clone/Debug — prevents accidental leakage through logs or copies.

/// Derive the pairwise shared secret between our keypair and a peer key.
pub fn derive_shared(local: &IdentityKeypair, remote: &PublicKey) -> Result<SharedSecret, CryptoError> {
    let secret = StaticSecret::from(*local.secret_bytes());
    let their_pub = X25519Public::from(*remote.as_bytes());
    let mut dh = secret.diffie_hellman(&their_pub).to_bytes();

    let mut key = [0u8; KEY_LEN];
    let hk = Hkdf::<Sha256>::new(Some(HKDF_SALT), &dh);
    let expanded = hk
        .expand(HKDF_INFO, &mut key)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()));
    dh.zeroize();
    expanded?;

    Ok(SharedSecret(key))
}
