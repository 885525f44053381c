//! Encrypted message envelope — what the storage server sees.
//!
//! The server is a DUMB STORE: it only sees
//!   - ciphertext  (opaque, base64)
//!   - nonce       (base64, 24 bytes decoded)
//!   - sender_pub  (sender's announced public key, base64)
//!   - scheme      (algorithm tag)
//!   - routing metadata (sender id, timestamp, ephemeral expiry)
//!
//! It can never see the plaintext.  Envelopes are immutable once created;
//! decryption never mutates them.

use serde::{Deserialize, Serialize};

/// The single algorithm combination this implementation speaks:
/// X25519 shared secret + XChaCha20-Poly1305 AEAD.
pub const SCHEME: &str = "x25519-xchacha20poly1305";

/// On-wire envelope — one encrypted message plus decrypt/render metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// AEAD ciphertext + tag, base64.
    pub ciphertext: String,

    /// 24-byte AEAD nonce, base64.  Unique per message under a given
    /// shared secret — reuse breaks confidentiality.
    pub nonce: String,

    /// Sender's identity public key, base64.  The recipient derives the
    /// shared secret from this and their own private key.
    pub sender_pub: String,

    /// Algorithm tag; decryptors ignore envelopes with an unknown tag
    /// rather than attempting the wrong primitive.
    pub scheme: String,

    /// Sender's user ID, attached by the storage layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,

    /// Send time in unix milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_millis: Option<i64>,

    /// Sender opted in to self-expiry.
    #[serde(default, skip_serializing_if = "is_false")]
    pub ephemeral: bool,

    /// Expiry instant in unix milliseconds; only meaningful when
    /// `ephemeral` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at_millis: Option<i64>,
}

fn is_false(b: &bool) -> bool {
    !*b
}
