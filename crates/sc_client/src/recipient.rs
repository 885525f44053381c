//! Recipient public-key metadata.
//!
//! The page supplies the peer's announced public key as base64 text plus
//! a format tag.  Only `curve25519-base64` is recognised; an unknown tag
//! logs a warning but the key is still attempted, treating the tag as
//! best-effort forward compatibility rather than a hard error.

use sc_crypto::{CryptoError, PublicKey};

/// The only key format this implementation produces or consumes.
pub const SUPPORTED_KEY_FORMAT: &str = "curve25519-base64";

/// A peer's announced public key plus its declared format.
#[derive(Debug, Clone)]
pub struct RecipientKey {
    pub public_key_b64: String,
    pub format: String,
}

impl RecipientKey {
    pub fn new(public_key_b64: impl Into<String>, format: impl Into<String>) -> Self {
        let key = Self { public_key_b64: public_key_b64.into(), format: format.into() };
        if key.format != SUPPORTED_KEY_FORMAT {
            tracing::warn!(
                target: "sc_client",
                event = "unexpected_recipient_key_format",
                format = %key.format
            );
        }
        key
    }

    /// Decode the announced key, enforcing base64 validity and length.
    pub fn decode(&self) -> Result<PublicKey, CryptoError> {
        PublicKey::from_b64(&self.public_key_b64)
    }
}
