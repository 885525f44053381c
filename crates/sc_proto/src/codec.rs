//! Wire codec — JSON serialisation with eager structural validation.
//!
//! Inbound envelopes come from a loosely-typed transport, so everything
//! is checked at this boundary: the JSON must match the Envelope schema
//! and every binary field must decode as base64 of the expected shape.
//! Anything else is `MalformedEnvelope`; callers skip the message and
//! keep processing the batch.
//!
//! Round-trip law: `decode(encode(e)) == e` for every valid envelope.

use base64::{engine::general_purpose::STANDARD, Engine};

use sc_crypto::aead::NONCE_LEN;
use sc_crypto::keys::PublicKey;

use crate::envelope::Envelope;
use crate::error::ProtoError;

/// Decoded binary fields of a validated envelope.
pub struct BinaryParts {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
    pub sender_pub: PublicKey,
}

/// Serialise an envelope to its JSON wire form.
pub fn encode(envelope: &Envelope) -> Result<String, ProtoError> {
    serde_json::to_string(envelope).map_err(|e| ProtoError::MalformedEnvelope(e.to_string()))
}

/// Parse and validate an envelope from its JSON wire form.
pub fn decode(json: &str) -> Result<Envelope, ProtoError> {
    let envelope: Envelope =
        serde_json::from_str(json).map_err(|e| ProtoError::MalformedEnvelope(e.to_string()))?;
    binary_parts(&envelope)?;
    Ok(envelope)
}

/// Decode the binary fields, enforcing base64 validity and fixed lengths.
pub fn binary_parts(envelope: &Envelope) -> Result<BinaryParts, ProtoError> {
    let ciphertext = STANDARD
        .decode(&envelope.ciphertext)
        .map_err(|e| ProtoError::MalformedEnvelope(format!("ciphertext is not base64: {e}")))?;

    let nonce_bytes = STANDARD
        .decode(&envelope.nonce)
        .map_err(|e| ProtoError::MalformedEnvelope(format!("nonce is not base64: {e}")))?;
    let nonce: [u8; NONCE_LEN] = nonce_bytes.try_into().map_err(|b: Vec<u8>| {
        ProtoError::MalformedEnvelope(format!("nonce must be {NONCE_LEN} bytes, got {}", b.len()))
    })?;

    let sender_pub = PublicKey::from_b64(&envelope.sender_pub)
        .map_err(|e| ProtoError::MalformedEnvelope(format!("sender_pub: {e}")))?;

    Ok(BinaryParts { ciphertext, nonce, sender_pub })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::SCHEME;

    fn sample(ephemeral: bool) -> Envelope {
        Envelope {
            ciphertext: STANDARD.encode(b"opaque bytes"),
            nonce: STANDARD.encode([9u8; NONCE_LEN]),
            sender_pub: STANDARD.encode([1u8; 32]),
            scheme: SCHEME.to_string(),
            from: Some("user-a".into()),
            timestamp_millis: Some(1_755_000_000_000),
            ephemeral,
            expires_at_millis: ephemeral.then_some(1_755_000_010_000),
        }
    }

    #[test]
    fn roundtrip_plain() {
        let e = sample(false);
        let decoded = decode(&encode(&e).unwrap()).unwrap();
        assert_eq!(decoded, e);
    }

    #[test]
    fn roundtrip_ephemeral() {
        let e = sample(true);
        let decoded = decode(&encode(&e).unwrap()).unwrap();
        assert_eq!(decoded, e);
    }

    #[test]
    fn absent_optional_fields_stay_absent() {
        let e = Envelope {
            from: None,
            timestamp_millis: None,
            ephemeral: false,
            expires_at_millis: None,
            ..sample(false)
        };
        let json = encode(&e).unwrap();
        assert!(!json.contains("expires_at_millis"));
        assert!(!json.contains("ephemeral"));
        assert_eq!(decode(&json).unwrap(), e);
    }

    #[test]
    fn rejects_non_base64_nonce() {
        let mut e = sample(false);
        e.nonce = "***".into();
        let json = encode(&e).unwrap();
        assert!(matches!(decode(&json), Err(ProtoError::MalformedEnvelope(_))));
    }

    #[test]
    fn rejects_wrong_length_nonce() {
        let mut e = sample(false);
        e.nonce = STANDARD.encode([9u8; 12]);
        let json = encode(&e).unwrap();
        assert!(matches!(decode(&json), Err(ProtoError::MalformedEnvelope(_))));
    }

    #[test]
    fn rejects_missing_ciphertext() {
        let json = r#"{"nonce":"AAAA","sender_pub":"AAAA","scheme":"x"}"#;
        assert!(matches!(decode(json), Err(ProtoError::MalformedEnvelope(_))));
    }

    #[test]
    fn rejects_wrong_length_sender_pub() {
        let mut e = sample(false);
        e.sender_pub = STANDARD.encode([1u8; 16]);
        let json = encode(&e).unwrap();
        assert!(matches!(decode(&json), Err(ProtoError::MalformedEnvelope(_))));
    }
}
