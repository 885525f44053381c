//! Encryption engine: the encrypt/decrypt surface exposed to the
//! presentation layer.
//!
//! Encryption derives the pairwise shared secret fresh per call, uses a
//! random 24-byte nonce, and packages everything as an `Envelope`.
//!
//! Decryption is deliberately silent about WHY it fails: wrong key,
//! tampered ciphertext, corrupted nonce, and "not for me" all collapse
//! into `None` so the caller learns nothing an oracle could exploit.
//! Failures are scoped to the single message — one corrupt envelope in a
//! conversation never aborts rendering of the rest.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use sc_crypto::{aead, shared::derive_shared, PublicKey};
use sc_proto::{codec, ephemeral, Envelope, SCHEME};
use sc_store::Keyring;

use crate::error::EngineError;

/// One successfully decrypted inbound message, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecryptedMessage {
    pub text: String,
    pub from: Option<String>,
    pub timestamp_millis: Option<i64>,
    /// Display lifetime left, `None` when the message never expires.
    pub remaining_seconds: Option<i64>,
}

/// Messaging engine bound to one local identity.  Clone to share.
#[derive(Clone)]
pub struct Engine {
    keyring: Keyring,
}

impl Engine {
    pub fn new(keyring: Keyring) -> Self {
        Self { keyring }
    }

    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    /// Encrypt `plaintext` for the peer announcing `recipient_pub_b64`.
    ///
    /// `ephemeral_ttl_secs` opts the message into self-expiry; it must be
    /// positive.  Lazy key creation on first call is the only side effect.
    pub async fn encrypt_for_recipient(
        &self,
        plaintext: &str,
        recipient_pub_b64: &str,
        ephemeral_ttl_secs: Option<i64>,
    ) -> Result<Envelope, EngineError> {
        let recipient = PublicKey::from_b64(recipient_pub_b64)
            .map_err(|e| EngineError::InvalidKey(e.to_string()))?;
        if let Some(ttl) = ephemeral_ttl_secs {
            if ttl <= 0 {
                return Err(EngineError::InvalidTtl(ttl));
            }
        }

        let keypair = self.keyring.get_or_create_keypair().await?;
        let secret = derive_shared(&keypair, &recipient)?;
        let nonce = aead::generate_nonce();
        let ciphertext = aead::encrypt(secret.as_bytes(), &nonce, plaintext.as_bytes())?;

        let now = Utc::now().timestamp_millis();
        Ok(Envelope {
            ciphertext: STANDARD.encode(&ciphertext),
            nonce: STANDARD.encode(nonce),
            sender_pub: keypair.public_b64(),
            scheme: SCHEME.to_string(),
            from: None,
            timestamp_millis: Some(now),
            ephemeral: ephemeral_ttl_secs.is_some(),
            expires_at_millis: ephemeral_ttl_secs.map(|ttl| ephemeral::expires_at(now, ttl)),
        })
    }

    /// Attempt to decrypt one envelope.  `None` means "cannot decrypt" —
    /// never an error, never a panic, and never a reason the caller can
    /// distinguish beyond the logged warning.
    pub async fn decrypt_message(&self, envelope: &Envelope) -> Option<String> {
        if envelope.scheme != SCHEME {
            tracing::warn!(
                target: "sc_client",
                event = "skip_unknown_scheme",
                scheme = %envelope.scheme
            );
            return None;
        }

        let parts = match codec::binary_parts(envelope) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(target: "sc_client", event = "skip_malformed_envelope", error = %e);
                return None;
            }
        };

        let keypair = match self.keyring.get_or_create_keypair().await {
            Ok(kp) => kp,
            Err(e) => {
                tracing::error!(target: "sc_client", event = "keyring_unavailable", error = %e);
                return None;
            }
        };

        let secret = match derive_shared(&keypair, &parts.sender_pub) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(target: "sc_client", event = "shared_secret_failed", error = %e);
                return None;
            }
        };

        let plaintext = match aead::decrypt(secret.as_bytes(), &parts.nonce, &parts.ciphertext) {
            Ok(p) => p,
            Err(_) => {
                tracing::warn!(target: "sc_client", event = "decrypt_failed");
                return None;
            }
        };

        match String::from_utf8(plaintext.to_vec()) {
            Ok(text) => Some(text),
            Err(_) => {
                tracing::warn!(target: "sc_client", event = "decrypt_not_utf8");
                None
            }
        }
    }

    /// Decrypt a pre-rendered JSON array of envelope objects.  Each entry
    /// is handled independently: malformed or undecryptable entries are
    /// logged and skipped, expired ephemeral messages are dropped, and
    /// the rest come back in document order.
    pub async fn decrypt_batch(&self, messages_json: &str) -> Vec<DecryptedMessage> {
        let entries: Vec<serde_json::Value> = match serde_json::from_str(messages_json) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(target: "sc_client", event = "inbound_batch_unparsable", error = %e);
                return Vec::new();
            }
        };

        let now = Utc::now().timestamp_millis();
        let mut out = Vec::new();
        for entry in entries {
            let envelope: Envelope = match serde_json::from_value(entry) {
                Ok(e) => e,
                Err(e) => {
                    tracing::warn!(target: "sc_client", event = "skip_malformed_envelope", error = %e);
                    continue;
                }
            };
            if ephemeral::is_expired(&envelope, now) {
                tracing::debug!(target: "sc_client", event = "skip_expired_message");
                continue;
            }
            let Some(text) = self.decrypt_message(&envelope).await else {
                continue;
            };
            out.push(DecryptedMessage {
                text,
                from: envelope.from.clone(),
                timestamp_millis: envelope.timestamp_millis,
                remaining_seconds: ephemeral::remaining_seconds(&envelope, now),
            });
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sc_store::KeyStore;

    async fn engine() -> Engine {
        let store = KeyStore::open_in_memory().await.expect("open store");
        Engine::new(Keyring::new(store))
    }

    async fn peer_pair() -> (Engine, Engine, String, String) {
        let alice = engine().await;
        let bob = engine().await;
        let alice_pub = alice
            .keyring()
            .get_or_create_keypair()
            .await
            .expect("alice keys")
            .public_b64();
        let bob_pub = bob
            .keyring()
            .get_or_create_keypair()
            .await
            .expect("bob keys")
            .public_b64();
        (alice, bob, alice_pub, bob_pub)
    }

    #[tokio::test]
    async fn roundtrip_between_peers() {
        let (alice, bob, _, bob_pub) = peer_pair().await;
        for plaintext in ["hello bob", "", "héllo wörld — 你好 🌍"] {
            let envelope = alice
                .encrypt_for_recipient(plaintext, &bob_pub, None)
                .await
                .expect("encrypt");
            assert_eq!(bob.decrypt_message(&envelope).await.as_deref(), Some(plaintext));
        }
    }

    #[tokio::test]
    async fn envelope_carries_sender_key_and_scheme() {
        let (alice, _, alice_pub, bob_pub) = peer_pair().await;
        let envelope = alice
            .encrypt_for_recipient("hi", &bob_pub, None)
            .await
            .expect("encrypt");
        assert_eq!(envelope.sender_pub, alice_pub);
        assert_eq!(envelope.scheme, SCHEME);
        assert!(!envelope.ephemeral);
        assert_eq!(envelope.expires_at_millis, None);
    }

    #[tokio::test]
    async fn rejects_malformed_recipient_key() {
        let alice = engine().await;
        let short = STANDARD.encode([0u8; 8]);
        assert!(matches!(
            alice.encrypt_for_recipient("hi", &short, None).await,
            Err(EngineError::InvalidKey(_))
        ));
        assert!(matches!(
            alice.encrypt_for_recipient("hi", "not-base64!!!", None).await,
            Err(EngineError::InvalidKey(_))
        ));
    }

    #[tokio::test]
    async fn rejects_non_positive_ttl() {
        let (alice, _, _, bob_pub) = peer_pair().await;
        assert!(matches!(
            alice.encrypt_for_recipient("hi", &bob_pub, Some(0)).await,
            Err(EngineError::InvalidTtl(0))
        ));
    }

    #[tokio::test]
    async fn tampered_ciphertext_and_nonce_return_none() {
        let (alice, bob, _, bob_pub) = peer_pair().await;
        let envelope = alice
            .encrypt_for_recipient("attack at dawn", &bob_pub, None)
            .await
            .expect("encrypt");

        let mut ct = STANDARD.decode(&envelope.ciphertext).expect("ct b64");
        ct[0] ^= 0x01;
        let mut tampered = envelope.clone();
        tampered.ciphertext = STANDARD.encode(&ct);
        assert_eq!(bob.decrypt_message(&tampered).await, None);

        let mut nonce = STANDARD.decode(&envelope.nonce).expect("nonce b64");
        nonce[23] ^= 0x80;
        let mut tampered = envelope.clone();
        tampered.nonce = STANDARD.encode(&nonce);
        assert_eq!(bob.decrypt_message(&tampered).await, None);
    }

    #[tokio::test]
    async fn wrong_recipient_cannot_decrypt() {
        let (alice, _, _, bob_pub) = peer_pair().await;
        let carol = engine().await;
        let envelope = alice
            .encrypt_for_recipient("for bob only", &bob_pub, None)
            .await
            .expect("encrypt");
        assert_eq!(carol.decrypt_message(&envelope).await, None);
    }

    #[tokio::test]
    async fn nonce_and_ciphertext_unique_per_message() {
        let (alice, _, _, bob_pub) = peer_pair().await;
        let a = alice
            .encrypt_for_recipient("same text", &bob_pub, None)
            .await
            .expect("first");
        let b = alice
            .encrypt_for_recipient("same text", &bob_pub, None)
            .await
            .expect("second");
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[tokio::test]
    async fn unknown_scheme_is_ignored() {
        let (alice, bob, _, bob_pub) = peer_pair().await;
        let mut envelope = alice
            .encrypt_for_recipient("hi", &bob_pub, None)
            .await
            .expect("encrypt");
        envelope.scheme = "rot13-supreme".into();
        assert_eq!(bob.decrypt_message(&envelope).await, None);
    }

    #[tokio::test]
    async fn ephemeral_envelope_carries_expiry() {
        let (alice, _, _, bob_pub) = peer_pair().await;
        let envelope = alice
            .encrypt_for_recipient("gone soon", &bob_pub, Some(10))
            .await
            .expect("encrypt");
        assert!(envelope.ephemeral);
        let sent = envelope.timestamp_millis.expect("timestamp");
        assert_eq!(envelope.expires_at_millis, Some(sent + 10_000));
        let remaining = ephemeral::remaining_seconds(&envelope, sent).expect("remaining");
        assert_eq!(remaining, 10);
    }

    #[tokio::test]
    async fn batch_skips_bad_entries_and_keeps_good_ones() {
        let (alice, bob, _, bob_pub) = peer_pair().await;
        let good = alice
            .encrypt_for_recipient("still here", &bob_pub, None)
            .await
            .expect("encrypt");

        let mut corrupt = good.clone();
        corrupt.nonce = "%%%not-base64%%%".into();

        let batch = serde_json::to_string(&vec![
            serde_json::to_value(&good).expect("good json"),
            serde_json::to_value(&corrupt).expect("corrupt json"),
            serde_json::json!({ "nonce": "AAAA", "sender_pub": "AAAA", "scheme": SCHEME }),
            serde_json::json!("not even an object"),
        ])
        .expect("batch json");

        let messages = bob.decrypt_batch(&batch).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "still here");
    }

    #[tokio::test]
    async fn batch_drops_expired_ephemeral_messages() {
        let (alice, bob, _, bob_pub) = peer_pair().await;
        let mut expired = alice
            .encrypt_for_recipient("too late", &bob_pub, Some(1))
            .await
            .expect("encrypt");
        expired.expires_at_millis = Some(Utc::now().timestamp_millis() - 5_000);

        let live = alice
            .encrypt_for_recipient("fresh", &bob_pub, Some(3600))
            .await
            .expect("encrypt");

        let batch = serde_json::to_string(&vec![&expired, &live]).expect("batch json");
        let messages = bob.decrypt_batch(&batch).await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].text, "fresh");
        assert!(messages[0].remaining_seconds.expect("countdown") > 3_590);
    }
}
