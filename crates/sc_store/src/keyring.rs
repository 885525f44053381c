//! Keyring: get-or-create semantics over the key store.
//!
//! Exactly one identity keypair exists per installation.  The private
//! half under `priv` is authoritative; the public half is re-derived from
//! it on every load, and the `pub` entry is only the base64 announcement
//! copy handed to the signup flow.
//!
//! First-time creation is guarded twice: a process-level mutex serialises
//! concurrent callers, and the store's atomic create-if-absent settles
//! any cross-process race — the loser adopts the winner's bytes, so two
//! half-persisted keypairs can never coexist.

use std::sync::Arc;

use tokio::sync::Mutex;

use sc_crypto::IdentityKeypair;

use crate::error::StoreError;
use crate::kv::KeyStore;

/// Store entry holding the raw 32-byte private key.
pub const PRIV_KEY: &str = "priv";
/// Store entry holding the announced public key as base64 text.
pub const PUB_KEY: &str = "pub";

/// Keypair manager.  Holds its KeyStore handle explicitly — no ambient
/// singleton.  Clone to share across tasks.
#[derive(Clone)]
pub struct Keyring {
    store: KeyStore,
    init_lock: Arc<Mutex<()>>,
}

impl Keyring {
    pub fn new(store: KeyStore) -> Self {
        Self { store, init_lock: Arc::new(Mutex::new(())) }
    }

    /// Return the stored keypair, creating and persisting one on first
    /// call.  Idempotent after the first success: every later call
    /// returns byte-identical keys with no side effects.
    pub async fn get_or_create_keypair(&self) -> Result<IdentityKeypair, StoreError> {
        if let Some(stored) = self.store.get(PRIV_KEY).await? {
            return Ok(IdentityKeypair::from_bytes(&stored)?);
        }

        let _guard = self.init_lock.lock().await;

        // Re-check under the lock: another caller may have won the race
        // while we waited.
        if let Some(stored) = self.store.get(PRIV_KEY).await? {
            return Ok(IdentityKeypair::from_bytes(&stored)?);
        }

        let fresh = IdentityKeypair::generate();
        let stored = self
            .store
            .set_if_absent(PRIV_KEY, fresh.secret_bytes())
            .await?;
        let keypair = IdentityKeypair::from_bytes(&stored)?;
        self.store
            .set_if_absent(PUB_KEY, keypair.public_b64().as_bytes())
            .await?;

        tracing::info!(
            target: "sc_store",
            event = "keypair_created",
            public_key = %keypair.public_b64()
        );
        Ok(keypair)
    }

    /// Convenience: only the private half, same guarantees.
    pub async fn private_key(&self) -> Result<[u8; 32], StoreError> {
        Ok(*self.get_or_create_keypair().await?.secret_bytes())
    }
}
