//! sc_store — Durable local key storage for SecureChat
//!
//! # Storage strategy
//! A single SQLite `kv` table scoped to the installation's profile
//! directory holds the identity key material under two well-known names,
//! `pub` and `priv`.  Storage is local-only; nothing here touches the
//! network.  If the database cannot be read or written, every operation
//! fails with `StoreError::Unavailable` — callers must NOT fall back to
//! an in-memory keypair, which would desynchronise from the public key
//! already announced to peers.
//!
//! # Migration
//! SQLx migrations in `migrations/` are run on first open.

pub mod error;
pub mod keyring;
pub mod kv;

pub use error::StoreError;
pub use keyring::Keyring;
pub use kv::KeyStore;
