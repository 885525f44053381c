//! sc_crypto — SecureChat cryptographic primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Zeroize all secret material on drop.
//! - Public APIs return opaque newtypes to prevent accidental misuse.
//!
//! # Module layout
//! - `keys`   — long-term X25519 identity keypair (one per installation)
//! - `shared` — pairwise shared-secret derivation (X25519 DH + HKDF)
//! - `aead`   — XChaCha20-Poly1305 encrypt/decrypt helpers
//! - `error`  — unified error type

pub mod aead;
pub mod error;
pub mod keys;
pub mod shared;

pub use error::CryptoError;
pub use keys::{IdentityKeypair, PublicKey};
pub use shared::SharedSecret;
