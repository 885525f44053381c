//! sc_client — SecureChat messaging engine and transport glue
//!
//! Ties the lower crates together into the surface the presentation
//! layer calls: get-or-create keypair (via `sc_store::Keyring`),
//! encrypt-for-recipient, decrypt-message, and envelope send.
//!
//! # Modules
//! - `engine`    — encrypt/decrypt operations and inbound batch handling
//! - `recipient` — recipient public-key metadata (format tag handling)
//! - `transport` — HTTP envelope delivery (CSRF header + session cookie)
//! - `error`     — unified error type

pub mod engine;
pub mod error;
pub mod recipient;
pub mod transport;

pub use engine::{DecryptedMessage, Engine};
pub use error::EngineError;
pub use recipient::RecipientKey;
pub use transport::Transport;
