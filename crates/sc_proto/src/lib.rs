//! sc_proto — Wire types and serialisation for SecureChat
//!
//! All on-wire types are serialised to JSON and carry a `scheme` tag so
//! future format changes can coexist without breaking compatibility.
//!
//! # Modules
//! - `envelope`  — Encrypted message envelope (what the server stores)
//! - `codec`     — JSON encode/decode with eager structural validation
//! - `ephemeral` — Self-expiring message policy
//! - `error`     — unified error type

pub mod codec;
pub mod envelope;
pub mod ephemeral;
pub mod error;

pub use envelope::{Envelope, SCHEME};
pub use error::ProtoError;
