use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid recipient key: {0}")]
    InvalidKey(String),

    #[error("Ephemeral TTL must be positive, got {0}")]
    InvalidTtl(i64),

    #[error("Encryption failed: {0}")]
    Crypto(#[from] sc_crypto::CryptoError),

    #[error(transparent)]
    Store(#[from] sc_store::StoreError),

    #[error(transparent)]
    Proto(#[from] sc_proto::ProtoError),

    #[error("Send failed ({status}): {body}")]
    SendFailed { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
