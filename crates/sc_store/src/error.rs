use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Key storage unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Stored key material is invalid: {0}")]
    Crypto(#[from] sc_crypto::CryptoError),
}
