use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProtoError {
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),
}
