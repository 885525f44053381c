//! HTTP envelope delivery.
//!
//! The storage service persists envelopes per conversation behind a
//! session-authenticated endpoint.  Requests carry the anti-forgery
//! token header plus the session cookie; a non-2xx response is a send
//! failure surfaced to the caller so the UI can keep the unsent input
//! for retry.  No retry policy lives here.

use sc_proto::{codec, Envelope};

use crate::error::EngineError;

/// Transport handle bound to one service base URL.  Clone to share.
#[derive(Clone)]
pub struct Transport {
    client: reqwest::Client,
    base_url: String,
}

impl Transport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().cookie_store(true).build()?;
        Ok(Self { client, base_url: base_url.into() })
    }

    /// POST one envelope to the per-conversation endpoint.
    pub async fn post_envelope(
        &self,
        peer_id: &str,
        envelope: &Envelope,
        csrf_token: &str,
    ) -> Result<(), EngineError> {
        let body = codec::encode(envelope)?;
        let url = format!("{}/auth/chat/{peer_id}", self.base_url);

        let resp = self
            .client
            .post(&url)
            .header("X-CSRF-Token", csrf_token)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(
                target: "sc_client",
                event = "send_envelope_failed",
                peer_id = %peer_id,
                status = %status,
                body_len = body.len()
            );
            return Err(EngineError::SendFailed { status: status.as_u16(), body });
        }

        tracing::info!(
            target: "sc_client",
            event = "send_envelope_ok",
            peer_id = %peer_id,
            status = %status
        );
        Ok(())
    }
}
