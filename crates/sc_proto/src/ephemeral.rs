//! Self-expiring ("ephemeral") message policy.
//!
//! A sender who opts in attaches `expires_at_millis = now + ttl * 1000`
//! to the outgoing envelope.  Receivers poll `remaining_seconds` while a
//! message is displayed and hide it once the countdown hits zero.  This
//! is a display policy only — durable deletion on the storage side is a
//! separate concern.

use crate::envelope::Envelope;

/// Expiry instant for a message sent at `now_millis` with the given TTL.
pub fn expires_at(now_millis: i64, ttl_secs: i64) -> i64 {
    now_millis + ttl_secs * 1000
}

/// Seconds of display lifetime left at `now_millis`, floored, never
/// negative.  `None` means the message never expires (not ephemeral, or
/// no expiry attached).
pub fn remaining_seconds(envelope: &Envelope, now_millis: i64) -> Option<i64> {
    if !envelope.ephemeral {
        return None;
    }
    let expires = envelope.expires_at_millis?;
    Some(((expires - now_millis) / 1000).max(0))
}

/// True once an ephemeral message's countdown has reached zero.
pub fn is_expired(envelope: &Envelope, now_millis: i64) -> bool {
    remaining_seconds(envelope, now_millis) == Some(0)
}
