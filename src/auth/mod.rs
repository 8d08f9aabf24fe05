//! Request authentication — nonces, timestamps and the signed content.
//!
//! ## Signature content
//!
//! Two shapes are signed. The handshake shape proves key possession before a
//! session exists; the authenticated shape binds every later request to the
//! session, method, path and body. Field order is part of the protocol: the
//! backend rebuilds the same JSON and verifies the bytes, so both structs
//! declare their fields in wire order and are serialized with `serde_json`,
//! which emits struct fields in declaration order.
//!
//! ## Nonce scope
//!
//! The nonce is minted once per handshake and signed into every request of
//! that session. A captured request can be replayed until its timestamp
//! expires on the backend.

pub mod signer;

use chrono::{SecondsFormat, Utc};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::Serialize;

/// Length of a session nonce.
pub const NONCE_LENGTH: usize = 16;

/// Generate a fresh session nonce: 16 characters from `[A-Za-z0-9]`.
pub fn generate_nonce() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(NONCE_LENGTH)
        .map(char::from)
        .collect()
}

/// Current time as ISO-8601 UTC with millisecond precision.
pub fn current_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Signed content of the session-establishment request.
#[derive(Debug, Clone, Serialize)]
pub struct HandshakeSignature<'a> {
    pub access: &'a str,
    pub timestamp: &'a str,
    pub nonce: &'a str,
    pub signature_algorithm: &'a str,
}

/// Signed content of every request issued inside a session.
#[derive(Debug, Clone, Serialize)]
pub struct RequestSignature<'a> {
    pub id: &'a str,
    pub method: &'a str,
    pub url: &'a str,
    /// Body digest, or `""` when no body was hashed.
    pub body: &'a str,
    pub access: &'a str,
    pub timestamp: &'a str,
    pub nonce: &'a str,
    pub signature_algorithm: &'a str,
}
