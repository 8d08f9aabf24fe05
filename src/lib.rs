//! # Taiyi SDK
//!
//! Client for the Taiyi backend's signed-session protocol.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Protocol constants, access config, error types
//! 2. **Auth** — Session nonces, timestamps, body digests, Ed25519 signing
//! 3. **HTTP** — `Transport` seam, response envelope, signed dispatch
//! 4. **Session** — Establish handshake producing a `Session`
//! 5. **High-Level Client** — `TaiyiClient` holding credential and session
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use taiyi_sdk::prelude::*;
//!
//! let config = AccessConfig::from_file("access.json")?;
//! let client = TaiyiClient::new(&config)?;
//!
//! client.connect("", 5851).await?;
//! client.activate().await?;
//!
//! let page = client.query_schemas(0, 20).await?;
//! println!("{} schemas", page.total);
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Unified SDK error types.
pub mod error;

/// Protocol constants: defaults, paths, header names.
pub mod network;

/// Access configuration and credentials.
pub mod config;

/// Request and result types for domain queries.
pub mod types;

// ── Layer 2: Auth ────────────────────────────────────────────────────────────

/// Nonces, timestamps, signed content and signing.
pub mod auth;

// ── Layer 3: HTTP ────────────────────────────────────────────────────────────

/// Transport, envelope parsing and authenticated dispatch.
pub mod http;

// ── Layer 4: Session ─────────────────────────────────────────────────────────

/// Session state and the establish handshake.
pub mod session;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `TaiyiClient` — the primary entry point.
pub mod client;

pub use client::VERSION;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    pub use crate::client::{TaiyiClient, TaiyiClientBuilder, VERSION};
    pub use crate::config::{AccessConfig, Credential, KeyEncoding};
    pub use crate::error::{SdkError, SdkResult, TransportError};
    pub use crate::http::{HttpRequest, HttpResponse, Method, Transport};
    #[cfg(feature = "http")]
    pub use crate::http::ReqwestTransport;
    pub use crate::network::{API_VERSION, DEFAULT_DOMAIN, DEFAULT_HOST};
    pub use crate::session::Session;
    pub use crate::types::{DomainStatus, SchemaPage};
}
