//! Protocol constants for the Taiyi backend.

/// Host used when `connect` is given an empty host.
pub const DEFAULT_HOST: &str = "localhost";

/// Domain used by `TaiyiClient::connect`.
pub const DEFAULT_DOMAIN: &str = "system";

/// REST API version segment (`/api/v{API_VERSION}`).
pub const API_VERSION: u32 = 1;

pub const SCHEME: &str = "http://";

// ── Paths ────────────────────────────────────────────────────────────────────

pub const SESSIONS_PATH: &str = "/sessions/";
pub const DOMAINS_PATH: &str = "/domains/";
pub const STATUS_PATH: &str = "/status";
pub const SCHEMAS_PATH: &str = "/schemas/";

// ── Headers ──────────────────────────────────────────────────────────────────

pub const HEADER_SESSION: &str = "Taiyi-Session";
pub const HEADER_DATE: &str = "Taiyi-Date";
pub const HEADER_SIGNATURE_ALGORITHM: &str = "Taiyi-SignatureAlgorithm";
pub const HEADER_SIGNATURE: &str = "Taiyi-Signature";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";

pub const CONTENT_TYPE_JSON: &str = "application/json";

/// Identifier of the asymmetric signature scheme.
pub const SIGNATURE_ALGORITHM: &str = "ed25519";

/// Build the API base URL for a host and port.
pub fn api_base(host: &str, port: u16) -> String {
    format!("{}{}:{}/api/v{}", SCHEME, host, port, API_VERSION)
}
