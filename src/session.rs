//! Session state and the establish handshake.
//!
//! A [`Session`] only comes into existence through [`establish`]; its
//! fields are private and read through getters. The handshake signs
//! `{access, timestamp, nonce, signature_algorithm}` while transmitting
//! `{id, nonce}` as the body, so it proves key possession and freshness
//! without the body-digest mechanism used by later requests.

use serde::{Deserialize, Serialize};

use crate::auth::signer::sign_payload;
use crate::auth::{current_timestamp, generate_nonce, HandshakeSignature};
use crate::config::Credential;
use crate::error::{SdkError, SdkResult};
use crate::http::dispatch::parse_url;
use crate::http::envelope;
use crate::http::transport::{HttpRequest, Method, Transport};
use crate::network::{
    self, CONTENT_TYPE_JSON, DEFAULT_HOST, HEADER_CONTENT_TYPE, HEADER_DATE, HEADER_SIGNATURE,
    HEADER_SIGNATURE_ALGORITHM, SESSIONS_PATH, SIGNATURE_ALGORITHM,
};

/// Validated connection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub domain: String,
}

impl Endpoint {
    /// Apply defaults and validate. Empty host falls back to [`DEFAULT_HOST`].
    pub fn new(host: &str, port: u32, domain: &str) -> SdkResult<Self> {
        let host = if host.is_empty() { DEFAULT_HOST } else { host };
        if domain.is_empty() {
            return Err(SdkError::Configuration(
                "domain name must not be empty".to_string(),
            ));
        }
        // Dot segments are collapsed by URL normalization and would drop
        // the domain from the request path.
        if domain == "." || domain == ".." {
            return Err(SdkError::Configuration(format!(
                "domain name {:?} is not a valid path segment",
                domain
            )));
        }
        let port = u16::try_from(port)
            .ok()
            .filter(|p| *p != 0)
            .ok_or_else(|| {
                SdkError::Configuration(format!("port {} out of range 1-65535", port))
            })?;
        Ok(Self {
            host: host.to_string(),
            port,
            domain: domain.to_string(),
        })
    }

    pub fn api_base(&self) -> String {
        network::api_base(&self.host, self.port)
    }
}

/// Server-issued session context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    domain: String,
    api_base: String,
    nonce: String,
    session_id: String,
    timeout_seconds: u64,
    local_ip: String,
}

impl Session {
    pub(crate) fn new(
        domain: String,
        api_base: String,
        nonce: String,
        session_id: String,
        timeout_seconds: u64,
        local_ip: String,
    ) -> Self {
        Self {
            domain,
            api_base,
            nonce,
            session_id,
            timeout_seconds,
            local_ip,
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Nonce minted by the handshake and signed into every request.
    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    /// Client address as seen by the backend.
    pub fn local_ip(&self) -> &str {
        &self.local_ip
    }
}

/// Body transmitted with the handshake request.
#[derive(Debug, Serialize)]
struct HandshakeBody<'a> {
    id: &'a str,
    nonce: &'a str,
}

/// `data` document of a successful handshake.
#[derive(Debug, Deserialize)]
struct HandshakeResponse {
    session: String,
    timeout: u64,
    address: String,
}

/// Run the establish handshake against `endpoint`.
///
/// Returns a fully populated [`Session`]; nothing is returned on failure so
/// callers cannot commit partial state.
pub async fn establish(
    transport: &dyn Transport,
    credential: &Credential,
    endpoint: &Endpoint,
) -> SdkResult<Session> {
    let api_base = endpoint.api_base();
    let nonce = generate_nonce();
    let timestamp = current_timestamp();

    let signature = sign_payload(
        &HandshakeSignature {
            access: credential.access_id(),
            timestamp: &timestamp,
            nonce: &nonce,
            signature_algorithm: SIGNATURE_ALGORITHM,
        },
        credential.private_key(),
    )?;

    let body = serde_json::to_vec(&HandshakeBody {
        id: credential.access_id(),
        nonce: &nonce,
    })?;

    let url = parse_url(&format!("{}{}", api_base, SESSIONS_PATH))?.to_string();
    tracing::debug!(url = %url, domain = %endpoint.domain, "Establishing session");

    let request = HttpRequest {
        method: Method::Post,
        url,
        headers: vec![
            (HEADER_DATE.to_string(), timestamp),
            (
                HEADER_SIGNATURE_ALGORITHM.to_string(),
                SIGNATURE_ALGORITHM.to_string(),
            ),
            (HEADER_SIGNATURE.to_string(), signature),
            (HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()),
        ],
        body: Some(body),
    };

    let response = transport.send(request).await?;
    let data: HandshakeResponse = envelope::parse_data(&response)?;
    if data.session.is_empty() {
        return Err(SdkError::InvalidResponse(
            "handshake returned an empty session id".to_string(),
        ));
    }

    tracing::debug!(
        session = %data.session,
        timeout = data.timeout,
        address = %data.address,
        "Session established"
    );

    Ok(Session::new(
        endpoint.domain.clone(),
        api_base,
        nonce,
        data.session,
        data.timeout,
        data.address,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_defaults_host() {
        let endpoint = Endpoint::new("", 5851, "system").unwrap();
        assert_eq!(endpoint.host, DEFAULT_HOST);
        assert_eq!(endpoint.api_base(), "http://localhost:5851/api/v1");
    }

    #[test]
    fn test_endpoint_empty_domain() {
        let err = Endpoint::new("", 8080, "").unwrap_err();
        assert!(matches!(err, SdkError::Configuration(_)));
    }

    #[test]
    fn test_endpoint_rejects_dot_segments() {
        for domain in [".", ".."] {
            assert!(matches!(
                Endpoint::new("", 5851, domain),
                Err(SdkError::Configuration(_))
            ));
        }
        assert!(Endpoint::new("", 5851, "...").is_ok());
        assert!(Endpoint::new("", 5851, "team.alpha").is_ok());
    }

    #[test]
    fn test_endpoint_port_range() {
        assert!(matches!(
            Endpoint::new("api.example.com", 70000, "system"),
            Err(SdkError::Configuration(_))
        ));
        assert!(matches!(
            Endpoint::new("api.example.com", 0, "system"),
            Err(SdkError::Configuration(_))
        ));
        assert!(Endpoint::new("api.example.com", 1, "system").is_ok());
        assert!(Endpoint::new("api.example.com", 65535, "system").is_ok());
    }
}
