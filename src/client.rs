//! High-level client — `TaiyiClient` and its builder.
//!
//! Holds the credential, the transport and the current session. `connect`
//! is the only operation that writes session state; it replaces the whole
//! session after a successful handshake and leaves it untouched otherwise.
//! Every other operation reads a snapshot and fails with
//! [`SdkError::Usage`] before any network call when no session exists.

use std::sync::Arc;
use std::time::Duration;

use async_lock::RwLock;

use crate::config::{AccessConfig, Credential};
use crate::error::{SdkError, SdkResult};
use crate::http::dispatch::{ApiPath, Dispatcher};
use crate::http::transport::{Method, Transport};
use crate::network::{DEFAULT_DOMAIN, SCHEMAS_PATH, SESSIONS_PATH, STATUS_PATH};
use crate::session::{self, Endpoint, Session};
use crate::types::{DomainStatus, QuerySchemasRequest, SchemaPage};

/// SDK version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The primary entry point for the Taiyi SDK.
pub struct TaiyiClient {
    credential: Credential,
    transport: Arc<dyn Transport>,
    session: Arc<RwLock<Option<Session>>>,
}

impl TaiyiClient {
    /// Client with the default reqwest transport.
    #[cfg(feature = "http")]
    pub fn new(config: &AccessConfig) -> SdkResult<Self> {
        TaiyiClientBuilder::new(config.clone()).build()
    }

    pub fn builder(config: AccessConfig) -> TaiyiClientBuilder {
        TaiyiClientBuilder::new(config)
    }

    /// Static SDK version; no network access.
    pub fn version() -> &'static str {
        VERSION
    }

    pub fn access_id(&self) -> &str {
        self.credential.access_id()
    }

    /// Establish a session with the default domain.
    pub async fn connect(&self, host: &str, port: u32) -> SdkResult<()> {
        self.connect_to_domain(host, port, DEFAULT_DOMAIN).await
    }

    /// Establish a session with `domain_name` on `host:port`.
    ///
    /// An empty host falls back to `localhost`. Fails with
    /// [`SdkError::Configuration`] for an empty domain or a port outside
    /// 1-65535; the current session is left as it was on any failure.
    pub async fn connect_to_domain(
        &self,
        host: &str,
        port: u32,
        domain_name: &str,
    ) -> SdkResult<()> {
        let endpoint = Endpoint::new(host, port, domain_name)?;
        let established =
            session::establish(self.transport.as_ref(), &self.credential, &endpoint).await?;
        *self.session.write().await = Some(established);
        Ok(())
    }

    /// Activate the established session (`PUT /sessions/`).
    pub async fn activate(&self) -> SdkResult<()> {
        let session = self.current_session().await?;
        self.dispatcher(&session)
            .dispatch_no_data(Method::Put, ApiPath::Api(SESSIONS_PATH), None::<&()>)
            .await
    }

    /// Status of the connected domain.
    pub async fn get_status(&self) -> SdkResult<DomainStatus> {
        let session = self.current_session().await?;
        let data = self
            .dispatcher(&session)
            .dispatch(Method::Get, ApiPath::Domain(STATUS_PATH), None::<&()>)
            .await?;
        Ok(serde_json::from_str(&data)?)
    }

    /// One page of schemas in the connected domain.
    pub async fn query_schemas(&self, offset: u32, limit: u32) -> SdkResult<SchemaPage> {
        let session = self.current_session().await?;
        let request = QuerySchemasRequest { offset, limit };
        let data = self
            .dispatcher(&session)
            .dispatch(Method::Post, ApiPath::Domain(SCHEMAS_PATH), Some(&request))
            .await?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Whether a handshake has completed.
    pub async fn is_connected(&self) -> bool {
        self.session.read().await.is_some()
    }

    /// Snapshot of the current session, if any.
    pub async fn session(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    async fn current_session(&self) -> SdkResult<Session> {
        self.session.read().await.clone().ok_or_else(|| {
            SdkError::Usage("no session established; call connect first".to_string())
        })
    }

    fn dispatcher<'a>(&'a self, session: &'a Session) -> Dispatcher<'a> {
        Dispatcher::new(self.transport.as_ref(), &self.credential, session)
    }
}

impl Clone for TaiyiClient {
    fn clone(&self) -> Self {
        Self {
            credential: self.credential.clone(),
            transport: self.transport.clone(),
            session: self.session.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct TaiyiClientBuilder {
    config: AccessConfig,
    transport: Option<Arc<dyn Transport>>,
    timeout: Option<Duration>,
}

impl TaiyiClientBuilder {
    pub fn new(config: AccessConfig) -> Self {
        Self {
            config,
            transport: None,
            timeout: None,
        }
    }

    /// Use a custom transport instead of the default reqwest one.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Request timeout for the default transport.
    #[cfg(feature = "http")]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> SdkResult<TaiyiClient> {
        let credential = self.config.credential()?;
        let transport = match self.transport {
            Some(t) => t,
            None => default_transport(self.timeout)?,
        };
        Ok(TaiyiClient {
            credential,
            transport,
            session: Arc::new(RwLock::new(None)),
        })
    }
}

#[cfg(feature = "http")]
fn default_transport(timeout: Option<Duration>) -> SdkResult<Arc<dyn Transport>> {
    use crate::http::transport::ReqwestTransport;

    let transport = match timeout {
        Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
        None => ReqwestTransport::new()?,
    };
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "http"))]
fn default_transport(_timeout: Option<Duration>) -> SdkResult<Arc<dyn Transport>> {
    Err(SdkError::Configuration(
        "no transport configured; enable the `http` feature or call `transport()`".to_string(),
    ))
}
