//! In-session request dispatch.
//!
//! Builds the authenticated signature content for one request, attaches the
//! proof headers and hands the result to the transport. Session state is
//! only read here.

use serde::Serialize;
use url::Url;

use crate::auth::signer::{body_digest, sign_payload};
use crate::auth::{current_timestamp, RequestSignature};
use crate::config::Credential;
use crate::error::{SdkError, SdkResult};
use crate::http::envelope;
use crate::http::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::network::{
    CONTENT_TYPE_JSON, DOMAINS_PATH, HEADER_CONTENT_TYPE, HEADER_DATE, HEADER_SESSION,
    HEADER_SIGNATURE, HEADER_SIGNATURE_ALGORITHM, SIGNATURE_ALGORITHM,
};
use crate::session::Session;

/// Where a request path is rooted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiPath<'a> {
    /// `{api_base}{path}`
    Api(&'a str),
    /// `{api_base}/domains/{domain}{path}`
    Domain(&'a str),
}

/// Signs and sends requests for one established session.
pub struct Dispatcher<'a> {
    transport: &'a dyn Transport,
    credential: &'a Credential,
    session: &'a Session,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        transport: &'a dyn Transport,
        credential: &'a Credential,
        session: &'a Session,
    ) -> Self {
        Self {
            transport,
            credential,
            session,
        }
    }

    pub fn resolve(&self, path: ApiPath<'_>) -> String {
        match path {
            ApiPath::Api(p) => format!("{}{}", self.session.api_base(), p),
            ApiPath::Domain(p) => format!(
                "{}{}{}{}",
                self.session.api_base(),
                DOMAINS_PATH,
                urlencoding::encode(self.session.domain()),
                p
            ),
        }
    }

    /// Assemble the signed request without sending it.
    ///
    /// The signed path and the request URL come from the same parsed [`Url`],
    /// so normalization cannot make them disagree.
    pub fn build<P: Serialize>(
        &self,
        method: Method,
        path: ApiPath<'_>,
        payload: Option<&P>,
    ) -> SdkResult<HttpRequest> {
        let url = parse_url(&self.resolve(path))?;
        let body = match payload {
            Some(p) if method.carries_body() => Some(serde_json::to_vec(p)?),
            _ => None,
        };
        let digest = body.as_deref().map(body_digest).unwrap_or_default();
        let timestamp = current_timestamp();

        let signature = sign_payload(
            &RequestSignature {
                id: self.session.session_id(),
                method: method.as_str(),
                url: url.path(),
                body: &digest,
                access: self.credential.access_id(),
                timestamp: &timestamp,
                nonce: self.session.nonce(),
                signature_algorithm: SIGNATURE_ALGORITHM,
            },
            self.credential.private_key(),
        )?;

        let mut headers = vec![
            (HEADER_SESSION.to_string(), self.session.session_id().to_string()),
            (HEADER_DATE.to_string(), timestamp),
            (
                HEADER_SIGNATURE_ALGORITHM.to_string(),
                SIGNATURE_ALGORITHM.to_string(),
            ),
            (HEADER_SIGNATURE.to_string(), signature),
        ];
        if body.is_some() {
            headers.push((HEADER_CONTENT_TYPE.to_string(), CONTENT_TYPE_JSON.to_string()));
        }

        Ok(HttpRequest {
            method,
            url: url.into(),
            headers,
            body,
        })
    }

    async fn send<P: Serialize>(
        &self,
        method: Method,
        path: ApiPath<'_>,
        payload: Option<&P>,
    ) -> SdkResult<HttpResponse> {
        let request = self.build(method, path, payload)?;
        tracing::debug!(method = %method, url = %request.url, "Dispatching request");
        Ok(self.transport.send(request).await?)
    }

    /// Send and return the envelope's still-encoded `data`.
    pub async fn dispatch<P: Serialize>(
        &self,
        method: Method,
        path: ApiPath<'_>,
        payload: Option<&P>,
    ) -> SdkResult<String> {
        let response = self.send(method, path, payload).await?;
        envelope::parse(&response)
    }

    /// Send, validate the envelope and discard its payload.
    pub async fn dispatch_no_data<P: Serialize>(
        &self,
        method: Method,
        path: ApiPath<'_>,
        payload: Option<&P>,
    ) -> SdkResult<()> {
        let response = self.send(method, path, payload).await?;
        envelope::parse_no_data(&response)
    }
}

/// Parse and normalize a request URL built from the session's endpoint.
pub(crate) fn parse_url(raw: &str) -> SdkResult<Url> {
    Url::parse(raw).map_err(|e| SdkError::Configuration(format!("invalid URL {}: {}", raw, e)))
}
