//! Response envelope — `{error_code, message, data}`.
//!
//! Every backend call answers with this wrapper. `data` is itself JSON text
//! and stays a string here; callers that want structure decode it again.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{SdkError, SdkResult, TransportError};
use crate::http::transport::HttpResponse;

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseEnvelope {
    pub error_code: i64,
    #[serde(default)]
    pub message: String,
    /// Absent and `null` both read as no payload.
    #[serde(default)]
    pub data: Option<String>,
}

/// Validate a raw response and return the still-encoded `data` field.
pub fn parse(response: &HttpResponse) -> SdkResult<String> {
    if !response.is_success() {
        return Err(TransportError::Status {
            status: response.status,
            status_text: response.status_text.clone(),
        }
        .into());
    }

    let envelope: ResponseEnvelope = serde_json::from_str(&response.body)?;
    if envelope.error_code != 0 {
        return Err(SdkError::Protocol {
            code: envelope.error_code,
            message: envelope.message,
        });
    }
    Ok(envelope.data.unwrap_or_default())
}

/// Same validation as [`parse`], discarding the payload.
pub fn parse_no_data(response: &HttpResponse) -> SdkResult<()> {
    parse(response).map(|_| ())
}

/// [`parse`], then decode the inner document into `T`.
pub fn parse_data<T: DeserializeOwned>(response: &HttpResponse) -> SdkResult<T> {
    let data = parse(response)?;
    Ok(serde_json::from_str(&data)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            status_text: "OK".into(),
            body: body.into(),
        }
    }

    #[test]
    fn test_parse_returns_data_still_encoded() {
        let resp = ok(r#"{"error_code":0,"message":"","data":"{\"session\":\"abc\"}"}"#);
        assert_eq!(parse(&resp).unwrap(), r#"{"session":"abc"}"#);
    }

    #[test]
    fn test_parse_protocol_error_keeps_message() {
        let resp = ok(r#"{"error_code":7,"message":"invalid signature: bad nonce","data":""}"#);
        match parse(&resp) {
            Err(SdkError::Protocol { code, message }) => {
                assert_eq!(code, 7);
                assert_eq!(message, "invalid signature: bad nonce");
            }
            other => panic!("expected protocol error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_http_status_error() {
        let resp = HttpResponse {
            status: 503,
            status_text: "Service Unavailable".into(),
            body: "down".into(),
        };
        match parse(&resp) {
            Err(SdkError::Transport(TransportError::Status {
                status,
                status_text,
            })) => {
                assert_eq!(status, 503);
                assert_eq!(status_text, "Service Unavailable");
            }
            other => panic!("expected transport error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_malformed_body() {
        assert!(matches!(parse(&ok("<html>")), Err(SdkError::Decode(_))));
    }

    #[test]
    fn test_parse_no_data() {
        assert!(parse_no_data(&ok(r#"{"error_code":0,"message":"","data":""}"#)).is_ok());
        assert!(parse_no_data(&ok(r#"{"error_code":0}"#)).is_ok());
        assert!(parse_no_data(&ok(r#"{"error_code":0,"message":"","data":null}"#)).is_ok());
        assert!(matches!(
            parse_no_data(&ok(r#"{"error_code":1,"message":"session expired"}"#)),
            Err(SdkError::Protocol { .. })
        ));
    }

    #[test]
    fn test_parse_null_data_is_empty() {
        let resp = ok(r#"{"error_code":0,"message":"","data":null}"#);
        assert_eq!(parse(&resp).unwrap(), "");
    }

    #[test]
    fn test_parse_data_decodes_twice() {
        #[derive(Deserialize)]
        struct Inner {
            total: u32,
        }
        let resp = ok(r#"{"error_code":0,"message":"","data":"{\"total\":3}"}"#);
        let inner: Inner = parse_data(&resp).unwrap();
        assert_eq!(inner.total, 3);
    }
}
