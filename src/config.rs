//! Access configuration and credentials.
//!
//! The backend issues access keys as a small JSON document:
//!
//! ```json
//! { "id": "access-id", "encode_method": "ed25519-hex", "private_key": "9d61b1..." }
//! ```
//!
//! [`AccessConfig`] mirrors that document; [`AccessConfig::credential`] turns it
//! into a [`Credential`] holding the decoded key bytes.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// How `private_key` is encoded in an [`AccessConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEncoding {
    /// Ed25519 secret (32-byte seed or 64-byte keypair) as hex.
    Ed25519Hex,
}

impl KeyEncoding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519Hex => "ed25519-hex",
        }
    }

    pub fn parse(value: &str) -> SdkResult<Self> {
        match value {
            "ed25519-hex" => Ok(Self::Ed25519Hex),
            other => Err(SdkError::Configuration(format!(
                "unsupported key encode method: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for KeyEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration accepted at client construction.
#[derive(Clone, Serialize, Deserialize)]
pub struct AccessConfig {
    pub id: String,
    pub encode_method: String,
    pub private_key: String,
}

impl AccessConfig {
    pub fn new(
        id: impl Into<String>,
        encode_method: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            encode_method: encode_method.into(),
            private_key: private_key.into(),
        }
    }

    /// Parse a config from its JSON representation.
    pub fn from_json(json: &str) -> SdkResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| SdkError::Configuration(format!("invalid access config: {}", e)))
    }

    /// Load a config from a JSON file on disk.
    pub fn from_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            SdkError::Configuration(format!("read access config {}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    /// Validate the encoding and decode the private key.
    pub fn credential(&self) -> SdkResult<Credential> {
        let encoding = KeyEncoding::parse(&self.encode_method)?;
        let private_key = match encoding {
            KeyEncoding::Ed25519Hex => hex::decode(self.private_key.trim()).map_err(|e| {
                SdkError::Configuration(format!("malformed private key hex: {}", e))
            })?,
        };
        Ok(Credential {
            access_id: self.id.clone(),
            private_key,
        })
    }
}

impl fmt::Debug for AccessConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessConfig")
            .field("id", &self.id)
            .field("encode_method", &self.encode_method)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// Access id plus decoded private key. Owned by one client, never serialized.
#[derive(Clone)]
pub struct Credential {
    access_id: String,
    private_key: Vec<u8>,
}

impl Credential {
    pub fn new(access_id: impl Into<String>, private_key: Vec<u8>) -> Self {
        Self {
            access_id: access_id.into(),
            private_key,
        }
    }

    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    pub(crate) fn private_key(&self) -> &[u8] {
        &self.private_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("access_id", &self.access_id)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED_HEX: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";

    #[test]
    fn test_credential_from_config() {
        let config = AccessConfig::new("tester", "ed25519-hex", SEED_HEX);
        let credential = config.credential().unwrap();
        assert_eq!(credential.access_id(), "tester");
        assert_eq!(credential.private_key().len(), 32);
    }

    #[test]
    fn test_unsupported_encode_method() {
        let config = AccessConfig::new("tester", "rsa-pem", SEED_HEX);
        let err = config.credential().unwrap_err();
        assert!(matches!(err, SdkError::Configuration(_)));
    }

    #[test]
    fn test_malformed_hex() {
        let config = AccessConfig::new("tester", "ed25519-hex", "not-hex");
        assert!(matches!(
            config.credential(),
            Err(SdkError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = format!(
            r#"{{"id": "tester", "encode_method": "ed25519-hex", "private_key": "{}"}}"#,
            SEED_HEX
        );
        let config = AccessConfig::from_json(&json).unwrap();
        assert_eq!(config.id, "tester");
        assert_eq!(config.encode_method, "ed25519-hex");

        assert!(matches!(
            AccessConfig::from_json(r#"{"id": "tester"}"#),
            Err(SdkError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_file_missing() {
        let err = AccessConfig::from_file("/nonexistent/taiyi/access.json").unwrap_err();
        assert!(matches!(err, SdkError::Configuration(_)));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = AccessConfig::new("tester", "ed25519-hex", SEED_HEX);
        let rendered = format!("{:?} {:?}", config, config.credential().unwrap());
        assert!(!rendered.contains(SEED_HEX));
        assert!(rendered.contains("<redacted>"));
    }
}
