//! Body digests and canonical signing.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use ed25519_dalek::{Signer, SigningKey, KEYPAIR_LENGTH, SECRET_KEY_LENGTH};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{SdkError, SdkResult};

/// SHA-256 of the exact body bytes, base64 encoded.
///
/// Only called when a body is sent. Requests without a body sign the empty
/// string instead, which is not the digest of an empty body.
pub fn body_digest(body: &[u8]) -> String {
    BASE64.encode(Sha256::digest(body))
}

/// Load an Ed25519 signing key from a 32-byte seed or a 64-byte keypair.
pub fn signing_key(private_key: &[u8]) -> SdkResult<SigningKey> {
    match private_key.len() {
        SECRET_KEY_LENGTH => {
            let mut seed = [0u8; SECRET_KEY_LENGTH];
            seed.copy_from_slice(private_key);
            Ok(SigningKey::from_bytes(&seed))
        }
        KEYPAIR_LENGTH => {
            let mut keypair = [0u8; KEYPAIR_LENGTH];
            keypair.copy_from_slice(private_key);
            SigningKey::from_keypair_bytes(&keypair)
                .map_err(|e| SdkError::Signing(format!("invalid ed25519 keypair: {}", e)))
        }
        n => Err(SdkError::Signing(format!(
            "ed25519 private key must be {} or {} bytes, got {}",
            SECRET_KEY_LENGTH, KEYPAIR_LENGTH, n
        ))),
    }
}

/// Serialize `payload` to JSON and sign its UTF-8 bytes.
///
/// Returns the base64-encoded signature.
pub fn sign_payload<T: Serialize>(payload: &T, private_key: &[u8]) -> SdkResult<String> {
    let content = serde_json::to_string(payload)
        .map_err(|e| SdkError::Signing(format!("serialize signature content: {}", e)))?;
    let key = signing_key(private_key)?;
    let signature = key.sign(content.as_bytes());
    Ok(BASE64.encode(signature.to_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::HandshakeSignature;
    use ed25519_dalek::{Signature, Verifier};

    const SEED: [u8; 32] = [7u8; 32];

    fn handshake<'a>(timestamp: &'a str) -> HandshakeSignature<'a> {
        HandshakeSignature {
            access: "tester",
            timestamp,
            nonce: "abcdefghijklmnop",
            signature_algorithm: "ed25519",
        }
    }

    #[test]
    fn test_body_digest_empty_body() {
        // Digest of zero bytes is a real hash, never the "" sentinel.
        assert_eq!(
            body_digest(b""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn test_body_digest_matches_sha256() {
        let body = br#"{"offset":0,"limit":20}"#;
        let expected = BASE64.encode(Sha256::digest(body));
        assert_eq!(body_digest(body), expected);
        assert_ne!(body_digest(body), body_digest(b"{}"));
    }

    #[test]
    fn test_sign_payload_verifies() {
        let payload = handshake("2024-05-01T08:30:00.123Z");
        let signature = sign_payload(&payload, &SEED).unwrap();

        let raw = BASE64.decode(&signature).unwrap();
        let signature = Signature::from_slice(&raw).unwrap();
        let content = serde_json::to_string(&payload).unwrap();
        let verifying = SigningKey::from_bytes(&SEED).verifying_key();
        assert!(verifying.verify(content.as_bytes(), &signature).is_ok());
    }

    #[test]
    fn test_keypair_bytes_accepted() {
        let key = SigningKey::from_bytes(&SEED);
        let keypair = key.to_keypair_bytes();
        let payload = handshake("2024-05-01T08:30:00.123Z");
        assert_eq!(
            sign_payload(&payload, &keypair).unwrap(),
            sign_payload(&payload, &SEED).unwrap()
        );
    }

    #[test]
    fn test_mismatched_keypair_rejected() {
        let mut keypair = SigningKey::from_bytes(&SEED).to_keypair_bytes();
        keypair[40] ^= 0xff;
        assert!(matches!(signing_key(&keypair), Err(SdkError::Signing(_))));
    }

    #[test]
    fn test_malformed_key_length() {
        let payload = handshake("2024-05-01T08:30:00.123Z");
        let err = sign_payload(&payload, &[1u8; 31]).unwrap_err();
        assert!(matches!(err, SdkError::Signing(_)));
    }

    #[test]
    fn test_signature_changes_with_timestamp() {
        let a = sign_payload(&handshake("2024-05-01T08:30:00.123Z"), &SEED).unwrap();
        let b = sign_payload(&handshake("2024-05-01T08:30:01.456Z"), &SEED).unwrap();
        assert_ne!(a, b);
    }
}
