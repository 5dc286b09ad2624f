//! Webhook signature verification.
//!
//! Mercado Pago signs notifications with HMAC-SHA256 over a manifest built
//! from the notified resource id, the `x-request-id` header and the `ts`
//! component of the `x-signature` header:
//!
//! ```text
//! id:<data.id>;request-id:<x-request-id>;ts:<ts>;
//! ```
//!
//! The `x-signature` header carries `ts=<unix seconds>,v1=<hex digest>`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Why a notification signature was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("Missing x-signature header")]
    MissingHeader,

    #[error("Missing timestamp (ts=) in signature")]
    MissingTimestamp,

    #[error("Missing v1 signature in header")]
    MissingV1Signature,

    /// `v1` is empty or not valid hex.
    #[error("Invalid signature format (not valid hex)")]
    InvalidSignatureFormat,

    #[error("Signature does not match")]
    Mismatch,
}

/// Parsed `x-signature` header.
#[derive(Debug, Clone)]
pub struct SignatureHeader {
    /// Kept verbatim; it is signed as text.
    pub ts: String,
    pub v1_signature: Vec<u8>,
}

impl SignatureHeader {
    /// Parses `ts=<ts>,v1=<hex>`. Unknown components are ignored.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        if header.trim().is_empty() {
            return Err(SignatureError::MissingHeader);
        }

        let mut ts = None;
        let mut v1_signature = None;

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            match key.trim() {
                "ts" => ts = Some(value.trim().to_string()),
                "v1" => {
                    let value = value.trim();
                    if value.is_empty() {
                        return Err(SignatureError::InvalidSignatureFormat);
                    }
                    v1_signature = Some(
                        hex::decode(value).map_err(|_| SignatureError::InvalidSignatureFormat)?,
                    )
                }
                _ => {}
            }
        }

        Ok(Self {
            ts: ts
                .filter(|t| !t.is_empty())
                .ok_or(SignatureError::MissingTimestamp)?,
            v1_signature: v1_signature.ok_or(SignatureError::MissingV1Signature)?,
        })
    }
}

/// Verifies notification signatures with the shared webhook secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl WebhookVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: SecretString::new(secret.into()),
        }
    }

    /// Checks `signature_header` against the manifest for `data_id` and
    /// `request_id`. Comparison is constant-time.
    pub fn verify(
        &self,
        data_id: &str,
        request_id: &str,
        signature_header: &str,
    ) -> Result<(), SignatureError> {
        let header = SignatureHeader::parse(signature_header)?;
        let expected = self.digest(data_id, request_id, &header.ts);

        if expected.as_slice().ct_eq(&header.v1_signature).unwrap_u8() != 1 {
            tracing::warn!(
                data_id = %data_id,
                request_id = %request_id,
                "Invalid webhook signature"
            );
            return Err(SignatureError::Mismatch);
        }

        Ok(())
    }

    fn digest(&self, data_id: &str, request_id: &str, ts: &str) -> Vec<u8> {
        let manifest = manifest(data_id, request_id, ts);
        // HMAC accepts keys of any length, so this branch is unreachable.
        let Ok(mut mac) = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
        else {
            return Vec::new();
        };
        mac.update(manifest.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Signed manifest. The resource id is lower-cased as the gateway does for
/// alphanumeric ids.
pub fn manifest(data_id: &str, request_id: &str, ts: &str) -> String {
    format!(
        "id:{};request-id:{};ts:{};",
        data_id.to_lowercase(),
        request_id,
        ts
    )
}
