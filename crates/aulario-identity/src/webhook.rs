//! Inbound webhook events: payload model and signature verification.
//!
//! The provider pushes signed lifecycle events (`user.created`,
//! `user.updated`, `user.deleted`). The signature covers
//! `{id}.{timestamp}.{body}` with HMAC-SHA256 under a shared secret, and the
//! signature header may carry several space-separated `v1,<base64>`
//! candidates (key rotation). Verification must pass before any payload
//! field is even looked at.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use thiserror::Error;

use crate::models::EmailAddress;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed clock skew between the event timestamp and now.
const TIMESTAMP_TOLERANCE_SECS: i64 = 300;

/// Prefix of shared webhook secrets as issued by the provider.
const SECRET_PREFIX: &str = "whsec_";

/// Why a webhook payload was rejected before processing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// One of the three signature headers is missing.
    #[error("Missing webhook signature header: {0}")]
    MissingHeader(&'static str),

    /// The configured secret is not a valid `whsec_` value.
    #[error("Webhook secret is malformed")]
    BadSecret,

    /// The timestamp header is not an integer or is outside tolerance.
    #[error("Webhook timestamp rejected: {0}")]
    BadTimestamp(String),

    /// No signature candidate matched.
    #[error("Webhook signature mismatch")]
    Mismatch,
}

/// The three signature headers accompanying every event.
#[derive(Debug, Clone)]
pub struct SignatureHeaders {
    /// Unique message id.
    pub id: String,
    /// Unix-seconds timestamp of the delivery attempt.
    pub timestamp: String,
    /// Space-separated `v1,<base64>` signature candidates.
    pub signature: String,
}

fn decode_secret(secret: &str) -> Result<Vec<u8>, SignatureError> {
    let encoded = secret.strip_prefix(SECRET_PREFIX).unwrap_or(secret);
    BASE64.decode(encoded).map_err(|_| SignatureError::BadSecret)
}

/// Compute the `v1,<base64>` signature for a payload.
///
/// Exposed so tests (and local tooling) can produce valid deliveries.
pub fn sign_payload(
    secret: &str,
    msg_id: &str,
    timestamp: &str,
    body: &[u8],
) -> Result<String, SignatureError> {
    let key = decode_secret(secret)?;
    let mut mac =
        <HmacSha256 as Mac>::new_from_slice(&key).map_err(|_| SignatureError::BadSecret)?;
    mac.update(msg_id.as_bytes());
    mac.update(b".");
    mac.update(timestamp.as_bytes());
    mac.update(b".");
    mac.update(body);
    Ok(format!("v1,{}", BASE64.encode(mac.finalize().into_bytes())))
}

/// Verify a delivery against the shared secret, using the current time.
pub fn verify_signature(
    secret: &str,
    headers: &SignatureHeaders,
    body: &[u8],
) -> Result<(), SignatureError> {
    let now = chrono::Utc::now().timestamp();
    verify_signature_at(secret, headers, body, now)
}

/// Verify a delivery at an explicit reference time.
pub fn verify_signature_at(
    secret: &str,
    headers: &SignatureHeaders,
    body: &[u8],
    now: i64,
) -> Result<(), SignatureError> {
    let timestamp: i64 = headers
        .timestamp
        .parse()
        .map_err(|_| SignatureError::BadTimestamp(headers.timestamp.clone()))?;
    if (now - timestamp).abs() > TIMESTAMP_TOLERANCE_SECS {
        return Err(SignatureError::BadTimestamp(format!(
            "outside tolerance: {timestamp} vs {now}"
        )));
    }

    let expected = sign_payload(secret, &headers.id, &headers.timestamp, body)?;

    for candidate in headers.signature.split(' ') {
        if constant_time_eq(candidate.as_bytes(), expected.as_bytes()) {
            return Ok(());
        }
    }
    Err(SignatureError::Mismatch)
}

/// Constant-time byte comparison to prevent timing attacks.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    use subtle::ConstantTimeEq;
    a.ct_eq(b).into()
}

/// A lifecycle event as delivered by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookEvent {
    /// Event kind: `user.created`, `user.updated`, `user.deleted`, or
    /// anything else (acknowledged without processing).
    #[serde(rename = "type")]
    pub event_type: String,

    /// The user payload at the time of the event.
    pub data: WebhookUserData,
}

/// The user snapshot inside a webhook event.
///
/// Deleted events carry only `id` (and `deleted: true`), so everything else
/// is optional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookUserData {
    /// Identity id the event is about.
    pub id: String,

    /// First/display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,

    /// Addresses attached to the identity at event time.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub email_addresses: Vec<EmailAddress>,

    /// Id of the primary address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_email_address_id: Option<String>,

    /// Provider metadata; `blocked` travels here.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub public_metadata: serde_json::Value,

    /// Set on `user.deleted` events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
}

impl Default for WebhookUserData {
    fn default() -> Self {
        Self {
            id: String::new(),
            first_name: None,
            email_addresses: Vec::new(),
            primary_email_address_id: None,
            public_metadata: serde_json::Value::Null,
            deleted: None,
        }
    }
}

impl WebhookUserData {
    /// The primary address, falling back to the first attached one.
    #[must_use]
    pub fn primary_email(&self) -> Option<&str> {
        if let Some(primary_id) = self.primary_email_address_id.as_deref() {
            if let Some(addr) = self.email_addresses.iter().find(|e| e.id == primary_id) {
                return Some(&addr.email_address);
            }
        }
        self.email_addresses.first().map(|e| e.email_address.as_str())
    }

    /// Whether `public_metadata.blocked` is set true.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.public_metadata
            .get("blocked")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_dGVzdC1zZWNyZXQtZm9yLWF1bGFyaW8=";

    fn headers_for(body: &[u8], now: i64) -> SignatureHeaders {
        let timestamp = now.to_string();
        let signature = sign_payload(SECRET, "msg_1", &timestamp, body).unwrap();
        SignatureHeaders {
            id: "msg_1".to_string(),
            timestamp,
            signature,
        }
    }

    #[test]
    fn valid_signature_verifies() {
        let body = br#"{"type":"user.created","data":{"id":"idn_1"}}"#;
        let now = 1_700_000_000;
        let headers = headers_for(body, now);
        assert!(verify_signature_at(SECRET, &headers, body, now).is_ok());
    }

    #[test]
    fn tampered_body_is_rejected() {
        let body = br#"{"type":"user.created","data":{"id":"idn_1"}}"#;
        let now = 1_700_000_000;
        let headers = headers_for(body, now);
        let tampered = br#"{"type":"user.deleted","data":{"id":"idn_1"}}"#;
        assert_eq!(
            verify_signature_at(SECRET, &headers, tampered, now),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let body = b"{}";
        let now = 1_700_000_000;
        let headers = headers_for(body, now);
        let other = "whsec_b3RoZXItc2VjcmV0LXZhbHVlLWhlcmU=";
        assert_eq!(
            verify_signature_at(other, &headers, body, now),
            Err(SignatureError::Mismatch)
        );
    }

    #[test]
    fn one_matching_candidate_among_many_passes() {
        let body = b"{}";
        let now = 1_700_000_000;
        let mut headers = headers_for(body, now);
        headers.signature = format!("v1,AAAA{} {}", "BBBB", headers.signature);
        assert!(verify_signature_at(SECRET, &headers, body, now).is_ok());
    }

    #[test]
    fn stale_timestamp_is_rejected() {
        let body = b"{}";
        let now = 1_700_000_000;
        let headers = headers_for(body, now - TIMESTAMP_TOLERANCE_SECS - 1);
        assert!(matches!(
            verify_signature_at(SECRET, &headers, body, now),
            Err(SignatureError::BadTimestamp(_))
        ));
    }

    #[test]
    fn non_numeric_timestamp_is_rejected() {
        let body = b"{}";
        let headers = SignatureHeaders {
            id: "msg_1".to_string(),
            timestamp: "yesterday".to_string(),
            signature: "v1,AAAA".to_string(),
        };
        assert!(matches!(
            verify_signature_at(SECRET, &headers, body, 0),
            Err(SignatureError::BadTimestamp(_))
        ));
    }

    #[test]
    fn event_payload_deserializes() {
        let raw = r#"{
            "type": "user.updated",
            "data": {
                "id": "idn_9",
                "first_name": "Ana",
                "email_addresses": [
                    {"id": "ema_1", "email_address": "ana@example.com"}
                ],
                "primary_email_address_id": "ema_1",
                "public_metadata": {"blocked": true}
            }
        }"#;
        let event: WebhookEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.event_type, "user.updated");
        assert_eq!(event.data.primary_email(), Some("ana@example.com"));
        assert!(event.data.is_blocked());
    }

    #[test]
    fn deleted_event_with_minimal_payload_deserializes() {
        let raw = r#"{"type":"user.deleted","data":{"id":"idn_9","deleted":true}}"#;
        let event: WebhookEvent = serde_json::from_str(raw).unwrap();
        assert_eq!(event.data.deleted, Some(true));
        assert!(event.data.primary_email().is_none());
        assert!(!event.data.is_blocked());
    }
}
