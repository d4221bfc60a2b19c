//! GitHub webhook signature verification using HMAC-SHA1.
//!
//! GitHub signs webhook payloads using HMAC-SHA1 with a shared secret.
//! The signature is provided in the `X-Hub-Signature` header as `sha1=<hex>`.
//!
//! Signature verification is the first step in webhook processing; requests
//! that fail it are rejected before the payload is parsed.

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use subtle::ConstantTimeEq;
use tracing::warn;

type HmacSha1 = Hmac<Sha1>;

/// Header carrying the payload signature. `HeaderMap` lookups are case-insensitive.
pub const SIGNATURE_HEADER: &str = "x-hub-signature";

/// Computes the HMAC-SHA1 signature of a payload using the given secret.
///
/// Returns `None` only if the MAC cannot be keyed, which HMAC never refuses
/// in practice.
pub fn compute_signature(payload: &[u8], secret: &[u8]) -> Option<Vec<u8>> {
    let mut mac = HmacSha1::new_from_slice(secret).ok()?;
    mac.update(payload);
    Some(mac.finalize().into_bytes().to_vec())
}

/// Formats a signature as a GitHub-style header value.
///
/// Returns a string in the format "sha1=<lowercase hex>".
pub fn format_signature_header(signature: &[u8]) -> String {
    format!("sha1={}", hex::encode(signature))
}

/// Verifies a raw `X-Hub-Signature` value against the payload and secret.
///
/// The expected header is rendered in full and compared byte-for-byte in
/// constant time, so any change to the supplied value (including hex case)
/// fails verification.
///
/// # Examples
///
/// ```
/// use doc_enforcer::webhooks::{compute_signature, format_signature_header, verify_signature};
///
/// let payload = b"Hello, World!";
/// let secret = b"my-secret-key";
///
/// let sig = compute_signature(payload, secret).unwrap();
/// let header = format_signature_header(&sig);
///
/// assert!(verify_signature(payload, header.as_bytes(), secret));
/// assert!(!verify_signature(payload, header.as_bytes(), b"wrong-secret"));
/// ```
pub fn verify_signature(payload: &[u8], signature_header: &[u8], secret: &[u8]) -> bool {
    let Some(signature) = compute_signature(payload, secret) else {
        warn!("Failed to key HMAC while computing webhook signature");
        return false;
    };
    let expected = format_signature_header(&signature);

    expected.as_bytes().ct_eq(signature_header).into()
}

/// Validates the `X-Hub-Signature` header of a webhook request.
///
/// Returns `false` when the header is absent, appears more than once, or does
/// not match the payload. Missing and duplicated headers are logged since they
/// point at a misconfigured hook or a forged request.
pub fn validate_signature(headers: &HeaderMap, payload: &[u8], secret: &[u8]) -> bool {
    let mut values = headers.get_all(SIGNATURE_HEADER).iter();

    let (Some(value), None) = (values.next(), values.next()) else {
        warn!(
            count = headers.get_all(SIGNATURE_HEADER).iter().count(),
            "Got suspicious signature header"
        );
        return false;
    };

    verify_signature(payload, value.as_bytes(), secret)
}
