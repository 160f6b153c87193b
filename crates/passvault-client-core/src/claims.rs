//! Unverified bearer-token payload decoding.
//!
//! The decoded claims only decide which panels the client renders. Nothing
//! here checks the signature or the expiry: every request is authorized by the
//! backend from the bearer token itself.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

pub const CLAIM_SUBJECT: &str = "sub";
pub const CLAIM_IS_ADMIN: &str = "is_admin";
pub const CLAIM_EXPIRES_AT: &str = "exp";

// Browsers' `atob` accepts payloads with or without `=` padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    payload: Map<String, Value>,
}

impl SessionClaims {
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.payload.get(CLAIM_SUBJECT).and_then(Value::as_str)
    }

    /// Only a literal JSON `true` grants the admin view.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self.payload.get(CLAIM_IS_ADMIN), Some(Value::Bool(true)))
    }

    #[must_use]
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.payload.get(CLAIM_EXPIRES_AT)?;
        let seconds = exp
            .as_i64()
            .or_else(|| exp.as_f64().filter(|value| value.is_finite()).map(|value| value as i64))?;
        DateTime::from_timestamp(seconds, 0)
    }

    /// Display hint only; an expired token still counts as logged in.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|expires_at| expires_at <= now)
    }

    #[must_use]
    pub fn get(&self, claim: &str) -> Option<&Value> {
        self.payload.get(claim)
    }
}

/// Decodes the middle segment of a `header.payload.signature` token.
///
/// Returns `None` for every malformed input: missing segment, bad base64,
/// invalid UTF-8, invalid JSON, or a JSON value that is not an object.
#[must_use]
pub fn decode_claims(token: &str) -> Option<SessionClaims> {
    let segment = token.split('.').nth(1)?;
    let standard = segment.replace('-', "+").replace('_', "/");
    let bytes = PAYLOAD_ENGINE.decode(standard.as_bytes()).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    match serde_json::from_str::<Value>(&text).ok()? {
        Value::Object(payload) => Some(SessionClaims { payload }),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) mod test_tokens {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    /// Builds an unsigned `header.payload.signature` token around raw payload bytes.
    pub(crate) fn token_with_payload_bytes(payload: &[u8]) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{payload}.c2lnbmF0dXJl")
    }

    pub(crate) fn token_with_claims(claims: &serde_json::Value) -> String {
        token_with_payload_bytes(claims.to_string().as_bytes())
    }
}
