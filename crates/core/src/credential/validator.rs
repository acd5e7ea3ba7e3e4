use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine,
};
use chrono::Utc;

use super::TokenPayload;

/// A credential is treated as expired this long before its embedded expiry,
/// absorbing clock skew and in-flight request latency.
pub const EXPIRY_SAFETY_MARGIN_MS: i64 = 60_000;

/// Number of `.`-separated segments in a well-formed credential.
const TOKEN_SEGMENTS: usize = 3;

/// URL-safe alphabet, padding optional, trailing bits tolerated.
const CLAIMS_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decode the claims segment of a credential.
///
/// Returns `None` on wrong segment count, invalid base64, invalid UTF-8 or
/// a claims segment that is not a JSON object.
pub fn decode(token: &str) -> Option<TokenPayload> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != TOKEN_SEGMENTS {
        return None;
    }

    let bytes = CLAIMS_ENGINE.decode(segments[1]).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    serde_json::from_str::<TokenPayload>(&text).ok()
}

/// Whether `token` must be considered expired at `now_ms` (epoch millis).
///
/// Undecodable tokens and tokens without an expiry are always expired.
pub fn is_expired_at(token: &str, now_ms: i64) -> bool {
    match decode(token).and_then(|payload| payload.expires_at_millis()) {
        Some(expires_ms) => now_ms >= expires_ms.saturating_sub(EXPIRY_SAFETY_MARGIN_MS),
        None => true,
    }
}

/// Whether `token` must be considered expired right now.
pub fn is_expired(token: &str) -> bool {
    is_expired_at(token, now_millis())
}

/// Current wall-clock time in epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
