//! Request correlation.
//!
//! Each request gets a [`RequestId`]: the client's `x-request-id` when it is
//! short visible ASCII, a fresh UUID v4 otherwise. The ID is stored in the
//! request extensions for handlers, recorded on the request span, and always
//! echoed back in the response.

use std::fmt;

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Longest client-supplied ID that is reused as is.
pub const MAX_CLIENT_ID_LEN: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Reuses `header` when it is a usable ID; otherwise generates one.
    pub fn resolve(header: Option<&HeaderValue>) -> Self {
        header
            .and_then(|v| v.to_str().ok())
            .filter(|s| is_usable_client_id(s))
            .map(|s| Self(s.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn header_value(&self) -> HeaderValue {
        // Both sources are visible ASCII, which is always a valid header value.
        HeaderValue::from_str(&self.0).unwrap_or_else(|_| HeaderValue::from_static("invalid"))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_usable_client_id(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_CLIENT_ID_LEN && id.bytes().all(|b| b.is_ascii_graphic())
}

pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let supplied = request.headers().get(&REQUEST_ID_HEADER).cloned();
    let request_id = RequestId::resolve(supplied.as_ref());
    let replaced = supplied.is_some_and(|v| v.to_str().ok() != Some(request_id.as_str()));

    let span = tracing::info_span!(
        "calculator_request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );

    if replaced {
        span.in_scope(|| tracing::debug!("Replaced unusable client request id"));
    }

    request.extensions_mut().insert(request_id.clone());

    async move {
        let mut response = next.run(request).await;
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER.clone(), request_id.header_value());
        tracing::info!(status = response.status().as_u16(), "Request completed");
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(raw: &[u8]) -> RequestId {
        let value = HeaderValue::from_bytes(raw).unwrap();
        RequestId::resolve(Some(&value))
    }

    fn is_uuid(id: &RequestId) -> bool {
        Uuid::parse_str(id.as_str()).is_ok()
    }

    #[test]
    fn test_client_id_is_reused() {
        assert_eq!(resolve(b"hike-2024-07-01").as_str(), "hike-2024-07-01");
    }

    #[test]
    fn test_missing_or_empty_id_is_generated() {
        assert!(is_uuid(&RequestId::resolve(None)));
        assert!(is_uuid(&resolve(b"")));
    }

    #[test]
    fn test_over_long_id_is_replaced() {
        let long = "a".repeat(MAX_CLIENT_ID_LEN + 1);
        assert!(is_uuid(&resolve(long.as_bytes())));

        let limit = "a".repeat(MAX_CLIENT_ID_LEN);
        assert_eq!(resolve(limit.as_bytes()).as_str(), limit);
    }

    #[test]
    fn test_non_ascii_or_spaced_id_is_replaced() {
        assert!(is_uuid(&resolve("wanderung-ü".as_bytes())));
        assert!(is_uuid(&resolve(b"two words")));
        assert!(is_uuid(&resolve(b"tab\there")));
    }

    #[test]
    fn test_generated_ids_are_valid_header_values() {
        let id = RequestId::generate();
        assert_eq!(id.header_value().to_str().unwrap(), id.as_str());
    }
}
