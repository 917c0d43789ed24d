//! Request trace ids.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::Response;
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the trace id in both directions.
pub const TRACE_ID_HEADER: &str = "x-trace-id";

/// Maximum length for client-provided trace IDs.
const MAX_TRACE_ID_LEN: usize = 128;

/// Trace ID for request correlation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TraceId(pub String);

impl TraceId {
    /// Generate a new random trace ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Create a trace ID from a client-provided value.
    ///
    /// Truncated to `MAX_TRACE_ID_LEN` characters and reduced to printable ASCII.
    pub fn from_client(value: &str) -> Self {
        let sanitized: String = value
            .chars()
            .take(MAX_TRACE_ID_LEN)
            .filter(|c| c.is_ascii_graphic() || *c == ' ')
            .collect();

        if sanitized.is_empty() {
            Self::new()
        } else {
            Self(sanitized)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn extract_or_generate_trace_id(req: &Request) -> TraceId {
    req.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(TraceId::from_client)
        .unwrap_or_else(TraceId::new)
}

/// Attach a trace id to the request, run it inside a span, and echo the id back.
pub async fn trace_id_middleware(mut req: Request, next: Next) -> Response {
    let trace_id = extract_or_generate_trace_id(&req);
    let trace_id_str = trace_id.0.clone();
    req.extensions_mut().insert(trace_id);

    let mut response = next
        .run(req)
        .instrument(tracing::info_span!("request", trace_id = %trace_id_str))
        .await;

    if let Ok(value) = HeaderValue::from_str(&trace_id_str) {
        response.headers_mut().insert(TRACE_ID_HEADER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_value_is_truncated() {
        let long = "a".repeat(300);
        assert_eq!(TraceId::from_client(&long).as_str().len(), MAX_TRACE_ID_LEN);
    }

    #[test]
    fn test_control_characters_removed() {
        let id = TraceId::from_client("abc\r\ndef");
        assert_eq!(id.as_str(), "abcdef");
    }

    #[test]
    fn test_empty_after_sanitizing_generates_uuid() {
        let id = TraceId::from_client("\n\t");
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }
}
