//! Request ID middleware for log and error correlation.
//!
//! Each request carries an `x-request-id`: the one supplied by an upstream
//! proxy when it looks sane, otherwise a fresh UUID v4. The id is recorded on
//! the request span, tagged on the Sentry scope and echoed in the response.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest upstream id accepted verbatim.
const MAX_REQUEST_ID_LEN: usize = 128;

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(mut request: Request, next: Next) -> Response {
    let upstream = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok());
    let request_id = accept_request_id(upstream).unwrap_or_else(|| Uuid::new_v4().to_string());

    Span::current().record("request_id", request_id.as_str());
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let header = HeaderValue::from_str(&request_id).ok();
    if let Some(value) = &header {
        request.headers_mut().insert(REQUEST_ID_HEADER, value.clone());
    }

    let mut response = next.run(request).await;
    if let Some(value) = header {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

/// Keep an upstream id only if it is short, non-empty printable ASCII.
fn accept_request_id(upstream: Option<&str>) -> Option<String> {
    let id = upstream?.trim();
    let acceptable = !id.is_empty()
        && id.len() <= MAX_REQUEST_ID_LEN
        && id.bytes().all(|b| b.is_ascii_graphic());
    acceptable.then(|| id.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_proxy_id() {
        assert_eq!(
            accept_request_id(Some("cf-7a1b2c")).as_deref(),
            Some("cf-7a1b2c")
        );
    }

    #[test]
    fn test_rejects_unusable_ids() {
        assert_eq!(accept_request_id(None), None);
        assert_eq!(accept_request_id(Some("   ")), None);
        assert_eq!(accept_request_id(Some("has space")), None);
        assert_eq!(accept_request_id(Some(&"x".repeat(200))), None);
    }
}
