//! Success response emission.
//!
//! # Design Decisions
//! - Native content type: JSON bodies go out as `application/json`, text
//!   bodies byte-for-byte as `text/plain`; no JSON string envelope
//! - Only successful responses carry the shared-cache directive
//! - Error responses come from `ProxyError`'s `IntoResponse`

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::content::Payload;

/// Build the 200 response for a classified payload.
pub fn success_response(payload: Payload, cache_control: &HeaderValue) -> Response {
    let content_type = HeaderValue::from_static(payload.kind().content_type());
    (
        StatusCode::OK,
        [
            (header::CACHE_CONTROL, cache_control.clone()),
            (header::CONTENT_TYPE, content_type),
        ],
        payload.into_body(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_header() -> HeaderValue {
        HeaderValue::from_static("s-maxage=3600, stale-while-revalidate")
    }

    #[test]
    fn test_json_response_headers() {
        let response = success_response(Payload::classify("{}".into()), &cache_header());
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "s-maxage=3600, stale-while-revalidate"
        );
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    }

    #[test]
    fn test_text_response_headers() {
        let response = success_response(Payload::classify("hi".into()), &cache_header());
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
    }
}
