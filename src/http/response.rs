//! HTTP response building module
//!
//! Builders for the status codes the server emits, decoupled from the action logic.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use super::cache::{check_etag_match, generate_etag, CACHE_CONTROL};
use super::negotiate::Format;

const ALLOW: &str = "GET, HEAD, OPTIONS";

/// The representation at an extension-less URL depends on `Accept`
const VARY: &str = "Accept";

/// Build 200 response for a rendered representation
///
/// Answers 304 instead when `If-None-Match` carries the current tag.
/// HEAD keeps every header but drops the body.
pub fn build_representation_response(
    body: Bytes,
    content_type: &str,
    if_none_match: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let etag = generate_etag(content_type, &body);
    if check_etag_match(if_none_match, &etag) {
        return build_304_response(&etag);
    }

    let content_length = body.len();
    let body = if is_head { Bytes::new() } else { body };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("ETag", &etag)
        .header("Cache-Control", CACHE_CONTROL)
        .header("Vary", VARY)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 304 Not Modified response
pub fn build_304_response(etag: &str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(304)
        .header("ETag", etag)
        .header("Cache-Control", CACHE_CONTROL)
        .header("Vary", VARY)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("304", &e);
            Response::new(Full::new(Bytes::new()))
        })
}

/// Build 404 Not Found response in the requested representation
///
/// Without a negotiated format the body is plain text.
pub fn build_404_response(format: Option<Format>) -> Response<Full<Bytes>> {
    let (content_type, body) = match format {
        Some(Format::Json) => (Format::Json.content_type(), r#"{"error":"Not Found"}"#),
        Some(Format::Xml) => (
            Format::Xml.content_type(),
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<errors>\n  <error>Not Found</error>\n</errors>\n",
        ),
        Some(Format::Html) | None => ("text/plain; charset=utf-8", "404 Not Found"),
    };

    Response::builder()
        .status(404)
        .header("Content-Type", content_type)
        .body(Full::new(Bytes::from_static(body.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("404", &e);
            Response::new(Full::new(Bytes::from("404 Not Found")))
        })
}

/// Build 405 Method Not Allowed response
pub fn build_405_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(405)
        .header("Content-Type", "text/plain")
        .header("Allow", ALLOW)
        .body(Full::new(Bytes::from("405 Method Not Allowed")))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            Response::new(Full::new(Bytes::from("405 Method Not Allowed")))
        })
}

/// Build 406 Not Acceptable response listing what can be served
pub fn build_406_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(406)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from(
            "406 Not Acceptable\nAvailable: text/html, application/xml, application/json",
        )))
        .unwrap_or_else(|e| {
            log_build_error("406", &e);
            Response::new(Full::new(Bytes::from("406 Not Acceptable")))
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from("500 Internal Server Error")))
        })
}

/// Build OPTIONS response (preflight request)
pub fn build_options_response(enable_cors: bool) -> Response<Full<Bytes>> {
    let mut builder = Response::builder().status(204).header("Allow", ALLOW);

    if enable_cors {
        builder = builder
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", ALLOW)
            .header("Access-Control-Allow-Headers", "Accept, If-None-Match")
            .header("Access-Control-Max-Age", "86400");
    }

    builder.body(Full::new(Bytes::new())).unwrap_or_else(|e| {
        log_build_error("OPTIONS", &e);
        Response::new(Full::new(Bytes::new()))
    })
}

/// Build health check response
pub fn build_health_response(status: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(200)
        .header("Content-Type", "text/plain")
        .header("Cache-Control", "no-cache")
        .body(Full::new(Bytes::from_static(status.as_bytes())))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::from_static(status.as_bytes())))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_of(resp: Response<Full<Bytes>>) -> Bytes {
        resp.into_body().collect().await.unwrap().to_bytes()
    }

    #[tokio::test]
    async fn test_representation_and_revalidation() {
        let resp = build_representation_response(
            Bytes::from_static(b"{}"),
            "application/json",
            None,
            false,
        );
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers()["Content-Length"], "2");
        assert_eq!(resp.headers()["Vary"], "Accept");
        let etag = resp.headers()["ETag"].to_str().unwrap().to_string();
        assert_eq!(body_of(resp).await, "{}");

        let resp = build_representation_response(
            Bytes::from_static(b"{}"),
            "application/json",
            Some(&etag),
            false,
        );
        assert_eq!(resp.status(), 304);
        assert_eq!(resp.headers()["Vary"], "Accept");
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_head_keeps_length() {
        let resp =
            build_representation_response(Bytes::from_static(b"hello"), "text/plain", None, true);
        assert_eq!(resp.headers()["Content-Length"], "5");
        assert!(body_of(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_404_bodies() {
        let json = build_404_response(Some(Format::Json));
        assert_eq!(json.status(), 404);
        assert_eq!(json.headers()["Content-Type"], "application/json; charset=utf-8");
        assert_eq!(body_of(json).await, r#"{"error":"Not Found"}"#);

        let xml = body_of(build_404_response(Some(Format::Xml))).await;
        assert!(xml.starts_with(b"<?xml"));

        let plain = build_404_response(None);
        assert_eq!(plain.headers()["Content-Type"], "text/plain; charset=utf-8");
    }

    #[test]
    fn test_options_cors() {
        let resp = build_options_response(true);
        assert_eq!(resp.status(), 204);
        assert_eq!(resp.headers()["Access-Control-Allow-Origin"], "*");
        assert!(build_options_response(false)
            .headers()
            .get("Access-Control-Allow-Origin")
            .is_none());
    }
}
