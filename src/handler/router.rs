//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, health checks,
//! route matching, response headers and access logging.

use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::time::Instant;

use super::definitions::{self, ShowRequest};
use crate::config::{AppState, HealthConfig, SharedState};
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, RouteMatch};

/// Main entry point for HTTP request handling
///
/// The request body is never read; every route is a read-only GET.
pub async fn handle_request<B>(
    req: Request<B>,
    state: SharedState,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, _body) = req.into_parts();

    logger::log_headers_count(parts.headers.len(), state.config.logging.show_headers);

    let mut response = dispatch(&parts, &state);
    apply_common_headers(&mut response, &state);

    if state.access_log() {
        let mut entry = AccessLogEntry::from_request(remote_addr, &parts);
        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok());
        let body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.finish(
            response.status().as_u16(),
            body_bytes,
            content_type,
            started.elapsed(),
        );
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn dispatch(parts: &Parts, state: &AppState) -> Response<Full<Bytes>> {
    // 1. Check HTTP method
    if let Some(resp) = check_http_method(&parts.method, state.config.http.enable_cors) {
        return resp;
    }

    let path = parts.uri.path();

    // 2. Health check endpoints
    if let Some(resp) = check_health(path, &state.config.health) {
        return resp;
    }

    // 3. Resource routes
    match routing::match_route(path) {
        Some(RouteMatch::DefinitionShow {
            synset_id,
            id,
            extension,
        }) => {
            let accept = header_str(parts, "accept");
            let format = http::negotiate(extension, accept);
            let format_hint = format.as_ref().ok().copied();

            let req = ShowRequest {
                synset_id,
                id,
                format,
            };

            match definitions::show(state.store.as_ref(), state.renderer.as_ref(), req) {
                Ok(rendered) => http::build_representation_response(
                    rendered.body,
                    rendered.format.content_type(),
                    header_str(parts, "if-none-match"),
                    parts.method == Method::HEAD,
                ),
                Err(err) => err.into_response(format_hint),
            }
        }
        None => http::build_404_response(None),
    }
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

fn check_health(path: &str, health: &HealthConfig) -> Option<Response<Full<Bytes>>> {
    if !health.enabled {
        return None;
    }
    // Readiness has nothing extra to check: the store is loaded before the listener binds
    (path == health.liveness_path || path == health.readiness_path)
        .then(|| http::build_health_response("ok"))
}

fn header_str<'a>(parts: &'a Parts, name: &str) -> Option<&'a str> {
    parts.headers.get(name).and_then(|v| v.to_str().ok())
}

fn apply_common_headers(response: &mut Response<Full<Bytes>>, state: &AppState) {
    let headers = response.headers_mut();
    if let Ok(server) = state.config.http.server_name.parse() {
        headers.insert("server", server);
    }
    if state.config.http.enable_cors {
        headers.insert(
            "access-control-allow-origin",
            hyper::header::HeaderValue::from_static("*"),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_config;
    use crate::model::fixtures::{definition, synset};
    use crate::store::MemoryStore;
    use crate::view::HtmlRenderer;
    use http_body_util::BodyExt;
    use std::sync::Arc;

    fn state_with(mutate: impl FnOnce(&mut crate::config::Config)) -> SharedState {
        let mut config = test_config();
        mutate(&mut config);
        let store = MemoryStore::from_records(
            vec![synset(5, &["test"]), synset(6, &["other"])],
            vec![
                definition(9, 5, "a test definition"),
                definition(10, 6, "elsewhere"),
            ],
        )
        .unwrap();
        Arc::new(AppState::new(config, Arc::new(store), Arc::new(HtmlRenderer)))
    }

    fn state() -> SharedState {
        state_with(|_| {})
    }

    async fn send(
        state: &SharedState,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
    ) -> (u16, hyper::HeaderMap, Bytes) {
        let mut builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let req = builder.body(()).unwrap();
        let resp = handle_request(req, Arc::clone(state), "127.0.0.1:40000".parse().unwrap())
            .await
            .unwrap();
        let status = resp.status().as_u16();
        let headers = resp.headers().clone();
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    async fn get(state: &SharedState, path: &str) -> (u16, hyper::HeaderMap, Bytes) {
        send(state, Method::GET, path, &[]).await
    }

    #[tokio::test]
    async fn test_show_json() {
        let (status, headers, body) = get(&state(), "/synsets/5/definitions/9.json").await;
        assert_eq!(status, 200);
        assert_eq!(headers["content-type"], "application/json; charset=utf-8");
        assert_eq!(headers["server"], "lexicon-test");

        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["gloss"], "a test definition");
        assert_eq!(value["synset_id"], 5);
    }

    #[tokio::test]
    async fn test_show_xml_via_accept() {
        let (status, headers, body) = send(
            &state(),
            Method::GET,
            "/synsets/5/definitions/9",
            &[("accept", "application/xml")],
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(headers["content-type"], "application/xml; charset=utf-8");
        assert_eq!(headers["vary"], "Accept");
        assert!(body.starts_with(b"<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    }

    #[tokio::test]
    async fn test_show_html_default() {
        let (status, headers, body) = get(&state(), "/synsets/5/definitions/9").await;
        assert_eq!(status, 200);
        assert_eq!(headers["content-type"], "text/html; charset=utf-8");
        let html = std::str::from_utf8(&body).unwrap();
        assert!(html.contains(r#"<a href="/synsets/5">test</a>"#));
        assert!(html.contains("a test definition"));
    }

    #[tokio::test]
    async fn test_not_found_cases() {
        let state = state();
        for path in [
            "/synsets/7/definitions/9.json",
            "/synsets/5/definitions/11.json",
            "/synsets/5/definitions/10.json",
            "/synsets/x/definitions/9.json",
        ] {
            let (status, headers, body) = get(&state, path).await;
            assert_eq!(status, 404, "{path}");
            assert_eq!(headers["content-type"], "application/json; charset=utf-8");
            assert_eq!(body, r#"{"error":"Not Found"}"#);
        }

        let (status, _, _) = get(&state, "/synsets/7/definitions/9").await;
        assert_eq!(status, 404);
        let (status, _, _) = get(&state, "/synsets/7/definitions/9.xml").await;
        assert_eq!(status, 404);
        let (status, _, _) = get(&state, "/unknown").await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_not_acceptable() {
        let state = state();
        let (status, _, _) = get(&state, "/synsets/5/definitions/9.csv").await;
        assert_eq!(status, 406);

        let (status, _, _) = send(
            &state,
            Method::GET,
            "/synsets/5/definitions/9",
            &[("accept", "image/png")],
        )
        .await;
        assert_eq!(status, 406);

        // Missing records are reported before the format
        let (status, _, _) = get(&state, "/synsets/7/definitions/9.csv").await;
        assert_eq!(status, 404);
    }

    #[tokio::test]
    async fn test_idempotent_and_conditional_get() {
        let state = state();
        let (_, first_headers, first) = get(&state, "/synsets/5/definitions/9.json").await;
        let (_, _, second) = get(&state, "/synsets/5/definitions/9.json").await;
        assert_eq!(first, second);

        assert_eq!(first_headers["vary"], "Accept");

        let etag = first_headers["etag"].to_str().unwrap();
        let (status, headers, body) = send(
            &state,
            Method::GET,
            "/synsets/5/definitions/9.json",
            &[("if-none-match", etag)],
        )
        .await;
        assert_eq!(status, 304);
        assert_eq!(headers["vary"], "Accept");
        assert!(body.is_empty());

        // Same URL, different Accept: both carry Vary so caches keep them apart
        let (_, html_headers, _) = get(&state, "/synsets/5/definitions/9").await;
        let (_, json_headers, _) = send(
            &state,
            Method::GET,
            "/synsets/5/definitions/9",
            &[("accept", "application/json")],
        )
        .await;
        assert_eq!(html_headers["vary"], "Accept");
        assert_eq!(json_headers["vary"], "Accept");
        assert_ne!(html_headers["etag"], json_headers["etag"]);
    }

    #[tokio::test]
    async fn test_head_request() {
        let (status, headers, body) =
            send(&state(), Method::HEAD, "/synsets/5/definitions/9.json", &[]).await;
        assert_eq!(status, 200);
        assert!(body.is_empty());
        assert_ne!(headers["content-length"], "0");
    }

    #[tokio::test]
    async fn test_method_guard() {
        let state = state_with(|c| c.http.enable_cors = true);
        let (status, headers, _) =
            send(&state, Method::POST, "/synsets/5/definitions/9", &[]).await;
        assert_eq!(status, 405);
        assert_eq!(headers["allow"], "GET, HEAD, OPTIONS");
        assert_eq!(headers["access-control-allow-origin"], "*");

        let (status, _, _) = send(&state, Method::OPTIONS, "/synsets/5/definitions/9", &[]).await;
        assert_eq!(status, 204);
    }

    #[tokio::test]
    async fn test_health_endpoints() {
        let (status, _, body) = get(&state(), "/healthz").await;
        assert_eq!(status, 200);
        assert_eq!(body, "ok");
        let (status, _, _) = get(&state(), "/readyz").await;
        assert_eq!(status, 200);

        let disabled = state_with(|c| c.health.enabled = false);
        let (status, _, _) = get(&disabled, "/healthz").await;
        assert_eq!(status, 404);
    }
}
