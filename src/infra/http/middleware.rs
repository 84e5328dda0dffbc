//! Request correlation and failure logging shared by both routers.

use std::time::Instant;

use axum::{
    body::Body,
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{Instrument, error, info_span, warn};
use uuid::Uuid;

use crate::application::error::ErrorReport;

/// Header carrying the correlation id, both inbound and echoed on every response.
pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

const MAX_REQUEST_ID_LEN: usize = 64;

/// Correlation id for one request, available to handlers and on the response.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
}

/// Accepts a caller-supplied id only when it is short printable ASCII.
fn inbound_request_id(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(&REQUEST_ID_HEADER)?.to_str().ok()?.trim();
    let acceptable = !value.is_empty()
        && value.len() <= MAX_REQUEST_ID_LEN
        && value.bytes().all(|byte| byte.is_ascii_graphic());
    acceptable.then(|| value.to_owned())
}

/// Outermost layer: picks the request id, opens the `http_request` span and
/// stamps the id onto the response.
pub async fn set_request_context(mut request: Request<Body>, next: Next) -> Response {
    let request_id =
        inbound_request_id(request.headers()).unwrap_or_else(|| Uuid::new_v4().to_string());
    let span = info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    );
    let ctx = RequestContext { request_id };
    request.extensions_mut().insert(ctx.clone());

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&ctx.request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response.extensions_mut().insert(ctx);
    response
}

/// Logs 4xx as warnings and 5xx as errors, draining any attached `ErrorReport`.
/// Request id, method and path come from the enclosing span.
pub async fn log_responses(request: Request<Body>, next: Next) -> Response {
    let query = request.uri().query().unwrap_or_default().to_owned();
    let start = Instant::now();

    let mut response = next.run(request).await;
    let status = response.status();
    if !status.is_client_error() && !status.is_server_error() {
        return response;
    }

    let elapsed_ms = start.elapsed().as_millis();
    let (source, chain) = response
        .extensions_mut()
        .remove::<ErrorReport>()
        .map(|report| (report.source, report.messages))
        .unwrap_or(("unknown", Vec::new()));
    let detail = chain.first().map_or("no diagnostic available", String::as_str);

    if status.is_server_error() {
        error!(
            target = "cellar::http::response",
            status = status.as_u16(),
            query = %query,
            elapsed_ms,
            source,
            detail,
            ?chain,
            "request failed",
        );
    } else {
        warn!(
            target = "cellar::http::response",
            status = status.as_u16(),
            query = %query,
            elapsed_ms,
            source,
            detail,
            "client request error",
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        http::StatusCode,
        middleware,
        response::IntoResponse,
        routing::get,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::infra::http::ApiError;

    fn router() -> Router {
        Router::new()
            .route("/ok", get(|| async { StatusCode::NO_CONTENT }))
            .route(
                "/missing",
                get(|| async { ApiError::not_found("gone").into_response() }),
            )
            .layer(middleware::from_fn(log_responses))
            .layer(middleware::from_fn(set_request_context))
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            REQUEST_ID_HEADER,
            HeaderValue::from_str(value).expect("header value"),
        );
        headers
    }

    #[test]
    fn inbound_ids_are_trimmed_and_bounded() {
        assert_eq!(
            inbound_request_id(&headers_with("  abc-123  ")),
            Some("abc-123".to_string())
        );
        assert_eq!(inbound_request_id(&headers_with("   ")), None);
        assert_eq!(inbound_request_id(&headers_with("has space")), None);
        assert_eq!(inbound_request_id(&headers_with(&"x".repeat(65))), None);
        assert!(inbound_request_id(&headers_with(&"x".repeat(64))).is_some());
        assert_eq!(inbound_request_id(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn caller_request_id_is_echoed() {
        let request = Request::get("/ok")
            .header(REQUEST_ID_HEADER, "order-sync-42")
            .body(Body::empty())
            .expect("request");

        let response = router().oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "order-sync-42");
        let ctx = response.extensions().get::<RequestContext>().expect("context");
        assert_eq!(ctx.request_id, "order-sync-42");
    }

    #[tokio::test]
    async fn missing_request_id_is_generated() {
        let request = Request::get("/missing")
            .body(Body::empty())
            .expect("request");

        let response = router().oneshot(request).await.expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let id = response.headers()[REQUEST_ID_HEADER]
            .to_str()
            .expect("ascii id");
        assert!(Uuid::parse_str(id).is_ok());
        assert!(response.extensions().get::<ErrorReport>().is_none());
    }
}
