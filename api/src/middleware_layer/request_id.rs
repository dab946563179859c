use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{Instrument, info_span};

pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Incoming id if present and non-blank, otherwise `req-<unix nanos>`.
fn resolve_request_id(req: &Request<Body>) -> HeaderValue {
    if let Some(h) = req.headers().get(&REQUEST_ID_HEADER) {
        if let Ok(v) = h.to_str() {
            if !v.trim().is_empty() {
                return h.clone();
            }
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    HeaderValue::from_str(&format!("req-{nanos}"))
        .unwrap_or_else(|_| HeaderValue::from_static("req-unknown"))
}

/// Tags the request span with an id and echoes it on the response.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let id = resolve_request_id(&req);
    req.headers_mut().insert(REQUEST_ID_HEADER.clone(), id.clone());

    let span = info_span!(
        "http_request",
        request_id = id.to_str().unwrap_or_default(),
        method = %req.method(),
        path = %req.uri().path(),
    );

    let mut res = next.run(req).instrument(span).await;
    res.headers_mut().insert(REQUEST_ID_HEADER.clone(), id);
    res
}
