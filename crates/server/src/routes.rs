//! HTTP surface of the styling edge service.
//!
//! Three `GET` routes:
//!
//! * `/ratecss/custom` - colors the interwiki rate counter, validating the
//!   `color` query parameter before echoing it into a stylesheet
//! * `/ratecss/inject` - sanitizes a flat declaration list from the
//!   configured query parameter and wraps it in the configured selector
//! * `/healthz` - liveness probe with version and uptime
//!
//! Every CSS route answers with `Content-Type: text/css`. Errors are served
//! as CSS comments so a `<link>` pointing here degrades to a no-op
//! stylesheet instead of a console parse error. Successful responses carry
//! a public `Cache-Control` header; error responses stay uncached so a
//! corrected URL takes effect immediately.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::Router;
use axum::extract::{RawQuery, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use css_colorcheck::is_valid_css_color;
use log::debug;
use serde::Serialize;
use style_injector::InjectorConfig;

use crate::config::ServerConfig;

/// Rate counter digits inside the interwiki rate module.
const RATE_NUMBER_SELECTOR: &str =
    ".flex-interwiki-rate .page-rate-widget-box > .rate-points .number";

/// State shared by every route.
struct AppState {
    injector: InjectorConfig,
    cache_max_age: u32,
    started: Instant,
}

/// Builds the service router from resolved configuration.
pub fn router(config: ServerConfig) -> Router {
    let state = Arc::new(AppState {
        injector: config.injector(),
        cache_max_age: config.cache_max_age,
        started: Instant::now(),
    });
    Router::new()
        .route("/ratecss/custom", get(custom_css))
        .route("/ratecss/inject", get(inject_css))
        .route("/healthz", get(healthz))
        .with_state(state)
}

/// Serves a stylesheet recoloring the rate counter digits.
///
/// The `color` value is read straight off the raw query string so repeated
/// parameters keep their first occurrence instead of failing
/// deserialization.
async fn custom_css(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let value = query
        .as_deref()
        .and_then(|raw| first_query_value(raw, "color"))
        .unwrap_or_default();
    let color = value.trim();
    if color.is_empty() {
        return css_response(
            StatusCode::BAD_REQUEST,
            None,
            "/* Error: Missing color parameter. Example: /ratecss/custom?color=white */"
                .to_owned(),
        );
    }
    if !is_valid_css_color(color) {
        return css_response(
            StatusCode::BAD_REQUEST,
            None,
            format!(
                "/* Error: \"{color}\" is not a valid CSS color. Supported formats: hex, rgb, rgba, hsl, hsla, or named colors */"
            ),
        );
    }
    debug!("serving rate counter color {color:?}");
    css_response(
        StatusCode::OK,
        Some(state.cache_max_age),
        format!(
            "/* Dynamically generated - Color: {color} */\n{RATE_NUMBER_SELECTOR} {{\n  color: {color} !important;\n}}"
        ),
    )
}

/// Serves a sanitized rule assembled from caller-supplied declarations.
async fn inject_css(State(state): State<Arc<AppState>>, RawQuery(query): RawQuery) -> Response {
    let param = &state.injector.param;
    let value = query
        .as_deref()
        .and_then(|raw| first_query_value(raw, param))
        .unwrap_or_default();
    if value.trim().is_empty() {
        return css_response(
            StatusCode::BAD_REQUEST,
            None,
            format!(
                "/* Error: Missing {param} parameter. Example: /ratecss/inject?{param}=color:white */"
            ),
        );
    }
    match state.injector.rule_for_value(&value) {
        Some(rule) => css_response(StatusCode::OK, Some(state.cache_max_age), rule),
        None => css_response(
            StatusCode::BAD_REQUEST,
            None,
            format!("/* Error: No permitted declarations in {param} parameter */"),
        ),
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    uptime_secs: u64,
}

/// Liveness probe.
async fn healthz(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.started.elapsed().as_secs(),
    })
}

/// Returns the first value of `name` in a raw query string, decoded.
///
/// Repeated parameters keep their first occurrence, matching how
/// `URLSearchParams.get` behaves in the embedding clients.
fn first_query_value(query: &str, name: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Wraps `body` in a `text/css` response, optionally cacheable.
fn css_response(status: StatusCode, cache_max_age: Option<u32>, body: String) -> Response {
    let mut response = (
        status,
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/css"))],
        body,
    )
        .into_response();
    if let Some(max_age) = cache_max_age {
        if let Ok(value) = HeaderValue::try_from(format!("public, max-age={max_age}")) {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
    }
    response
}
