//! Reader-view handlers.
//!
//! ```text
//! GET /<url>  ──▶ Reader::read ──▶ content page (200) | error page (500)
//! GET /api/content?url=<url> ──▶ JSON ReadPage | JSON error
//! ```

use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::error::Result;
use crate::handlers::state::AppState;
use crate::handlers::views;
use crate::reader::ReadPage;

/// Query parameters carrying the target URL
#[derive(Debug, Clone, Deserialize)]
pub struct UrlQuery {
    /// Page to read, with or without a scheme
    pub url: String,
}

/// JSON body returned when a read fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable failure description
    pub error: String,
}

/// Run the pipeline and update the server counters.
async fn read_page(state: &AppState, raw_url: &str) -> Result<ReadPage> {
    let start = Instant::now();
    let result = state.reader().read(raw_url).await;
    state.record_latency(start.elapsed());

    match &result {
        Ok(_) => {
            state.record_page();
        }
        Err(e) => {
            warn!(error = %e, kind = ?e.kind(), "Failed to read page");
            state.record_error();
        }
    }
    result
}

/// `GET /`
pub async fn index_handler() -> Html<String> {
    Html(views::index_page())
}

/// `GET /css/style.css`
pub async fn stylesheet_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        views::STYLESHEET,
    )
}

/// `GET /favicon.ico`
///
/// Answered here so browsers don't trigger a read of `https://favicon.ico`.
pub async fn favicon_handler() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// `GET /read?url=...`
///
/// Target of the index form; redirects to the path-style reader URL.
pub async fn form_handler(Query(query): Query<UrlQuery>) -> Redirect {
    Redirect::to(&format!("/{}", encode_path_segment(query.url.trim())))
}

/// Percent-encode `raw` as one path segment.
///
/// `byte_serialize` writes spaces as `+`, which path decoding leaves alone.
/// A literal `+` is already `%2B` at that point, so every `+` left is a space.
fn encode_path_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `GET /*url`
///
/// The path remainder is the page to read; a query string, if any, is
/// treated as part of that URL. Every failure renders the same error page.
#[instrument(skip(state, query))]
pub async fn read_handler(
    State(state): State<Arc<AppState>>,
    Path(raw_url): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let raw_url = match query {
        Some(q) if !q.is_empty() => format!("{}?{}", raw_url, q),
        _ => raw_url,
    };

    match read_page(&state, &raw_url).await {
        Ok(page) => (StatusCode::OK, Html(views::content_page(&page))).into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, Html(views::error_page())).into_response(),
    }
}

/// `GET /api/content?url=...`
///
/// Returns the [`ReadPage`] as JSON. Input errors map to 400, everything
/// else to 502.
#[instrument(skip(state))]
pub async fn api_content_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<UrlQuery>,
) -> Response {
    match read_page(&state, &query.url).await {
        Ok(page) => (StatusCode::OK, Json(page)).into_response(),
        Err(e) => {
            let status = if e.is_client_error() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::BAD_GATEWAY
            };
            (
                status,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
