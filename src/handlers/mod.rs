//! HTTP handlers for the reader server.
//!
//! # Routes
//!
//! | Route                | Handler                 |
//! |----------------------|-------------------------|
//! | `GET /`              | landing page            |
//! | `GET /read?url=`     | form redirect           |
//! | `GET /api/content`   | JSON extraction         |
//! | `GET /css/style.css` | stylesheet              |
//! | `GET /health`        | liveness                |
//! | `GET /status`        | counters and latency    |
//! | `GET /*url`          | reader view of `url`    |

pub mod read;
pub mod state;
pub mod status;
pub mod views;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use read::{ErrorResponse, UrlQuery};
pub use state::{AppState, LatencyHistogram, LatencyMetrics};
pub use status::{HealthResponse, ProcessMemory, StatusResponse};

/// Build the full application router.
///
/// Static routes take priority over the `/*url` catch-all.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(read::index_handler))
        .route("/read", get(read::form_handler))
        .route("/api/content", get(read::api_content_handler))
        .route("/css/style.css", get(read::stylesheet_handler))
        .route("/favicon.ico", get(read::favicon_handler))
        .route("/health", get(status::health_handler))
        .route("/status", get(status::status_handler))
        .route("/*url", get(read::read_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
