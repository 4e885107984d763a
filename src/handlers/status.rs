//! Liveness and status endpoints.
//!
//! `/health` answers whenever the process is serving. `/status` reports what
//! the reader has done since startup:
//!
//! ```json
//! {
//!   "name": "thumbread",
//!   "version": "0.1.0",
//!   "uptime_seconds": 3600,
//!   "pages_read": 1024,
//!   "errors": 12,
//!   "latency": { "p50_ms": 120.5, "p95_ms": 845.2, "p99_ms": 1998.7, ... },
//!   "memory": { "resident_bytes": 52428800, "virtual_bytes": 268435456 },
//!   "generated_at": "2026-01-01T12:00:00+00:00"
//! }
//! ```

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::{debug, instrument};

use crate::handlers::state::{AppState, LatencyMetrics};
use crate::{NAME, VERSION};

/// Body of `GET /health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"`
    pub status: String,
    /// Crate version serving the request
    pub version: String,
}

/// Memory footprint of the server process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessMemory {
    /// Resident set size in bytes
    pub resident_bytes: u64,
    /// Virtual memory size in bytes
    pub virtual_bytes: u64,
}

impl ProcessMemory {
    /// Sample the current process, or `None` if sysinfo cannot see it.
    pub fn sample() -> Option<Self> {
        let pid = Pid::from_u32(std::process::id());
        let mut system = System::new();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

        let process = system.process(pid)?;
        Some(Self {
            resident_bytes: process.memory(),
            virtual_bytes: process.virtual_memory(),
        })
    }
}

/// Body of `GET /status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Crate name
    pub name: String,
    /// Crate version
    pub version: String,
    /// Seconds since the state was created
    pub uptime_seconds: u64,
    /// Reads that produced a page
    pub pages_read: u64,
    /// Reads that failed at any stage
    pub errors: u64,
    /// Read latency percentiles
    pub latency: LatencyMetrics,
    /// Process memory, absent when it cannot be sampled
    pub memory: Option<ProcessMemory>,
    /// RFC 3339 time the report was built
    pub generated_at: String,
}

impl StatusResponse {
    /// Snapshot the server counters
    pub fn from_state(state: &AppState) -> Self {
        let memory = ProcessMemory::sample();
        if memory.is_none() {
            debug!("Process memory unavailable");
        }

        Self {
            name: NAME.to_string(),
            version: VERSION.to_string(),
            uptime_seconds: state.uptime_seconds(),
            pages_read: state.pages_read(),
            errors: state.error_count(),
            latency: state.latency_metrics(),
            memory,
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// `GET /health`
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: VERSION.to_string(),
    })
}

/// `GET /status`
#[instrument(skip_all)]
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse::from_state(&state))
}
