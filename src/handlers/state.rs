//! Shared application state for the reader server.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use hdrhistogram::Histogram;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::reader::Reader;

/// Request latency percentile metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencyMetrics {
    /// 50th percentile (median) latency in milliseconds
    pub p50_ms: f64,

    /// 95th percentile latency in milliseconds
    pub p95_ms: f64,

    /// 99th percentile latency in milliseconds
    pub p99_ms: f64,

    /// Total number of requests recorded
    pub total_requests: u64,

    /// Mean latency in milliseconds
    pub mean_ms: f64,

    /// Maximum latency recorded in milliseconds
    pub max_ms: f64,
}

/// Thread-safe latency histogram for reader requests.
///
/// Tracks latencies from 1 microsecond to 10 minutes with 3 significant
/// figures. Page fetches have no timeout by default, so the upper bound is
/// generous.
#[derive(Debug)]
pub struct LatencyHistogram {
    inner: RwLock<Histogram<u64>>,
}

impl LatencyHistogram {
    /// Highest trackable value in microseconds
    const MAX_TRACKABLE_US: u64 = 600_000_000;

    /// Create a new latency histogram.
    pub fn new() -> Self {
        let histogram = Histogram::new_with_bounds(1, Self::MAX_TRACKABLE_US, 3)
            .expect("static histogram bounds are valid");
        Self {
            inner: RwLock::new(histogram),
        }
    }

    /// Record a latency value in microseconds, clamped to the tracked range.
    pub fn record(&self, latency_us: u64) {
        let mut hist = self.inner.write();
        hist.saturating_record(latency_us.clamp(1, Self::MAX_TRACKABLE_US));
    }

    /// Record a latency duration.
    pub fn record_duration(&self, duration: Duration) {
        self.record(u64::try_from(duration.as_micros()).unwrap_or(u64::MAX));
    }

    /// Get the total count of recorded values.
    pub fn count(&self) -> u64 {
        self.inner.read().len()
    }

    /// Get complete latency metrics in milliseconds.
    pub fn metrics(&self) -> LatencyMetrics {
        let hist = self.inner.read();
        if hist.len() == 0 {
            return LatencyMetrics::default();
        }
        LatencyMetrics {
            p50_ms: hist.value_at_percentile(50.0) as f64 / 1000.0,
            p95_ms: hist.value_at_percentile(95.0) as f64 / 1000.0,
            p99_ms: hist.value_at_percentile(99.0) as f64 / 1000.0,
            total_requests: hist.len(),
            mean_ms: hist.mean() / 1000.0,
            max_ms: hist.max() as f64 / 1000.0,
        }
    }

    /// Reset the histogram, clearing all recorded values.
    pub fn reset(&self) {
        self.inner.write().reset();
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}

/// State shared by all handlers.
///
/// Holds the [`Reader`] and the server counters. None of it is visible to an
/// extraction run: each request passes its own URL into the reader.
#[derive(Debug)]
pub struct AppState {
    reader: Reader,
    start_time: Instant,
    pages_read: AtomicU64,
    error_count: AtomicU64,
    latency_histogram: LatencyHistogram,
}

impl AppState {
    /// Create state around a configured reader.
    pub fn new(reader: Reader) -> Self {
        Self {
            reader,
            start_time: Instant::now(),
            pages_read: AtomicU64::new(0),
            error_count: AtomicU64::new(0),
            latency_histogram: LatencyHistogram::new(),
        }
    }

    /// The reader pipeline
    #[inline]
    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    /// Get the server uptime in seconds.
    #[inline]
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get the number of pages successfully read.
    #[inline]
    pub fn pages_read(&self) -> u64 {
        self.pages_read.load(Ordering::Relaxed)
    }

    /// Count a successful read and return the new total.
    #[inline]
    pub fn record_page(&self) -> u64 {
        self.pages_read.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Count a failed read and return the new total.
    #[inline]
    pub fn record_error(&self) -> u64 {
        self.error_count.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Get the number of failed reads.
    #[inline]
    pub fn error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Record how long a read request took.
    #[inline]
    pub fn record_latency(&self, duration: Duration) {
        self.latency_histogram.record_duration(duration);
    }

    /// Get the latency metrics.
    #[inline]
    pub fn latency_metrics(&self) -> LatencyMetrics {
        self.latency_histogram.metrics()
    }

    /// Reset all counters.
    pub fn reset_metrics(&self) {
        self.pages_read.store(0, Ordering::Relaxed);
        self.error_count.store(0, Ordering::Relaxed);
        self.latency_histogram.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::ExtractorConfig;
    use crate::fetch::FetchConfig;
    use std::sync::Arc;

    fn test_state() -> AppState {
        let reader = Reader::new(FetchConfig::default(), ExtractorConfig::default()).unwrap();
        AppState::new(reader)
    }

    #[test]
    fn test_app_state_new() {
        let state = test_state();
        assert_eq!(state.pages_read(), 0);
        assert_eq!(state.error_count(), 0);
        assert!(state.uptime_seconds() < 1);
    }

    #[test]
    fn test_page_and_error_counters() {
        let state = test_state();
        assert_eq!(state.record_page(), 1);
        assert_eq!(state.record_page(), 2);
        assert_eq!(state.record_error(), 1);
        assert_eq!(state.pages_read(), 2);
        assert_eq!(state.error_count(), 1);

        state.reset_metrics();
        assert_eq!(state.pages_read(), 0);
        assert_eq!(state.error_count(), 0);
    }

    #[test]
    fn test_latency_histogram() {
        let histogram = LatencyHistogram::new();

        histogram.record(1000);
        histogram.record(2000);
        histogram.record(5000);
        histogram.record(10000);
        histogram.record(50000);

        assert_eq!(histogram.count(), 5);
        let metrics = histogram.metrics();
        assert!(metrics.p50_ms > 0.0);
        assert!(metrics.p95_ms >= metrics.p50_ms);
        assert!(metrics.p99_ms >= metrics.p95_ms);
        // HdrHistogram bucketing loses a little precision
        assert!((50.0..=51.0).contains(&metrics.max_ms), "max was {}", metrics.max_ms);
    }

    #[test]
    fn test_latency_histogram_clamps() {
        let histogram = LatencyHistogram::new();
        histogram.record(0);
        histogram.record_duration(Duration::from_secs(3600));
        assert_eq!(histogram.count(), 2);
    }

    #[test]
    fn test_empty_histogram_metrics() {
        let metrics = LatencyHistogram::new().metrics();
        assert_eq!(metrics, LatencyMetrics::default());
    }

    #[test]
    fn test_app_state_thread_safety() {
        use std::thread;

        let state = Arc::new(test_state());
        let mut handles = vec![];

        for _ in 0..8 {
            let state_clone = Arc::clone(&state);
            handles.push(thread::spawn(move || {
                for _ in 0..500 {
                    state_clone.record_page();
                    state_clone.record_latency(Duration::from_millis(1));
                }
            }));
        }

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert_eq!(state.pages_read(), 4_000);
        assert_eq!(state.latency_metrics().total_requests, 4_000);
    }
}
