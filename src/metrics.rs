//! Backend-agnostic inflation metrics via a pluggable sink.
//!
//! Implement [`MetricsSink`] and install it once with [`set_sink`]; every
//! call to `MenuInflater::inflate` then reports an [`InflationStats`] and an
//! [`InflationPhases`] breakdown. Without a sink the reports go to a no-op.
//!
//! ```ignore
//! use menu_inflater::metrics::{InflationStats, MetricsSink};
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use std::sync::Arc;
//!
//! struct FailureCounter(AtomicU64);
//!
//! impl MetricsSink for FailureCounter {
//!     fn on_inflation(&self, stats: &InflationStats) {
//!         if !stats.succeeded {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//! }
//!
//! menu_inflater::metrics::set_sink(Arc::new(FailureCounter(AtomicU64::new(0))));
//! ```

use serde::Serialize;
use std::sync::{Arc, OnceLock};
use std::time::Duration;
use tracing::warn;

/// Summary of one `inflate` call.
#[derive(Debug, Clone, Serialize)]
pub struct InflationStats {
    /// Wall-clock time for the whole call
    pub duration: Duration,
    /// Menu resource name (e.g. "menu/main")
    pub resource: String,
    pub qualifiers: String,
    /// Plain items created, across all submenus
    pub items: usize,
    pub sub_menus: usize,
    pub action_views: usize,
    /// False if the call returned an error; counts then cover what was
    /// created before the failure
    pub succeeded: bool,
}

/// Per-phase timings of one `inflate` call, in milliseconds.
#[derive(Debug, Clone, Serialize)]
pub struct InflationPhases {
    /// Selecting the tree variant from the resource layer
    pub load_ms: f64,
    /// Walking the tree and populating the menu
    pub descent_ms: f64,
    pub total_ms: f64,
}

impl InflationPhases {
    /// Time not accounted for in measured phases
    pub fn overhead_ms(&self) -> f64 {
        self.total_ms - (self.load_ms + self.descent_ms)
    }
}

/// Consumer of inflation metrics.
///
/// Called synchronously at the end of each inflation, so implementations
/// should be quick and must be thread-safe.
pub trait MetricsSink: Send + Sync {
    fn on_inflation(&self, stats: &InflationStats);

    /// Optional per-phase breakdown; ignored by default.
    fn on_inflation_phases(&self, _stats: &InflationStats, _phases: &InflationPhases) {}
}

struct NoOpSink;

impl MetricsSink for NoOpSink {
    fn on_inflation(&self, _stats: &InflationStats) {}
}

static SINK: OnceLock<Arc<dyn MetricsSink>> = OnceLock::new();

fn sink() -> Arc<dyn MetricsSink> {
    SINK.get_or_init(|| Arc::new(NoOpSink)).clone()
}

/// Set the global metrics sink.
///
/// Call this once at startup, before the first inflation; later calls are
/// ignored with a warning.
pub fn set_sink(sink: Arc<dyn MetricsSink>) {
    if SINK.set(sink).is_err() {
        warn!(
            "Metrics sink was already initialized. Ignoring subsequent set_sink call. Set the sink before the first inflation."
        );
    }
}

pub(crate) fn record_inflation(stats: &InflationStats, phases: &InflationPhases) {
    let sink = sink();
    sink.on_inflation(stats);
    sink.on_inflation_phases(stats, phases);
}
