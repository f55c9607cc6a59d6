//! Run counters and structured logging for the soil engine.

use humus_data::DailyReport;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Default number of days between two progress lines.
pub const DEFAULT_LOG_INTERVAL_DAYS: u64 = 30;

/// Counters accumulated over a run.
pub struct Metrics {
    days: AtomicU64,
    cells_stepped: AtomicU64,
    leaching_events: AtomicU64,
    failed_cells: AtomicU64,
    log_interval_days: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self::with_log_interval(DEFAULT_LOG_INTERVAL_DAYS)
    }

    /// A zero interval disables periodic progress lines.
    #[must_use]
    pub fn with_log_interval(log_interval_days: u64) -> Self {
        Self {
            days: AtomicU64::new(0),
            cells_stepped: AtomicU64::new(0),
            leaching_events: AtomicU64::new(0),
            failed_cells: AtomicU64::new(0),
            log_interval_days,
            start_time: Instant::now(),
        }
    }

    /// Records a completed day with its wall-clock duration.
    pub fn record_day(&self, duration: Duration, report: &DailyReport) {
        let days = self.days.fetch_add(1, Ordering::Relaxed) + 1;
        self.cells_stepped
            .fetch_add(report.cells.len() as u64, Ordering::Relaxed);
        self.leaching_events
            .fetch_add(report.leaching_events() as u64, Ordering::Relaxed);
        self.failed_cells
            .fetch_add(report.failures.len() as u64, Ordering::Relaxed);

        if self.log_interval_days > 0 && days % self.log_interval_days == 0 {
            tracing::info!(
                day = report.day,
                cells = report.cells.len(),
                leaching_events = report.leaching_events(),
                failures = report.failures.len(),
                duration_us = duration.as_micros() as u64,
                "Soil day"
            );
        }
    }

    #[must_use]
    pub fn days(&self) -> u64 {
        self.days.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cells_stepped(&self) -> u64 {
        self.cells_stepped.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn leaching_events(&self) -> u64 {
        self.leaching_events.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn failed_cells(&self) -> u64 {
        self.failed_cells.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs a global fmt subscriber on stderr, filtered by `RUST_LOG`
/// (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .finish(),
    )
    .ok();
}
