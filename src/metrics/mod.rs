//! Basic metrics instrumentation for the contact book.
//!
//! Provides counters for HTTP requests, contact writes, validation
//! rejections and store failures. Cloning a `Metrics` shares the counters.

use crate::validation::{Violation, ViolationKind};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Counters {
    http_requests_total: AtomicU64,
    http_errors_total: AtomicU64,
    http_duration_total_ms: AtomicU64,
    contacts_created_total: AtomicU64,
    contacts_updated_total: AtomicU64,
    contacts_deleted_total: AtomicU64,
    submissions_rejected_total: AtomicU64,
    empty_name_total: AtomicU64,
    invalid_email_total: AtomicU64,
    invalid_phone_total: AtomicU64,
    duplicate_name_total: AtomicU64,
    store_errors_total: AtomicU64,
}

/// Metrics collector shared by the service and the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    /// Create a new metrics collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a served HTTP request with its duration.
    pub fn record_http_request(&self, duration: Duration) {
        let c = &self.counters;
        c.http_requests_total.fetch_add(1, Ordering::Relaxed);
        c.http_duration_total_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Record an HTTP response with a server error status.
    pub fn record_http_error(&self) {
        self.counters.http_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_contact_created(&self) {
        self.counters.contacts_created_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_contact_updated(&self) {
        self.counters.contacts_updated_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_contact_deleted(&self) {
        self.counters.contacts_deleted_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a rejected submission and each of its violations.
    pub fn record_rejection(&self, violations: &[Violation]) {
        let c = &self.counters;
        c.submissions_rejected_total.fetch_add(1, Ordering::Relaxed);

        for violation in violations {
            let counter = match violation.kind {
                ViolationKind::EmptyName => &c.empty_name_total,
                ViolationKind::InvalidEmail => &c.invalid_email_total,
                ViolationKind::InvalidPhone => &c.invalid_phone_total,
                ViolationKind::DuplicateName => &c.duplicate_name_total,
            };
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a failed store operation.
    pub fn record_store_error(&self) {
        self.counters.store_errors_total.fetch_add(1, Ordering::Relaxed);
    }

    /// Get average HTTP request duration in milliseconds.
    pub fn http_duration_avg_ms(&self) -> f64 {
        let total = self.counters.http_duration_total_ms.load(Ordering::Relaxed);
        let count = self.counters.http_requests_total.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Get a summary of all metrics.
    pub fn summary(&self) -> MetricsSummary {
        let c = &self.counters;
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);

        MetricsSummary {
            http_requests_total: load(&c.http_requests_total),
            http_errors_total: load(&c.http_errors_total),
            http_duration_avg_ms: self.http_duration_avg_ms(),
            contacts_created_total: load(&c.contacts_created_total),
            contacts_updated_total: load(&c.contacts_updated_total),
            contacts_deleted_total: load(&c.contacts_deleted_total),
            submissions_rejected_total: load(&c.submissions_rejected_total),
            violations: ViolationCounts {
                empty_name: load(&c.empty_name_total),
                invalid_email: load(&c.invalid_email_total),
                invalid_phone: load(&c.invalid_phone_total),
                duplicate_name: load(&c.duplicate_name_total),
            },
            store_errors_total: load(&c.store_errors_total),
        }
    }
}

/// Violations seen, per kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationCounts {
    pub empty_name: u64,
    pub invalid_email: u64,
    pub invalid_phone: u64,
    pub duplicate_name: u64,
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_avg_ms: f64,
    pub contacts_created_total: u64,
    pub contacts_updated_total: u64,
    pub contacts_deleted_total: u64,
    pub submissions_rejected_total: u64,
    pub violations: ViolationCounts,
    pub store_errors_total: u64,
}

/// Helper for timing HTTP requests.
pub struct RequestTimer {
    start: Instant,
    metrics: Metrics,
}

impl RequestTimer {
    /// Start timing an HTTP request.
    pub fn new(metrics: Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics,
        }
    }

    /// Complete the timing and record the duration.
    pub fn complete(self) {
        self.metrics.record_http_request(self.start.elapsed());
    }

    /// Complete the timing and record as an error.
    pub fn complete_with_error(self) {
        self.metrics.record_http_request(self.start.elapsed());
        self.metrics.record_http_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let summary = Metrics::new().summary();
        assert_eq!(summary.http_requests_total, 0);
        assert_eq!(summary.contacts_created_total, 0);
        assert_eq!(summary.http_duration_avg_ms, 0.0);
    }

    #[test]
    fn test_average_duration() {
        let metrics = Metrics::new();
        metrics.record_http_request(Duration::from_millis(100));
        metrics.record_http_request(Duration::from_millis(200));
        assert_eq!(metrics.summary().http_requests_total, 2);
        assert_eq!(metrics.http_duration_avg_ms(), 150.0);
    }

    #[test]
    fn test_record_rejection_counts_each_kind() {
        let metrics = Metrics::new();
        metrics.record_rejection(&[
            Violation::new(ViolationKind::InvalidEmail, "x"),
            Violation::new(ViolationKind::InvalidPhone, "1"),
        ]);
        metrics.record_rejection(&[Violation::new(ViolationKind::DuplicateName, "Ana")]);

        let summary = metrics.summary();
        assert_eq!(summary.submissions_rejected_total, 2);
        assert_eq!(
            summary.violations,
            ViolationCounts {
                empty_name: 0,
                invalid_email: 1,
                invalid_phone: 1,
                duplicate_name: 1,
            }
        );
    }

    #[test]
    fn test_request_timer_with_error() {
        let metrics = Metrics::new();
        RequestTimer::new(metrics.clone()).complete_with_error();
        RequestTimer::new(metrics.clone()).complete();

        let summary = metrics.summary();
        assert_eq!(summary.http_requests_total, 2);
        assert_eq!(summary.http_errors_total, 1);
    }

    #[test]
    fn test_concurrent_access() {
        let metrics = Metrics::new();
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let metrics = metrics.clone();
                thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_contact_created();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.summary().contacts_created_total, 200);
    }
}
