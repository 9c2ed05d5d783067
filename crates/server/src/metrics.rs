//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the ticketdesk server:
//! - HTTP request metrics (latency, counts, in-flight)
//! - Ticket lifecycle counters (created, status changes, deletions)
//! - Priority advisor outcomes (heuristic, model, fallback)

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "ticketdesk_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
        ]),
        &["method", "path", "status"],
    )
    .expect("valid histogram definition")
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("ticketdesk_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .expect("valid counter definition")
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "ticketdesk_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .expect("valid gauge definition")
});

// =============================================================================
// Ticket Metrics
// =============================================================================

/// Tickets created, by resolved priority.
pub static TICKETS_CREATED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "ticketdesk_tickets_created_total",
            "Total tickets created since startup",
        ),
        &["priority"],
    )
    .expect("valid counter definition")
});

/// Status updates, by new status.
pub static TICKET_STATUS_UPDATES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "ticketdesk_ticket_status_updates_total",
            "Ticket status updates",
        ),
        &["to_status"],
    )
    .expect("valid counter definition")
});

/// Tickets deleted.
pub static TICKETS_DELETED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "ticketdesk_tickets_deleted_total",
        "Total tickets deleted since startup",
    )
    .expect("valid counter definition")
});

// =============================================================================
// Advisor Metrics
// =============================================================================

/// Priority suggestions, by the strategy that produced the answer.
pub static PRIORITY_SUGGESTIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "ticketdesk_priority_suggestions_total",
            "Priority suggestions by source (heuristic, model, fallback)",
        ),
        &["source"],
    )
    .expect("valid counter definition")
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    let collectors: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()),
        Box::new(TICKETS_CREATED_TOTAL.clone()),
        Box::new(TICKET_STATUS_UPDATES.clone()),
        Box::new(TICKETS_DELETED_TOTAL.clone()),
        Box::new(PRIORITY_SUGGESTIONS_TOTAL.clone()),
    ];

    for collector in collectors {
        if let Err(e) = registry.register(collector) {
            tracing::error!("Failed to register metric: {}", e);
        }
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

static NUMERIC_SEGMENT: Lazy<regex_lite::Regex> =
    Lazy::new(|| regex_lite::Regex::new(r"/\d+(/|$)").expect("valid regex"));

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    NUMERIC_SEGMENT.replace_all(path, "/{id}$1").to_string()
}
