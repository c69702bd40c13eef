//! Observability hooks.
//!
//! # Design Decisions
//! - Counters go through the `metrics` facade; the hosting process decides
//!   on exposition (Prometheus or otherwise)
//! - Policy names appear in logs and metric labels only, never in response
//!   bodies
//! - Metric updates are cheap atomic increments, safe on the request path

use metrics::counter;

/// Record a request that cleared every interceptor.
pub fn record_pass() {
    counter!("shield_requests_total", "outcome" => "pass").increment(1);
}

/// Record a request rejected by the named policy.
pub fn record_rejection(policy: &'static str) {
    counter!("shield_requests_total", "outcome" => "reject").increment(1);
    counter!("shield_rejections_total", "policy" => policy).increment(1);
}
