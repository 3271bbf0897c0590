//! Telemetry metric name constants.
//!
//! Centralised metric names for stancemap operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `stancemap_`. Counters end in `_total`.

/// Total parties processed by the batch driver.
///
/// Labels: `status` ("ok" | "error").
pub const PARTIES_TOTAL: &str = "stancemap_parties_total";

/// Total statements turned into profile entries.
pub const STATEMENTS_TOTAL: &str = "stancemap_statements_total";

/// Total weight distributions that needed a rounding correction.
///
/// Labels: `correction` ("first-entry" | "largest-remainder").
pub const WEIGHT_CORRECTIONS_TOTAL: &str = "stancemap_weight_corrections_total";
