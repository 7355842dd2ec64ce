// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Shared constants for the latency metric domain.

/// Metric namespace for every latency measurement emitted by the benchmark.
pub const NAMESPACE: &str = "Serverless Messaging";

/// Name of the single latency metric.
pub const LATENCY_METRIC: &str = "Latency";

/// Unit annotation carried by the latency metric.
pub const LATENCY_UNIT: &str = "Milliseconds";

/// Dimension naming the delivery path under test.
pub const MESSAGING_TYPE_DIMENSION: &str = "Messaging Type";

/// Dimension separating cold deliveries from warm ones.
pub const COLD_START_DIMENSION: &str = "Cold Start";

/// Top-level key the monitoring substrate scrapes for embedded metrics.
pub const EMF_KEY: &str = "_aws";

/// Divisor for the nanosecond to millisecond conversion.
pub const NANOS_PER_MILLI: f64 = 1_000_000.0;

/// Queue depth of the metric sink channel. Documents submitted while the
/// channel is full are dropped, not awaited.
pub const SINK_QUEUE_CAPACITY: usize = 1_024;
