// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Embedded-metric-format document rendering.
//!
//! One document per latency sample, written as a single JSON line. The
//! `_aws` block is the self-describing schema: it names the namespace, the
//! dimension pair and the metric unit so the monitoring substrate can
//! discover the metric without prior registration. The sibling top-level
//! keys carry the dimension values and the metric value under the same
//! names the schema block references.

use serde::Serialize;

use crate::constants::{
    COLD_START_DIMENSION, LATENCY_METRIC, LATENCY_UNIT, MESSAGING_TYPE_DIMENSION, NAMESPACE,
    NANOS_PER_MILLI,
};
use crate::extractor::LatencySample;
use crate::label::MessagingType;

/// One complete embedded-metric document.
#[derive(Debug, Clone, Serialize)]
pub struct EmfDocument {
    #[serde(rename = "_aws")]
    pub metadata: EmfMetadata,
    #[serde(rename = "Messaging Type")]
    pub messaging_type: String,
    #[serde(rename = "Latency")]
    pub latency_ms: f64,
    #[serde(rename = "Cold Start")]
    pub cold_start: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmfMetadata {
    /// Wall clock at emission time, milliseconds since epoch. Distinct from
    /// the producer's send timestamp.
    #[serde(rename = "Timestamp")]
    pub timestamp_ms: i64,
    #[serde(rename = "CloudWatchMetrics")]
    pub cloudwatch_metrics: Vec<MetricDirective>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricDirective {
    #[serde(rename = "Namespace")]
    pub namespace: &'static str,
    #[serde(rename = "Dimensions")]
    pub dimensions: Vec<Vec<&'static str>>,
    #[serde(rename = "Metrics")]
    pub metrics: Vec<MetricDefinition>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricDefinition {
    #[serde(rename = "Name")]
    pub name: &'static str,
    #[serde(rename = "Unit")]
    pub unit: &'static str,
}

impl EmfDocument {
    /// Builds the document for one sample. The nanosecond duration becomes
    /// milliseconds through plain f64 division; fractional milliseconds and
    /// negative values survive as-is.
    pub fn new(sample: &LatencySample, messaging_type: &MessagingType, timestamp_ms: i64) -> Self {
        EmfDocument {
            metadata: EmfMetadata {
                timestamp_ms,
                cloudwatch_metrics: vec![MetricDirective {
                    namespace: NAMESPACE,
                    dimensions: vec![vec![MESSAGING_TYPE_DIMENSION, COLD_START_DIMENSION]],
                    metrics: vec![MetricDefinition {
                        name: LATENCY_METRIC,
                        unit: LATENCY_UNIT,
                    }],
                }],
            },
            messaging_type: messaging_type.as_str().to_string(),
            latency_ms: sample.duration_ns as f64 / NANOS_PER_MILLI,
            cold_start: cold_start_label(sample.cold_start),
        }
    }
}

/// Dimension value for the cold-start classification.
pub fn cold_start_label(cold_start: bool) -> &'static str {
    if cold_start {
        "True"
    } else {
        "False"
    }
}
