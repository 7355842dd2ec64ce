// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Dashboard assembly for the latency benchmark.
//!
//! The dashboard is a static definition generated from the set of
//! messaging types under test, independent of the live metric path. For
//! each type, in registration order, it shows the warm-delivery latency
//! percentiles P10/P50/P90/P99 and the sample count. Assembly is pure:
//! the same ordered input produces byte-identical output, so the
//! definition can be regenerated and diffed at will.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod fleet;

use serde::Serialize;
use serde_json::{json, Value};

use latency_sampler::constants::{
    COLD_START_DIMENSION, LATENCY_METRIC, MESSAGING_TYPE_DIMENSION, NAMESPACE,
};

/// Percentiles shown per messaging type, in panel order.
pub const PERCENTILES: [u8; 4] = [10, 50, 90, 99];

const FULL_WIDTH: u32 = 24;
const HEADER_HEIGHT: u32 = 1;
const PANEL_HEIGHT: u32 = 3;

/// Region the metric widgets point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub region: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            region: "eu-west-1".to_string(),
        }
    }
}

/// Complete dashboard definition, ready to serialize.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Dashboard {
    pub widgets: Vec<Widget>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Widget {
    pub height: u32,
    pub width: u32,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: WidgetProperties,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum WidgetProperties {
    Text { markdown: String },
    Metric(MetricPanel),
}

/// Single-value live panel over the latency metric, filtered to warm
/// deliveries of one messaging type.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricPanel {
    pub sparkline: bool,
    pub metrics: Vec<Value>,
    pub view: &'static str,
    pub stacked: bool,
    pub region: String,
    pub stat: &'static str,
    #[serde(rename = "liveData")]
    pub live_data: bool,
    pub title: String,
    #[serde(rename = "setPeriodToTimeRange")]
    pub set_period_to_time_range: bool,
    pub trend: bool,
}

/// Builds the dashboard for the given messaging types, two widgets per
/// type in input order. Duplicate or empty input is the caller's business;
/// nothing here validates it.
pub fn assemble<I, S>(messaging_types: I, config: &DashboardConfig) -> Dashboard
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut widgets = Vec::new();
    for messaging_type in messaging_types {
        widgets.push(header(messaging_type.as_ref()));
        widgets.push(metric_panel(messaging_type.as_ref(), config));
    }
    Dashboard { widgets }
}

fn header(messaging_type: &str) -> Widget {
    Widget {
        height: HEADER_HEIGHT,
        width: FULL_WIDTH,
        kind: "text",
        properties: WidgetProperties::Text {
            markdown: format!("# {messaging_type}"),
        },
    }
}

fn metric_panel(messaging_type: &str, config: &DashboardConfig) -> Widget {
    let mut metrics: Vec<Value> = PERCENTILES
        .iter()
        .enumerate()
        .map(|(index, percentile)| {
            json!([
                NAMESPACE,
                LATENCY_METRIC,
                MESSAGING_TYPE_DIMENSION,
                messaging_type,
                COLD_START_DIMENSION,
                "False",
                {
                    "yAxis": "left",
                    "label": format!("P{percentile} Latency"),
                    "stat": format!("p{percentile}"),
                    "id": format!("m{index}"),
                }
            ])
        })
        .collect();
    // The sample-count series inherits the previous entry's dimensions via
    // the "..." shorthand instead of re-specifying them.
    metrics.push(json!([
        "...",
        {
            "yAxis": "left",
            "stat": "SampleCount",
            "label": "Sample Count",
            "id": format!("m{}", PERCENTILES.len()),
        }
    ]));

    Widget {
        height: PANEL_HEIGHT,
        width: FULL_WIDTH,
        kind: "metric",
        properties: WidgetProperties::Metric(MetricPanel {
            sparkline: false,
            metrics,
            view: "singleValue",
            stacked: false,
            region: config.region.clone(),
            stat: "p99",
            live_data: true,
            title: format!("{messaging_type} Latency"),
            set_period_to_time_range: true,
            trend: false,
        }),
    }
}
