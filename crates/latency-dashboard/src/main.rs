// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Renders the benchmark dashboard definition to stdout.
//!
//! With no arguments the default fleet is used; otherwise each argument is
//! one messaging-type label, in the order the dashboard should show them.
//! `DASHBOARD_REGION` overrides the region the panels point at.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use std::env;

use latency_dashboard::{assemble, fleet::DEFAULT_FLEET, DashboardConfig};

fn main() -> anyhow::Result<()> {
    let mut config = DashboardConfig::default();
    if let Ok(region) = env::var("DASHBOARD_REGION") {
        let region = region.trim().to_string();
        if region.is_empty() {
            anyhow::bail!("DASHBOARD_REGION is set but empty");
        }
        config.region = region;
    }

    let types: Vec<String> = env::args().skip(1).collect();
    let dashboard = if types.is_empty() {
        assemble(DEFAULT_FLEET, &config)
    } else {
        assemble(&types, &config)
    };

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}
