// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Measurement pipeline for serverless messaging latency benchmarks.
//!
//! Each delivery path under test (queue, topic, stream, state machine,
//! change feed) forwards test messages to a consumer. This crate turns one
//! delivered batch into latency metrics:
//!
//! - [`envelope`]: decodes the per-path batch and record shapes down to the
//!   common logical payload (`sent_timestamp_ns`, `producer_cold_start`)
//! - [`extractor`]: produces a [`extractor::LatencySample`] per record, or a
//!   typed skip decision for malformed records
//! - [`context`]: tracks the consumer cold-start state per process instance
//! - [`emf`] / [`emitter`]: renders one embedded-metric-format document per
//!   sample and hands it to a [`sink::MetricSink`]
//! - [`sink`]: bounded, non-blocking stdout transport plus an in-memory
//!   sink for tests
//! - [`handler`]: ties the above together for one batch invocation

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod attribute;
pub mod constants;
pub mod context;
pub mod emf;
pub mod emitter;
pub mod envelope;
pub mod errors;
pub mod extractor;
pub mod handler;
pub mod label;
pub mod sink;
