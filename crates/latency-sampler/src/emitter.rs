// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Metric emission.
//!
//! Exactly one document leaves the emitter per sample it is given; a
//! skipped record never reaches the emitter, so the metric stream has a
//! one-to-one correspondence with successfully extracted samples. There is
//! no deduplication: at-least-once redelivery upstream produces independent
//! documents, which the benchmark accepts as a known limitation.

use tracing::error;

use crate::context::now_epoch_ms;
use crate::emf::EmfDocument;
use crate::extractor::LatencySample;
use crate::label::MessagingType;
use crate::sink::MetricSink;

/// Renders latency samples into metric documents and hands them to the
/// sink. Infallible from the caller's perspective.
pub struct Emitter<S> {
    messaging_type: MessagingType,
    sink: S,
}

impl<S: MetricSink> Emitter<S> {
    pub fn new(messaging_type: MessagingType, sink: S) -> Self {
        Emitter {
            messaging_type,
            sink,
        }
    }

    /// Emits one document stamped with the current wall clock.
    pub fn emit(&self, sample: &LatencySample) {
        self.emit_at(sample, now_epoch_ms());
    }

    /// Emits one document with an explicit emission timestamp.
    pub fn emit_at(&self, sample: &LatencySample, timestamp_ms: i64) {
        let document = EmfDocument::new(sample, &self.messaging_type, timestamp_ms);
        match serde_json::to_string(&document) {
            Ok(line) => self.sink.submit(line),
            Err(err) => error!("failed to serialize metric document: {err}"),
        }
    }

    pub fn messaging_type(&self) -> &MessagingType {
        &self.messaging_type
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
