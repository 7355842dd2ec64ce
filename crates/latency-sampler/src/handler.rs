// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Batch handling.
//!
//! One handler per execution context. A batch event is either a `Records`
//! array (queue, topic, stream and change-feed styles) or a direct payload
//! (event-bus and state-machine styles), which is handled as a batch of
//! one. Records are processed strictly sequentially; a malformed record is
//! logged and skipped without affecting its siblings.

use serde_json::Value;
use tracing::{debug, error};

use crate::context::ExecutionContext;
use crate::emitter::Emitter;
use crate::envelope::DeliveredRecord;
use crate::extractor;
use crate::label::MessagingType;
use crate::sink::MetricSink;

/// Outcome counts for one handled batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub emitted: usize,
    pub skipped: usize,
}

/// Drives one execution context's record flow: decode, extract, emit.
pub struct BatchHandler<S> {
    context: ExecutionContext,
    emitter: Emitter<S>,
}

impl<S: MetricSink> BatchHandler<S> {
    pub fn new(messaging_type: MessagingType, sink: S) -> Self {
        BatchHandler {
            context: ExecutionContext::new(),
            emitter: Emitter::new(messaging_type, sink),
        }
    }

    /// Handles one batch event. The receive timestamp and the cold-start
    /// flag are fixed before the first record is touched.
    pub fn handle(&mut self, event: &Value) -> BatchSummary {
        let batch = self.context.begin_batch();
        let records: Vec<&Value> = match event.get("Records").and_then(Value::as_array) {
            Some(items) => items.iter().collect(),
            None => vec![event],
        };

        let mut summary = BatchSummary::default();
        for (index, raw) in records.iter().enumerate() {
            match extractor::extract(raw, &batch) {
                Ok(sample) => {
                    self.emitter.emit(&sample);
                    summary.emitted += 1;
                }
                Err(err) => {
                    error!(
                        "skipping record {}: {}",
                        record_identity(raw, index),
                        err
                    );
                    summary.skipped += 1;
                }
            }
        }

        debug!(
            "batch done: {} emitted, {} skipped",
            summary.emitted, summary.skipped
        );
        summary
    }

    pub fn emitter(&self) -> &Emitter<S> {
        &self.emitter
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.context
    }
}

/// Best-effort identifying context for skip logs: the record's own id when
/// it decodes far enough to have one, its batch position otherwise.
fn record_identity(raw: &Value, index: usize) -> String {
    DeliveredRecord::from_value(raw)
        .ok()
        .and_then(|record| record.identity().map(str::to_string))
        .unwrap_or_else(|| format!("#{index}"))
}
