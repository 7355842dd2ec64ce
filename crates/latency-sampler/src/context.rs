// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Consumer cold-start tracking.
//!
//! Cold starts are detected without an external state store: the execution
//! context counts invocations, and the first batch a context instance
//! handles is cold. Scale-out or recycling creates a new context, which
//! starts cold again. The flag is evaluated once per batch, before any
//! record is processed, so every record of the first batch is marked cold
//! and no record of a later batch is.

use std::time::{SystemTime, UNIX_EPOCH};

/// Per-process invocation state. One instance per execution context; never
/// shared across contexts.
#[derive(Debug, Default)]
pub struct ExecutionContext {
    invocations: u64,
}

/// Snapshot taken at the start of one batch, held fixed for every record
/// in that batch.
#[derive(Debug, Clone, Copy)]
pub struct BatchContext {
    /// Single wall-clock read for the whole batch. All records in a batch
    /// share this receive time so their relative ordering stays meaningful.
    pub received_at_ns: i64,
    /// Whether this batch is the first one this context instance handles.
    pub consumer_cold_start: bool,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a batch against the current wall clock.
    pub fn begin_batch(&mut self) -> BatchContext {
        self.begin_batch_at(now_epoch_ns())
    }

    /// Opens a batch with an explicit receive timestamp. The cold-start
    /// flag flips from unset to set here, before any record is evaluated.
    pub fn begin_batch_at(&mut self, received_at_ns: i64) -> BatchContext {
        let consumer_cold_start = self.invocations == 0;
        self.invocations += 1;
        BatchContext {
            received_at_ns,
            consumer_cold_start,
        }
    }

    /// Number of batches handled so far by this context instance.
    pub fn invocations(&self) -> u64 {
        self.invocations
    }
}

/// Wall clock as nanoseconds since epoch.
pub fn now_epoch_ns() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as i64)
}

/// Wall clock as milliseconds since epoch.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
