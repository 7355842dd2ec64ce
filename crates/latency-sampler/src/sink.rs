// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Metric transport.
//!
//! Emission is a side channel: documents are handed to a bounded queue and
//! a service task drains them to stdout, where the monitoring substrate
//! scrapes them out-of-band. The hand-off never blocks the batch handler;
//! when the queue is full the document is dropped and the drop is logged.
//! Transport failures are visible in logs but never retried in-band and
//! never surfaced to the caller.

use std::sync::Mutex;

use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tracing::{debug, error};

/// Destination for serialized metric documents. Implementations must not
/// block the caller.
pub trait MetricSink {
    /// Hands one document line to the transport.
    fn submit(&self, document: String);
}

#[derive(Debug)]
pub enum SinkCommand {
    Write(String),
    Shutdown,
}

/// Cheap-to-clone handle over the sink channel.
#[derive(Clone)]
pub struct SinkHandle {
    tx: mpsc::Sender<SinkCommand>,
}

impl MetricSink for SinkHandle {
    fn submit(&self, document: String) {
        if let Err(err) = self.tx.try_send(SinkCommand::Write(document)) {
            error!("metric document dropped: {err}");
        }
    }
}

impl SinkHandle {
    /// Asks the service to stop after draining queued documents.
    pub fn shutdown(&self) {
        if let Err(err) = self.tx.try_send(SinkCommand::Shutdown) {
            error!("failed to send sink shutdown command: {err}");
        }
    }
}

/// Drains the sink channel to stdout, one document per line.
pub struct SinkService {
    rx: mpsc::Receiver<SinkCommand>,
}

impl SinkService {
    pub fn new(capacity: usize) -> (SinkService, SinkHandle) {
        let (tx, rx) = mpsc::channel(capacity);
        (SinkService { rx }, SinkHandle { tx })
    }

    pub async fn run(mut self) {
        debug!("metric sink started");
        let mut stdout = tokio::io::stdout();

        while let Some(command) = self.rx.recv().await {
            match command {
                SinkCommand::Write(line) => {
                    if let Err(err) = write_line(&mut stdout, &line).await {
                        error!("failed to write metric document: {err}");
                    }
                }
                SinkCommand::Shutdown => break,
            }
        }

        debug!("metric sink stopped");
    }
}

async fn write_line(stdout: &mut tokio::io::Stdout, line: &str) -> std::io::Result<()> {
    stdout.write_all(line.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}

/// Collects documents in memory instead of writing them out. Lets tests
/// assert on emitted records without a live monitoring backend.
#[derive(Debug, Default)]
pub struct MemorySink {
    documents: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything submitted so far, in submission order.
    pub fn documents(&self) -> Vec<String> {
        match self.documents.lock() {
            Ok(documents) => documents.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl MetricSink for MemorySink {
    fn submit(&self, document: String) {
        match self.documents.lock() {
            Ok(mut documents) => documents.push(document),
            Err(poisoned) => poisoned.into_inner().push(document),
        }
    }
}
