// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Latency benchmark consumer.
//!
//! Reads batch events (one JSON document per line) from stdin, runs each
//! through the measurement pipeline and writes one embedded-metric
//! document per delivered test message to stdout. Logs go to stderr so
//! the metric stream stays scrapeable.

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

mod config;

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use latency_sampler::constants::SINK_QUEUE_CAPACITY;
use latency_sampler::handler::BatchHandler;
use latency_sampler::sink::{MetricSink, SinkService};

use crate::config::Config;

/// Where batch events come from. Varies by environment; tests replay a
/// fixed sequence.
enum EventReader {
    /// One JSON batch event per line on stdin.
    Stdin(Lines<BufReader<Stdin>>),
    /// Replays stored events for testing.
    #[allow(dead_code)]
    Replay(std::vec::IntoIter<String>),
}

impl EventReader {
    fn stdin() -> EventReader {
        EventReader::Stdin(BufReader::new(tokio::io::stdin()).lines())
    }

    async fn next_event(&mut self) -> std::io::Result<Option<String>> {
        match self {
            EventReader::Stdin(lines) => lines.next_line().await,
            EventReader::Replay(events) => Ok(events.next()),
        }
    }
}

#[tokio::main]
pub async fn main() {
    let log_level = std::env::var("LOG_LEVEL")
        .map(|val| val.to_lowercase())
        .unwrap_or("info".to_string());

    #[allow(clippy::expect_used)]
    let subscriber = tracing_subscriber::fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(log_level).expect("could not parse log level in configuration"),
        )
        .with_level(true)
        .with_thread_names(false)
        .with_thread_ids(false)
        .with_line_number(false)
        .with_file(false)
        .with_target(true)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();

    #[allow(clippy::expect_used)]
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    debug!("Logging subsystem enabled");

    let config = match Config::new() {
        Ok(config) => config,
        Err(err) => {
            error!("Error creating config on latency consumer startup: {err}");
            return;
        }
    };

    let cancel_token = CancellationToken::new();
    {
        let cancel_token = cancel_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("shutdown signal received");
                cancel_token.cancel();
            }
        });
    }

    let (service, sink_handle) = SinkService::new(SINK_QUEUE_CAPACITY);
    let sink_task = tokio::spawn(service.run());

    info!(
        "consuming batch events for messaging type: {}",
        config.messaging_type
    );
    let mut handler = BatchHandler::new(config.messaging_type, sink_handle.clone());
    consume_events(&mut handler, EventReader::stdin(), cancel_token).await;

    sink_handle.shutdown();
    if let Err(err) = sink_task.await {
        error!("metric sink task failed: {err}");
    }
}

/// Main event loop. A malformed event line is logged and skipped; a read
/// error or end-of-stream ends the loop.
async fn consume_events<S: MetricSink>(
    handler: &mut BatchHandler<S>,
    mut reader: EventReader,
    cancel_token: CancellationToken,
) {
    loop {
        let next = tokio::select! {
            biased;
            _ = cancel_token.cancelled() => break,
            next = reader.next_event() => next,
        };

        match next {
            Ok(Some(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<serde_json::Value>(line) {
                    Ok(event) => {
                        handler.handle(&event);
                    }
                    Err(err) => error!("skipping malformed batch event: {err}"),
                }
            }
            Ok(None) => {
                debug!("event stream closed");
                break;
            }
            Err(err) => {
                error!("failed to read event stream: {err}");
                break;
            }
        }
    }
}
