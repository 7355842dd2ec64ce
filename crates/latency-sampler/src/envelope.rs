// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Per-path record envelope shapes.
//!
//! Every delivery path wraps the producer's payload differently: queues put
//! a JSON string in `body`, topics nest it under `Sns.Message`, streams
//! base64-encode it in `kinesis.data`, change feeds carry a type-tagged
//! image under `dynamodb.NewImage`, and event-bus or state-machine styles
//! hand the payload over directly (optionally under `detail`). One record
//! type tolerates all of them; the sections that are absent stay `None`.

use serde::Deserialize;
use serde_json::Value;

use crate::attribute::AttributeMap;
use crate::errors::ExtractError;

/// One delivered record, decoded from a batch event's `Records` entry or
/// from a direct invocation payload. Immutable once decoded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeliveredRecord {
    /// Stream and change-feed record id.
    #[serde(rename = "eventID", default)]
    pub event_id: Option<String>,

    /// Queue message id.
    #[serde(rename = "messageId", default)]
    pub message_id: Option<String>,

    /// Source tag, e.g. `aws:sqs`, when the backend provides one.
    #[serde(rename = "eventSource", alias = "EventSource", default)]
    pub event_source: Option<String>,

    /// Queue style: payload as a JSON string.
    #[serde(default)]
    pub body: Option<String>,

    /// Topic style: payload nested in the notification envelope.
    #[serde(rename = "Sns", default)]
    pub sns: Option<SnsEnvelope>,

    /// Stream style: payload as base64-wrapped JSON.
    #[serde(default)]
    pub kinesis: Option<KinesisEnvelope>,

    /// Change-feed style: payload as a type-tagged record image.
    #[serde(default)]
    pub dynamodb: Option<StreamView>,

    /// Event-bus style: payload as a plain JSON object.
    #[serde(default)]
    pub detail: Option<Value>,
}

/// Topic notification envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct SnsEnvelope {
    #[serde(rename = "Message")]
    pub message: String,
    #[serde(rename = "MessageId", default)]
    pub message_id: Option<String>,
}

/// Stream record envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct KinesisEnvelope {
    /// Standard-base64 encoding of the JSON payload.
    pub data: String,
}

/// Change-feed stream view. Only the new image is of interest; the
/// benchmark payload is written once and never updated.
#[derive(Debug, Clone, Deserialize)]
pub struct StreamView {
    #[serde(rename = "NewImage", default)]
    pub new_image: Option<AttributeMap>,
}

impl DeliveredRecord {
    /// Decodes one `Records` entry. A mis-shaped entry is a per-record
    /// error; sibling records are unaffected.
    pub fn from_value(raw: &Value) -> Result<DeliveredRecord, ExtractError> {
        DeliveredRecord::deserialize(raw)
            .map_err(|err| ExtractError::MalformedEnvelope(err.to_string()))
    }

    /// Identifying context for skip logs: whichever id the backend put on
    /// the record.
    pub fn identity(&self) -> Option<&str> {
        self.event_id
            .as_deref()
            .or(self.message_id.as_deref())
            .or_else(|| self.sns.as_ref().and_then(|sns| sns.message_id.as_deref()))
    }
}
