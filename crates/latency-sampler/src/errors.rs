// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Error taxonomy for the per-record skip path.

use thiserror::Error;

/// Why a delivered record could not be turned into a latency sample.
///
/// Every variant is scoped to a single record: the caller logs it with the
/// record's identifying context and continues with the next record in the
/// batch. None of these escalate to a batch failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The record matches none of the known envelope shapes and carries no
    /// payload fields of its own.
    #[error("record carries no recognizable payload envelope")]
    UnrecognizedEnvelope,

    /// The record's envelope section exists but does not have the expected
    /// structure.
    #[error("malformed record envelope: {0}")]
    MalformedEnvelope(String),

    /// A required payload field is absent.
    #[error("missing payload field '{0}'")]
    MissingField(&'static str),

    /// A required payload field carries a value of the wrong type.
    #[error("payload field '{field}' is {found}, expected {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A type-tagged number wrapper whose inner string is not an integer.
    #[error("payload field '{field}' is not a valid integer: '{value}'")]
    MalformedNumber { field: &'static str, value: String },

    /// A string-wrapped payload body that is not valid JSON.
    #[error("payload body is not valid JSON: {0}")]
    MalformedBody(String),

    /// Stream record data that is not valid standard base64.
    #[error("stream record data is not valid base64: {0}")]
    MalformedData(String),
}
