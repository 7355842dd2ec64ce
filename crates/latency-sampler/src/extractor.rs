// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Latency sample extraction.
//!
//! `extract` correlates the producer-side send timestamp carried inside a
//! delivered record with the batch's single consumer-side receive
//! timestamp. Negative durations are preserved: clocks on the producer and
//! consumer side can disagree, and a negative value is the diagnostic
//! signal for that, not an error.

use base64::Engine;
use serde_json::Value;

use crate::attribute::AttributeMap;
use crate::context::BatchContext;
use crate::envelope::DeliveredRecord;
use crate::errors::ExtractError;

/// The two logical fields every producer writes into its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payload {
    pub sent_timestamp_ns: i64,
    pub producer_cold_start: bool,
}

/// One measured delivery. Created per record, consumed immediately by the
/// emitter, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencySample {
    /// Receive time minus send time. Negative under clock skew.
    pub duration_ns: i64,
    /// Cold if either side of the delivery was a cold invocation.
    pub cold_start: bool,
}

/// Turns one delivered record into a latency sample, or a typed skip
/// decision scoped to this record only.
pub fn extract(raw: &Value, batch: &BatchContext) -> Result<LatencySample, ExtractError> {
    let record = DeliveredRecord::from_value(raw)?;
    let payload = decode_payload(&record, raw)?;
    Ok(LatencySample {
        duration_ns: batch.received_at_ns - payload.sent_timestamp_ns,
        cold_start: batch.consumer_cold_start || payload.producer_cold_start,
    })
}

/// Locates the payload behind whichever envelope the delivery path used.
///
/// Exactly one path is taken per record; a record of one style never
/// decodes through another style's section. Bare payloads (state-machine
/// invocations) are accepted when no envelope section is present.
fn decode_payload(record: &DeliveredRecord, raw: &Value) -> Result<Payload, ExtractError> {
    if let Some(view) = &record.dynamodb {
        let image = view
            .new_image
            .as_ref()
            .ok_or(ExtractError::MissingField("NewImage"))?;
        return payload_from_image(image);
    }
    if let Some(stream) = &record.kinesis {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&stream.data)
            .map_err(|err| ExtractError::MalformedData(err.to_string()))?;
        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|err| ExtractError::MalformedBody(err.to_string()))?;
        return payload_from_json(&value);
    }
    if let Some(sns) = &record.sns {
        let value: Value = serde_json::from_str(&sns.message)
            .map_err(|err| ExtractError::MalformedBody(err.to_string()))?;
        return payload_from_json(&value);
    }
    if let Some(body) = &record.body {
        let value: Value = serde_json::from_str(body)
            .map_err(|err| ExtractError::MalformedBody(err.to_string()))?;
        return payload_from_json(&value);
    }
    if let Some(detail) = &record.detail {
        return payload_from_json(detail);
    }
    if raw.get("sent_timestamp_ns").is_some() || raw.get("producer_cold_start").is_some() {
        return payload_from_json(raw);
    }
    Err(ExtractError::UnrecognizedEnvelope)
}

/// Reads the payload fields from a plain JSON object.
fn payload_from_json(value: &Value) -> Result<Payload, ExtractError> {
    let sent = value
        .get("sent_timestamp_ns")
        .ok_or(ExtractError::MissingField("sent_timestamp_ns"))?;
    let sent_timestamp_ns = sent.as_i64().ok_or(ExtractError::WrongType {
        field: "sent_timestamp_ns",
        expected: "integer",
        found: json_kind(sent),
    })?;

    let cold = value
        .get("producer_cold_start")
        .ok_or(ExtractError::MissingField("producer_cold_start"))?;
    let producer_cold_start = cold.as_bool().ok_or(ExtractError::WrongType {
        field: "producer_cold_start",
        expected: "boolean",
        found: json_kind(cold),
    })?;

    Ok(Payload {
        sent_timestamp_ns,
        producer_cold_start,
    })
}

/// Reads the payload fields from a type-tagged record image.
fn payload_from_image(image: &AttributeMap) -> Result<Payload, ExtractError> {
    let sent_timestamp_ns = image
        .get("sent_timestamp_ns")
        .ok_or(ExtractError::MissingField("sent_timestamp_ns"))?
        .as_i64("sent_timestamp_ns")?;
    let producer_cold_start = image
        .get("producer_cold_start")
        .ok_or(ExtractError::MissingField("producer_cold_start"))?
        .as_bool("producer_cold_start")?;
    Ok(Payload {
        sent_timestamp_ns,
        producer_cold_start,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use proptest::prelude::*;
    use serde_json::json;

    fn warm_batch(received_at_ns: i64) -> BatchContext {
        BatchContext {
            received_at_ns,
            consumer_cold_start: false,
        }
    }

    fn cold_batch(received_at_ns: i64) -> BatchContext {
        BatchContext {
            received_at_ns,
            consumer_cold_start: true,
        }
    }

    #[test]
    fn test_change_feed_record_yields_duration() {
        let raw = json!({
            "eventID": "abc",
            "dynamodb": {
                "NewImage": {
                    "sent_timestamp_ns": {"N": "1000"},
                    "producer_cold_start": {"BOOL": false}
                }
            }
        });
        let sample = extract(&raw, &warm_batch(1500)).unwrap();
        assert_eq!(sample.duration_ns, 500);
        assert!(!sample.cold_start);
    }

    #[test]
    fn test_negative_duration_is_preserved() {
        let raw = json!({
            "dynamodb": {
                "NewImage": {
                    "sent_timestamp_ns": {"N": "2000"},
                    "producer_cold_start": {"BOOL": false}
                }
            }
        });
        let sample = extract(&raw, &warm_batch(1500)).unwrap();
        assert_eq!(sample.duration_ns, -500);
    }

    #[test]
    fn test_queue_record_decodes_json_body() {
        let raw = json!({
            "messageId": "m-1",
            "body": "{\"sent_timestamp_ns\": 100, \"producer_cold_start\": true}"
        });
        let sample = extract(&raw, &warm_batch(250)).unwrap();
        assert_eq!(sample.duration_ns, 150);
        assert!(sample.cold_start);
    }

    #[test]
    fn test_topic_record_decodes_notification_message() {
        let raw = json!({
            "Sns": {
                "Message": "{\"sent_timestamp_ns\": 100, \"producer_cold_start\": false}"
            }
        });
        let sample = extract(&raw, &warm_batch(101)).unwrap();
        assert_eq!(sample.duration_ns, 1);
    }

    #[test]
    fn test_stream_record_decodes_base64_data() {
        let payload = r#"{"sent_timestamp_ns": 7, "producer_cold_start": false}"#;
        let data = base64::engine::general_purpose::STANDARD.encode(payload);
        let raw = json!({"eventID": "shard-1", "kinesis": {"data": data}});
        let sample = extract(&raw, &warm_batch(10)).unwrap();
        assert_eq!(sample.duration_ns, 3);
    }

    #[test]
    fn test_event_bus_record_uses_detail() {
        let raw = json!({
            "detail-type": "latency-test",
            "detail": {"sent_timestamp_ns": 5, "producer_cold_start": false}
        });
        let sample = extract(&raw, &warm_batch(9)).unwrap();
        assert_eq!(sample.duration_ns, 4);
    }

    #[test]
    fn test_bare_payload_is_accepted() {
        let raw = json!({"sent_timestamp_ns": 40, "producer_cold_start": false});
        let sample = extract(&raw, &warm_batch(100)).unwrap();
        assert_eq!(sample.duration_ns, 60);
    }

    #[test]
    fn test_consumer_cold_start_marks_every_sample() {
        let raw = json!({"sent_timestamp_ns": 1, "producer_cold_start": false});
        let sample = extract(&raw, &cold_batch(2)).unwrap();
        assert!(sample.cold_start);
    }

    #[test]
    fn test_producer_cold_start_alone_marks_the_sample() {
        let raw = json!({"sent_timestamp_ns": 1, "producer_cold_start": true});
        let sample = extract(&raw, &warm_batch(2)).unwrap();
        assert!(sample.cold_start);
    }

    #[test]
    fn test_missing_timestamp_is_skip() {
        let raw = json!({"producer_cold_start": false});
        assert_eq!(
            extract(&raw, &warm_batch(1)),
            Err(ExtractError::MissingField("sent_timestamp_ns"))
        );
    }

    #[test]
    fn test_missing_cold_start_flag_is_skip() {
        let raw = json!({"sent_timestamp_ns": 1});
        assert_eq!(
            extract(&raw, &warm_batch(1)),
            Err(ExtractError::MissingField("producer_cold_start"))
        );
    }

    #[test]
    fn test_wrong_timestamp_type_is_skip() {
        let raw = json!({"sent_timestamp_ns": "1", "producer_cold_start": false});
        assert_eq!(
            extract(&raw, &warm_batch(1)),
            Err(ExtractError::WrongType {
                field: "sent_timestamp_ns",
                expected: "integer",
                found: "string",
            })
        );
    }

    #[test]
    fn test_unparseable_body_is_skip() {
        let raw = json!({"body": "not json"});
        assert!(matches!(
            extract(&raw, &warm_batch(1)),
            Err(ExtractError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_invalid_base64_data_is_skip() {
        let raw = json!({"kinesis": {"data": "!!not-base64!!"}});
        assert!(matches!(
            extract(&raw, &warm_batch(1)),
            Err(ExtractError::MalformedData(_))
        ));
    }

    #[test]
    fn test_empty_object_is_unrecognized() {
        let raw = json!({"something": "else"});
        assert_eq!(
            extract(&raw, &warm_batch(1)),
            Err(ExtractError::UnrecognizedEnvelope)
        );
    }

    #[test]
    fn test_missing_new_image_is_skip() {
        let raw = json!({"dynamodb": {"Keys": {}}});
        assert_eq!(
            extract(&raw, &warm_batch(1)),
            Err(ExtractError::MissingField("NewImage"))
        );
    }

    // Recursion depth 3 keeps case generation cheap while still covering
    // nested arrays and objects.
    fn arbitrary_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-zA-Z0-9_ {}:\"]*".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::hash_map("[a-zA-Z_]{1,12}", inner, 0..4)
                    .prop_map(|entries| Value::Object(entries.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn test_extract_never_panics_on_arbitrary_input(raw in arbitrary_json()) {
            let _ = extract(&raw, &warm_batch(0));
        }

        #[test]
        fn test_valid_payload_always_yields_exact_duration(
            sent in any::<i32>(),
            received in any::<i32>(),
            producer_cold in any::<bool>(),
        ) {
            let raw = json!({
                "sent_timestamp_ns": sent,
                "producer_cold_start": producer_cold,
            });
            let batch = warm_batch(i64::from(received));
            let sample = extract(&raw, &batch).unwrap();
            prop_assert_eq!(sample.duration_ns, i64::from(received) - i64::from(sent));
            prop_assert_eq!(sample.cold_start, producer_cold);
        }
    }
}
