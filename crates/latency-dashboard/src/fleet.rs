// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Default benchmark fleet.

/// Every delivery path the benchmark provisions by default, in the order
/// the test constructs register them. Dashboard sections follow this order.
pub const DEFAULT_FLEET: [&str; 12] = [
    "SQS Standard",
    "SQS FIFO",
    "SNS Standard",
    "SNS FIFO",
    "Step Functions Standard (async)",
    "Step Functions Standard (sync)",
    "Step Functions Express (async)",
    "Step Functions Express (sync)",
    "EventBridge",
    "Kinesis",
    "Kinesis Enhanced Fan Out",
    "DynamoDB Streams",
];
