// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Messaging-type label validation.

use derive_more::Display;

/// Human-readable label identifying one delivery path under test, e.g.
/// `SQS Standard` or `Kinesis Enhanced Fan Out`. Fixed for the lifetime of
/// the process and used as the dimension value joining live metrics to the
/// dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub struct MessagingType(String);

impl MessagingType {
    /// Parses and validates a label. Surrounding whitespace is trimmed; the
    /// result must be non-empty and free of control characters so it can be
    /// used verbatim as a dimension value and a dashboard title.
    pub fn parse(label: &str) -> Option<MessagingType> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.chars().any(char::is_control) {
            tracing::error!(
                "messaging type label contains control characters: {:?}. Ignoring label.",
                trimmed
            );
            return None;
        }
        Some(MessagingType(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_labels() {
        assert_eq!(
            MessagingType::parse("SQS Standard").unwrap().as_str(),
            "SQS Standard"
        );
        assert_eq!(
            MessagingType::parse("Step Functions Express (async)")
                .unwrap()
                .as_str(),
            "Step Functions Express (async)"
        );
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(
            MessagingType::parse("  Kinesis  ").unwrap().as_str(),
            "Kinesis"
        );
    }

    #[test]
    fn test_parse_rejects_empty_and_whitespace_only() {
        assert!(MessagingType::parse("").is_none());
        assert!(MessagingType::parse("   ").is_none());
        assert!(MessagingType::parse("\t\n").is_none());
    }

    #[test]
    fn test_parse_rejects_control_characters() {
        assert!(MessagingType::parse("SQS\nStandard").is_none());
        assert!(MessagingType::parse("SQS\u{7}Standard").is_none());
    }

    #[test]
    fn test_display_matches_inner_label() {
        let label = MessagingType::parse("EventBridge").unwrap();
        assert_eq!(label.to_string(), "EventBridge");
    }
}
