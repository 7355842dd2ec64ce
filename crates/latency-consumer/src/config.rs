// Copyright 2023-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use std::env;

use latency_sampler::label::MessagingType;

/// Process-wide configuration, read once at startup and fixed for the
/// process's lifetime.
#[derive(Debug)]
pub struct Config {
    /// Delivery path this consumer instance is measuring.
    pub messaging_type: MessagingType,
    /// Log level for the tracing subscriber.
    pub log_level: String,
}

impl Config {
    pub fn new() -> Result<Config, Box<dyn std::error::Error>> {
        let raw = env::var("MESSAGING_TYPE")
            .map_err(|_| anyhow::anyhow!("MESSAGING_TYPE environment variable is not set"))?;
        let messaging_type = MessagingType::parse(&raw).ok_or_else(|| {
            anyhow::anyhow!("MESSAGING_TYPE is not a usable messaging type label: {raw:?}")
        })?;

        let log_level = env::var("LOG_LEVEL")
            .map(|val| val.to_lowercase())
            .unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            messaging_type,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use duplicate::duplicate_item;
    use serial_test::serial;
    use std::env;

    use crate::config::Config;

    #[test]
    #[serial]
    fn test_error_if_no_messaging_type_env_var() {
        env::remove_var("MESSAGING_TYPE");
        let config = Config::new();
        assert!(config.is_err());
        assert_eq!(
            config.unwrap_err().to_string(),
            "MESSAGING_TYPE environment variable is not set"
        );
    }

    #[test]
    #[serial]
    fn test_error_if_messaging_type_is_blank() {
        env::set_var("MESSAGING_TYPE", "   ");
        let config = Config::new();
        assert!(config.is_err());
        env::remove_var("MESSAGING_TYPE");
    }

    #[duplicate_item(
        test_name                          label;
        [test_sqs_standard_label]          ["SQS Standard"];
        [test_kinesis_efo_label]           ["Kinesis Enhanced Fan Out"];
        [test_sfn_express_async_label]     ["Step Functions Express (async)"];
        [test_ddb_streams_label]           ["DynamoDB Streams"];
    )]
    #[test]
    #[serial]
    fn test_name() {
        env::set_var("MESSAGING_TYPE", label);
        let config = Config::new().unwrap();
        assert_eq!(config.messaging_type.as_str(), label);
        env::remove_var("MESSAGING_TYPE");
    }

    #[test]
    #[serial]
    fn test_default_log_level() {
        env::set_var("MESSAGING_TYPE", "SQS Standard");
        env::remove_var("LOG_LEVEL");
        let config = Config::new().unwrap();
        assert_eq!(config.log_level, "info");
        env::remove_var("MESSAGING_TYPE");
    }

    #[test]
    #[serial]
    fn test_log_level_is_lowercased() {
        env::set_var("MESSAGING_TYPE", "SQS Standard");
        env::set_var("LOG_LEVEL", "DEBUG");
        let config = Config::new().unwrap();
        assert_eq!(config.log_level, "debug");
        env::remove_var("MESSAGING_TYPE");
        env::remove_var("LOG_LEVEL");
    }

    #[test]
    #[serial]
    fn test_label_whitespace_is_trimmed() {
        env::set_var("MESSAGING_TYPE", "  EventBridge  ");
        let config = Config::new().unwrap();
        assert_eq!(config.messaging_type.as_str(), "EventBridge");
        env::remove_var("MESSAGING_TYPE");
    }
}
