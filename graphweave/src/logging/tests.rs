use crate::config::{LogFormat, LogLevel, LoggingConfig};
use crate::logging::{LogError, level_to_log_level, log_level_to_level, parse_log_level};
use std::sync::Once;

// The global subscriber can only be installed once per test binary
static INIT: Once = Once::new();

#[test]
fn test_init_console_logging() {
    INIT.call_once(|| {
        let config = LoggingConfig {
            level: LogLevel::Debug,
            format: LogFormat::Default,
            file: None,
            stdout: true,
        };
        assert!(crate::logging::init(&config).is_ok());
    });
}

#[test]
fn test_reinit_is_tolerated() {
    INIT.call_once(|| {
        let _ = crate::logging::init(&LoggingConfig::default());
    });
    let config = LoggingConfig {
        format: LogFormat::Json,
        ..LoggingConfig::default()
    };
    assert!(crate::logging::init(&config).is_ok());
}

#[test]
fn test_level_conversion() {
    assert_eq!(parse_log_level("trace").unwrap(), LogLevel::Trace);
    assert_eq!(parse_log_level("DEBUG").unwrap(), LogLevel::Debug);
    assert_eq!(parse_log_level("warn").unwrap(), LogLevel::Warn);
    assert!(matches!(
        parse_log_level("verbose"),
        Err(LogError::InvalidLogLevel(_))
    ));

    for level in [
        tracing::Level::TRACE,
        tracing::Level::DEBUG,
        tracing::Level::INFO,
        tracing::Level::WARN,
        tracing::Level::ERROR,
    ] {
        assert_eq!(log_level_to_level(level_to_log_level(level)), level);
    }
}
