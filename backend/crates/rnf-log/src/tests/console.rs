use crate::console::build_dispatch;
use crate::shipping::RequestCapture;
use crate::tests::SharedBuffer;
use crate::{CsvFormatterOptions, CsvLogFormatter, OptionsMonitor, scopes};

use std::collections::BTreeMap;
use std::sync::Arc;

use googletest::assert_that;
use googletest::prelude::{contains_substring, eq};
use log::{Level, LevelFilter, Log, Record};
use rnf_config::{ColorBehavior, ConsoleFormatterKind, ConsoleLoggingConfig, LogLevel, LoggingConfig};

fn logging(level: LevelFilter, console: ConsoleLoggingConfig) -> LoggingConfig {
    LoggingConfig {
        level: LogLevel(level),
        level_overrides: BTreeMap::new(),
        console,
    }
}

fn csv_console() -> ConsoleLoggingConfig {
    ConsoleLoggingConfig {
        formatter: ConsoleFormatterKind::Csv,
        include_scopes: true,
        ..ConsoleLoggingConfig::default()
    }
}

/// Build the logger without installing it globally
fn logger(config: &LoggingConfig, capture: bool) -> (Box<dyn Log>, SharedBuffer) {
    let monitor = OptionsMonitor::new(CsvFormatterOptions::from(&config.console));
    let formatter = Arc::new(CsvLogFormatter::new(&monitor));
    let buffer = SharedBuffer::default();
    let (_level, logger) = build_dispatch(config, formatter, buffer.clone(), capture).into_log();
    (logger, buffer)
}

#[test]
fn given_csv_console_when_record_logged_then_csv_line_written() {
    // Given
    let (logger, buffer) = logger(&logging(LevelFilter::Info, csv_console()), false);

    // When
    logger.log(
        &Record::builder()
            .args(format_args!("Now listening"))
            .level(Level::Info)
            .target("rnf_server")
            .build(),
    );

    // Then
    assert_eq!(
        buffer.contents(),
        "\"Information\",\"rnf_server[0]\",\"\",\"Now listening\"\n"
    );
}

#[test]
fn given_ambient_scopes_when_record_logged_then_scopes_in_line() {
    let (logger, buffer) = logger(&logging(LevelFilter::Info, csv_console()), false);

    scopes::sync_scope("RequestId:1", || {
        scopes::sync_scope("GET /", || {
            logger.log(
                &Record::builder()
                    .args(format_args!("handled"))
                    .level(Level::Info)
                    .target("app")
                    .build(),
            );
        })
    });

    assert_eq!(
        buffer.contents(),
        "\"Information\",\"app[0]\",\"RequestId:1|GET /\",\"handled\"\n"
    );
}

#[test]
fn given_level_warn_when_info_logged_then_nothing_written() {
    let (logger, buffer) = logger(&logging(LevelFilter::Warn, csv_console()), false);

    logger.log(
        &Record::builder()
            .args(format_args!("chatty"))
            .level(Level::Info)
            .target("app")
            .build(),
    );

    assert_that!(buffer.contents().len(), eq(0));
}

#[test]
fn given_category_override_when_logged_then_override_applies() {
    // Given
    let mut config = logging(LevelFilter::Info, csv_console());
    config
        .level_overrides
        .insert(String::from("sqlx"), LogLevel(LevelFilter::Error));
    let (logger, buffer) = logger(&config, false);

    // When
    logger.log(
        &Record::builder()
            .args(format_args!("slow statement"))
            .level(Level::Warn)
            .target("sqlx::query")
            .build(),
    );
    logger.log(
        &Record::builder()
            .args(format_args!("kept"))
            .level(Level::Warn)
            .target("app")
            .build(),
    );

    // Then
    assert_eq!(buffer.contents(), "\"Warning\",\"app[0]\",\"\",\"kept\"\n");
}

#[test]
fn given_simple_console_when_logged_then_bracketed_line() {
    let console = ConsoleLoggingConfig {
        formatter: ConsoleFormatterKind::Simple,
        color_behavior: ColorBehavior::Disabled,
        ..ConsoleLoggingConfig::default()
    };
    let (logger, buffer) = logger(&logging(LevelFilter::Info, console), false);

    logger.log(
        &Record::builder()
            .args(format_args!("hello"))
            .level(Level::Info)
            .target("app")
            .build(),
    );

    let contents = buffer.contents();
    assert_that!(contents, contains_substring(" - INFO] hello [app]"));
}

#[tokio::test]
async fn given_capture_enabled_when_logged_inside_request_then_captured() {
    // Given
    let (logger, buffer) = logger(&logging(LevelFilter::Info, csv_console()), true);
    let capture = RequestCapture::new();

    // When
    capture
        .run(async {
            logger.log(
                &Record::builder()
                    .args(format_args!("inside"))
                    .level(Level::Info)
                    .target("app")
                    .build(),
            );
        })
        .await;
    logger.log(
        &Record::builder()
            .args(format_args!("outside"))
            .level(Level::Info)
            .target("app")
            .build(),
    );

    // Then
    let captured = capture.take();
    assert_that!(captured.len(), eq(1));
    assert_that!(captured[0].message.as_str(), eq("inside"));
    assert_that!(captured[0].level.as_str(), eq("Information"));
    assert_that!(buffer.contents(), contains_substring("\"outside\""));
}
