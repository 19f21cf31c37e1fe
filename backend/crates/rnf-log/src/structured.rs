use crate::error::{LogError, Result as LogErrorResult};

use std::path::Path;

use log::info;
use rnf_config::{StructuredLogFormat, StructuredLogRotation, StructuredLoggingConfig};
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Install the structured (tracing) pipeline as the global subscriber.
///
/// Files go under `<content_root>/<directory>`; with no directory events go
/// to stderr. The returned guard flushes pending events when dropped, so keep
/// it alive until shutdown. Returns `None` when the pipeline is disabled.
#[track_caller]
pub fn initialize(
    config: &StructuredLoggingConfig,
    content_root: &Path,
) -> LogErrorResult<Option<WorkerGuard>> {
    if !config.enabled {
        info!("Structured logging disabled");
        return Ok(None);
    }

    let (writer, guard) = match config.directory {
        Some(ref directory) => {
            let directory = content_root.join(directory);
            std::fs::create_dir_all(&directory)?;

            let appender = RollingFileAppender::new(
                rotation(config.rotation),
                &directory,
                &config.file_prefix,
            );
            info!(
                "Structured logging to {} ({:?} rotation)",
                directory.display(),
                config.rotation
            );
            tracing_appender::non_blocking(appender)
        }
        None => {
            info!("Structured logging to stderr");
            tracing_appender::non_blocking(std::io::stderr())
        }
    };

    let subscriber = build_subscriber(config, writer)?;
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LogError::init("structured", e.to_string()))?;

    Ok(Some(guard))
}

/// Build the subscriber without installing it.
#[track_caller]
pub fn build_subscriber<W>(
    config: &StructuredLoggingConfig,
    writer: W,
) -> LogErrorResult<Box<dyn Subscriber + Send + Sync>>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_new(config.level.as_str())
        .map_err(|e| LogError::init("structured", e.to_string()))?;

    let layer = match config.format {
        StructuredLogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(writer)
            .boxed(),
        StructuredLogFormat::Text => fmt::layer().with_ansi(false).with_writer(writer).boxed(),
    };

    Ok(Box::new(
        tracing_subscriber::registry().with(layer).with(filter),
    ))
}

fn rotation(rotation: StructuredLogRotation) -> Rotation {
    match rotation {
        StructuredLogRotation::Daily => Rotation::DAILY,
        StructuredLogRotation::Hourly => Rotation::HOURLY,
        StructuredLogRotation::Never => Rotation::NEVER,
    }
}
