use super::{ExceptionFormatter, FormatterArgs, RequestLog, RequestLogBatch, with_exception};
use crate::error::Result as LogErrorResult;

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use rnf_config::LogShippingConfig;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

/// Collector endpoint, relative to the configured API url.
pub const REQUEST_LOGS_PATH: &str = "/api/logs/v1/request-logs";

enum ShipperCommand {
    Ship(Box<RequestLog>),
    Flush(oneshot::Sender<()>),
}

/// Queues request logs and posts them from a background task.
///
/// Posting failures are logged and the batch is dropped; nothing is retried.
#[derive(Clone)]
pub struct LogShipper {
    sender: mpsc::UnboundedSender<ShipperCommand>,
    formatter: ExceptionFormatter,
}

impl LogShipper {
    /// Start the background task with the default exception formatter.
    /// `None` (and a warning) when the organization, application or url is missing.
    pub fn start(config: &LogShippingConfig) -> Option<Self> {
        Self::with_formatter(config, Arc::new(with_exception))
    }

    pub fn with_formatter(config: &LogShippingConfig, formatter: ExceptionFormatter) -> Option<Self> {
        let (Some(organization_id), Some(application_id), Some(api_url)) = (
            config.organization_id.clone(),
            config.application_id.clone(),
            config.api_url.as_deref(),
        ) else {
            warn!("Log shipping disabled: organization_id, application_id and api_url are all required");
            return None;
        };

        let client = match shipping_client() {
            Ok(client) => client,
            Err(e) => {
                warn!("Log shipping disabled: {e}");
                return None;
            }
        };

        let endpoint = format!("{}{REQUEST_LOGS_PATH}", api_url.trim_end_matches('/'));
        info!("Log shipping to {endpoint}");

        let worker = ShipperWorker {
            client,
            endpoint,
            organization_id,
            application_id,
            batch_size: config.batch_size.max(1),
            flush_interval: Duration::from_millis(config.flush_interval_ms.max(1)),
        };

        let (sender, receiver) = mpsc::unbounded_channel();
        tokio::spawn(worker.run(receiver));

        Some(Self { sender, formatter })
    }

    /// Text shipped for a message, after the exception formatter has seen it.
    pub fn format(&self, default_value: &str, exception: Option<&dyn Error>) -> String {
        (self.formatter)(&FormatterArgs {
            default_value,
            exception,
        })
    }

    pub fn ship(&self, log: RequestLog) {
        if self.sender.send(ShipperCommand::Ship(Box::new(log))).is_err() {
            warn!("Log shipper stopped, request log dropped");
        }
    }

    /// Post everything queued so far and wait for the attempt to finish.
    pub async fn flush(&self) {
        let (done, finished) = oneshot::channel();
        if self.sender.send(ShipperCommand::Flush(done)).is_err() {
            return;
        }

        if finished.await.is_err() {
            warn!("Log shipper stopped before flushing");
        }
    }
}

/// HTTP client used to post batches; speaks both http and https.
#[track_caller]
pub fn shipping_client() -> LogErrorResult<reqwest::Client> {
    Ok(reqwest::Client::builder().build()?)
}

struct ShipperWorker {
    client: reqwest::Client,
    endpoint: String,
    organization_id: String,
    application_id: String,
    batch_size: usize,
    flush_interval: Duration,
}

impl ShipperWorker {
    async fn run(self, mut receiver: mpsc::UnboundedReceiver<ShipperCommand>) {
        let mut pending: Vec<RequestLog> = Vec::with_capacity(self.batch_size);
        let mut ticker = tokio::time::interval(self.flush_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                command = receiver.recv() => match command {
                    Some(ShipperCommand::Ship(log)) => {
                        pending.push(*log);
                        if pending.len() >= self.batch_size {
                            self.post(&mut pending).await;
                        }
                    }
                    Some(ShipperCommand::Flush(done)) => {
                        self.post(&mut pending).await;
                        let _ = done.send(());
                    }
                    None => {
                        self.post(&mut pending).await;
                        debug!("Log shipper queue closed");
                        break;
                    }
                },
                _ = ticker.tick() => self.post(&mut pending).await,
            }
        }
    }

    async fn post(&self, pending: &mut Vec<RequestLog>) {
        if pending.is_empty() {
            return;
        }

        let batch = RequestLogBatch {
            organization_id: self.organization_id.clone(),
            application_id: self.application_id.clone(),
            logs: std::mem::take(pending),
        };
        let count = batch.logs.len();

        match self.send(&batch).await {
            Ok(()) => debug!("Shipped {count} request log(s)"),
            Err(e) => warn!("Dropping {count} request log(s): {e}"),
        }
    }

    async fn send(&self, batch: &RequestLogBatch) -> LogErrorResult<()> {
        self.client
            .post(&self.endpoint)
            .json(batch)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
