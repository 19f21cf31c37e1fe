use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_SHIPPING_BATCH_SIZE,
    DEFAULT_SHIPPING_FLUSH_INTERVAL_MS, MAX_SHIPPING_BATCH_SIZE,
};

use serde::{Deserialize, Serialize};

/// `[log_shipping]` - the request-log shipping service
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogShippingConfig {
    pub organization_id: Option<String>,
    pub application_id: Option<String>,
    pub api_url: Option<String>,
    pub batch_size: usize,
    pub flush_interval_ms: u64,
}

impl Default for LogShippingConfig {
    fn default() -> Self {
        Self {
            organization_id: None,
            application_id: None,
            api_url: None,
            batch_size: DEFAULT_SHIPPING_BATCH_SIZE,
            flush_interval_ms: DEFAULT_SHIPPING_FLUSH_INTERVAL_MS,
        }
    }
}

impl LogShippingConfig {
    /// Shipping runs only when all three keys are present.
    pub fn is_enabled(&self) -> bool {
        self.organization_id.is_some() && self.application_id.is_some() && self.api_url.is_some()
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if let Some(ref url) = self.api_url
            && !(url.starts_with("http://") || url.starts_with("https://"))
        {
            return Err(ConfigError::logging(format!(
                "log_shipping.api_url must be an http(s) URL, got '{url}'"
            )));
        }

        if self.batch_size == 0 || self.batch_size > MAX_SHIPPING_BATCH_SIZE {
            return Err(ConfigError::logging(format!(
                "log_shipping.batch_size must be 1-{}, got {}",
                MAX_SHIPPING_BATCH_SIZE, self.batch_size
            )));
        }

        if self.flush_interval_ms == 0 {
            return Err(ConfigError::logging(
                "log_shipping.flush_interval_ms must be greater than 0",
            ));
        }

        Ok(())
    }
}
