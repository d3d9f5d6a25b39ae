use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{error, info};

use shipwatch_core::models::PendingOrder;
use shipwatch_core::repository::OrderSource;

/// Response envelope used by the upstream order API
#[derive(Debug, Deserialize)]
struct Envelope {
    code: i64,
    message: Option<String>,
    data: Option<Vec<PendingOrder>>,
}

/// Order source backed by the existing order-query HTTP API
pub struct HttpOrderSource {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl HttpOrderSource {
    pub fn new(url: &str, token: &str) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl OrderSource for HttpOrderSource {
    async fn fetch_pending(
        &self,
    ) -> Result<Vec<PendingOrder>, Box<dyn std::error::Error + Send + Sync>> {
        info!(url = %self.url, "fetching pending orders from order source");

        let response = self
            .client
            .get(&self.url)
            .bearer_auth(&self.token)
            // Only orders still awaiting delivery are worth reconciling
            .query(&[("status", "PENDING,SHIPPED")])
            .send()
            .await?
            .error_for_status()?;

        let envelope: Envelope = response.json().await?;

        if envelope.code != 200 {
            let message = envelope.message.unwrap_or_else(|| "unknown error".to_string());
            error!(code = envelope.code, message = %message, "order source returned an error envelope");
            return Err(format!("order source returned code {}: {}", envelope.code, message).into());
        }

        let orders = envelope.data.unwrap_or_default();
        info!(count = orders.len(), "fetched pending orders");
        Ok(orders)
    }
}
