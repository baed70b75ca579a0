//! Teams webhook delivery — one POST per notification, no retries.

use tracing::debug;

use crate::cards::Card;
use crate::error::WebhookError;

/// Teams incoming-webhook client.
pub struct TeamsWebhook {
    url: String,
    http: reqwest::Client,
}

impl TeamsWebhook {
    /// Create a client targeting the given webhook URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            http: reqwest::Client::new(),
        }
    }

    /// POST the card as JSON.
    ///
    /// A connection failure or a non-2xx response is a hard failure; the
    /// receiving webhook validates the card schema, so a rejection usually
    /// means a malformed payload rather than a transient fault.
    pub async fn send(&self, card: &Card) -> Result<(), WebhookError> {
        debug!(url = %self.url, "posting card to Teams webhook");

        let resp = self
            .http
            .post(&self.url)
            .json(card)
            .send()
            .await
            .map_err(|e| WebhookError::SendFailed(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(WebhookError::Rejected { status, body });
        }

        Ok(())
    }
}
