use anyhow::{Context, Result, bail};
use octocrab::Octocrab;
use octocrab::service::middleware::retry::RetryConfig;

use crate::config::types::WebhookFlavor;
use crate::workflow::ChatNotifier;

/// Posts messages to an incoming-webhook URL (Discord or Slack).
///
/// Uses its own unauthenticated client: the GitHub token must never be sent
/// to the chat service.
pub struct WebhookNotifier {
    client: Octocrab,
    url: String,
    flavor: WebhookFlavor,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>, flavor: WebhookFlavor) -> Result<Self> {
        let url = url.into();
        let uri = url
            .parse::<http::Uri>()
            .with_context(|| format!("invalid webhook URL {url:?}"))?;
        if uri.scheme().is_none() || uri.host().is_none() {
            bail!("webhook URL {url:?} must be absolute");
        }
        // No retries: each announcement is posted at most once.
        let client = Octocrab::builder()
            .add_retry_config(RetryConfig::None)
            .build()
            .context("building webhook HTTP client")?;
        Ok(Self {
            client,
            url,
            flavor,
        })
    }
}

/// JSON body for `content` in the given flavor.
pub fn payload(flavor: WebhookFlavor, content: &str) -> serde_json::Value {
    match flavor {
        WebhookFlavor::Discord => serde_json::json!({ "content": content }),
        WebhookFlavor::Slack => serde_json::json!({ "text": content }),
    }
}

impl ChatNotifier for WebhookNotifier {
    async fn send_message(&self, content: &str) -> Result<()> {
        let body = payload(self.flavor, content);
        let response = self
            .client
            ._post(self.url.as_str(), Some(&body))
            .await
            .context("posting to chat webhook")?;

        let status = response.status();
        if !status.is_success() {
            bail!("chat webhook responded with HTTP {status}");
        }
        tracing::debug!(%status, "chat notification delivered");
        Ok(())
    }
}
