//! Error types for the notifier.

/// Top-level error type for the notifier.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Webhook error: {0}")]
    Webhook(#[from] WebhookError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// No explicit webhook and no `<branch>_teams_webhook` fallback either.
    #[error("no webhook endpoint provided (set the webhook setting or {var})")]
    MissingWebhook { var: String },
}

/// Webhook delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum WebhookError {
    #[error("Failed to send request to Teams webhook: {0}")]
    SendFailed(String),

    #[error("Teams webhook rejected the card: HTTP {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Result type alias for the notifier.
pub type Result<T> = std::result::Result<T, Error>;
