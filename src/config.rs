//! Plugin settings and their resolution against the pipeline context.

use crate::error::ConfigError;

/// Which payload variant to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    /// The legacy MessageCard shape.
    Legacy,
    /// The richer AdaptiveCard shape.
    Adaptive,
}

impl CardVariant {
    /// Case-insensitive match on `"adaptive"`; anything else is legacy.
    pub fn parse(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("adaptive") {
            Self::Adaptive
        } else {
            Self::Legacy
        }
    }
}

/// Raw plugin settings as Drone hands them over (`PLUGIN_*` variables).
#[derive(Debug, Clone, Default)]
pub struct Settings {
    /// Teams incoming-webhook URL. May be empty; see [`Settings::resolve`].
    pub webhook: String,
    /// Status override. Empty means "use the build's own status".
    pub status: String,
    /// Card variant selector, matched case-insensitively against `adaptive`.
    pub card: String,
}

impl Settings {
    /// Read the plugin settings from the `PLUGIN_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            webhook: std::env::var("PLUGIN_WEBHOOK").unwrap_or_default(),
            status: std::env::var("PLUGIN_STATUS").unwrap_or_default(),
            card: std::env::var("PLUGIN_CARD").unwrap_or_default(),
        }
    }

    /// Validate and complete the settings.
    ///
    /// An empty webhook falls back to the `<branch>_teams_webhook`
    /// environment variable; if that is absent or empty too, resolution
    /// fails and nothing is ever sent. An empty status falls back to the
    /// build's own status. Pure aside from the injected `lookup`.
    pub fn resolve(
        &self,
        branch: &str,
        build_status: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<EffectiveSettings, ConfigError> {
        let webhook = if self.webhook.is_empty() {
            let var = format!("{branch}_teams_webhook");
            match lookup(&var) {
                Some(url) if !url.is_empty() => url,
                _ => return Err(ConfigError::MissingWebhook { var }),
            }
        } else {
            self.webhook.clone()
        };

        let status = if self.status.is_empty() {
            build_status.to_string()
        } else {
            self.status.clone()
        };

        Ok(EffectiveSettings {
            webhook,
            status,
            card: CardVariant::parse(&self.card),
        })
    }
}

/// Settings after validation and fallback resolution.
#[derive(Debug, Clone)]
pub struct EffectiveSettings {
    /// Webhook URL, guaranteed non-empty.
    pub webhook: String,
    /// Effective status, used for all status branching in the builders.
    pub status: String,
    pub card: CardVariant,
}
