//! Card payload construction.

pub mod adaptive;
pub mod format;
pub mod message;

use serde::Serialize;

use crate::config::{CardVariant, EffectiveSettings};
use crate::pipeline::PipelineContext;

pub use adaptive::AdaptiveCard;
pub use message::MessageCard;

/// The notification payload, in exactly one of its two variants.
///
/// Serializes as the chosen variant's shape directly; the enum exists only
/// so the choice is made once, at construction time.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Card {
    Message(MessageCard),
    Adaptive(AdaptiveCard),
}

impl Card {
    /// Build the payload variant selected by the resolved settings.
    ///
    /// `lookup` supplies the environment fallbacks consulted by the
    /// legacy builder's conditional facts.
    pub fn build(
        ctx: &PipelineContext,
        settings: &EffectiveSettings,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        match settings.card {
            CardVariant::Legacy => Self::Message(message::build(ctx, settings, lookup)),
            CardVariant::Adaptive => Self::Adaptive(adaptive::build(ctx, settings)),
        }
    }
}
