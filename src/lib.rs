//! Drone plugin that posts build-status cards to a Microsoft Teams webhook.

pub mod cards;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod webhook;
