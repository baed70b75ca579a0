//! AdaptiveCard payload — the richer, collapsible card shape.
//!
//! Every nesting level is an explicit struct rather than a loose JSON
//! tree, so the wire shape is checked at compile time. Field names follow
//! the Adaptive Cards schema exactly (camelCase, `$schema`, `type` tags).

use serde::Serialize;

use crate::cards::format::{author_line, url_markdown};
use crate::config::EffectiveSettings;
use crate::pipeline::PipelineContext;

const SCHEMA: &str = "http://adaptivecards.io/schemas/adaptive-card.json";
const VERSION: &str = "1.4";

/// Identifier of the collapsible detail container.
const DETAILS_ID: &str = "buildDetails";
const CHEVRON_DOWN_ID: &str = "chevronDown";
const CHEVRON_UP_ID: &str = "chevronUp";

const CHEVRON_DOWN_URL: &str = "https://adaptivecards.io/content/down.png";
const CHEVRON_UP_URL: &str = "https://adaptivecards.io/content/up.png";

/// Decorative side-bar images, keyed off the effective status.
const SIDEBAR_DEFAULT: &str = "https://via.placeholder.com/16x16/002BFF/002BFF.png";
const SIDEBAR_FAILURE: &str = "https://via.placeholder.com/16x16/FF5733/FF5733.png";

/// Fixed label column width in the detail rows.
const LABEL_WIDTH: &str = "110px";

/// Root of the AdaptiveCard payload.
#[derive(Debug, Clone, Serialize)]
pub struct AdaptiveCard {
    #[serde(rename = "$schema")]
    pub schema: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: String,
    pub body: Vec<Element>,
}

/// Any element that can appear in a card body, container, or column.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum Element {
    TextBlock(TextBlock),
    ColumnSet(ColumnSet),
    Container(Container),
    Image(Image),
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub text: String,
    pub wrap: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSet {
    pub columns: Vec<Column>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub select_action: Option<ToggleAction>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    #[serde(rename = "type")]
    pub kind: String,
    pub width: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Element>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl Column {
    fn new(width: &str) -> Self {
        Self {
            kind: "Column".into(),
            width: width.into(),
            items: Vec::new(),
            background_image: None,
        }
    }

    fn with_items(mut self, items: Vec<Element>) -> Self {
        self.items = items;
        self
    }
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    pub items: Vec<Element>,
}

#[derive(Debug, Clone, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
}

/// `Action.ToggleVisibility`, flipping the listed elements on click.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleAction {
    #[serde(rename = "type")]
    pub kind: String,
    pub target_elements: Vec<String>,
}

impl ToggleAction {
    fn targeting(ids: &[&str]) -> Self {
        Self {
            kind: "Action.ToggleVisibility".into(),
            target_elements: ids.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Build the AdaptiveCard for one pipeline run.
pub fn build(ctx: &PipelineContext, settings: &EffectiveSettings) -> AdaptiveCard {
    let sidebar = if settings.status == "failure" {
        SIDEBAR_FAILURE
    } else {
        SIDEBAR_DEFAULT
    };

    let body = Element::ColumnSet(ColumnSet {
        columns: vec![
            Column {
                background_image: Some(sidebar.into()),
                ..Column::new("16px")
            },
            Column::new("stretch").with_items(vec![
                Element::TextBlock(TextBlock {
                    text: summary_line(ctx, settings),
                    wrap: true,
                    size: Some("Large".into()),
                }),
                chevron_row(),
                detail_container(ctx),
            ]),
        ],
        select_action: None,
    });

    AdaptiveCard {
        schema: SCHEMA.into(),
        kind: "AdaptiveCard".into(),
        version: VERSION.into(),
        body: vec![body],
    }
}

/// One-line summary: status, linked build, branch or tag, author.
fn summary_line(ctx: &PipelineContext, settings: &EffectiveSettings) -> String {
    // Branch takes precedence over tag; both empty leaves the
    // parenthetical empty.
    let reference = if ctx.build.branch.is_empty() {
        &ctx.build.tag
    } else {
        &ctx.build.branch
    };
    format!(
        "*{}* {} ({}) by {}",
        settings.status,
        url_markdown(&ctx.build.link),
        reference,
        author_line(&ctx.commit.author, &ctx.commit.author_email),
    )
}

/// The expand/collapse affordance: down chevron shown, up chevron hidden,
/// clicking the row toggles both plus the detail container.
fn chevron_row() -> Element {
    Element::ColumnSet(ColumnSet {
        columns: vec![Column::new("stretch").with_items(vec![
            Element::Image(Image {
                url: CHEVRON_DOWN_URL.into(),
                id: Some(CHEVRON_DOWN_ID.into()),
                width: Some("20px".into()),
                is_visible: None,
            }),
            Element::Image(Image {
                url: CHEVRON_UP_URL.into(),
                id: Some(CHEVRON_UP_ID.into()),
                width: Some("20px".into()),
                is_visible: Some(false),
            }),
        ])],
        select_action: Some(ToggleAction::targeting(&[
            DETAILS_ID,
            CHEVRON_DOWN_ID,
            CHEVRON_UP_ID,
        ])),
    })
}

/// The initially-hidden container of label/value detail rows.
fn detail_container(ctx: &PipelineContext) -> Element {
    Element::Container(Container {
        id: Some(DETAILS_ID.into()),
        is_visible: Some(false),
        items: vec![
            label_row("Build Number", ctx.build.number.to_string()),
            label_row("Time", ctx.build.started.to_string()),
            label_row("Repo Link", url_markdown(&ctx.repo.link)),
            label_row("Branch", ctx.build.branch.clone()),
            label_row(
                "Git Author",
                author_line(&ctx.commit.author, &ctx.commit.author_email),
            ),
            label_row("Commit Message Title", ctx.commit.message.title.clone()),
            label_row("Commit Message Body", ctx.commit.message.body.clone()),
        ],
    })
}

/// Two-column label/value row; label column is fixed-width so the rows
/// line up, value column stretches.
fn label_row(label: &str, value: String) -> Element {
    Element::ColumnSet(ColumnSet {
        columns: vec![
            Column::new(LABEL_WIDTH).with_items(vec![Element::TextBlock(TextBlock {
                text: label.into(),
                wrap: true,
                size: None,
            })]),
            Column::new("stretch").with_items(vec![Element::TextBlock(TextBlock {
                text: value,
                wrap: true,
                size: None,
            })]),
        ],
        select_action: None,
    })
}
