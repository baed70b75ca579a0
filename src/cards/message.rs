//! Legacy MessageCard payload — the original Office 365 connector shape.

use serde::Serialize;

use crate::cards::format::{author_line, resolve_fallback};
use crate::config::EffectiveSettings;
use crate::pipeline::PipelineContext;

/// Default (non-failure, non-building) theme color: green.
const COLOR_DEFAULT: &str = "96FF33";
/// Theme color when the effective status is `failure`: red.
const COLOR_FAILURE: &str = "FF5733";
/// Theme color when the effective status is `building`: blue.
const COLOR_BUILDING: &str = "002BFF";

const ACTIVITY_IMAGE: &str = "https://github.com/jdamata/drone-teams/raw/master/drone.png";

/// Root of the MessageCard payload.
#[derive(Debug, Clone, Serialize)]
pub struct MessageCard {
    #[serde(rename = "@type")]
    pub card_type: String,
    #[serde(rename = "@context")]
    pub context: String,
    #[serde(rename = "themeColor")]
    pub theme_color: String,
    pub summary: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub activity_title: String,
    pub activity_subtitle: String,
    pub activity_image: String,
    pub markdown: bool,
    pub facts: Vec<Fact>,
}

/// One name/value row in the card.
#[derive(Debug, Clone, Serialize)]
pub struct Fact {
    pub name: String,
    pub value: String,
}

impl Fact {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Build the legacy MessageCard for one pipeline run.
///
/// `lookup` supplies the `DRONE_*` environment fallbacks for the optional
/// Commit Link and Build Link facts.
pub fn build(
    ctx: &PipelineContext,
    settings: &EffectiveSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> MessageCard {
    let mut facts = vec![
        Fact::new("Build Number", ctx.build.number.to_string()),
        Fact::new("Time", ctx.build.started.to_string()),
        Fact::new("Repo Link", &ctx.repo.link),
        Fact::new("Branch", &ctx.build.branch),
        Fact::new(
            "Git Author",
            author_line(&ctx.commit.author, &ctx.commit.author_email),
        ),
        Fact::new("Commit Message Title", &ctx.commit.message.title),
        Fact::new("Commit Message Body", &ctx.commit.message.body),
    ];

    // Direct commit link first, DRONE_COMMIT_LINK second, omitted otherwise.
    if let Some(link) = resolve_fallback(&ctx.commit.link, &["DRONE_COMMIT_LINK"], &lookup) {
        facts.push(Fact::new("Commit Link", link));
    }

    if let Some(link) = build_link(ctx, &lookup) {
        facts.push(Fact::new("Build Link", link));
    }

    let theme_color = match settings.status.as_str() {
        "failure" => {
            facts.push(Fact::new(
                "Failed Build Steps",
                ctx.build.failed_steps.join(" "),
            ));
            COLOR_FAILURE
        }
        "building" => COLOR_BUILDING,
        _ => COLOR_DEFAULT,
    };

    MessageCard {
        card_type: "MessageCard".into(),
        context: "http://schema.org/extensions".into(),
        theme_color: theme_color.into(),
        summary: ctx.repo.slug.clone(),
        sections: vec![Section {
            activity_title: ctx.repo.slug.clone(),
            activity_subtitle: settings.status.to_uppercase(),
            activity_image: ACTIVITY_IMAGE.into(),
            markdown: true,
            facts,
        }],
    }
}

/// Per-stage build link, as `[link/stage](link/stage)`.
///
/// Built from the context when both pieces are there, from the
/// `DRONE_BUILD_LINK` / `DRONE_STAGE_NUMBER` pair when both of those are
/// set, and omitted otherwise.
fn build_link(ctx: &PipelineContext, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    if !ctx.build.link.is_empty() && ctx.build.stage_number > 0 {
        let url = format!("{}/{}", ctx.build.link, ctx.build.stage_number);
        return Some(format!("[{url}]({url})"));
    }
    let link = lookup("DRONE_BUILD_LINK").filter(|v| !v.is_empty())?;
    let stage = lookup("DRONE_STAGE_NUMBER").filter(|v| !v.is_empty())?;
    let url = format!("{link}/{stage}");
    Some(format!("[{url}]({url})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CardVariant;
    use chrono::{TimeZone, Utc};

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn context() -> PipelineContext {
        let mut ctx = PipelineContext::default();
        ctx.repo.slug = "octocat/hello-world".into();
        ctx.repo.link = "https://github.com/octocat/hello-world".into();
        ctx.build.number = 42;
        ctx.build.status = "success".into();
        ctx.build.branch = "main".into();
        ctx.build.started = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        ctx.commit.author = "octocat".into();
        ctx.commit.author_email = "octocat@github.com".into();
        ctx.commit.message.title = "fix the build".into();
        ctx.commit.message.body = "details".into();
        ctx
    }

    fn settings(status: &str) -> EffectiveSettings {
        EffectiveSettings {
            webhook: "https://hook".into(),
            status: status.into(),
            card: CardVariant::Legacy,
        }
    }

    fn fact_names(card: &MessageCard) -> Vec<&str> {
        card.sections[0]
            .facts
            .iter()
            .map(|f| f.name.as_str())
            .collect()
    }

    fn fact_value<'a>(card: &'a MessageCard, name: &str) -> Option<&'a str> {
        card.sections[0]
            .facts
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    // ── Theme color ─────────────────────────────────────────────────

    #[test]
    fn theme_color_green_by_default() {
        let card = build(&context(), &settings("success"), no_env);
        assert_eq!(card.theme_color, "96FF33");
    }

    #[test]
    fn theme_color_red_on_failure() {
        let card = build(&context(), &settings("failure"), no_env);
        assert_eq!(card.theme_color, "FF5733");
    }

    #[test]
    fn theme_color_blue_while_building() {
        let card = build(&context(), &settings("building"), no_env);
        assert_eq!(card.theme_color, "002BFF");
    }

    #[test]
    fn theme_color_green_for_unknown_status() {
        let card = build(&context(), &settings("killed"), no_env);
        assert_eq!(card.theme_color, "96FF33");
    }

    // ── Base facts ──────────────────────────────────────────────────

    #[test]
    fn end_to_end_success_card_has_seven_facts() {
        // status=success, no commit link, no env fallbacks: only the
        // always-present facts appear.
        let card = build(&context(), &settings("success"), no_env);
        assert_eq!(card.theme_color, "96FF33");
        assert_eq!(
            fact_names(&card),
            vec![
                "Build Number",
                "Time",
                "Repo Link",
                "Branch",
                "Git Author",
                "Commit Message Title",
                "Commit Message Body",
            ]
        );
        assert_eq!(fact_value(&card, "Build Number"), Some("42"));
        assert_eq!(fact_value(&card, "Time"), Some("2023-11-14 22:13:20 UTC"));
        assert_eq!(
            fact_value(&card, "Git Author"),
            Some("octocat (octocat@github.com)")
        );
    }

    #[test]
    fn header_uses_repo_slug_and_uppercased_status() {
        let card = build(&context(), &settings("success"), no_env);
        assert_eq!(card.summary, "octocat/hello-world");
        assert_eq!(card.sections[0].activity_title, "octocat/hello-world");
        assert_eq!(card.sections[0].activity_subtitle, "SUCCESS");
        assert!(card.sections[0].markdown);
    }

    // ── Commit Link fact ────────────────────────────────────────────

    #[test]
    fn commit_link_from_context() {
        let mut ctx = context();
        ctx.commit.link = "https://github.com/octocat/hello-world/commit/abc".into();
        let card = build(&ctx, &settings("success"), no_env);
        assert_eq!(
            fact_value(&card, "Commit Link"),
            Some("https://github.com/octocat/hello-world/commit/abc")
        );
    }

    #[test]
    fn commit_link_from_env_fallback() {
        let card = build(&context(), &settings("success"), |var| {
            (var == "DRONE_COMMIT_LINK").then(|| "https://fallback/commit".to_string())
        });
        assert_eq!(
            fact_value(&card, "Commit Link"),
            Some("https://fallback/commit")
        );
    }

    #[test]
    fn direct_commit_link_beats_env() {
        let mut ctx = context();
        ctx.commit.link = "https://direct".into();
        let card = build(&ctx, &settings("success"), |_| Some("https://env".into()));
        assert_eq!(fact_value(&card, "Commit Link"), Some("https://direct"));
    }

    #[test]
    fn commit_link_omitted_when_unset() {
        let card = build(&context(), &settings("success"), no_env);
        assert_eq!(fact_value(&card, "Commit Link"), None);
    }

    // ── Build Link fact ─────────────────────────────────────────────

    #[test]
    fn build_link_from_context_includes_stage() {
        let mut ctx = context();
        ctx.build.link = "https://drone.example.com/octocat/hello-world/42".into();
        ctx.build.stage_number = 2;
        let card = build(&ctx, &settings("success"), no_env);
        assert_eq!(
            fact_value(&card, "Build Link"),
            Some("[https://drone.example.com/octocat/hello-world/42/2](https://drone.example.com/octocat/hello-world/42/2)")
        );
    }

    #[test]
    fn build_link_omitted_when_stage_is_zero() {
        let mut ctx = context();
        ctx.build.link = "https://drone.example.com/octocat/hello-world/42".into();
        ctx.build.stage_number = 0;
        let card = build(&ctx, &settings("success"), no_env);
        assert_eq!(fact_value(&card, "Build Link"), None);
    }

    #[test]
    fn build_link_from_env_pair() {
        let card = build(&context(), &settings("success"), |var| match var {
            "DRONE_BUILD_LINK" => Some("https://drone/42".into()),
            "DRONE_STAGE_NUMBER" => Some("3".into()),
            _ => None,
        });
        assert_eq!(
            fact_value(&card, "Build Link"),
            Some("[https://drone/42/3](https://drone/42/3)")
        );
    }

    #[test]
    fn build_link_omitted_when_env_pair_incomplete() {
        let card = build(&context(), &settings("success"), |var| {
            (var == "DRONE_BUILD_LINK").then(|| "https://drone/42".to_string())
        });
        assert_eq!(fact_value(&card, "Build Link"), None);
    }

    // ── Failed Build Steps fact ─────────────────────────────────────

    #[test]
    fn failed_steps_only_on_failure() {
        let mut ctx = context();
        ctx.build.failed_steps = vec!["build".into(), "test".into()];

        let card = build(&ctx, &settings("failure"), no_env);
        assert_eq!(fact_value(&card, "Failed Build Steps"), Some("build test"));

        let card = build(&ctx, &settings("success"), no_env);
        assert_eq!(fact_value(&card, "Failed Build Steps"), None);
    }

    #[test]
    fn failed_steps_fact_present_even_when_list_empty() {
        let card = build(&context(), &settings("failure"), no_env);
        assert_eq!(fact_value(&card, "Failed Build Steps"), Some(""));
    }

    // ── Wire format ─────────────────────────────────────────────────

    #[test]
    fn serializes_with_connector_field_names() {
        let card = build(&context(), &settings("success"), no_env);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains("\"@type\":\"MessageCard\""));
        assert!(json.contains("\"@context\":\"http://schema.org/extensions\""));
        assert!(json.contains("\"themeColor\":\"96FF33\""));
        assert!(json.contains("\"activityTitle\""));
        assert!(json.contains("\"activitySubtitle\""));
        assert!(json.contains("\"activityImage\""));
        assert!(json.contains("\"facts\""));
    }
}
