//! Pipeline metadata — the read-only context a Drone build runs with.
//!
//! Drone exposes everything about the current run through `DRONE_*`
//! environment variables; [`PipelineContext::from_env`] gathers them once
//! at startup. The card builders never touch the environment themselves.

use chrono::{DateTime, TimeZone, Utc};

/// The repository the build belongs to.
#[derive(Debug, Clone, Default)]
pub struct Repo {
    /// Full repository slug, e.g. `octocat/hello-world`.
    pub slug: String,
    /// Link to the repository.
    pub link: String,
}

/// The build being reported on.
#[derive(Debug, Clone, Default)]
pub struct Build {
    pub number: i64,
    /// Build status as Drone reports it (`success`, `failure`, ...).
    pub status: String,
    pub branch: String,
    pub tag: String,
    pub link: String,
    /// When the build started.
    pub started: DateTime<Utc>,
    /// Names of the steps that failed, if any.
    pub failed_steps: Vec<String>,
    /// Pipeline stage number, used to build per-stage links.
    pub stage_number: i64,
}

/// Commit message, split into its first line and the rest.
#[derive(Debug, Clone, Default)]
pub struct CommitMessage {
    pub title: String,
    pub body: String,
}

impl CommitMessage {
    /// Split a raw commit message at the first line break.
    pub fn parse(raw: &str) -> Self {
        match raw.split_once('\n') {
            Some((title, body)) => Self {
                title: title.trim_end().to_string(),
                body: body.trim().to_string(),
            },
            None => Self {
                title: raw.trim_end().to_string(),
                body: String::new(),
            },
        }
    }
}

/// The commit that triggered the build.
#[derive(Debug, Clone, Default)]
pub struct Commit {
    pub author: String,
    pub author_email: String,
    pub branch: String,
    pub link: String,
    pub message: CommitMessage,
}

/// The Drone server itself.
#[derive(Debug, Clone, Default)]
pub struct System {
    /// Hostname of the Drone server, e.g. `drone.example.com`. Carried as
    /// part of the context record; URL display labels are shortened by the
    /// scheme-stripping markdown helper, not by host matching.
    pub host: String,
}

/// Everything the card builders need to know about one pipeline run.
///
/// Immutable for the duration of one notification; no field is synthesized
/// beyond the documented environment fallbacks in the builders.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    pub repo: Repo,
    pub build: Build,
    pub commit: Commit,
    pub system: System,
}

impl PipelineContext {
    /// Populate the context from the standard `DRONE_*` environment variables.
    pub fn from_env() -> Self {
        Self {
            repo: Repo {
                slug: env("DRONE_REPO"),
                link: env("DRONE_REPO_LINK"),
            },
            build: Build {
                number: env_i64("DRONE_BUILD_NUMBER"),
                status: env("DRONE_BUILD_STATUS"),
                branch: env("DRONE_BRANCH"),
                tag: env("DRONE_TAG"),
                link: env("DRONE_BUILD_LINK"),
                started: unix_timestamp(env_i64("DRONE_BUILD_STARTED")),
                failed_steps: split_steps(&env("DRONE_FAILED_STEPS")),
                stage_number: env_i64("DRONE_STAGE_NUMBER"),
            },
            commit: Commit {
                author: env("DRONE_COMMIT_AUTHOR"),
                author_email: env("DRONE_COMMIT_AUTHOR_EMAIL"),
                branch: env("DRONE_COMMIT_BRANCH"),
                link: env("DRONE_COMMIT_LINK"),
                message: CommitMessage::parse(&env("DRONE_COMMIT_MESSAGE")),
            },
            system: System {
                host: env("DRONE_SYSTEM_HOST"),
            },
        }
    }
}

fn env(name: &str) -> String {
    std::env::var(name).unwrap_or_default()
}

fn env_i64(name: &str) -> i64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(0)
}

fn unix_timestamp(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

/// Drone reports failed steps as a comma-separated list.
fn split_steps(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
