//! Small formatting helpers shared by the card builders.

/// Render a URL as a markdown link.
///
/// The visible label drops a leading `http://` or `https://`; the target
/// keeps the full original URL.
pub fn url_markdown(url: &str) -> String {
    let label = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    format!("[{label}]({url})")
}

/// `"<name> (<email>)"` — how both card variants print the commit author.
pub fn author_line(name: &str, email: &str) -> String {
    format!("{name} ({email})")
}

/// Resolve a value by preference: the direct value first, then each named
/// environment variable in order. Absent and empty both count as unset,
/// so the precedence chain is auditable in one place.
pub fn resolve_fallback(
    direct: &str,
    env_vars: &[&str],
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    if !direct.is_empty() {
        return Some(direct.to_string());
    }
    env_vars
        .iter()
        .filter_map(|var| lookup(var))
        .find(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_markdown_strips_https_from_label() {
        assert_eq!(
            url_markdown("https://example.com/x"),
            "[example.com/x](https://example.com/x)"
        );
    }

    #[test]
    fn url_markdown_strips_http_from_label() {
        assert_eq!(
            url_markdown("http://drone.local/repo/42"),
            "[drone.local/repo/42](http://drone.local/repo/42)"
        );
    }

    #[test]
    fn url_markdown_leaves_schemeless_urls_alone() {
        assert_eq!(url_markdown("drone.local/x"), "[drone.local/x](drone.local/x)");
    }

    #[test]
    fn author_line_formats_name_and_email() {
        assert_eq!(author_line("octocat", "octocat@github.com"), "octocat (octocat@github.com)");
    }

    // ── Fallback resolution ─────────────────────────────────────────

    #[test]
    fn fallback_prefers_direct_value() {
        let got = resolve_fallback("direct", &["VAR"], |_| Some("env".into()));
        assert_eq!(got.as_deref(), Some("direct"));
    }

    #[test]
    fn fallback_uses_env_when_direct_empty() {
        let got = resolve_fallback("", &["VAR"], |v| (v == "VAR").then(|| "env".to_string()));
        assert_eq!(got.as_deref(), Some("env"));
    }

    #[test]
    fn fallback_skips_empty_env_values() {
        let got = resolve_fallback("", &["A", "B"], |v| match v {
            "A" => Some(String::new()),
            "B" => Some("second".into()),
            _ => None,
        });
        assert_eq!(got.as_deref(), Some("second"));
    }

    #[test]
    fn fallback_none_when_everything_unset() {
        assert_eq!(resolve_fallback("", &["A"], |_| None), None);
    }
}
