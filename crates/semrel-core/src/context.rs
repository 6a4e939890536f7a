//! Changelog template context.

use std::sync::Arc;

use minijinja::{Environment, Value};
use semrel_hvcs::RemoteVcs;
use serde::Serialize;

use crate::{CoreResult, ReleaseHistory};

/// The built-in changelog template.
///
/// Sections group commits by type per release, newest release first, with
/// commit links built through the hosting-service filters.
pub const DEFAULT_TEMPLATE: &str = r"# CHANGELOG
{% if history.unreleased %}
## Unreleased
{% for type_, elements in history.unreleased|items %}
### {{ type_|title }}
{% for element in elements %}
- {{ element.descriptions[0] if element.descriptions else element.error }} ([`{{ element.commit.hash|short_hash }}`]({{ element.commit.hash|commit_hash_url }}))
{% endfor %}
{% endfor %}
{% endif %}
{% for version, release in history.released|items %}
## {{ version }} ({{ release.tagged_date|date_part }})
{% for type_, elements in release.elements|items %}
### {{ type_|title }}
{% for element in elements %}
- {{ element.descriptions[0] if element.descriptions else element.error }} ([`{{ element.commit.hash|short_hash }}`]({{ element.commit.hash|commit_hash_url }}))
{% endfor %}
{% endfor %}
{% endfor %}
";

/// Everything a changelog template can see.
///
/// Bound into the environment as the `context` and `history` globals plus
/// the URL and formatting filters; custom templates get the same surface
/// as the built-in one.
#[derive(Serialize)]
pub struct ChangelogContext {
    /// The repository name, derived from the remote URL.
    pub repo_name: String,

    /// The repository owner, derived from the remote URL.
    pub repo_owner: String,

    /// The grouped release history.
    pub history: ReleaseHistory,

    #[serde(skip)]
    hvcs: Arc<dyn RemoteVcs>,
}

impl ChangelogContext {
    /// Creates a context bound to the given hosting service.
    #[must_use]
    pub fn new(hvcs: Arc<dyn RemoteVcs>, history: ReleaseHistory) -> Self {
        Self {
            repo_name: hvcs.repo_name().to_string(),
            repo_owner: hvcs.owner().to_string(),
            history,
            hvcs,
        }
    }

    /// Installs the context's globals and filters into a template
    /// environment.
    pub fn bind_to_environment(&self, env: &mut Environment<'_>) {
        env.add_global("context", Value::from_serialize(self));
        env.add_global("history", Value::from_serialize(&self.history));

        let hvcs = Arc::clone(&self.hvcs);
        env.add_filter("commit_hash_url", move |hash: String| {
            hvcs.commit_hash_url(&hash)
        });

        let hvcs = Arc::clone(&self.hvcs);
        env.add_filter("pull_request_url", move |number: u64| {
            hvcs.pull_request_url(number)
        });

        let hvcs = Arc::clone(&self.hvcs);
        env.add_filter(
            "compare_url",
            move |from: String, to: String| -> Result<String, minijinja::Error> {
                hvcs.compare_url(&from, &to).map_err(|err| {
                    minijinja::Error::new(
                        minijinja::ErrorKind::InvalidOperation,
                        err.to_string(),
                    )
                })
            },
        );

        env.add_filter("short_hash", |hash: String| {
            hash.chars().take(7).collect::<String>()
        });
        env.add_filter("date_part", |stamp: String| {
            stamp.split('T').next().unwrap_or_default().to_string()
        });
    }

    /// Renders a changelog from the given template source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Template`] when the template does not
    /// compile or render.
    pub fn render(&self, template_source: &str) -> CoreResult<String> {
        let mut env = Environment::new();
        self.bind_to_environment(&mut env);
        let template = env.template_from_str(template_source)?;
        Ok(template.render(minijinja::context! {})?)
    }

    /// Renders the built-in changelog template.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Template`] when rendering fails.
    pub fn render_default(&self) -> CoreResult<String> {
        self.render(DEFAULT_TEMPLATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use indexmap::IndexMap;
    use semrel_commit::{Actor, LevelBump, ParseError, ParseResult, ParsedCommit, RawCommit};
    use semrel_hvcs::Github;
    use crate::Release;

    fn make_commit(hash: &str, message: &str) -> RawCommit {
        RawCommit::new(
            hash,
            message,
            Actor::new("Test", "test@example.com"),
            FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 5, 20, 10, 0, 0)
                .unwrap(),
            vec![],
        )
    }

    fn parsed(hash: &str, type_: &str, description: &str) -> ParseResult {
        ParsedCommit {
            bump: LevelBump::Minor,
            type_: type_.to_string(),
            scope: None,
            descriptions: vec![description.to_string()],
            breaking_descriptions: vec![],
            commit: make_commit(hash, description),
        }
        .into()
    }

    fn sample_history() -> ReleaseHistory {
        let mut history = ReleaseHistory::default();
        history
            .unreleased
            .entry("feature".to_string())
            .or_default()
            .push(parsed("aaaaaaa1234567", "feature", "add exporter"));

        let mut elements: IndexMap<String, Vec<ParseResult>> = IndexMap::new();
        elements
            .entry("fix".to_string())
            .or_default()
            .push(parsed("bbbbbbb1234567", "fix", "handle empty input"));
        elements
            .entry("unknown".to_string())
            .or_default()
            .push(ParseResult::Error(ParseError::new(
                make_commit("ccccccc1234567", "freeform"),
                "Unable to parse commit message",
            )));

        history.released.insert(
            "1.1.0".parse().unwrap(),
            Release {
                tagger: Actor::new("Release Bot", "bot@example.com"),
                committer: Actor::new("Release Bot", "bot@example.com"),
                tagged_date: FixedOffset::east_opt(0)
                    .unwrap()
                    .with_ymd_and_hms(2024, 5, 21, 12, 0, 0)
                    .unwrap(),
                elements,
            },
        );
        history
    }

    fn context() -> ChangelogContext {
        let hvcs = Github::new("https://github.com/acme/widget.git", None, None).unwrap();
        ChangelogContext::new(Arc::new(hvcs), sample_history())
    }

    #[test]
    fn test_repo_identity() {
        let ctx = context();
        assert_eq!(ctx.repo_owner, "acme");
        assert_eq!(ctx.repo_name, "widget");
    }

    #[test]
    fn test_render_default_template() {
        let output = context().render_default().unwrap();

        assert!(output.starts_with("# CHANGELOG"));
        assert!(output.contains("## Unreleased"));
        assert!(output.contains("### Feature"));
        assert!(output.contains("add exporter"));
        assert!(output.contains("## 1.1.0 (2024-05-21)"));
        assert!(output.contains("### Fix"));
        assert!(output.contains(
            "[`bbbbbbb`](https://github.com/acme/widget/commit/bbbbbbb1234567)"
        ));
        // Parse errors surface their message under the unknown type.
        assert!(output.contains("Unable to parse commit message"));
    }

    #[test]
    fn test_render_custom_template_with_filters() {
        let output = context()
            .render("{{ context.repo_owner }}/{{ context.repo_name }}: {{ 42|pull_request_url }}")
            .unwrap();
        assert_eq!(
            output,
            "acme/widget: https://github.com/acme/widget/pull/42"
        );
    }

    #[test]
    fn test_compare_url_filter() {
        let output = context()
            .render("{{ 'v1.0.0'|compare_url('v1.1.0') }}")
            .unwrap();
        assert_eq!(
            output,
            "https://github.com/acme/widget/compare/v1.0.0...v1.1.0"
        );
    }

    #[test]
    fn test_render_invalid_template() {
        let result = context().render("{% for %}");
        assert!(matches!(result, Err(crate::CoreError::Template(_))));
    }

    #[test]
    fn test_empty_history_renders_header_only() {
        let hvcs = Github::new("https://github.com/acme/widget.git", None, None).unwrap();
        let ctx = ChangelogContext::new(Arc::new(hvcs), ReleaseHistory::default());
        let output = ctx.render_default().unwrap();
        assert!(output.contains("# CHANGELOG"));
        assert!(!output.contains("## Unreleased"));
    }
}
