//! Decides which paths are excluded from a scan.

use std::path::{Component, Path};

use super::catalog;
use super::pattern::GlobPattern;

/// Why a path was excluded: the pattern that matched and the category owning it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionReason {
    pub pattern: String,
    pub category: String,
}

/// An ordered list of exclusion patterns. Immutable once built.
///
/// Patterns are tried in construction order and the first match wins, so the
/// reported reason for a path is always the earliest pattern that matches it.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    patterns: Vec<GlobPattern>,
}

impl Filter {
    /// Builds a filter from explicit patterns only; no catalog patterns.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| GlobPattern::new(p.as_ref()))
                .collect(),
        }
    }

    /// Builds a filter from the catalog, minus `disabled_category_ids`, followed
    /// by `additional_patterns`.
    pub fn with_defaults<A, D>(additional_patterns: &[A], disabled_category_ids: &[D]) -> Self
    where
        A: AsRef<str>,
        D: AsRef<str>,
    {
        let defaults = catalog::filtered_patterns(disabled_category_ids);
        let additional = additional_patterns.iter().map(|p| p.as_ref().to_string());
        let filter = Self::new(defaults.into_iter().chain(additional));

        tracing::debug!(
            "Built filter with {} patterns ({} categories disabled)",
            filter.len(),
            disabled_category_ids.len()
        );
        filter
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(GlobPattern::as_str)
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the reason `path` is excluded, or `None` if it is included.
    ///
    /// Each pattern is tried against the base name, then the path relative to
    /// `base_dir`, then (for directories only) every component of that
    /// relative path.
    pub fn classify(&self, path: &Path, base_dir: &Path, is_dir: bool) -> Option<ExclusionReason> {
        let rel_path = relative_path(path, base_dir);
        let name = base_name(path);
        let components: Vec<&str> = if is_dir {
            rel_path.split('/').collect()
        } else {
            Vec::new()
        };

        let matched = self.patterns.iter().find(|pattern| {
            pattern.is_match(&name)
                || pattern.is_match(&rel_path)
                || components.iter().any(|c| pattern.is_match(c))
        })?;

        Some(ExclusionReason {
            pattern: matched.as_str().to_string(),
            category: catalog::category_name_for_pattern(matched.as_str()).to_string(),
        })
    }

    pub fn should_exclude(&self, path: &Path, base_dir: &Path, is_dir: bool) -> bool {
        self.classify(path, base_dir, is_dir).is_some()
    }
}

/// `path` relative to `base_dir`, `/`-separated.
///
/// The base itself is `"."`. A path outside `base_dir` is returned unchanged.
pub fn relative_path(path: &Path, base_dir: &Path) -> String {
    let rel = match path.strip_prefix(base_dir) {
        Ok(rel) => rel,
        Err(_) => return path.to_string_lossy().into_owned(),
    };

    let parts: Vec<_> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::path::PathBuf;
    use tracing_test::traced_test;

    fn base() -> PathBuf {
        PathBuf::from("/project")
    }

    #[test]
    fn test_filter_creation() {
        let filter = Filter::new(["*.txt"]);
        assert_eq!(filter.len(), 1);
        assert!(Filter::new(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_filter_with_defaults_appends_additional_patterns() {
        let filter = Filter::with_defaults(&["*.custom"], &[] as &[&str]);
        assert_eq!(filter.len(), catalog::all_patterns().len() + 1);
        assert_eq!(filter.patterns().last(), Some("*.custom"));
        assert_eq!(filter.patterns().next(), Some(".git"));
    }

    #[test]
    fn test_should_exclude_by_base_name() {
        let filter = Filter::new(["*.log"]);
        let base = base();
        assert!(filter.should_exclude(&base.join("test.log"), &base, false));
        assert!(filter.should_exclude(&base.join("deep/nested/test.log"), &base, false));
        assert!(!filter.should_exclude(&base.join("test.txt"), &base, false));
    }

    #[test]
    fn test_should_exclude_by_relative_path() {
        let filter = Filter::new(["docs/_build"]);
        let base = base();
        assert!(filter.should_exclude(&base.join("docs/_build"), &base, true));
        assert!(!filter.should_exclude(&base.join("other/_build"), &base, true));
    }

    #[test]
    fn test_directory_components_match_at_any_depth() {
        let filter = Filter::new(["node_modules"]);
        let base = base();
        let nested = base.join("project/node_modules/package");
        assert!(filter.should_exclude(&nested, &base, true));
        // Files only check name and full relative path.
        assert!(!filter.should_exclude(&nested.join("index.js"), &base, false));
    }

    #[test]
    fn test_classify_reports_catalog_category() {
        let filter = Filter::with_defaults(&[] as &[&str], &[] as &[&str]);
        let base = base();

        let reason = filter.classify(&base.join("app.log"), &base, false).unwrap();
        assert_eq!(reason.pattern, "*.log");
        assert_eq!(reason.category, "Logs & Temporary");

        let reason = filter.classify(&base.join(".git"), &base, true).unwrap();
        assert_eq!(reason.pattern, ".git");
        assert_eq!(reason.category, "Version Control");

        assert!(filter.classify(&base.join("src/main.rs"), &base, false).is_none());
    }

    #[test]
    fn test_classify_reports_custom_category() {
        let filter = Filter::new(["*.backup"]);
        let base = base();
        let reason = filter.classify(&base.join("db.backup"), &base, false).unwrap();
        assert_eq!(
            reason,
            ExclusionReason {
                pattern: "*.backup".to_string(),
                category: "Custom".to_string(),
            }
        );
    }

    #[test]
    fn test_custom_pattern_equal_to_catalog_pattern_uses_catalog_name() {
        let filter = Filter::new(["*.pyc"]);
        let base = base();
        let reason = filter.classify(&base.join("mod.pyc"), &base, false).unwrap();
        assert_eq!(reason.category, "Python");
    }

    #[test]
    fn test_first_pattern_wins() {
        let filter = Filter::new(["*.txt", "notes.*"]);
        let base = base();
        let reason = filter.classify(&base.join("notes.txt"), &base, false).unwrap();
        assert_eq!(reason.pattern, "*.txt");
    }

    #[test]
    fn test_target_release_is_excluded_through_component() {
        let filter = Filter::with_defaults(&[] as &[&str], &[] as &[&str]);
        let base = base();
        assert!(filter.should_exclude(&base.join("target/release"), &base, true));
    }

    #[test]
    fn test_path_outside_base_falls_back_to_full_path() {
        let filter = Filter::with_defaults(&[] as &[&str], &[] as &[&str]);
        let path = PathBuf::from("/elsewhere/test.txt");
        assert!(!filter.should_exclude(&path, Path::new("/nonexistent/path"), false));

        let filter = Filter::new(["/elsewhere/*.txt"]);
        assert!(filter.should_exclude(&path, Path::new("/nonexistent/path"), false));
    }

    #[test]
    fn test_disabling_go_reincludes_go_only_patterns() {
        let base = base();
        let enabled = Filter::with_defaults(&[] as &[&str], &[] as &[&str]);
        let disabled = Filter::with_defaults(&[] as &[&str], &["go"]);

        assert!(enabled.should_exclude(&base.join("go.sum"), &base, false));
        assert!(enabled.should_exclude(&base.join("pkg.test"), &base, false));
        assert!(!disabled.should_exclude(&base.join("go.sum"), &base, false));
        assert!(!disabled.should_exclude(&base.join("pkg.test"), &base, false));
        assert!(disabled.should_exclude(&base.join("app.log"), &base, false));
    }

    #[test]
    #[traced_test]
    fn test_malformed_pattern_is_skipped_not_fatal() {
        let filter = Filter::new(["[abc", "*.log"]);
        let base = base();
        assert_eq!(filter.len(), 2);
        assert!(!filter.should_exclude(&base.join("[abc"), &base, false));
        assert!(filter.should_exclude(&base.join("app.log"), &base, false));
        assert!(logs_contain("Ignoring malformed pattern"));
    }

    #[test]
    fn test_relative_path() {
        let base = base();
        assert_eq!(relative_path(&base, &base), ".");
        assert_eq!(relative_path(&base.join("a/b.rs"), &base), "a/b.rs");
        assert_eq!(relative_path(Path::new("/other/x"), &base), "/other/x");
    }

    proptest! {
        #[test]
        fn prop_classify_is_deterministic(
            segments in proptest::collection::vec("[a-z_.]{1,8}", 1..5),
            is_dir in any::<bool>(),
        ) {
            let filter = Filter::with_defaults(&["*.gen", "tmp?"], &[] as &[&str]);
            let base = base();
            let path = segments.iter().fold(base.clone(), |p, s| p.join(s));

            let first = filter.classify(&path, &base, is_dir);
            let second = filter.classify(&path, &base, is_dir);
            prop_assert_eq!(first, second);
        }
    }
}
