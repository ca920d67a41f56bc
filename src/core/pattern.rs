//! Shell-style glob matching for exclusion patterns.

use globset::{GlobBuilder, GlobMatcher};
use std::path::Path;

/// A single exclusion pattern, compiled once.
///
/// `*` and `?` never cross a `/`, so `*.log` only matches within one path
/// segment while `docs/_build` can still match a nested relative path.
/// Braces are literal characters, not alternation, so `file{1}.txt` only
/// matches that exact name. A pattern that fails to compile is kept (so it
/// can still be reported) but never matches anything.
#[derive(Debug, Clone)]
pub struct GlobPattern {
    source: String,
    matcher: Option<GlobMatcher>,
}

impl GlobPattern {
    pub fn new(pattern: &str) -> Self {
        let matcher = match GlobBuilder::new(&escape_braces(pattern))
            .literal_separator(true)
            .backslash_escape(true)
            .build()
        {
            Ok(glob) => Some(glob.compile_matcher()),
            Err(e) => {
                tracing::warn!("Ignoring malformed pattern {:?}: {}", pattern, e);
                None
            }
        };

        Self {
            source: pattern.to_string(),
            matcher,
        }
    }

    /// The pattern exactly as it was supplied.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `false` for malformed patterns.
    pub fn is_valid(&self) -> bool {
        self.matcher.is_some()
    }

    pub fn is_match(&self, candidate: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|m| m.is_match(Path::new(candidate)))
    }
}

/// Checks a single candidate against a single pattern.
///
/// Malformed patterns are treated as non-matching.
pub fn matches(pattern: &str, candidate: &str) -> bool {
    GlobPattern::new(pattern).is_match(candidate)
}

/// Escapes `{` and `}` outside character classes. Existing escapes are kept.
fn escape_braces(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    let mut chars = pattern.chars().peekable();
    let mut in_class = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                escaped.push(c);
                if let Some(next) = chars.next() {
                    escaped.push(next);
                }
            }
            '[' if !in_class => {
                in_class = true;
                escaped.push(c);
                if let Some(&negation @ ('!' | '^')) = chars.peek() {
                    escaped.push(negation);
                    chars.next();
                }
                // A `]` right after the opener is a member, not the close.
                if chars.peek() == Some(&']') {
                    escaped.push(']');
                    chars.next();
                }
            }
            ']' if in_class => {
                in_class = false;
                escaped.push(c);
            }
            '{' | '}' if !in_class => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// True if the pattern uses any glob metacharacter.
pub fn is_wildcard(pattern: &str) -> bool {
    pattern.contains(['*', '?', '[', ']'])
}
