//! Ordered pattern table mapping log line shapes to localized renderings.

use std::borrow::Cow;

use regex::{Regex, RegexSet};
use thiserror::Error;

use super::template::{Template, TemplateError};

/// Errors raised while building a [`PatternTable`].
///
/// Every one of these is a construction-time fault: a table that fails to
/// build never reaches the translator.
#[derive(Debug, Error)]
pub enum PatternError {
    /// The matcher is not a valid regular expression.
    #[error("Invalid pattern '{key}': {source}")]
    InvalidRegex {
        key: String,
        #[source]
        source: regex::Error,
    },
    /// The renderer expects a different number of captures than the matcher declares.
    #[error(
        "Pattern '{key}' declares {groups} capture group(s) but its renderer expects {arity}"
    )]
    ArityMismatch {
        key: String,
        groups: usize,
        arity: usize,
    },
    /// The output template could not be parsed.
    #[error("Invalid template for pattern '{key}': {source}")]
    InvalidTemplate {
        key: String,
        #[source]
        source: TemplateError,
    },
    /// Two entries share the same key.
    #[error("Pattern key '{0}' is defined more than once")]
    DuplicateKey(String),
}

/// Produces the display text for a matched line.
///
/// The variant fixes how many captures the renderer consumes, so the table
/// can pair it against the matcher's group count when it is built.
#[derive(Debug, Clone)]
pub enum Renderer {
    /// Constant output, no captures.
    Fixed(Cow<'static, str>),
    /// One capture.
    Unary(fn(&str) -> String),
    /// Two captures, left to right.
    Binary(fn(&str, &str) -> String),
    /// Three captures, left to right.
    Ternary(fn(&str, &str, &str) -> String),
    /// Positional `{N}` template, used for user-defined patterns.
    Template(Template),
}

impl Renderer {
    /// Number of captures this renderer consumes.
    pub fn arity(&self) -> usize {
        match self {
            Self::Fixed(_) => 0,
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
            Self::Ternary(_) => 3,
            Self::Template(template) => template.arity(),
        }
    }

    /// Renders the output for the given captures.
    ///
    /// Returns `None` if the capture count does not match the arity, which a
    /// built table rules out.
    pub fn render(&self, captures: &[&str]) -> Option<String> {
        match (self, captures) {
            (Self::Fixed(text), []) => Some(text.to_string()),
            (Self::Unary(f), [a]) => Some(f(a)),
            (Self::Binary(f), [a, b]) => Some(f(a, b)),
            (Self::Ternary(f), [a, b, c]) => Some(f(a, b, c)),
            (Self::Template(template), _) if captures.len() == template.arity() => {
                Some(template.render(captures))
            }
            _ => None,
        }
    }

    /// Short label for listings.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Unary(_) | Self::Binary(_) | Self::Ternary(_) => "computed",
            Self::Template(_) => "template",
        }
    }
}

/// A single matcher/renderer pair.
#[derive(Debug, Clone)]
pub struct PatternEntry {
    key: String,
    regex: Regex,
    renderer: Renderer,
}

impl PatternEntry {
    /// Stable identifier of the entry (e.g. `players_updated`).
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The matcher source text.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    pub const fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub const fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Number of capture groups the matcher declares.
    pub fn group_count(&self) -> usize {
        // captures_len() includes the implicit whole-match group
        self.regex.captures_len() - 1
    }
}

/// An ordered, validated collection of pattern entries.
///
/// Entries are tested in declaration order and the first match wins, so
/// broad patterns must be declared after the specific ones they overlap.
#[derive(Debug, Clone)]
pub struct PatternTable {
    entries: Vec<PatternEntry>,
    set: RegexSet,
}

impl PatternTable {
    /// Starts a new table definition.
    pub fn builder() -> PatternTableBuilder {
        PatternTableBuilder::default()
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up an entry by key.
    pub fn get(&self, key: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Returns the first entry, in priority order, whose matcher occurs anywhere in `line`.
    pub fn first_match(&self, line: &str) -> Option<&PatternEntry> {
        // SetMatches iterates indices in ascending order, which is priority order.
        self.set
            .matches(line)
            .iter()
            .next()
            .and_then(|index| self.entries.get(index))
    }
}

/// A pending entry, validated when [`PatternTableBuilder::build`] runs.
#[derive(Debug)]
enum PendingRenderer {
    Ready(Renderer),
    Template(String),
}

#[derive(Debug)]
struct PendingEntry {
    key: String,
    pattern: String,
    renderer: PendingRenderer,
}

/// Collects entries in priority order and validates them all at once.
#[derive(Debug, Default)]
pub struct PatternTableBuilder {
    pending: Vec<PendingEntry>,
}

impl PatternTableBuilder {
    /// Adds an entry whose output is a constant string.
    #[must_use]
    pub fn fixed(
        self,
        key: impl Into<String>,
        pattern: impl Into<String>,
        text: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.renderer(key, pattern, Renderer::Fixed(text.into()))
    }

    /// Adds an entry with an explicit renderer.
    #[must_use]
    pub fn renderer(
        mut self,
        key: impl Into<String>,
        pattern: impl Into<String>,
        renderer: Renderer,
    ) -> Self {
        self.pending.push(PendingEntry {
            key: key.into(),
            pattern: pattern.into(),
            renderer: PendingRenderer::Ready(renderer),
        });
        self
    }

    /// Adds an entry whose output is a `{N}` placeholder template.
    #[must_use]
    pub fn template(
        mut self,
        key: impl Into<String>,
        pattern: impl Into<String>,
        template: impl Into<String>,
    ) -> Self {
        self.pending.push(PendingEntry {
            key: key.into(),
            pattern: pattern.into(),
            renderer: PendingRenderer::Template(template.into()),
        });
        self
    }

    /// Appends every entry of an already-built table, keeping its order.
    #[must_use]
    pub fn extend(mut self, table: &PatternTable) -> Self {
        for entry in &table.entries {
            self.pending.push(PendingEntry {
                key: entry.key.clone(),
                pattern: entry.pattern().to_string(),
                renderer: PendingRenderer::Ready(entry.renderer.clone()),
            });
        }
        self
    }

    /// Compiles every matcher and checks renderer arity against group count.
    ///
    /// # Errors
    ///
    /// Returns the first [`PatternError`] found, in declaration order.
    pub fn build(self) -> Result<PatternTable, PatternError> {
        let mut entries: Vec<PatternEntry> = Vec::with_capacity(self.pending.len());

        for pending in self.pending {
            if entries.iter().any(|e| e.key == pending.key) {
                return Err(PatternError::DuplicateKey(pending.key));
            }

            let regex = Regex::new(&pending.pattern).map_err(|source| {
                PatternError::InvalidRegex {
                    key: pending.key.clone(),
                    source,
                }
            })?;

            let renderer = match pending.renderer {
                PendingRenderer::Ready(renderer) => renderer,
                PendingRenderer::Template(text) => Renderer::Template(
                    Template::parse(&text).map_err(|source| PatternError::InvalidTemplate {
                        key: pending.key.clone(),
                        source,
                    })?,
                ),
            };

            let groups = regex.captures_len() - 1;
            if renderer.arity() != groups {
                return Err(PatternError::ArityMismatch {
                    key: pending.key,
                    groups,
                    arity: renderer.arity(),
                });
            }

            entries.push(PatternEntry {
                key: pending.key,
                regex,
                renderer,
            });
        }

        let set = RegexSet::new(entries.iter().map(PatternEntry::pattern)).map_err(|source| {
            PatternError::InvalidRegex {
                key: "(table)".to_string(),
                source,
            }
        })?;

        Ok(PatternTable { entries, set })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn double(n: &str) -> String {
        format!("{n}{n}")
    }

    fn pair(a: &str, b: &str) -> String {
        format!("{a}+{b}")
    }

    #[test]
    fn test_build_keeps_declaration_order() {
        let table = PatternTable::builder()
            .fixed("b", "beta", "B")
            .fixed("a", "alpha", "A")
            .build()
            .unwrap();

        let keys: Vec<_> = table.entries().iter().map(PatternEntry::key).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_build_rejects_invalid_regex() {
        let result = PatternTable::builder().fixed("bad", "(unclosed", "x").build();

        let Err(err) = result else {
            panic!("expected an error");
        };
        assert!(matches!(err, PatternError::InvalidRegex { ref key, .. } if key == "bad"));
    }

    #[test]
    fn test_build_rejects_fixed_with_captures() {
        let result = PatternTable::builder()
            .fixed("count", r"count: (\d+)", "constant")
            .build();

        assert!(matches!(
            result,
            Err(PatternError::ArityMismatch {
                groups: 1,
                arity: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_build_rejects_renderer_with_too_few_groups() {
        let result = PatternTable::builder()
            .renderer("pair", r"(\d+) and \d+", Renderer::Binary(pair))
            .build();

        assert!(matches!(
            result,
            Err(PatternError::ArityMismatch {
                groups: 1,
                arity: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_build_rejects_duplicate_key() {
        let result = PatternTable::builder()
            .fixed("same", "one", "1")
            .fixed("same", "two", "2")
            .build();

        assert!(matches!(result, Err(PatternError::DuplicateKey(ref k)) if k == "same"));
    }

    #[test]
    fn test_build_rejects_template_arity_mismatch() {
        let result = PatternTable::builder()
            .template("t", r"(\d+)", "{1} and {2}")
            .build();

        assert!(matches!(
            result,
            Err(PatternError::ArityMismatch {
                groups: 1,
                arity: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_first_match_prefers_earlier_entry() {
        let table = PatternTable::builder()
            .renderer("specific", r"count: (\d+)", Renderer::Unary(double))
            .fixed("broad", "count", "broad")
            .build()
            .unwrap();

        assert_eq!(table.first_match("count: 4").unwrap().key(), "specific");
        assert_eq!(table.first_match("count only").unwrap().key(), "broad");
        assert!(table.first_match("nothing").is_none());
    }

    #[test]
    fn test_renderer_render_checks_capture_count() {
        let renderer = Renderer::Binary(pair);
        assert_eq!(renderer.render(&["1", "2"]), Some("1+2".to_string()));
        assert_eq!(renderer.render(&["1"]), None);
    }

    #[test]
    fn test_extend_appends_existing_table() {
        let base = PatternTable::builder()
            .fixed("base", "base", "B")
            .build()
            .unwrap();
        let table = PatternTable::builder()
            .fixed("custom", "custom", "C")
            .extend(&base)
            .build()
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.entries()[1].key(), "base");
    }

    #[test]
    fn test_empty_table_matches_nothing() {
        let table = PatternTable::builder().build().unwrap();
        assert!(table.is_empty());
        assert!(table.first_match("anything").is_none());
    }
}
