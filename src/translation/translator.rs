use super::pattern::{PatternEntry, PatternTable};

/// Applies a [`PatternTable`] to single log lines.
#[derive(Debug, Clone)]
pub struct LineTranslator {
    table: PatternTable,
}

impl LineTranslator {
    pub const fn new(table: PatternTable) -> Self {
        Self { table }
    }

    pub const fn table(&self) -> &PatternTable {
        &self.table
    }

    /// Returns the entry that would translate `line`, if any.
    pub fn matching_entry(&self, line: &str) -> Option<&PatternEntry> {
        self.table.first_match(line)
    }

    /// Translates one line.
    ///
    /// The first entry whose matcher occurs anywhere in the line wins; later
    /// entries are never consulted. Returns `None` when nothing matches.
    pub fn translate(&self, line: &str) -> Option<String> {
        let entry = self.matching_entry(line)?;
        let captures = entry.regex().captures(line)?;

        // Groups that did not participate (e.g. inside an optional) render empty.
        let values: Vec<&str> = captures
            .iter()
            .skip(1)
            .map(|group| group.map_or("", |m| m.as_str()))
            .collect();

        let text = entry.renderer().render(&values);
        tracing::trace!(key = entry.key(), matched = text.is_some(), "translated line");
        text
    }
}
