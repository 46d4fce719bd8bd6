//! Positional output templates for user-defined patterns.
//!
//! A template is plain text with `{1}`..`{N}` placeholders that refer to the
//! matcher's capture groups, left to right. `{{` and `}}` produce literal braces.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("unclosed placeholder at byte {0}")]
    Unclosed(usize),
    #[error("placeholder '{{{0}}}' is not a positive capture index")]
    InvalidIndex(String),
    #[error("unmatched '}}' at byte {0}")]
    UnmatchedClose(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Capture(usize),
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
    arity: usize,
}

impl Template {
    /// Parses a template string.
    pub fn parse(source: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut arity = 0;
        let mut chars = source.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '{' if chars.peek().is_some_and(|&(_, next)| next == '{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek().is_some_and(|&(_, next)| next == '}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(TemplateError::UnmatchedClose(pos)),
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        name.push(inner);
                    }
                    if !closed {
                        return Err(TemplateError::Unclosed(pos));
                    }

                    let index = name
                        .trim()
                        .parse::<usize>()
                        .ok()
                        .filter(|&i| i > 0)
                        .ok_or_else(|| TemplateError::InvalidIndex(name.clone()))?;

                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Capture(index));
                    arity = arity.max(index);
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments, arity })
    }

    /// Highest placeholder index referenced.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Substitutes captures into the template. Missing captures render empty.
    pub fn render(&self, captures: &[&str]) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Capture(index) => {
                    if let Some(value) = captures.get(index - 1) {
                        out.push_str(value);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_render() {
        let template = Template::parse("moved to [{1}] with {2} others").unwrap();
        assert_eq!(template.arity(), 2);
        assert_eq!(
            template.render(&["10.0.0.1:80", "3"]),
            "moved to [10.0.0.1:80] with 3 others"
        );
    }

    #[test]
    fn test_placeholders_can_repeat_and_reorder() {
        let template = Template::parse("{2}/{1}/{2}").unwrap();
        assert_eq!(template.arity(), 2);
        assert_eq!(template.render(&["a", "b"]), "b/a/b");
    }

    #[test]
    fn test_escaped_braces() {
        let template = Template::parse("{{literal}} {1}").unwrap();
        assert_eq!(template.arity(), 1);
        assert_eq!(template.render(&["x"]), "{literal} x");
    }

    #[test]
    fn test_no_placeholders() {
        let template = Template::parse("同步完成！").unwrap();
        assert_eq!(template.arity(), 0);
        assert_eq!(template.render(&[]), "同步完成！");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Template::parse("{1"), Err(TemplateError::Unclosed(0)));
        assert_eq!(
            Template::parse("{0}"),
            Err(TemplateError::InvalidIndex("0".to_string()))
        );
        assert_eq!(
            Template::parse("{name}"),
            Err(TemplateError::InvalidIndex("name".to_string()))
        );
        assert_eq!(Template::parse("a}b"), Err(TemplateError::UnmatchedClose(1)));
    }
}
