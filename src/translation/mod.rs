mod catalog;
mod pattern;
mod template;
mod translator;

pub use catalog::{Catalog, ERROR_NOTICE};
pub use pattern::{PatternEntry, PatternError, PatternTable, PatternTableBuilder, Renderer};
pub use template::{Template, TemplateError};
pub use translator::LineTranslator;
