use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use super::load_resolved;
use crate::config::ResolveOptions;
use crate::translation::LineTranslator;

pub struct TranslateOptions {
    pub lines: Vec<String>,
    pub resolve: ResolveOptions,
}

/// Translates each line independently; unmatched lines print nothing.
///
/// Reads stdin line by line when no lines are given on the command line.
pub fn run_translate(options: TranslateOptions) -> Result<()> {
    let config = load_resolved(&options.resolve)?;
    let translator = config.translator()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if options.lines.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("Failed to read from stdin")?;
            emit(&translator, &line, &mut out)?;
        }
    } else {
        for line in &options.lines {
            emit(&translator, line, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}

fn emit(translator: &LineTranslator, line: &str, out: &mut impl Write) -> Result<()> {
    if let Some(text) = translator.translate(line.trim()) {
        writeln!(out, "{text}")?;
    }
    Ok(())
}
