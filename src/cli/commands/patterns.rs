//! Pattern listing command handler.

use anyhow::Result;

use super::load_resolved;
use crate::config::ResolveOptions;
use crate::translation::Catalog;
use crate::ui::Style;

/// Prints the active pattern table, highest priority first.
pub fn print_patterns(options: &ResolveOptions) -> Result<()> {
    let config = load_resolved(options)?;
    let table = config.pattern_table()?;

    println!(
        "{} {}",
        Style::header("Patterns"),
        Style::secondary(format!(
            "(catalog: {} - {})",
            config.catalog,
            config.catalog.description()
        ))
    );
    if !config.patterns.is_empty() {
        println!(
            "  {}",
            Style::hint(format!(
                "{} custom pattern(s) from config take priority",
                config.patterns.len()
            ))
        );
    }
    println!();

    let width = table
        .entries()
        .iter()
        .map(|e| e.key().chars().count())
        .max()
        .unwrap_or(0);

    for (index, entry) in table.entries().iter().enumerate() {
        println!(
            "  {:>2}. {}  {}  {}",
            index + 1,
            Style::key(format!("{:width$}", entry.key())),
            Style::label(format!("{:8}", entry.renderer().kind())),
            Style::secondary(entry.pattern())
        );
    }

    println!();
    println!("{}", Style::header("Catalogs"));
    for catalog in Catalog::ALL {
        let marker = if catalog == Catalog::default() {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!(
            "  {}{}  {}",
            Style::value(format!("{:8}", catalog.name())),
            marker,
            Style::secondary(catalog.description())
        );
    }

    Ok(())
}
