use anyhow::{Result, bail};
use std::io::{self, Write};
use std::path::PathBuf;

use super::load_resolved;
use crate::config::ResolveOptions;
use crate::shell::{Driver, DriverOptions};
use crate::tail::{DisplayRecord, TailReader};
use crate::ui::{Style, handle_prompt_cancellation, print_startup_notice, prompt_log_path};

pub struct WatchOptions {
    pub file: Option<PathBuf>,
    pub resolve: ResolveOptions,
}

pub async fn run_watch(options: WatchOptions) -> Result<()> {
    let mut resolve = options.resolve;
    resolve.log_file = options.file.or(resolve.log_file);
    let config = load_resolved(&resolve)?;
    let translator = config.translator()?;
    let interval = config.poll_interval()?;

    print_startup_notice();

    let log_file = match config.log_file.clone() {
        Some(path) => path,
        None => match handle_prompt_cancellation(prompt_log_path)? {
            Some(path) => path,
            None => return Ok(()),
        },
    };

    if log_file.is_dir() {
        bail!("Log file path is a directory: {}", log_file.display());
    }

    crate::status!(
        "{} {} {}",
        Style::success("Watching"),
        Style::value(log_file.display()),
        Style::secondary(format!(
            "(catalog: {}, interval: {} ms{})",
            config.catalog,
            interval.as_millis(),
            if config.watch { ", notifications" } else { "" }
        ))
    );
    tracing::info!(
        path = %log_file.display(),
        patterns = translator.table().len(),
        "starting watch"
    );

    let reader = TailReader::new(log_file, translator);
    let driver = Driver::new(
        reader,
        DriverOptions {
            interval,
            watch: config.watch,
        },
    );

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    let reader = driver.run(shutdown, print_record).await?;
    tracing::debug!(cursor = reader.cursor().offset(), "watch stopped");
    crate::status!();

    Ok(())
}

fn print_record(record: &DisplayRecord) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{record}")?;
    stdout.flush()
}
