use anyhow::Result;
use clap::Parser;

use skylog::cli::commands::{configure, patterns, translate, watch};
use skylog::cli::{Args, Command};
use skylog::config::ResolveOptions;
use skylog::output::{self, OutputConfig};
use skylog::ui::Style;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    output::init(OutputConfig::from_flags(args.quiet, args.no_color));
    skylog::logging::init(args.verbose);

    match args.command {
        Some(Command::Patterns { table }) => {
            let options = ResolveOptions {
                catalog: table.catalog,
                ..ResolveOptions::default()
            };
            patterns::print_patterns(&options)?;
        }
        Some(Command::Translate { lines, table }) => {
            let options = translate::TranslateOptions {
                lines,
                resolve: ResolveOptions {
                    catalog: table.catalog,
                    ..ResolveOptions::default()
                },
            };
            if let Err(e) = translate::run_translate(options) {
                if e.downcast_ref::<std::io::Error>().is_some() {
                    eprintln!("{} {e:#}", Style::error("Error:"));
                    std::process::exit(exitcode::IOERR);
                }
                return Err(e);
            }
        }
        Some(Command::Configure { show }) => {
            configure::run_configure(show)?;
        }
        None => {
            let options = watch::WatchOptions {
                file: args.file,
                resolve: ResolveOptions {
                    log_file: None,
                    catalog: args.table.catalog,
                    interval_ms: args.interval_ms,
                    watch: args.no_watch.then_some(false),
                },
            };
            watch::run_watch(options).await?;
        }
    }

    Ok(())
}
