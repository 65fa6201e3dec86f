use anyhow::{Context, Result};
use clap::Parser;
use srtclean::cleaner::{clean_file, CleanOptions, CleanReport};
use srtclean::config::PatternSet;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "srtclean")]
#[command(version, about = "Remove hallucinated junk subtitles from SRT files")]
#[command(
    long_about = "Speech-to-text systems like WhisperX hallucinate subtitle credits \
                  (\"Sous-titrage par Amara.org\" and friends) during silence. srtclean \
                  parses an SRT file, drops every entry matching a junk pattern, and \
                  writes a renumbered copy."
)]
struct Cli {
    /// Input SRT file
    input: PathBuf,

    /// Output file (defaults to <input>_cleaned.srt)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// TOML file with a `patterns = [...]` list of junk regexes
    #[arg(short, long)]
    patterns: Option<PathBuf>,

    /// Show what would be removed without writing anything
    #[arg(long)]
    dry_run: bool,

    /// Write removed lines to <input>_removed.log
    #[arg(long)]
    log: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn print_summary(report: &CleanReport, dry_run: bool) {
    info!("Input:   {}", report.input.display());
    info!("Parsed:  {} subtitles", report.parsed_count);

    for warning in &report.warnings {
        warn!("Skipped malformed {}", warning);
    }

    if report.matches.is_empty() {
        info!("No junk subtitles found");
    } else {
        let verb = if dry_run { "Would remove" } else { "Removed" };
        info!("{} {} junk subtitle(s):", verb, report.removed_count);
        for junk in &report.matches {
            info!(
                "  #{} [{}] '{}' matched '{}'",
                junk.entry.index,
                junk.entry.timing(),
                junk.line,
                junk.pattern
            );
        }
    }

    info!("Kept:    {} subtitles", report.kept_count);
    if let Some(ref output) = report.output {
        info!("Output:  {}", output.display());
    }
    if let Some(ref log) = report.log_path {
        info!("Log:     {}", log.display());
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let patterns = PatternSet::load(cli.patterns.as_deref())
        .context("Failed to load junk patterns")?;
    info!("Loaded {} junk pattern(s)", patterns.len());

    let opts = CleanOptions {
        output: cli.output,
        dry_run: cli.dry_run,
        write_log: cli.log,
    };

    let report = clean_file(&cli.input, &patterns, &opts)
        .with_context(|| format!("Failed to clean {}", cli.input.display()))?;

    print_summary(&report, cli.dry_run);

    if cli.dry_run {
        info!("Dry run: no files written");
    }

    Ok(())
}
