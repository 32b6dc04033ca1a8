use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tonesort",
    version,
    about = "Sort audio files into a stage/clarity/genre tree from their comment tags"
)]
struct Cli {
    /// Directory of audio files to classify
    source: Option<PathBuf>,

    /// Destination root for the sorted tree (rebuilt from scratch each run)
    dest: Option<PathBuf>,

    /// Show planned copies without touching the filesystem
    #[arg(long)]
    dry_run: bool,

    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Load config file (optional, defaults if missing)
    let config = tonesort::config::AppConfig::load();

    // Resolve directories: CLI > config
    let Some(source) = cli.source.or(config.source_dir) else {
        anyhow::bail!("No source directory. Pass it as an argument or set source_dir in config.");
    };
    let Some(dest) = cli.dest.or(config.dest_dir) else {
        anyhow::bail!("No destination directory. Pass it as an argument or set dest_dir in config.");
    };

    if cli.dry_run {
        println!("DRY RUN — no files will be copied");
    }

    let result = tonesort::scanner::run(&source, &dest, cli.dry_run).context("Sort failed")?;
    println!(
        "Sort complete: {} scanned, {} copied, {} failed",
        result.scanned, result.copied, result.failed
    );

    Ok(())
}
