use std::fs;
use std::path::PathBuf;

use anyhow::{ensure, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use heartwatch::{detect_all, read_entries, validate_entries, MonitorConfig, RunReport};

#[derive(Parser, Debug)]
#[command(name = "heartwatch")]
#[command(about = "Flags services whose heartbeats imply consecutive missed beats")]
struct Args {
    /// Path to the heartbeat batch (JSON array or JSON lines); "-" reads stdin
    #[arg(short, long, default_value = "heartbeats.json")]
    file: PathBuf,

    /// Expected seconds between beats (overrides the config file)
    #[arg(short, long)]
    interval: Option<u64>,

    /// Consecutive misses tolerated before alerting (overrides the config file)
    #[arg(short, long)]
    misses: Option<u32>,

    /// Config file with interval_secs / allowed_misses (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the structured JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Also write the structured JSON report to a file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = MonitorConfig::load(args.config.as_deref(), args.interval, args.misses)?;
    ensure!(
        config.interval_secs > 0,
        "expected interval must be positive"
    );
    debug!(
        interval_secs = config.interval_secs,
        allowed_misses = config.allowed_misses,
        threshold_secs = config.threshold_secs(),
        "configuration loaded"
    );

    let entries = read_entries(&args.file)?;
    let (records, stats) = validate_entries(&entries);
    debug!(
        total = stats.total,
        valid = stats.valid,
        invalid = stats.invalid,
        "batch validated"
    );

    let alerts = detect_all(records, &config);
    let report = RunReport::new(alerts, stats);

    if let Some(path) = &args.output {
        fs::write(path, report.render_json()?)?;
    }

    if args.json {
        println!("{}", report.render_json()?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}
