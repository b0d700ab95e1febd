//! GoReleaser Deprecation Check - CLI Entry Point

use anyhow::Result;
use clap::Parser;
use goreleaser_deprecation_check::metrics::CheckMetrics;
use goreleaser_deprecation_check::{CheckArgs, CheckOutput, Checker, Instructions};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "goreleaser-deprecation-check",
    about = "Finds deprecated options in a GoReleaser configuration",
    version
)]
struct Args {
    /// Path to the configuration file (defaults to the usual GoReleaser names)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory the configuration is looked up in
    #[arg(short = 'C', long, default_value = ".")]
    dir: PathBuf,

    /// Extra instructions table (YAML mapping of path to text)
    #[arg(long, value_name = "PATH")]
    instructions: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'L', long, default_value = "info")]
    log_level: Level,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print the effective instructions table and exit
    #[arg(long)]
    print_instructions: bool,

    /// Exit with an error when deprecated options are found
    #[arg(long)]
    strict: bool,

    /// Print Prometheus metrics to stderr after the check
    #[arg(long)]
    metrics: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut instructions = Instructions::builtin();
    if let Some(path) = &args.instructions {
        info!(path = ?path, "Loading instructions");
        instructions.merge(Instructions::from_file(path)?);
    }

    if args.print_instructions {
        print!("{}", instructions.to_yaml()?);
        return Ok(());
    }

    let metrics = Arc::new(CheckMetrics::default());
    let checker = Checker::new(instructions)
        .with_base_dir(args.dir.clone())
        .with_metrics(Arc::clone(&metrics));

    let result = checker.check(&CheckArgs {
        configuration: args.config,
    });

    if args.metrics {
        eprint!("{}", metrics.encode());
    }

    let output = result?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_text(&output);
    }

    if args.strict && output.is_deprecated() {
        anyhow::bail!(
            "{} deprecated option(s) found in {}",
            output.deprecations.len(),
            output.filepath
        );
    }

    Ok(())
}

fn print_text(output: &CheckOutput) {
    println!("{}: {}", output.filepath, output.message);
    if let Some(instructions) = &output.instructions {
        println!();
        print!("{}", instructions);
    }
}
