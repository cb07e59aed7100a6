use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use receipt_points::config::{Config, OutputFormat};
use receipt_points::output;
use receipt_points::pipeline::{self, Batch, ProcessOptions, ProcessedReceipt};
use receipt_points::sku::Sku;

const EXIT_SUCCESS: i32 = 0;
const EXIT_INVALID: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate and score receipt files (default if no subcommand)
    Score {
        /// Receipt JSON files or glob patterns
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Validate receipt files without scoring them
    Validate {
        /// Receipt JSON files or glob patterns
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Parse a SKU code and show its parts
    Sku {
        /// SKU code, e.g. TGT-BVRG-MTNDEW-SODA-SIZE-12PK-00001
        code: String,
    },
}

#[derive(Parser, Debug)]
#[command(name = "receipt-points")]
#[command(about = "Validate receipts and score them with loyalty points", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/receipt-points/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Show how each rule contributed to the points
    #[arg(long, global = true)]
    breakdown: bool,

    /// Report every violation instead of the first
    #[arg(long, global = true)]
    all_errors: bool,

    /// Do not assign ids to scored receipts
    #[arg(long, global = true)]
    no_ids: bool,

    /// Also write a JSON report to this file
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Receipt files to score when no subcommand is given
    paths: Vec<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose { "debug" } else { config.log_level() };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("receipt_points={}", level.to_lowercase())));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    let mut cli = Cli::parse();
    let start_time = Instant::now();

    // Load config
    let config = match receipt_points::config::load_config(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = receipt_points::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    init_logging(cli.verbose, &config);
    debug!(?config, "loaded config");

    let command = match cli.command.take() {
        Some(command) => command,
        None if cli.paths.is_empty() => {
            eprintln!("No receipt files given.");
            eprintln!("Usage: receipt-points score <PATHS>...");
            std::process::exit(EXIT_INPUT);
        }
        None => Commands::Score {
            paths: std::mem::take(&mut cli.paths),
        },
    };

    let code = match command {
        Commands::Score { paths } => run_receipts(&cli, &config, &paths, true, start_time),
        Commands::Validate { paths } => run_receipts(&cli, &config, &paths, false, start_time),
        Commands::Sku { code } => run_sku(&code),
    };

    std::process::exit(code);
}

fn run_receipts(cli: &Cli, config: &Config, patterns: &[String], score: bool, start_time: Instant) -> i32 {
    let paths = match pipeline::expand_paths(patterns) {
        Ok(paths) => paths,
        Err(e) => {
            eprintln!("Input error: {:#}", e);
            return EXIT_INPUT;
        }
    };
    debug!(files = paths.len(), "expanded receipt paths");

    let options = ProcessOptions {
        score,
        assign_ids: config.assign_ids() && !cli.no_ids,
        collect_all_errors: cli.all_errors || config.collect_all_errors(),
    };

    let batch = pipeline::process_files(&paths, &options);

    if let Err(code) = print_results(cli, config, &batch) {
        return code;
    }

    for failure in &batch.failed {
        eprintln!("Input error: {}", failure.error);
    }

    if let Some(report_path) = cli.out.as_ref().or(config.report.as_ref()) {
        if let Err(e) = output::save_report(report_path, &batch) {
            eprintln!("Report error: {:#}", e);
            return EXIT_INPUT;
        }
        debug!(path = %report_path.display(), "wrote report");
    }

    if cli.verbose {
        eprintln!();
        eprintln!("{}", output::format_summary(&batch.processed, start_time.elapsed()));
    }

    if !batch.failed.is_empty() {
        EXIT_INPUT
    } else if batch.all_valid() {
        EXIT_SUCCESS
    } else {
        EXIT_INVALID
    }
}

fn print_results(cli: &Cli, config: &Config, batch: &Batch) -> Result<(), i32> {
    let processed: &[ProcessedReceipt] = &batch.processed;
    let format = cli.format.unwrap_or_else(|| config.format());
    let show_breakdown = cli.breakdown || config.breakdown();

    match format {
        OutputFormat::Table => {
            let use_colors = output::should_use_colors();
            println!("{}", output::format_table(processed, show_breakdown, use_colors));
        }
        OutputFormat::Tsv => {
            let tsv = output::format_tsv(processed);
            if !tsv.is_empty() {
                println!("{}", tsv);
            }
        }
        OutputFormat::Json => match output::format_json(batch) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Output error: {:#}", e);
                return Err(EXIT_INPUT);
            }
        },
    }

    Ok(())
}

fn run_sku(code: &str) -> i32 {
    match Sku::parse(code) {
        Ok(sku) => {
            println!("{}", output::format_sku(&sku, output::should_use_colors()));
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            EXIT_INVALID
        }
    }
}
