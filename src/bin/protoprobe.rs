//! CLI for analyzing digital signal captures.
//!
//! # Usage
//!
//! ```bash
//! # Summary with ranked protocol guesses
//! protoprobe capture.txt
//!
//! # Per-level duration histograms with 40 buckets
//! protoprobe capture.txt --histogram --bins 40
//!
//! # Timing clusters and the first 50 raw transition timestamps
//! protoprobe capture.txt --clusters --raw -n 50
//!
//! # Export transition rows as CSV
//! protoprobe capture.txt --export transitions.csv
//!
//! # Paired I2C check with an SDA channel
//! protoprobe scl.txt --sda sda.txt
//! ```

use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use protoprobe::output::{format_clusters, format_histogram, format_raw, format_summary, to_json};
use protoprobe::{data, export, Analyzer, Config};

/// Analyze a digital signal capture and guess the protocol behind it.
#[derive(Parser, Debug)]
#[command(name = "protoprobe")]
#[command(about = "Infer serial protocols from logic-analyzer timing captures")]
#[command(version)]
struct Args {
    /// Capture file (text format: key=value headers, one timestamp per line)
    file: PathBuf,

    /// Show per-level duration histograms
    #[arg(long)]
    histogram: bool,

    /// Number of histogram bins
    #[arg(long, default_value_t = 20)]
    bins: usize,

    /// Show detected timing clusters
    #[arg(long)]
    clusters: bool,

    /// Export transitions (index, timestamp, level, duration) to a CSV file
    #[arg(long, value_name = "CSV")]
    export: Option<PathBuf>,

    /// Show raw transition timestamps, unprocessed
    #[arg(long)]
    raw: bool,

    /// Number of raw values to show
    #[arg(short, default_value_t = 20)]
    n: usize,

    /// Second capture to use as the SDA channel for the paired I2C check
    #[arg(long, value_name = "FILE")]
    sda: Option<PathBuf>,

    /// Print the full analysis as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Cluster merge tolerance in percent
    #[arg(long, value_name = "PCT")]
    tolerance: Option<f64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let capture = data::load_capture(&args.file)?;

    let mut config = Config::new().histogram_buckets(args.bins);
    if let Some(pct) = args.tolerance {
        config = config.cluster_tolerance(pct / 100.0);
    }
    let analyzer = Analyzer::with_config(config);

    let analysis = match &args.sda {
        Some(sda_path) => {
            let sda = data::load_capture(sda_path)?;
            analyzer.analyze_pair(&capture, &sda)?
        }
        None => analyzer.analyze(&capture)?,
    };

    if args.json {
        println!("{}", to_json(&analysis)?);
    } else {
        print!("{}", format_summary(&analysis, &args.file.display().to_string()));

        if args.clusters {
            println!();
            print!("{}", format_clusters(&analysis));
        }

        if args.raw {
            println!();
            print!("{}", format_raw(&capture, args.n));
        }

        if args.histogram {
            print!(
                "{}",
                format_histogram(analysis.all_histogram.as_ref(), "All Durations")
            );
            print!(
                "{}",
                format_histogram(analysis.high_histogram.as_ref(), "HIGH Pulse Durations")
            );
            print!(
                "{}",
                format_histogram(analysis.low_histogram.as_ref(), "LOW Gap Durations")
            );
        }
    }

    if let Some(path) = &args.export {
        let written = export::export_to_path(path, &capture)?;
        eprintln!("Exported {} transitions to {}", written, path.display());
    }

    Ok(())
}
