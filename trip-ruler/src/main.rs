use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use trip_ruler::cache::DEFAULT_CACHE_FILE;
use trip_ruler::config::{
    DEFAULT_ADDRESSES_FILE, DEFAULT_KEY_FILE, DEFAULT_LOG_FILE, DEFAULT_REPORT_FILE, RunConfig,
};
use trip_ruler::domain::UnitConvention;
use trip_ruler::run::run;

/// Distance scaling applied to routing results.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum Units {
    /// Convert every unit to kilometres
    Metric,
    /// Divide metres by 100 and keep other units as reported (old cache files)
    Legacy,
}

impl From<Units> for UnitConvention {
    fn from(units: Units) -> Self {
        match units {
            Units::Metric => UnitConvention::Metric,
            Units::Legacy => UnitConvention::Legacy,
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "ruler",
    version,
    about = "Measure the trips of a travel log and write a mileage report"
)]
struct Args {
    /// File holding the routing API key
    #[arg(long, default_value = DEFAULT_KEY_FILE)]
    key: PathBuf,

    /// Address directory (YAML: name -> address)
    #[arg(long, default_value = DEFAULT_ADDRESSES_FILE)]
    addresses: PathBuf,

    /// Distance cache, rewritten after a successful run
    #[arg(long, default_value = DEFAULT_CACHE_FILE)]
    distances: PathBuf,

    /// Trip log
    #[arg(long, default_value = DEFAULT_LOG_FILE)]
    data: PathBuf,

    /// CSV report to write
    #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
    output: PathBuf,

    /// Distance scaling
    #[arg(long, value_enum, default_value_t = Units::Metric)]
    units: Units,

    /// Routing API base URL
    #[arg(long)]
    base_url: Option<String>,

    /// Routing request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> RunConfig {
        RunConfig {
            key_file: self.key,
            addresses: self.addresses,
            distances: self.distances,
            log: self.data,
            report: self.output,
            units: self.units.into(),
            base_url: self.base_url,
            timeout_secs: self.timeout,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .without_time()
        .init();

    let config = args.into_config();

    match run(&config).await {
        Ok(summary) => {
            println!(
                "Success! {} trips written to {} ({} new routing requests, {} cached distances)",
                summary.trips,
                config.report.display(),
                summary.routing_calls,
                summary.cached_distances
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}
