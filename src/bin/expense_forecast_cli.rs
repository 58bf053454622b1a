use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use clap::Parser;
use expense_forecast::{
    init, records_from_json,
    time::{Clock, FixedClock, SystemClock},
    utils::build_info,
    ConfigManager, ForecastConfig, ForecastEngine, ForecastError, ForecastResult,
};

/// Projects monthly spend from a JSON array of expense or income records.
#[derive(Debug, Parser)]
#[command(name = "expense_forecast_cli", version, long_version = long_version())]
struct Args {
    /// JSON file holding the records, or `-` for stdin.
    input: PathBuf,

    /// Number of months to forecast. Defaults to the configured horizon.
    #[arg(short, long)]
    months: Option<usize>,

    /// Configuration file. Defaults to `$EXPENSE_FORECAST_HOME/config.json`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_date)]
    as_of: Option<NaiveDate>,

    /// Print single-line JSON.
    #[arg(long)]
    compact: bool,
}

fn main() {
    init();

    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), ForecastError> {
    let manager = args
        .config
        .clone()
        .map(ConfigManager::new)
        .unwrap_or_else(ConfigManager::from_default_location);
    let config = manager.load()?;

    let raw = read_input(&args.input)?;
    let document: serde_json::Value = serde_json::from_str(&raw)?;
    let records = records_from_json(document);

    let result = match args.as_of {
        Some(date) => run_engine(config, FixedClock::on(date), records.as_deref(), args.months),
        None => run_engine(config, SystemClock, records.as_deref(), args.months),
    };

    let json = if args.compact {
        serde_json::to_string(&result)?
    } else {
        serde_json::to_string_pretty(&result)?
    };
    println!("{json}");
    Ok(())
}

fn run_engine<C: Clock>(
    config: ForecastConfig,
    clock: C,
    records: Option<&[expense_forecast::HistoricalRecord]>,
    months: Option<usize>,
) -> ForecastResult {
    let engine = ForecastEngine::with_clock(config, clock);
    match months {
        Some(months) => engine.forecast(records, months),
        None => engine.forecast_default_horizon(records),
    }
}

fn read_input(path: &Path) -> Result<String, ForecastError> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|err| format!("invalid date `{raw}`: {err}"))
}

fn long_version() -> String {
    build_info::current().to_string()
}
