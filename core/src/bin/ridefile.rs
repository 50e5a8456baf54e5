use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use log::error;

use ridefile_core::{
    cli::print_session_report, ingest_path, load_config, write_series_csv, IngestError,
    IngestOutcome, IngestReport,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Parse a GPX/TCX training file and print session metrics", long_about = None)]
struct Cli {
    /// GPX or TCX file
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,

    /// JSON config with extra field names / speed cap
    #[arg(long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Print the full JSON document instead of the report
    #[arg(long)]
    json: bool,

    /// Also write the series as CSV
    #[arg(long, value_hint = ValueHint::FilePath)]
    csv: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<IngestOutcome> {
    let cfg = match &cli.config {
        Some(path) => load_config(path)?,
        None => Default::default(),
    };
    let outcome = ingest_path(&cli.input, &cfg)?;

    if cli.json {
        let doc = serde_json::to_string_pretty(&IngestReport::from_outcome(&outcome))?;
        println!("{doc}");
    } else {
        print_session_report(&outcome);
    }

    if let (Some(path), Some(series)) = (&cli.csv, outcome.series()) {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        write_series_csv(series, file).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(outcome)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) if outcome.is_empty() => ExitCode::from(3),
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            let msg = match err.downcast_ref::<IngestError>() {
                Some(IngestError::UnsupportedFormat(_)) => "Unsupported file format, expected .gpx or .tcx",
                Some(IngestError::MalformedDocument(_)) => "Failed to parse file. Ensure it is a valid GPX or TCX.",
                _ => "Ingestion failed",
            };
            error!("{err:#}");
            eprintln!("{msg}");
            ExitCode::from(2)
        }
    }
}
