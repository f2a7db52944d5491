//! Life-expectancy summary pipeline.
//!
//! Usage:
//!   miniframe-pipeline --input data/lifeexp.csv --year 2007
//!
//! Prints the mean life expectancy per continent for the chosen year.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use miniframe::pipeline::{self, PipelineOptions};

#[derive(Parser, Debug)]
#[command(name = "miniframe-pipeline")]
#[command(about = "Summarize mean life expectancy per continent from a CSV of observations")]
#[command(version)]
struct Args {
    /// CSV file with Country, Continent, Year and LifeExp columns
    #[arg(short, long, default_value = "data/lifeexp.csv")]
    input: PathBuf,

    /// Observation year to keep
    #[arg(short, long, default_value_t = 2007)]
    year: i64,
}

fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let options = PipelineOptions {
        input: args.input,
        year: args.year,
    };

    match pipeline::run(&options) {
        Ok(summary) => {
            print!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
