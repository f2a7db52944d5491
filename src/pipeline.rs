//! Fixed five-stage summary pipeline over a life-expectancy table.
//!
//! Loads a CSV of observations with columns `Country` (string),
//! `Continent` (string), `Year` (int), `LifeExp` (float), keeps one
//! observation year, projects the reporting columns, derives the life
//! expectancy in months, and reduces to the mean life expectancy per
//! continent. Every stage consumes the previous stage's frame and
//! returns a fresh one; a failure names the stage it happened in.

use std::fmt;
use std::path::{Path, PathBuf};

use log::debug;
use thiserror::Error;

use crate::dataframe::series::{AnyValue, DataType, Scalar};
use crate::dataframe::DataFrame;
use crate::error::FrameError;

/// The stage a pipeline failure is attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Load,
    Filter,
    Select,
    Derive,
    Aggregate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Load => "load",
            Stage::Filter => "filter",
            Stage::Select => "select",
            Stage::Derive => "derive",
            Stage::Aggregate => "aggregate",
        };
        f.write_str(name)
    }
}

/// A stage failure plus the underlying frame error
#[derive(Debug, Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: FrameError,
}

/// Inputs of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub input: PathBuf,
    pub year: i64,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            input: PathBuf::from("data/lifeexp.csv"),
            year: 2007,
        }
    }
}

fn at(stage: Stage) -> impl FnOnce(FrameError) -> PipelineError {
    move |source| PipelineError { stage, source }
}

/// Run the five stages in order and return the per-continent mean
/// life expectancy, one row per continent in first-appearance order
pub fn run(options: &PipelineOptions) -> Result<DataFrame, PipelineError> {
    let table = load(&options.input).map_err(at(Stage::Load))?;
    debug!(
        "loaded {} rows from {}",
        table.len(),
        options.input.display()
    );

    let year = options.year;
    let observed = table
        .filter("Year", |v| matches!(v, AnyValue::Int64(y) if y == year))
        .map_err(at(Stage::Filter))?;
    debug!("filter Year == {year}: {} rows", observed.len());

    let reported = observed
        .select(&["Country", "Continent", "LifeExp"])
        .map_err(at(Stage::Select))?;
    debug!("select: {} columns", reported.shape().1);

    let enriched = reported
        .derive("LifeExp_Months", &["LifeExp"], |row| match row[0] {
            AnyValue::Float64(v) => Ok(Scalar::Float64(v * 12.0)),
            other => Err(FrameError::TypeMismatch(format!(
                "LifeExp must be a float, got {}",
                other.dtype()
            ))),
        })
        .map_err(at(Stage::Derive))?;
    debug!("derive LifeExp_Months: {} columns", enriched.shape().1);

    let summary = enriched
        .groupby("Continent")
        .and_then(|groups| groups.mean("LifeExp"))
        .map_err(at(Stage::Aggregate))?;
    debug!("aggregate: {} groups", summary.len());

    Ok(summary)
}

/// Load the observations and hold them to the expected schema. A file
/// that stores `Year` or `LifeExp` with another type is rejected here
/// rather than coerced.
fn load(path: &Path) -> Result<DataFrame, FrameError> {
    let table = DataFrame::from_csv(path)?;
    expect_dtype(&table, "Year", DataType::Int64)?;
    expect_dtype(&table, "LifeExp", DataType::Float64)?;
    Ok(table)
}

fn expect_dtype(table: &DataFrame, name: &str, expected: DataType) -> Result<(), FrameError> {
    match table.get_column(name) {
        None => Err(FrameError::ColumnNotFound(name.to_string())),
        Some(series) if series.dtype() != expected => Err(FrameError::Format(format!(
            "column '{name}' is {}, expected {expected}",
            series.dtype()
        ))),
        Some(_) => Ok(()),
    }
}
