//! End-to-end walkthrough of the five pipeline stages.
//!
//! Run with `cargo run --example pipeline_demo` from the repository root.

use miniframe::{AnyValue, DataFrame, FrameError, Scalar};

fn main() -> miniframe::Result<()> {
    let df = DataFrame::from_csv("data/lifeexp.csv")?;
    println!("Loaded observations:\n{df}");

    let recent = df.filter("Year", |v| matches!(v, AnyValue::Int64(2007)))?;
    println!("Year 2007 only:\n{recent}");

    let reported = recent.select(&["Country", "Continent", "LifeExp"])?;
    println!("Reporting columns:\n{reported}");

    let enriched = reported.derive("LifeExp_Months", &["LifeExp"], |row| match row[0] {
        AnyValue::Float64(v) => Ok(Scalar::Float64(v * 12.0)),
        other => Err(FrameError::TypeMismatch(format!(
            "expected a float, got {}",
            other.dtype()
        ))),
    })?;
    println!("With months:\n{enriched}");

    let summary = enriched.groupby("Continent")?.mean("LifeExp")?;
    println!("Mean life expectancy per continent:\n{summary}");
    Ok(())
}
