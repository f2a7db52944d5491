//! # MiniFrame
//!
//! A small columnar DataFrame library with a fixed CSV summary pipeline.
//!
//! MiniFrame provides:
//! - Typed columns (int, float, bool, string) loaded from CSV with type inference
//! - Row filtering by predicate, column selection, and per-row derived columns
//! - Grouped reductions (mean, sum, min, max, count) in first-appearance key order
//! - A five-stage life-expectancy pipeline: load, filter, select, derive, aggregate
//!
//! ## Quick Start
//!
//! ### Frames
//! ```rust
//! use miniframe::{AnyValue, DataFrame, FrameError, Scalar, Series};
//!
//! let df = DataFrame::new(vec![
//!     ("country".to_string(), Series::from(vec!["Norway", "Mali", "Japan"])),
//!     ("life_exp".to_string(), Series::from(vec![81.2, 54.5, 82.6])),
//! ])?;
//!
//! // Rows with life expectancy above 60 years
//! let high = df.filter("life_exp", |v| matches!(v, AnyValue::Float64(x) if x > 60.0))?;
//! assert_eq!(high.len(), 2);
//!
//! // Append a column computed from an existing one
//! let with_months = df.derive("life_exp_months", &["life_exp"], |row| match row[0] {
//!     AnyValue::Float64(v) => Ok(Scalar::Float64(v * 12.0)),
//!     other => Err(FrameError::TypeMismatch(format!(
//!         "expected a float, got {}",
//!         other.dtype()
//!     ))),
//! })?;
//! assert_eq!(with_months.shape(), (3, 3));
//! # Ok::<(), miniframe::FrameError>(())
//! ```
//!
//! ### Pipeline
//! ```rust,no_run
//! use miniframe::{AnyValue, DataFrame};
//!
//! let df = DataFrame::from_csv("data/lifeexp.csv")?;
//! let summary = df
//!     .filter("Year", |v| matches!(v, AnyValue::Int64(y) if y == 2007))?
//!     .groupby("Continent")?
//!     .mean("LifeExp")?;
//! println!("{summary}");
//! # Ok::<(), miniframe::FrameError>(())
//! ```

pub mod dataframe;
pub mod error;
pub mod pipeline;

// Re-export main types for convenience
pub use dataframe::{AnyValue, DataFrame, DataType, GroupBy, Scalar, Series};
pub use error::{FrameError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lifeexp_frame() -> DataFrame {
        DataFrame::new(vec![
            (
                "Country".to_string(),
                Series::from(vec![
                    "Netherlands",
                    "Germany",
                    "Nigeria",
                    "South Africa",
                    "China",
                    "India",
                ]),
            ),
            (
                "Continent".to_string(),
                Series::from(vec!["Europe", "Europe", "Africa", "Africa", "Asia", "Asia"]),
            ),
            (
                "Year".to_string(),
                Series::from(vec![2007i64, 2007, 2007, 2007, 2007, 2007]),
            ),
            (
                "LifeExp".to_string(),
                Series::from(vec![80.6, 79.8, 46.9, 49.0, 72.9, 64.7]),
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_series_basics() {
        let s = Series::from(vec![1i64, 2, 3]);
        assert_eq!(s.len(), 3);
        assert_eq!(s.dtype(), DataType::Int64);
        assert_eq!(s.get(1), AnyValue::Int64(2));
        assert_eq!(s.get(1).as_f64(), Some(2.0));

        let s = Series::from(vec!["a", "b"]);
        assert_eq!(s.dtype(), DataType::Utf8);
        assert_eq!(s.get(0), AnyValue::Utf8("a"));
        assert_eq!(s.get(0).as_f64(), None);

        assert_eq!(Series::from(vec![true]).dtype(), DataType::Bool);
        assert_eq!(Series::from(vec![1.5]).dtype(), DataType::Float64);
    }

    #[test]
    fn test_new_rejects_duplicate_names() {
        let err = DataFrame::new(vec![
            ("x".to_string(), Series::from(vec![1i64])),
            ("x".to_string(), Series::from(vec![2i64])),
        ])
        .unwrap_err();
        assert!(matches!(err, FrameError::InvalidSpec(_)));
    }

    #[test]
    fn test_new_rejects_unequal_lengths() {
        let err = DataFrame::new(vec![
            ("x".to_string(), Series::from(vec![1i64, 2])),
            ("y".to_string(), Series::from(vec![1.0])),
        ])
        .unwrap_err();
        assert!(matches!(err, FrameError::InvalidSpec(_)));
    }

    #[test]
    fn test_head_and_tail() {
        let df = lifeexp_frame();
        let head = df.head(2);
        assert_eq!(head.shape(), (2, 4));
        assert_eq!(head.get_column("Country").unwrap().get(0), AnyValue::Utf8("Netherlands"));

        let tail = df.tail(2);
        assert_eq!(tail.len(), 2);
        assert_eq!(tail.get_column("Country").unwrap().get(1), AnyValue::Utf8("India"));

        // Oversized n clamps to the full frame
        assert_eq!(df.head(100).len(), 6);
        assert_eq!(df.tail(100).len(), 6);
    }

    #[test]
    fn test_select_reorders_columns() {
        let df = lifeexp_frame();
        let selected = df.select(&["LifeExp", "Country"]).unwrap();
        assert_eq!(selected.columns, vec!["LifeExp", "Country"]);
        assert_eq!(selected.len(), df.len());
    }

    #[test]
    fn test_select_missing_column() {
        let df = lifeexp_frame();
        let err = df.select(&["Country", "Population"]).unwrap_err();
        assert!(matches!(err, FrameError::ColumnNotFound(name) if name == "Population"));
    }

    #[test]
    fn test_select_duplicate_request() {
        let df = lifeexp_frame();
        let err = df.select(&["Country", "Country"]).unwrap_err();
        assert!(matches!(err, FrameError::InvalidSpec(_)));
    }

    #[test]
    fn test_filter_keeps_matching_rows_in_order() {
        let df = lifeexp_frame();
        let europe = df
            .filter("Continent", |v| v == AnyValue::Utf8("Europe"))
            .unwrap();
        assert_eq!(europe.len(), 2);
        assert_eq!(europe.columns, df.columns);
        assert_eq!(europe.get_column("Country").unwrap().get(0), AnyValue::Utf8("Netherlands"));
        assert_eq!(europe.get_column("Country").unwrap().get(1), AnyValue::Utf8("Germany"));
    }

    #[test]
    fn test_filter_no_matches_keeps_columns() {
        let df = lifeexp_frame();
        let none = df
            .filter("Year", |v| matches!(v, AnyValue::Int64(y) if y == 1999))
            .unwrap();
        assert_eq!(none.len(), 0);
        assert_eq!(none.columns, df.columns);
    }

    #[test]
    fn test_filter_missing_column() {
        let df = lifeexp_frame();
        let err = df.filter("Region", |_| true).unwrap_err();
        assert!(matches!(err, FrameError::ColumnNotFound(name) if name == "Region"));
    }

    #[test]
    fn test_filter_is_idempotent() {
        fn pred(v: AnyValue<'_>) -> bool {
            matches!(v, AnyValue::Float64(x) if x > 60.0)
        }
        let df = lifeexp_frame();
        let once = df.filter("LifeExp", pred).unwrap();
        let twice = once.filter("LifeExp", pred).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mask_length_mismatch() {
        let df = lifeexp_frame();
        let err = df.mask(&[true, false]).unwrap_err();
        assert!(matches!(err, FrameError::InvalidSpec(_)));
    }

    #[test]
    fn test_sort_by() {
        let df = lifeexp_frame();
        let sorted = df.sort_by("LifeExp", true).unwrap();
        if let Some(Series::Float64(values)) = sorted.get_column("LifeExp") {
            assert!(values.windows(2).all(|w| w[0] <= w[1]));
        } else {
            panic!("LifeExp should stay Float64");
        }

        let descending = df.sort_by("Country", false).unwrap();
        assert_eq!(descending.get_column("Country").unwrap().get(0), AnyValue::Utf8("South Africa"));
    }

    #[test]
    fn test_with_column() {
        let df = lifeexp_frame();
        let extended = df
            .with_column("Observed".to_string(), Series::from(vec![true; 6]))
            .unwrap();
        assert_eq!(extended.shape(), (6, 5));

        let err = df
            .with_column("Year".to_string(), Series::from(vec![0i64; 6]))
            .unwrap_err();
        assert!(matches!(err, FrameError::InvalidSpec(_)));

        let err = df
            .with_column("Short".to_string(), Series::from(vec![1i64]))
            .unwrap_err();
        assert!(matches!(err, FrameError::InvalidSpec(_)));
    }

    #[test]
    fn test_derive_values_and_shape() {
        let df = lifeexp_frame();
        let derived = df
            .derive("LifeExp_Months", &["LifeExp"], |row| match row[0] {
                AnyValue::Float64(v) => Ok(Scalar::Float64(v * 12.0)),
                other => Err(FrameError::TypeMismatch(format!(
                    "expected a float, got {}",
                    other.dtype()
                ))),
            })
            .unwrap();

        assert_eq!(derived.shape(), (6, 5));
        assert_eq!(derived.columns.last().map(String::as_str), Some("LifeExp_Months"));
        if let Some(Series::Float64(months)) = derived.get_column("LifeExp_Months") {
            assert!((months[0] - 967.2).abs() < 1e-9);
            assert!((months[5] - 64.7 * 12.0).abs() < 1e-9);
        } else {
            panic!("derived column should be Float64");
        }
    }

    #[test]
    fn test_derive_multi_source() {
        let df = lifeexp_frame();
        let labeled = df
            .derive("Label", &["Country", "Year"], |row| {
                Ok(Scalar::Utf8(format!("{} ({})", row[0], row[1])))
            })
            .unwrap();
        assert_eq!(labeled.get_column("Label").unwrap().get(0), AnyValue::Utf8("Netherlands (2007)"));
    }

    #[test]
    fn test_derive_name_collision() {
        let df = lifeexp_frame();
        let err = df
            .derive("Year", &["LifeExp"], |_| Ok(Scalar::Int64(0)))
            .unwrap_err();
        assert!(matches!(err, FrameError::InvalidSpec(_)));
    }

    #[test]
    fn test_derive_missing_source() {
        let df = lifeexp_frame();
        let err = df
            .derive("Twice", &["Population"], |_| Ok(Scalar::Int64(0)))
            .unwrap_err();
        assert!(matches!(err, FrameError::ColumnNotFound(name) if name == "Population"));
    }

    #[test]
    fn test_derive_mixed_output_types() {
        let df = lifeexp_frame();
        let err = df
            .derive("Mixed", &["Country"], |row| match row[0] {
                AnyValue::Utf8("Netherlands") => Ok(Scalar::Utf8("home".to_string())),
                _ => Ok(Scalar::Int64(0)),
            })
            .unwrap_err();
        assert!(matches!(err, FrameError::TypeMismatch(_)));
    }

    #[test]
    fn test_groupby_mean_in_first_appearance_order() {
        let df = lifeexp_frame();
        let summary = df.groupby("Continent").unwrap().mean("LifeExp").unwrap();

        assert_eq!(summary.shape(), (3, 2));
        assert_eq!(summary.columns, vec!["Continent", "LifeExp"]);
        if let Some(Series::Utf8(keys)) = summary.get_column("Continent") {
            assert_eq!(keys, &["Europe", "Africa", "Asia"]);
        } else {
            panic!("key column should stay Utf8");
        }
        if let Some(Series::Float64(means)) = summary.get_column("LifeExp") {
            assert!((means[0] - 80.2).abs() < 1e-9);
            assert!((means[1] - 47.95).abs() < 1e-9);
            assert!((means[2] - 68.8).abs() < 1e-9);
        } else {
            panic!("mean column should be Float64");
        }
    }

    #[test]
    fn test_groupby_count_sums_to_row_count() {
        let df = lifeexp_frame();
        let counts = df.groupby("Continent").unwrap().count().unwrap();
        assert_eq!(counts.len(), 3);
        if let Some(Series::Int64(values)) = counts.get_column("count") {
            assert_eq!(values.iter().sum::<i64>(), df.len() as i64);
        } else {
            panic!("count column should be Int64");
        }
    }

    #[test]
    fn test_groupby_sum_min_max() {
        let df = lifeexp_frame();
        let by_continent = df.groupby("Continent").unwrap();

        let sums = by_continent.sum("LifeExp").unwrap();
        if let Some(Series::Float64(values)) = sums.get_column("LifeExp") {
            assert!((values[0] - 160.4).abs() < 1e-9);
        } else {
            panic!("float sums stay Float64");
        }

        let sums = by_continent.sum("Year").unwrap();
        if let Some(Series::Int64(values)) = sums.get_column("Year") {
            assert_eq!(values, &[4014, 4014, 4014]);
        } else {
            panic!("int sums stay Int64");
        }

        let mins = by_continent.min("LifeExp").unwrap();
        if let Some(Series::Float64(values)) = mins.get_column("LifeExp") {
            assert!((values[1] - 46.9).abs() < 1e-9);
        } else {
            panic!("min keeps the measure type");
        }

        let maxs = by_continent.max("LifeExp").unwrap();
        if let Some(Series::Float64(values)) = maxs.get_column("LifeExp") {
            assert!((values[2] - 72.9).abs() < 1e-9);
        } else {
            panic!("max keeps the measure type");
        }
    }

    #[test]
    fn test_groupby_non_numeric_measure() {
        let df = lifeexp_frame();
        let err = df.groupby("Continent").unwrap().mean("Country").unwrap_err();
        assert!(matches!(err, FrameError::TypeMismatch(_)));
    }

    #[test]
    fn test_groupby_missing_columns() {
        let df = lifeexp_frame();
        assert!(matches!(
            df.groupby("Region").unwrap_err(),
            FrameError::ColumnNotFound(_)
        ));
        assert!(matches!(
            df.groupby("Continent").unwrap().mean("Population").unwrap_err(),
            FrameError::ColumnNotFound(_)
        ));
    }

    #[test]
    fn test_groupby_empty_input_yields_empty_output() {
        let df = DataFrame::empty(vec![
            ("Continent".to_string(), DataType::Utf8),
            ("LifeExp".to_string(), DataType::Float64),
        ]);
        let summary = df.groupby("Continent").unwrap().mean("LifeExp").unwrap();
        assert_eq!(summary.len(), 0);
        assert_eq!(summary.columns, vec!["Continent", "LifeExp"]);
    }

    #[test]
    fn test_groupby_int_key_keeps_dtype() {
        let df = lifeexp_frame();
        let summary = df.groupby("Year").unwrap().mean("LifeExp").unwrap();
        assert_eq!(summary.len(), 1);
        assert_eq!(summary.get_column("Year").unwrap().dtype(), DataType::Int64);
    }

    #[test]
    fn test_csv_io_with_inference() -> Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "name,age,salary,active")?;
        writeln!(temp_file, "Alice,25,50000.5,true")?;
        writeln!(temp_file, "Bob,30,60000.0,false")?;
        writeln!(temp_file, "Charlie,35,70000.25,true")?;

        let df = DataFrame::from_csv(temp_file.path())?;
        assert_eq!(df.shape(), (3, 4));
        assert_eq!(df.get_column("name").map(Series::dtype), Some(DataType::Utf8));
        assert_eq!(df.get_column("age").map(Series::dtype), Some(DataType::Int64));
        assert_eq!(df.get_column("salary").map(Series::dtype), Some(DataType::Float64));
        assert_eq!(df.get_column("active").map(Series::dtype), Some(DataType::Bool));
        Ok(())
    }

    #[test]
    fn test_csv_roundtrip() -> Result<()> {
        let df = lifeexp_frame();
        let output = NamedTempFile::new()?;
        df.to_csv(output.path())?;

        let back = DataFrame::from_csv(output.path())?;
        assert_eq!(back, df);
        Ok(())
    }

    #[test]
    fn test_csv_missing_file() {
        let err = DataFrame::from_csv("no/such/file.csv").unwrap_err();
        assert!(matches!(err, FrameError::FileNotFound(_)));
    }

    #[test]
    fn test_csv_ragged_row() -> std::io::Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "a,b,c")?;
        writeln!(temp_file, "1,2,3")?;
        writeln!(temp_file, "4,5")?;

        let err = DataFrame::from_csv(temp_file.path()).unwrap_err();
        assert!(matches!(err, FrameError::Format(_)));
        Ok(())
    }

    #[test]
    fn test_csv_duplicate_header() -> std::io::Result<()> {
        let mut temp_file = NamedTempFile::new()?;
        writeln!(temp_file, "a,b,a")?;
        writeln!(temp_file, "1,2,3")?;

        let err = DataFrame::from_csv(temp_file.path()).unwrap_err();
        assert!(matches!(err, FrameError::Format(_)));
        Ok(())
    }

    #[test]
    fn test_display_renders_header_and_rows() {
        let df = DataFrame::new(vec![
            ("Continent".to_string(), Series::from(vec!["Europe", "Africa"])),
            ("LifeExp".to_string(), Series::from(vec![80.2, 47.95])),
        ])
        .unwrap();

        let rendered = df.to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Continent"));
        assert!(lines[1].contains("Europe"));
        assert!(lines[2].contains("47.95"));
    }
}
