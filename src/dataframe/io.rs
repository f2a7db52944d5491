use std::collections::HashSet;
use std::path::Path;

use csv::ReaderBuilder;

use super::core::DataFrame;
use super::series::Series;
use crate::error::{FrameError, Result};

impl DataFrame {
    /// Read a headered CSV into a frame. Column names come from the
    /// header row; each column's type is inferred from its values
    /// (int, then float, then bool, then string). The file handle is
    /// dropped before this returns.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FrameError::FileNotFound(path.to_path_buf()));
        }

        let mut rdr = ReaderBuilder::new().from_path(path).map_err(csv_error)?;
        let headers: Vec<String> = rdr
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(|h| h.to_string())
            .collect();
        if headers.is_empty() {
            return Err(FrameError::Format("file has no header row".to_string()));
        }
        let mut seen = HashSet::new();
        for header in &headers {
            if !seen.insert(header.as_str()) {
                return Err(FrameError::Format(format!(
                    "duplicate header name '{header}'"
                )));
            }
        }

        let mut cols: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
        for result in rdr.records() {
            let record = result.map_err(csv_error)?;
            for (i, field) in record.iter().enumerate() {
                cols[i].push(field.to_string());
            }
        }

        DataFrame::new(
            headers
                .into_iter()
                .zip(cols.into_iter().map(infer_series))
                .collect(),
        )
    }

    /// Write the frame as a headered CSV
    pub fn to_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
        wtr.write_record(&self.columns).map_err(csv_error)?;
        for row in 0..self.len() {
            let record: Vec<String> = self.data.iter().map(|s| s.get(row).to_string()).collect();
            wtr.write_record(&record).map_err(csv_error)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

/// Narrowest type every value of the column parses as; strings are the
/// fallback. No per-value coercion happens after this point.
fn infer_series(values: Vec<String>) -> Series {
    if values.is_empty() {
        return Series::Utf8(values);
    }
    if let Some(ints) = parse_all::<i64>(&values) {
        return Series::Int64(ints);
    }
    if let Some(floats) = parse_all::<f64>(&values) {
        return Series::Float64(floats);
    }
    if let Some(bools) = parse_all::<bool>(&values) {
        return Series::Bool(bools);
    }
    Series::Utf8(values)
}

fn parse_all<T: std::str::FromStr>(values: &[String]) -> Option<Vec<T>> {
    values.iter().map(|v| v.parse().ok()).collect()
}

/// Ragged rows and other parse failures are format errors; anything the
/// csv crate classifies as IO keeps its io kind
fn csv_error(err: csv::Error) -> FrameError {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => FrameError::Io(io),
        _ => FrameError::Format(message),
    }
}
