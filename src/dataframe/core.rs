use std::collections::HashSet;
use std::fmt;

use super::series::{AnyValue, DataType, Scalar, Series};
use crate::error::{FrameError, Result};

/// Ordered collection of equally long named columns
#[derive(Debug, Clone, PartialEq)]
pub struct DataFrame {
    pub columns: Vec<String>,
    pub data: Vec<Series>,
}

impl DataFrame {
    /// Build a frame from `(name, series)` pairs. Column names must be
    /// unique and every series must have the same length.
    pub fn new(columns: Vec<(String, Series)>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (name, _) in &columns {
            if !seen.insert(name.as_str()) {
                return Err(FrameError::InvalidSpec(format!(
                    "duplicate column name '{name}'"
                )));
            }
        }
        if let Some((_, first)) = columns.first() {
            let expected = first.len();
            for (name, series) in &columns {
                if series.len() != expected {
                    return Err(FrameError::InvalidSpec(format!(
                        "column '{}' has length {}, expected {}",
                        name,
                        series.len(),
                        expected
                    )));
                }
            }
        }

        let (names, series): (Vec<_>, Vec<_>) = columns.into_iter().unzip();
        Ok(DataFrame {
            columns: names,
            data: series,
        })
    }

    /// Zero-row frame with the given column names and types
    pub fn empty(columns: Vec<(String, DataType)>) -> Self {
        let series: Vec<Series> = columns
            .iter()
            .map(|(_, dtype)| match dtype {
                DataType::Int64 => Series::Int64(Vec::new()),
                DataType::Float64 => Series::Float64(Vec::new()),
                DataType::Bool => Series::Bool(Vec::new()),
                DataType::Utf8 => Series::Utf8(Vec::new()),
            })
            .collect();

        let names: Vec<String> = columns.into_iter().map(|(name, _)| name).collect();
        DataFrame {
            columns: names,
            data: series,
        }
    }

    /// Get number of rows
    pub fn len(&self) -> usize {
        if self.data.is_empty() {
            0
        } else {
            self.data[0].len()
        }
    }

    /// Check if DataFrame has no rows
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get shape (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.len(), self.columns.len())
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub(crate) fn column_index(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| FrameError::ColumnNotFound(name.to_string()))
    }

    /// Get a single column as a Series
    pub fn get_column(&self, name: &str) -> Option<&Series> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|pos| &self.data[pos])
    }

    /// Get first n rows
    pub fn head(&self, n: usize) -> DataFrame {
        DataFrame {
            columns: self.columns.clone(),
            data: self.data.iter().map(|s| s.slice(0, n)).collect(),
        }
    }

    /// Get last n rows
    pub fn tail(&self, n: usize) -> DataFrame {
        let start = self.len().saturating_sub(n);
        DataFrame {
            columns: self.columns.clone(),
            data: self.data.iter().map(|s| s.slice(start, n)).collect(),
        }
    }

    /// Select columns by name, in request order, with all rows unchanged.
    /// Requesting an absent column or the same column twice is an error.
    pub fn select(&self, cols: &[&str]) -> Result<DataFrame> {
        let mut requested = HashSet::new();
        for col in cols {
            if !requested.insert(*col) {
                return Err(FrameError::InvalidSpec(format!(
                    "column '{col}' requested more than once"
                )));
            }
        }

        let mut new_cols = Vec::with_capacity(cols.len());
        let mut new_data = Vec::with_capacity(cols.len());
        for col in cols {
            let pos = self.column_index(col)?;
            new_cols.push(self.columns[pos].clone());
            new_data.push(self.data[pos].clone());
        }

        Ok(DataFrame {
            columns: new_cols,
            data: new_data,
        })
    }

    /// Drop columns by name; names not present are ignored
    pub fn drop(&self, cols: &[&str]) -> DataFrame {
        let cols_to_drop: HashSet<&str> = cols.iter().cloned().collect();
        let mut new_columns = Vec::new();
        let mut new_data = Vec::new();

        for (i, col_name) in self.columns.iter().enumerate() {
            if !cols_to_drop.contains(col_name.as_str()) {
                new_columns.push(col_name.clone());
                new_data.push(self.data[i].clone());
            }
        }

        DataFrame {
            columns: new_columns,
            data: new_data,
        }
    }

    /// Keep rows where `keep` is true, preserving order
    pub fn mask(&self, keep: &[bool]) -> Result<DataFrame> {
        if keep.len() != self.len() {
            return Err(FrameError::InvalidSpec(format!(
                "mask length {} does not match row count {}",
                keep.len(),
                self.len()
            )));
        }

        Ok(DataFrame {
            columns: self.columns.clone(),
            data: self.data.iter().map(|s| s.mask(keep)).collect(),
        })
    }

    /// Keep rows where `predicate` holds on the named column's value,
    /// preserving column set, column order and relative row order. A
    /// result with zero rows keeps the full column set.
    pub fn filter<P>(&self, column: &str, predicate: P) -> Result<DataFrame>
    where
        P: Fn(AnyValue<'_>) -> bool,
    {
        let pos = self.column_index(column)?;
        let series = &self.data[pos];
        let keep: Vec<bool> = (0..series.len()).map(|row| predicate(series.get(row))).collect();
        self.mask(&keep)
    }

    /// Stable sort of all rows by one column
    pub fn sort_by(&self, column: &str, ascending: bool) -> Result<DataFrame> {
        let pos = self.column_index(column)?;
        let mut indices: Vec<usize> = (0..self.len()).collect();

        match &self.data[pos] {
            Series::Int64(values) => indices.sort_by(|&a, &b| values[a].cmp(&values[b])),
            Series::Float64(values) => indices.sort_by(|&a, &b| values[a].total_cmp(&values[b])),
            Series::Bool(values) => indices.sort_by(|&a, &b| values[a].cmp(&values[b])),
            Series::Utf8(values) => indices.sort_by(|&a, &b| values[a].cmp(&values[b])),
        }
        if !ascending {
            indices.reverse();
        }

        Ok(DataFrame {
            columns: self.columns.clone(),
            data: self.data.iter().map(|s| s.take(&indices)).collect(),
        })
    }

    /// Append a precomputed column. The name must be new and the length
    /// must match the row count.
    pub fn with_column(&self, name: String, series: Series) -> Result<DataFrame> {
        if self.columns.contains(&name) {
            return Err(FrameError::InvalidSpec(format!(
                "column '{name}' already exists"
            )));
        }
        if series.len() != self.len() && !self.columns.is_empty() {
            return Err(FrameError::InvalidSpec(format!(
                "column '{}' has length {}, expected {}",
                name,
                series.len(),
                self.len()
            )));
        }

        let mut new_columns = self.columns.clone();
        let mut new_data = self.data.clone();
        new_columns.push(name);
        new_data.push(series);

        Ok(DataFrame {
            columns: new_columns,
            data: new_data,
        })
    }

    /// Append one column derived row by row from existing columns. The
    /// rule sees the `sources` values of a single row, in `sources`
    /// order, and its outputs must all have one type.
    pub fn derive<F>(&self, name: &str, sources: &[&str], rule: F) -> Result<DataFrame>
    where
        F: Fn(&[AnyValue<'_>]) -> Result<Scalar>,
    {
        if self.columns.iter().any(|c| c == name) {
            return Err(FrameError::InvalidSpec(format!(
                "column '{name}' already exists"
            )));
        }
        let indices: Vec<usize> = sources
            .iter()
            .map(|source| self.column_index(source))
            .collect::<Result<_>>()?;

        let mut outputs = Vec::with_capacity(self.len());
        let mut row_values = Vec::with_capacity(indices.len());
        for row in 0..self.len() {
            row_values.clear();
            row_values.extend(indices.iter().map(|&i| self.data[i].get(row)));
            outputs.push(rule(&row_values)?);
        }

        let mut new_columns = self.columns.clone();
        let mut new_data = self.data.clone();
        new_columns.push(name.to_string());
        new_data.push(Series::from_scalars(outputs)?);

        Ok(DataFrame {
            columns: new_columns,
            data: new_data,
        })
    }
}

/// Plain console rendering: header row, then one space-aligned line per row
impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut widths: Vec<usize> = self.columns.iter().map(String::len).collect();
        let mut rows: Vec<Vec<String>> = Vec::with_capacity(self.len());
        for row in 0..self.len() {
            let cells: Vec<String> = self.data.iter().map(|s| s.get(row).to_string()).collect();
            for (width, cell) in widths.iter_mut().zip(&cells) {
                *width = (*width).max(cell.len());
            }
            rows.push(cells);
        }

        write_aligned(f, &self.columns, &widths)?;
        for cells in &rows {
            write_aligned(f, cells, &widths)?;
        }
        Ok(())
    }
}

fn write_aligned<S: AsRef<str>>(
    f: &mut fmt::Formatter<'_>,
    cells: &[S],
    widths: &[usize],
) -> fmt::Result {
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i + 1 == cells.len() {
            write!(f, "{}", cell.as_ref())?;
        } else {
            write!(f, "{:<width$}  ", cell.as_ref(), width = *width)?;
        }
    }
    writeln!(f)
}
