use std::fmt;

use crate::error::{FrameError, Result};

/// Type tag for a [`Series`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    Int64,
    Float64,
    Bool,
    Utf8,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Int64 => "Int64",
            DataType::Float64 => "Float64",
            DataType::Bool => "Bool",
            DataType::Utf8 => "Utf8",
        };
        f.write_str(name)
    }
}

/// One typed column of values
#[derive(Debug, Clone, PartialEq)]
pub enum Series {
    Int64(Vec<i64>),
    Float64(Vec<f64>),
    Bool(Vec<bool>),
    Utf8(Vec<String>),
}

/// Borrowed view of a single cell, handed to predicates and derivation rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnyValue<'a> {
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Utf8(&'a str),
}

/// Owned single cell, produced by derivation rules
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Int64(i64),
    Float64(f64),
    Bool(bool),
    Utf8(String),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Int64(v) => v.len(),
            Series::Float64(v) => v.len(),
            Series::Bool(v) => v.len(),
            Series::Utf8(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn dtype(&self) -> DataType {
        match self {
            Series::Int64(_) => DataType::Int64,
            Series::Float64(_) => DataType::Float64,
            Series::Bool(_) => DataType::Bool,
            Series::Utf8(_) => DataType::Utf8,
        }
    }

    /// Cell view at `row`; `row` must be in bounds.
    pub fn get(&self, row: usize) -> AnyValue<'_> {
        match self {
            Series::Int64(v) => AnyValue::Int64(v[row]),
            Series::Float64(v) => AnyValue::Float64(v[row]),
            Series::Bool(v) => AnyValue::Bool(v[row]),
            Series::Utf8(v) => AnyValue::Utf8(&v[row]),
        }
    }

    /// Rows where `keep` is true, in order; `keep` must match the length.
    pub fn mask(&self, keep: &[bool]) -> Series {
        fn pick<T: Clone>(values: &[T], keep: &[bool]) -> Vec<T> {
            values
                .iter()
                .zip(keep)
                .filter_map(|(value, &keep)| if keep { Some(value.clone()) } else { None })
                .collect()
        }
        match self {
            Series::Int64(v) => Series::Int64(pick(v, keep)),
            Series::Float64(v) => Series::Float64(pick(v, keep)),
            Series::Bool(v) => Series::Bool(pick(v, keep)),
            Series::Utf8(v) => Series::Utf8(pick(v, keep)),
        }
    }

    /// Rows at `indices`, in the given order; every index must be in bounds.
    pub fn take(&self, indices: &[usize]) -> Series {
        match self {
            Series::Int64(v) => Series::Int64(indices.iter().map(|&i| v[i]).collect()),
            Series::Float64(v) => Series::Float64(indices.iter().map(|&i| v[i]).collect()),
            Series::Bool(v) => Series::Bool(indices.iter().map(|&i| v[i]).collect()),
            Series::Utf8(v) => Series::Utf8(indices.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    /// Contiguous slice of up to `len` rows starting at `offset`.
    pub fn slice(&self, offset: usize, len: usize) -> Series {
        match self {
            Series::Int64(v) => Series::Int64(v.iter().skip(offset).take(len).cloned().collect()),
            Series::Float64(v) => {
                Series::Float64(v.iter().skip(offset).take(len).cloned().collect())
            }
            Series::Bool(v) => Series::Bool(v.iter().skip(offset).take(len).cloned().collect()),
            Series::Utf8(v) => Series::Utf8(v.iter().skip(offset).take(len).cloned().collect()),
        }
    }

    /// Collect rule outputs into one homogeneous column. The first value
    /// fixes the type; a later value of another type is a type mismatch.
    /// An empty input yields an empty float column.
    pub fn from_scalars(values: Vec<Scalar>) -> Result<Series> {
        let Some(first) = values.first() else {
            return Ok(Series::Float64(Vec::new()));
        };
        let expected = first.dtype();
        match expected {
            DataType::Int64 => values
                .into_iter()
                .map(|s| match s {
                    Scalar::Int64(v) => Ok(v),
                    other => Err(mixed_output(expected, &other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Series::Int64),
            DataType::Float64 => values
                .into_iter()
                .map(|s| match s {
                    Scalar::Float64(v) => Ok(v),
                    other => Err(mixed_output(expected, &other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Series::Float64),
            DataType::Bool => values
                .into_iter()
                .map(|s| match s {
                    Scalar::Bool(v) => Ok(v),
                    other => Err(mixed_output(expected, &other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Series::Bool),
            DataType::Utf8 => values
                .into_iter()
                .map(|s| match s {
                    Scalar::Utf8(v) => Ok(v),
                    other => Err(mixed_output(expected, &other)),
                })
                .collect::<Result<Vec<_>>>()
                .map(Series::Utf8),
        }
    }
}

fn mixed_output(expected: DataType, got: &Scalar) -> FrameError {
    FrameError::TypeMismatch(format!(
        "derived column mixes {expected} and {} values",
        got.dtype()
    ))
}

impl AnyValue<'_> {
    pub fn dtype(&self) -> DataType {
        match self {
            AnyValue::Int64(_) => DataType::Int64,
            AnyValue::Float64(_) => DataType::Float64,
            AnyValue::Bool(_) => DataType::Bool,
            AnyValue::Utf8(_) => DataType::Utf8,
        }
    }

    /// Numeric widening view; `None` for bool and string cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AnyValue::Int64(v) => Some(*v as f64),
            AnyValue::Float64(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for AnyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyValue::Int64(v) => write!(f, "{v}"),
            AnyValue::Float64(v) => write!(f, "{v}"),
            AnyValue::Bool(v) => write!(f, "{v}"),
            AnyValue::Utf8(v) => write!(f, "{v}"),
        }
    }
}

impl Scalar {
    pub fn dtype(&self) -> DataType {
        match self {
            Scalar::Int64(_) => DataType::Int64,
            Scalar::Float64(_) => DataType::Float64,
            Scalar::Bool(_) => DataType::Bool,
            Scalar::Utf8(_) => DataType::Utf8,
        }
    }
}

impl From<Vec<i64>> for Series {
    fn from(v: Vec<i64>) -> Self {
        Series::Int64(v)
    }
}

impl From<Vec<f64>> for Series {
    fn from(v: Vec<f64>) -> Self {
        Series::Float64(v)
    }
}

impl From<Vec<bool>> for Series {
    fn from(v: Vec<bool>) -> Self {
        Series::Bool(v)
    }
}

impl From<Vec<&str>> for Series {
    fn from(v: Vec<&str>) -> Self {
        Series::Utf8(v.into_iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for Series {
    fn from(v: Vec<String>) -> Self {
        Series::Utf8(v)
    }
}
