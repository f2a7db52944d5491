use std::collections::HashMap;

use super::core::DataFrame;
use super::series::{AnyValue, Series};
use crate::error::{FrameError, Result};

impl DataFrame {
    /// Group rows by the distinct values of one column
    pub fn groupby(&self, by: &str) -> Result<GroupBy<'_>> {
        Ok(GroupBy {
            df: self,
            key_index: self.column_index(by)?,
        })
    }
}

/// Row partitions of a frame keyed by one column, in first-appearance
/// order of each distinct key
#[derive(Debug)]
pub struct GroupBy<'a> {
    df: &'a DataFrame,
    key_index: usize,
}

/// Hashable stand-in for a cell; floats group by bit pattern, so NaN
/// forms its own group instead of poisoning the hash
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum GroupKey {
    Int64(i64),
    Float64(u64),
    Bool(bool),
    Utf8(String),
}

impl From<AnyValue<'_>> for GroupKey {
    fn from(value: AnyValue<'_>) -> Self {
        match value {
            AnyValue::Int64(v) => GroupKey::Int64(v),
            AnyValue::Float64(v) => GroupKey::Float64(v.to_bits()),
            AnyValue::Bool(v) => GroupKey::Bool(v),
            AnyValue::Utf8(v) => GroupKey::Utf8(v.to_string()),
        }
    }
}

/// Borrowed view of a measure column admitted to numeric reductions
enum Numeric<'a> {
    Int64(&'a [i64]),
    Float64(&'a [f64]),
}

impl<'a> GroupBy<'a> {
    /// Row indices per group, ordered by first appearance of the key
    fn partitions(&self) -> Vec<Vec<usize>> {
        let key = &self.df.data[self.key_index];
        let mut slots: HashMap<GroupKey, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();

        for row in 0..key.len() {
            let slot = *slots
                .entry(GroupKey::from(key.get(row)))
                .or_insert_with(|| {
                    groups.push(Vec::new());
                    groups.len() - 1
                });
            groups[slot].push(row);
        }
        groups
    }

    /// Two-column frame: the key plus the reduced values, one row per group
    fn reduced(&self, groups: &[Vec<usize>], name: &str, values: Series) -> Result<DataFrame> {
        let firsts: Vec<usize> = groups.iter().map(|g| g[0]).collect();
        let key_name = self.df.columns[self.key_index].clone();
        let key_values = self.df.data[self.key_index].take(&firsts);
        DataFrame::new(vec![(key_name, key_values), (name.to_string(), values)])
    }

    fn measure(&self, name: &str) -> Result<Numeric<'a>> {
        let pos = self.df.column_index(name)?;
        match &self.df.data[pos] {
            Series::Int64(v) => Ok(Numeric::Int64(v)),
            Series::Float64(v) => Ok(Numeric::Float64(v)),
            other => Err(FrameError::TypeMismatch(format!(
                "numeric reduction needs a numeric measure column, '{name}' is {}",
                other.dtype()
            ))),
        }
    }

    /// Rows per group, as a `count` column
    pub fn count(&self) -> Result<DataFrame> {
        let groups = self.partitions();
        let counts: Vec<i64> = groups.iter().map(|g| g.len() as i64).collect();
        self.reduced(&groups, "count", Series::Int64(counts))
    }

    /// Arithmetic mean of the measure per group (sum over count), as a
    /// float column named after the measure
    pub fn mean(&self, measure: &str) -> Result<DataFrame> {
        let values = self.measure(measure)?;
        let groups = self.partitions();
        let means: Vec<f64> = match values {
            Numeric::Int64(v) => groups
                .iter()
                .map(|g| g.iter().map(|&r| v[r] as f64).sum::<f64>() / g.len() as f64)
                .collect(),
            Numeric::Float64(v) => groups
                .iter()
                .map(|g| g.iter().map(|&r| v[r]).sum::<f64>() / g.len() as f64)
                .collect(),
        };
        self.reduced(&groups, measure, Series::Float64(means))
    }

    /// Sum of the measure per group, keeping the measure's type
    pub fn sum(&self, measure: &str) -> Result<DataFrame> {
        let values = self.measure(measure)?;
        let groups = self.partitions();
        let sums = match values {
            Numeric::Int64(v) => Series::Int64(
                groups
                    .iter()
                    .map(|g| g.iter().map(|&r| v[r]).sum::<i64>())
                    .collect(),
            ),
            Numeric::Float64(v) => Series::Float64(
                groups
                    .iter()
                    .map(|g| g.iter().map(|&r| v[r]).sum::<f64>())
                    .collect(),
            ),
        };
        self.reduced(&groups, measure, sums)
    }

    /// Smallest measure value per group, keeping the measure's type
    pub fn min(&self, measure: &str) -> Result<DataFrame> {
        let values = self.measure(measure)?;
        let groups = self.partitions();
        let mins = match values {
            Numeric::Int64(v) => Series::Int64(
                groups
                    .iter()
                    .map(|g| g.iter().map(|&r| v[r]).fold(i64::MAX, i64::min))
                    .collect(),
            ),
            Numeric::Float64(v) => Series::Float64(
                groups
                    .iter()
                    .map(|g| g.iter().map(|&r| v[r]).fold(f64::INFINITY, f64::min))
                    .collect(),
            ),
        };
        self.reduced(&groups, measure, mins)
    }

    /// Largest measure value per group, keeping the measure's type
    pub fn max(&self, measure: &str) -> Result<DataFrame> {
        let values = self.measure(measure)?;
        let groups = self.partitions();
        let maxs = match values {
            Numeric::Int64(v) => Series::Int64(
                groups
                    .iter()
                    .map(|g| g.iter().map(|&r| v[r]).fold(i64::MIN, i64::max))
                    .collect(),
            ),
            Numeric::Float64(v) => Series::Float64(
                groups
                    .iter()
                    .map(|g| g.iter().map(|&r| v[r]).fold(f64::NEG_INFINITY, f64::max))
                    .collect(),
            ),
        };
        self.reduced(&groups, measure, maxs)
    }
}
