//! Dataset View Module
//! Borrowed, read-only column access over a caller-supplied DataFrame.

use crate::error::{ChartError, ChartResult};
use polars::prelude::*;

/// Read-only view over the caller's DataFrame. Never mutates it.
pub struct Dataset<'a> {
    df: &'a DataFrame,
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

impl<'a> Dataset<'a> {
    pub fn new(df: &'a DataFrame) -> Self {
        Self { df }
    }

    pub fn frame(&self) -> &DataFrame {
        self.df
    }

    /// Fails with `MissingColumn` rather than the dataframe's own error so
    /// callers see the request-level taxonomy.
    pub fn require_column(&self, name: &str) -> ChartResult<&Column> {
        if !self
            .df
            .get_column_names()
            .iter()
            .any(|c| c.as_str() == name)
        {
            return Err(ChartError::MissingColumn(name.to_string()));
        }
        Ok(self.df.column(name)?)
    }

    /// Extract a numeric column as f64, dropping nulls and NaN.
    pub fn numeric_values(&self, name: &str) -> ChartResult<Vec<f64>> {
        let column = self.require_column(name)?;
        if !is_numeric(column.dtype()) {
            return Err(ChartError::InvalidRequest(format!(
                "column '{name}' is not numeric ({})",
                column.dtype()
            )));
        }
        let as_f64 = column.cast(&DataType::Float64)?;
        let ca = as_f64.f64()?;
        Ok(ca
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect())
    }

    /// Sorted distinct values of a column, stringified.
    pub fn unique_values(&self, name: &str) -> ChartResult<Vec<String>> {
        let column = self.require_column(name)?;
        let unique = column.unique()?;
        let series = unique.as_materialized_series();
        let mut values: Vec<String> = (0..series.len())
            .filter_map(|i| {
                let val = series.get(i).ok()?;
                if val.is_null() {
                    None
                } else {
                    Some(val.to_string().trim_matches('"').to_string())
                }
            })
            .collect();
        values.sort();
        Ok(values)
    }

    /// Values of `value_column` on rows where `group_column == group`.
    pub fn values_for_group(
        &self,
        value_column: &str,
        group_column: &str,
        group: &str,
    ) -> ChartResult<Vec<f64>> {
        self.require_column(value_column)?;
        self.require_column(group_column)?;

        let filtered = self
            .df
            .clone()
            .lazy()
            .filter(col(group_column).eq(lit(group)))
            .select([col(value_column)])
            .collect()?;

        Dataset::new(&filtered).numeric_values(value_column)
    }

    /// Row-aligned (x, y) pairs, optionally restricted to one group,
    /// rows with a null or NaN on either side dropped.
    pub fn xy_values(
        &self,
        x_column: &str,
        y_column: &str,
        group: Option<(&str, &str)>,
    ) -> ChartResult<Vec<(f64, f64)>> {
        self.require_column(x_column)?;
        self.require_column(y_column)?;

        let frame = match group {
            Some((group_column, value)) => {
                self.require_column(group_column)?;
                self.df
                    .clone()
                    .lazy()
                    .filter(col(group_column).eq(lit(value)))
                    .select([col(x_column), col(y_column)])
                    .collect()?
            }
            None => self.df.clone(),
        };

        let xs = frame.column(x_column)?.cast(&DataType::Float64)?;
        let ys = frame.column(y_column)?.cast(&DataType::Float64)?;
        let xs = xs.f64()?;
        let ys = ys.f64()?;

        let mut pairs = Vec::with_capacity(frame.height());
        for i in 0..frame.height() {
            if let (Some(x), Some(y)) = (xs.get(i), ys.get(i)) {
                if !x.is_nan() && !y.is_nan() {
                    pairs.push((x, y));
                }
            }
        }
        Ok(pairs)
    }
}
