//! Data Processor Module
//! Wide-to-long stacking for charts that consume melted frames.

use crate::error::{ChartError, ChartResult};
use polars::prelude::*;

/// Handles data shaping operations.
pub struct DataProcessor;

impl DataProcessor {
    /// Stack numeric columns into long format.
    ///
    /// Output columns: ["variable", "value"], one row per (column, cell),
    /// null and NaN cells dropped. This is the shape
    /// `ChartRenderer::render_time_distribution` consumes.
    pub fn stack_to_long(df: &DataFrame, value_columns: &[String]) -> ChartResult<DataFrame> {
        if value_columns.is_empty() {
            return Err(ChartError::InvalidRequest(
                "stack_to_long requires at least one value column".into(),
            ));
        }

        let mut variables: Vec<String> = Vec::new();
        let mut values: Vec<f64> = Vec::new();

        for value_column in value_columns {
            if !df
                .get_column_names()
                .iter()
                .any(|c| c.as_str() == value_column.as_str())
            {
                return Err(ChartError::MissingColumn(value_column.clone()));
            }
            let series = df.column(value_column)?;
            let as_f64 = series.cast(&DataType::Float64)?;
            let ca = as_f64.f64()?;

            for i in 0..df.height() {
                if let Some(v) = ca.get(i) {
                    if !v.is_nan() {
                        variables.push(value_column.clone());
                        values.push(v);
                    }
                }
            }
        }

        let stacked = DataFrame::new(vec![
            Column::new("variable".into(), variables),
            Column::new("value".into(), values),
        ])?;

        Ok(stacked)
    }
}
