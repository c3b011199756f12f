//! Crate-wide error taxonomy.

use polars::prelude::PolarsError;
use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("computation failed: {0}")]
    Computation(String),

    #[error("dataframe error: {0}")]
    Polars(#[from] PolarsError),

    #[error("render error: {0}")]
    Render(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
