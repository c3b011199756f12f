//! Data module - read-only dataset access and shaping

mod dataset;
mod processor;

pub use dataset::Dataset;
pub use processor::DataProcessor;
