use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    #[error("failed to build {layer} frame: {source}")]
    Frame {
        layer: String,
        #[source]
        source: PolarsError,
    },
    #[error("failed to assemble layer frames: {0}")]
    Assemble(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;
