use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown depth layer: {0} (expected D1..D7)")]
    InvalidLayer(String),
    #[error("invalid soil mapping unit id: {0}")]
    InvalidSmuId(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
