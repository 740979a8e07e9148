/// Error types for geometry updates and hull generation
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("edge {edge} references vertex {index}, but only {vertex_count} vertices exist")]
    InvalidGeometry {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },

    #[error("invalid hull parameters: {}", .0.join("; "))]
    InvalidParams(Vec<String>),

    #[error("invalid hull lines: {0}")]
    InvalidLines(String),

    #[error("invalid line edit: {0}")]
    InvalidEdit(String),

    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
