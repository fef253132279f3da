//! Error types for schema parsing and conversion

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    /// Structural failure: no table name, no field body, invalid or non-object JSON.
    #[error("{0}")]
    Parse(String),

    /// Input is neither a recognizable `CREATE TABLE` statement nor a JSON object/array.
    #[error("unrecognized input: expected a CREATE TABLE statement or a JSON document")]
    UnknownInput,

    #[error("invalid settings file {}: {message}", path.display())]
    Settings { path: PathBuf, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SchemaError {
    /// Human-readable text stored in `ParsedSchema::error`.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(e: serde_json::Error) -> Self {
        SchemaError::Parse(e.to_string())
    }
}
