use crash_symbolizer_common::TransportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SymbolizerError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("HTTP client error: {0}")]
    Http(String),

    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),

    #[error("Symbolization did not succeed")]
    SymbolizeFailed,

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SymbolizerError>;
