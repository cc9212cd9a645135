//! Erros das partes do core que fazem I/O ou decodificam payloads.
//!
//! O motor de texto em si não falha: todo parser tem um fallback.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Bytes que não puderam ser decodificados sem perda
    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}
