use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("DOCX generation failed: {0}")]
    Docx(String),

    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}
