use thiserror::Error;

/// Errors surfaced by quiz generation, scoring and export.
#[derive(Error, Debug)]
pub enum QuizError {
    /// Missing credential or an invalid generation request.
    #[error("configuration error: {0}")]
    Configuration(String),
    /// The question source failed or returned unusable data.
    #[error("generation failed: {0}")]
    Generation(String),
    #[error("rendering failed: {0}")]
    Rendering(#[from] RenderError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("drawing surface unavailable")]
    SurfaceUnavailable,
    #[error("font unavailable: {0}")]
    FontUnavailable(String),
    #[error("image encoding failed: {0}")]
    Encoding(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    #[error("share cancelled")]
    Cancelled,
    #[error("share failed: {0}")]
    Failed(String),
}

impl QuizError {
    /// Whether the error should send the controller back to the setup screen.
    pub fn is_generation_fatal(&self) -> bool {
        matches!(self, QuizError::Configuration(_) | QuizError::Generation(_))
    }
}
