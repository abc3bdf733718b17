use thiserror::Error;

use crate::core::clipboard::CLIPBOARD_UNAVAILABLE_MESSAGE;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No text to translate.")]
    NoText,

    #[error("Unsupported Language ({0}). English, Korean Only.")]
    UnsupportedLanguage(String),

    #[error("Clipboard is not available.\n{}", CLIPBOARD_UNAVAILABLE_MESSAGE)]
    ClipboardUnavailable,

    #[error("Clipboard Error: {0}")]
    Clipboard(String),

    #[error("Network Error: {0}")]
    Network(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("I/O Error: {0}")]
    Io(String),
}

impl AppError {
    /// Errors caused by how the tool was invoked rather than by the
    /// translation service or the environment.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            AppError::NoText | AppError::UnsupportedLanguage(_) | AppError::ClipboardUnavailable
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
