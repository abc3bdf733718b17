pub mod error;
pub mod logging;
pub mod settings;

// Re-export AppError for convenience
pub use error::{AppError, AppResult};
