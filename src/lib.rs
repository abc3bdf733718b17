//! Korean/English terminal translator.
//!
//! Detects whether the input is Korean or English and translates it to the
//! other language, optionally reading from and writing to the clipboard.

pub mod app;
pub mod cli;
pub mod core;
pub mod shared;

pub use app::run;
pub use cli::{Cli, ResolvedArgs};
pub use shared::{AppError, AppResult};
