//! Core module
//!
//! Clipboard integration and the translator feature.

pub mod clipboard;
pub mod features;
