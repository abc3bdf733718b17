//! One invocation: resolve the input, translate it, emit the result.

use std::io::Write;

use crate::cli::Cli;
use crate::core::clipboard::Clipboard;
use crate::core::features::translator::{TranslationService, Translator};
use crate::shared::error::AppResult;

pub async fn run<S, W>(
    cli: Cli,
    translator: &Translator<S>,
    mut clipboard: Option<Box<dyn Clipboard>>,
    out: &mut W,
) -> AppResult<String>
where
    S: TranslationService,
    W: Write,
{
    let resolved = match clipboard.as_mut() {
        Some(board) => cli.resolve(Some(&mut **board)),
        None => cli.resolve(None),
    }?;
    tracing::debug!(from_clipboard = resolved.from_clipboard, "resolved input");

    let result = translator.translate(&resolved.text).await?;

    // The result goes to the clipboard whenever one exists, whatever the input source.
    if let Some(board) = clipboard.as_mut() {
        match board.copy(&result) {
            Ok(()) => tracing::debug!("copied result to clipboard"),
            Err(e) => tracing::warn!("{}", e),
        }
    }

    if !resolved.dumb {
        writeln!(out, "{}", result)?;
    }

    Ok(result)
}
