use clap::{ArgMatches, Command, CommandFactory, FromArgMatches, Parser};

use crate::core::clipboard::{self, Clipboard};
use crate::shared::error::{AppError, AppResult};

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal translator", long_about = None)]
pub struct Cli {
    /// Use clipboard data as input.
    #[arg(short, long)]
    pub clipboard: bool,

    /// No showing output data.
    #[arg(short, long)]
    pub dumb: bool,

    /// The text to query.
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,
}

/// Arguments after clipboard substitution.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedArgs {
    pub text: Vec<String>,
    pub dumb: bool,
    pub from_clipboard: bool,
}

impl Cli {
    /// Command definition with the `--clipboard` help adjusted to whether a
    /// clipboard integration was found.
    pub fn command_with_clipboard(available: bool) -> Command {
        Self::command().mut_arg("clipboard", |arg| arg.help(clipboard::help_text(available)))
    }

    pub fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        Self::from_arg_matches(matches)
    }

    /// Substitute clipboard contents when requested and make sure some text
    /// is left to translate.
    pub fn resolve(self, clipboard: Option<&mut dyn Clipboard>) -> AppResult<ResolvedArgs> {
        let text = if self.clipboard {
            let clipboard = clipboard.ok_or(AppError::ClipboardUnavailable)?;
            let pasted = clipboard.paste()?;
            tracing::debug!(chars = pasted.chars().count(), "using clipboard data");
            if pasted.trim().is_empty() {
                Vec::new()
            } else {
                vec![pasted]
            }
        } else {
            self.text
        };

        if text.is_empty() {
            return Err(AppError::NoText);
        }

        Ok(ResolvedArgs {
            text,
            dumb: self.dumb,
            from_clipboard: self.clipboard,
        })
    }
}
