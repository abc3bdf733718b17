use clap::error::ErrorKind;
use std::io::Write;

use translate_lib::core::clipboard;
use translate_lib::core::features::translator::{GoogleTranslator, Translator};
use translate_lib::shared::logging;
use translate_lib::shared::settings::AppSettings;
use translate_lib::{AppError, Cli};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    logging::init();

    let clipboard = clipboard::detect();
    let mut cmd = Cli::command_with_clipboard(clipboard.is_some());
    let matches = cmd.get_matches_mut();
    let cli = Cli::from_matches(&matches).unwrap_or_else(|e| e.exit());

    let result = async {
        let settings = AppSettings::load().await?;
        let translator = Translator::new(GoogleTranslator::new(&settings)?);
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let translated = translate_lib::run(cli, &translator, clipboard, &mut out).await?;
        out.flush()?;
        Ok::<_, AppError>(translated)
    }
    .await;

    if let Err(err) = result {
        if err.is_usage() {
            let kind = match err {
                AppError::NoText => ErrorKind::MissingRequiredArgument,
                _ => ErrorKind::ValueValidation,
            };
            cmd.error(kind, err.to_string()).exit();
        }
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
