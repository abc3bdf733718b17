//! Translator feature
//!
//! Flattens the input, asks the service which language it is in, and
//! translates Korean to English or English to Korean.

pub mod service;
pub mod types;

pub use service::{GoogleTranslator, TranslationService};
pub use types::{Language, TranslationRequest, TranslationResponse};

use crate::shared::error::AppResult;

/// Join tokens with single spaces and collapse newlines into spaces.
pub fn normalize<S: AsRef<str>>(tokens: &[S]) -> String {
    let joined = tokens
        .iter()
        .map(|t| t.as_ref())
        .collect::<Vec<_>>()
        .join(" ");
    joined.replace("\r\n", " ").replace('\n', " ")
}

pub struct Translator<S> {
    service: S,
}

impl<S: TranslationService> Translator<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    /// Translate `tokens` into the opposite language of whatever the service
    /// detects. Only Korean and English are accepted.
    pub async fn translate<T: AsRef<str>>(&self, tokens: &[T]) -> AppResult<String> {
        let text = normalize(tokens);

        let code = self.service.detect(&text).await?;
        let source: Language = code.parse()?;
        tracing::info!(detected = %source, "detected source language");

        let request = TranslationRequest {
            text,
            source: Some(source),
            target: source.opposite(),
        };
        let response = self.service.translate(&request).await?;
        Ok(response.translated)
    }
}
