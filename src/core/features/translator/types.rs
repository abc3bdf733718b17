use std::fmt;
use std::str::FromStr;

use crate::shared::error::AppError;

/// The two languages the translator works between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Korean,
    English,
}

impl Language {
    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::Korean => "ko",
            Language::English => "en",
        }
    }

    pub fn opposite(self) -> Language {
        match self {
            Language::Korean => Language::English,
            Language::English => Language::Korean,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AppError;

    /// Accepts `ko` and `en` (case-insensitive). Anything else is reported
    /// by its English name when `isolang` knows the code.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let normalized = code.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "ko" => Ok(Language::Korean),
            "en" => Ok(Language::English),
            other => {
                let base = other.split(['-', '_']).next().unwrap_or(other);
                let name = isolang::Language::from_639_1(base)
                    .map(|lang| lang.to_name().to_string())
                    .unwrap_or_else(|| code.trim().to_string());
                Err(AppError::UnsupportedLanguage(name))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationRequest {
    pub text: String,
    /// `None` lets the service auto-detect.
    pub source: Option<Language>,
    pub target: Language,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResponse {
    pub translated: String,
}
