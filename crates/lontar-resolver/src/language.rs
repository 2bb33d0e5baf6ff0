//! Display languages.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A display language supported by the site.
///
/// Indonesian is the canonical authoring language and the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Indonesian (`id`).
    #[default]
    Id,
    /// English (`en`).
    En,
}

impl Language {
    /// Two-letter language code as used in bilingual field keys.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::En => "en",
        }
    }

    /// Languages to try, in order, when resolving a field for `self`.
    pub(crate) fn fallback_chain(self) -> [Self; 3] {
        [self, Self::Id, Self::En]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing a language code other than `id` or `en`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language code {0:?} (expected \"id\" or \"en\")")]
pub struct UnsupportedLanguage(pub String);

impl FromStr for Language {
    type Err = UnsupportedLanguage;

    /// Parse a language code.
    ///
    /// Case and surrounding whitespace are ignored, and regional tags map to
    /// their base language (`en-US` is English).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let base = trimmed.split(['-', '_']).next().unwrap_or_default();
        match base.to_ascii_lowercase().as_str() {
            "id" => Ok(Self::Id),
            "en" => Ok(Self::En),
            _ => Err(UnsupportedLanguage(trimmed.to_owned())),
        }
    }
}

/// Source of the current display language.
///
/// Renderers take the language from a provider passed in explicitly instead of
/// reading it from ambient state. A plain [`Language`] is its own provider, and
/// so is any `Fn() -> Language`.
pub trait LanguageProvider {
    /// The language content should be displayed in right now.
    fn current_language(&self) -> Language;
}

impl LanguageProvider for Language {
    fn current_language(&self) -> Language {
        *self
    }
}

impl<F> LanguageProvider for F
where
    F: Fn() -> Language,
{
    fn current_language(&self) -> Language {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes() {
        assert_eq!("id".parse::<Language>(), Ok(Language::Id));
        assert_eq!("en".parse::<Language>(), Ok(Language::En));
    }

    #[test]
    fn test_parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" EN ".parse::<Language>(), Ok(Language::En));
        assert_eq!("Id".parse::<Language>(), Ok(Language::Id));
    }

    #[test]
    fn test_parse_regional_tag() {
        assert_eq!("en-US".parse::<Language>(), Ok(Language::En));
        assert_eq!("id_ID".parse::<Language>(), Ok(Language::Id));
    }

    #[test]
    fn test_parse_unsupported() {
        let err = "fr".parse::<Language>().unwrap_err();
        assert_eq!(err, UnsupportedLanguage("fr".to_owned()));
        assert!(err.to_string().contains("\"fr\""));
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn test_default_is_indonesian() {
        assert_eq!(Language::default(), Language::Id);
    }

    #[test]
    fn test_display() {
        assert_eq!(Language::En.to_string(), "en");
    }

    #[test]
    fn test_fallback_chain() {
        assert_eq!(
            Language::En.fallback_chain(),
            [Language::En, Language::Id, Language::En]
        );
    }

    #[test]
    fn test_providers() {
        assert_eq!(Language::En.current_language(), Language::En);
        let from_closure = || Language::Id;
        assert_eq!(from_closure.current_language(), Language::Id);
    }

    #[test]
    fn test_serde_lowercase() {
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::En);
        assert_eq!(serde_json::to_string(&Language::Id).unwrap(), "\"id\"");
    }
}
