//! Bilingual field values and their resolution.

use serde::{Deserialize, Serialize};

use crate::Language;

/// A content field that is either a plain value or keyed by language.
///
/// Bilingual support is optional per field: older entries store a plain
/// string or list, newer ones an object with `id`/`en` keys. Both shapes
/// deserialize into this type.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Localized<T> {
    /// Legacy single-language value, used for every language.
    Scalar(T),
    /// Value keyed by language code.
    Bilingual(Bilingual<T>),
}

/// Language-keyed value. Either key may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Bilingual<T> {
    /// Indonesian value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<T>,
    /// English value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<T>,
}

impl<T> Default for Bilingual<T> {
    fn default() -> Self {
        Self { id: None, en: None }
    }
}

impl<T> Bilingual<T> {
    /// Value stored under `lang`, without any fallback.
    #[must_use]
    pub fn get(&self, lang: Language) -> Option<&T> {
        match lang {
            Language::Id => self.id.as_ref(),
            Language::En => self.en.as_ref(),
        }
    }
}

/// Values that can be "blank", i.e. present but carrying no content.
///
/// A blank translation is treated as not yet translated and resolution falls
/// through to the next language.
pub trait Blank {
    /// Whether the value carries no content.
    fn is_blank(&self) -> bool;
}

impl Blank for String {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl Blank for &str {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Blank for Vec<T> {
    fn is_blank(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Localized<T> {
    /// Build a bilingual value from optional translations.
    pub fn bilingual(id: Option<T>, en: Option<T>) -> Self {
        Self::Bilingual(Bilingual { id, en })
    }
}

impl<T: Blank> Localized<T> {
    /// Resolve the value for `lang`.
    ///
    /// Scalars are returned as-is. Bilingual values are looked up as
    /// `lang`, then `id`, then `en`, skipping blank entries. Returns `None`
    /// when nothing usable is present.
    #[must_use]
    pub fn resolve(&self, lang: Language) -> Option<&T> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Bilingual(map) => lang
                .fallback_chain()
                .into_iter()
                .find_map(|candidate| map.get(candidate).filter(|value| !value.is_blank())),
        }
    }
}

impl<T> From<T> for Localized<T> {
    fn from(value: T) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for Localized<String> {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

/// Resolve a text field for display.
///
/// Missing fields and fields with no usable translation resolve to an empty
/// string. Never fails.
///
/// # Examples
///
/// ```
/// use lontar_resolver::{Language, Localized, resolve_text};
///
/// let field = Localized::bilingual(Some("A".to_owned()), Some("B".to_owned()));
/// assert_eq!(resolve_text(Some(&field), Language::En), "B");
/// assert_eq!(resolve_text(None, Language::En), "");
/// ```
#[must_use]
pub fn resolve_text(field: Option<&Localized<String>>, lang: Language) -> String {
    field
        .and_then(|field| field.resolve(lang))
        .cloned()
        .unwrap_or_default()
}

/// Resolve a list field for display.
///
/// An empty list under the requested language counts as untranslated, so
/// `{ "id": ["x"], "en": [] }` resolves to `["x"]` for English.
#[must_use]
pub fn resolve_list<T: Clone>(field: Option<&Localized<Vec<T>>>, lang: Language) -> Vec<T> {
    field
        .and_then(|field| field.resolve(lang))
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text(json: &str) -> Localized<String> {
        serde_json::from_str(json).unwrap()
    }

    fn list(json: &str) -> Localized<Vec<String>> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_resolve_text_missing() {
        assert_eq!(resolve_text(None, Language::Id), "");
        assert_eq!(resolve_text(None, Language::En), "");
    }

    #[test]
    fn test_resolve_text_plain_string_unchanged() {
        let field = text(r#""plain""#);
        assert_eq!(resolve_text(Some(&field), Language::En), "plain");
        assert_eq!(resolve_text(Some(&field), Language::Id), "plain");
    }

    #[test]
    fn test_resolve_text_requested_language() {
        let field = text(r#"{"id": "A", "en": "B"}"#);
        assert_eq!(resolve_text(Some(&field), Language::En), "B");
        assert_eq!(resolve_text(Some(&field), Language::Id), "A");
    }

    #[test]
    fn test_resolve_text_falls_back_to_indonesian() {
        let field = text(r#"{"id": "A"}"#);
        assert_eq!(resolve_text(Some(&field), Language::En), "A");
    }

    #[test]
    fn test_resolve_text_falls_back_to_english() {
        let field = text(r#"{"en": "B"}"#);
        assert_eq!(resolve_text(Some(&field), Language::Id), "B");
    }

    #[test]
    fn test_resolve_text_empty_translation_falls_back() {
        let field = text(r#"{"id": "A", "en": ""}"#);
        assert_eq!(resolve_text(Some(&field), Language::En), "A");
    }

    #[test]
    fn test_resolve_text_empty_object() {
        let field = text("{}");
        assert_eq!(field, Localized::Bilingual(Bilingual::default()));
        assert_eq!(resolve_text(Some(&field), Language::Id), "");
    }

    #[test]
    fn test_resolve_text_null_keys() {
        let field = text(r#"{"id": null, "en": "B"}"#);
        assert_eq!(resolve_text(Some(&field), Language::Id), "B");
    }

    #[test]
    fn test_resolve_text_ignores_extra_keys() {
        let field = text(r#"{"_type": "localeString", "id": "A"}"#);
        assert_eq!(resolve_text(Some(&field), Language::En), "A");
    }

    #[test]
    fn test_resolve_list_plain_passthrough() {
        let field = list(r#"["a", "b"]"#);
        assert_eq!(resolve_list(Some(&field), Language::En), vec!["a", "b"]);
    }

    #[test]
    fn test_resolve_list_plain_empty_passthrough() {
        let field = list("[]");
        assert!(resolve_list(Some(&field), Language::En).is_empty());
    }

    #[test]
    fn test_resolve_list_empty_translation_is_untranslated() {
        let field = list(r#"{"id": ["x"], "en": []}"#);
        assert_eq!(resolve_list(Some(&field), Language::En), vec!["x"]);
    }

    #[test]
    fn test_resolve_list_requested_language() {
        let field = list(r#"{"id": ["x"], "en": ["y"]}"#);
        assert_eq!(resolve_list(Some(&field), Language::En), vec!["y"]);
    }

    #[test]
    fn test_resolve_list_english_only() {
        let field = list(r#"{"id": [], "en": ["y"]}"#);
        assert_eq!(resolve_list(Some(&field), Language::Id), vec!["y"]);
    }

    #[test]
    fn test_resolve_list_missing() {
        assert!(resolve_list::<String>(None, Language::Id).is_empty());
        let field = list("{}");
        assert!(resolve_list(Some(&field), Language::Id).is_empty());
    }

    #[test]
    fn test_from_conversions() {
        let field: Localized<String> = "x".into();
        assert_eq!(field, Localized::Scalar("x".to_owned()));
        assert_eq!(
            Localized::from(vec![1, 2]).resolve(Language::En),
            Some(&vec![1, 2])
        );
    }

    #[test]
    fn test_bilingual_of_non_default_type() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Slug(String);

        let field: Localized<Slug> = serde_json::from_str(r#"{"en": "news"}"#).unwrap();
        assert_eq!(
            field,
            Localized::bilingual(None, Some(Slug("news".to_owned())))
        );
    }

    #[test]
    fn test_serialize_skips_missing_keys() {
        let field = Localized::bilingual(Some("A".to_owned()), None);
        assert_eq!(serde_json::to_string(&field).unwrap(), r#"{"id":"A"}"#);
    }
}
