//! Bilingual content field resolution.
//!
//! Content entities arrive from the content API with fields that are either a
//! plain legacy value or a language-keyed object (`{ "id": ..., "en": ... }`).
//! This crate decides that shape once, at deserialization, via [`Localized`],
//! and resolves it for a display [`Language`] with a fixed fallback order:
//! requested language, then Indonesian, then English.
//!
//! It also decodes opaque CDN asset identifiers into image URLs
//! ([`decode_asset_url`]).
//!
//! # Example
//!
//! ```
//! use lontar_resolver::{Language, Localized, resolve_text};
//!
//! let title: Localized<String> = serde_json::from_str(r#"{"id": "Berita"}"#).unwrap();
//! assert_eq!(resolve_text(Some(&title), Language::En), "Berita");
//! ```

mod asset;
mod language;
mod localized;

pub use asset::{AssetReference, decode_asset_url};
pub use language::{Language, LanguageProvider, UnsupportedLanguage};
pub use localized::{Bilingual, Blank, Localized, resolve_list, resolve_text};
