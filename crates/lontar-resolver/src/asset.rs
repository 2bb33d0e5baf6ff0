//! CDN asset references.

use serde::{Deserialize, Serialize};

/// Prefix carried by image asset identifiers.
const IMAGE_PREFIX: &str = "image-";

/// Decode an opaque image asset identifier into a CDN URL.
///
/// Identifiers follow `image-<id>[-<width>x<height>]-<format>` and map to
/// `<cdn_base>/<id>[-<width>x<height>].<format>`. Returns an empty string when
/// the identifier cannot be parsed.
///
/// # Examples
///
/// ```
/// use lontar_resolver::decode_asset_url;
///
/// assert_eq!(
///     decode_asset_url("image-abc123-800x600-jpg", "https://cdn.example.com/images"),
///     "https://cdn.example.com/images/abc123-800x600.jpg"
/// );
/// assert_eq!(decode_asset_url("image-abc123", "https://cdn.example.com"), "");
/// ```
#[must_use]
pub fn decode_asset_url(reference: &str, cdn_base: &str) -> String {
    let body = reference.strip_prefix(IMAGE_PREFIX).unwrap_or(reference);
    let segments: Vec<&str> = body.split('-').collect();

    let (Some(&id), Some(&format)) = (segments.first(), segments.last()) else {
        return String::new();
    };
    if segments.len() < 2 || id.is_empty() || format.is_empty() {
        return String::new();
    }

    let dimensions = segments[1..segments.len() - 1].join("-");
    let base = cdn_base.trim_end_matches('/');

    if dimensions.is_empty() {
        format!("{base}/{id}.{format}")
    } else {
        format!("{base}/{id}-{dimensions}.{format}")
    }
}

/// Reference to an image asset as delivered by the content API.
///
/// Either a bare string (a URL or an asset identifier) or an asset object
/// carrying a `_ref` identifier and/or an already-expanded `url`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AssetReference {
    /// URL or asset identifier given directly.
    Plain(String),
    /// Asset object.
    Object {
        /// Opaque asset identifier.
        #[serde(rename = "_ref", default, skip_serializing_if = "Option::is_none")]
        reference: Option<String>,
        /// Already-resolved URL.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        url: Option<String>,
    },
}

impl AssetReference {
    /// Resolve to a URL, decoding identifiers against `cdn_base`.
    ///
    /// Resolved URLs win over identifiers. Returns `None` for empty or
    /// malformed references.
    #[must_use]
    pub fn resolve(&self, cdn_base: &str) -> Option<String> {
        match self {
            Self::Plain(value) if is_url(value) => Some(value.clone()),
            Self::Plain(value) => non_empty(decode_asset_url(value, cdn_base)),
            Self::Object { url: Some(url), .. } if !url.is_empty() => Some(url.clone()),
            Self::Object {
                reference: Some(reference),
                ..
            } => non_empty(decode_asset_url(reference, cdn_base)),
            Self::Object { .. } => None,
        }
    }
}

fn is_url(value: &str) -> bool {
    value.starts_with("https://") || value.starts_with("http://") || value.starts_with('/')
}

fn non_empty(value: String) -> Option<String> {
    (!value.is_empty()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CDN: &str = "https://cdn.sanity.io/images/p1/production";

    #[test]
    fn test_decode_with_dimensions() {
        assert_eq!(
            decode_asset_url("image-Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000-jpg", CDN),
            "https://cdn.sanity.io/images/p1/production/Tb9Ew8CXIwaY6R1kjMvI0uRR-2000x3000.jpg"
        );
    }

    #[test]
    fn test_decode_without_dimensions() {
        assert_eq!(
            decode_asset_url("image-abc-png", CDN),
            "https://cdn.sanity.io/images/p1/production/abc.png"
        );
    }

    #[test]
    fn test_decode_rejoins_middle_segments() {
        assert_eq!(
            decode_asset_url("image-abc-800x600-v2-webp", "https://cdn"),
            "https://cdn/abc-800x600-v2.webp"
        );
    }

    #[test]
    fn test_decode_trailing_slash_on_base() {
        assert_eq!(
            decode_asset_url("image-abc-png", "https://cdn/"),
            "https://cdn/abc.png"
        );
    }

    #[test]
    fn test_decode_without_prefix() {
        assert_eq!(
            decode_asset_url("abc-png", "https://cdn"),
            "https://cdn/abc.png"
        );
    }

    #[test]
    fn test_decode_malformed() {
        assert_eq!(decode_asset_url("image-abc", CDN), "");
        assert_eq!(decode_asset_url("image-", CDN), "");
        assert_eq!(decode_asset_url("", CDN), "");
        assert_eq!(decode_asset_url("image--png", CDN), "");
        assert_eq!(decode_asset_url("image-abc-", CDN), "");
    }

    #[test]
    fn test_reference_plain_url() {
        let asset = AssetReference::Plain("https://example.com/a.jpg".to_owned());
        assert_eq!(
            asset.resolve(CDN).as_deref(),
            Some("https://example.com/a.jpg")
        );
    }

    #[test]
    fn test_reference_plain_identifier() {
        let asset = AssetReference::Plain("image-abc-10x10-png".to_owned());
        assert_eq!(
            asset.resolve("https://cdn").as_deref(),
            Some("https://cdn/abc-10x10.png")
        );
    }

    #[test]
    fn test_reference_object_prefers_url() {
        let asset: AssetReference = serde_json::from_str(
            r#"{"_ref": "image-abc-png", "url": "https://cdn.example.com/x.png"}"#,
        )
        .unwrap();
        assert_eq!(
            asset.resolve("https://cdn").as_deref(),
            Some("https://cdn.example.com/x.png")
        );
    }

    #[test]
    fn test_reference_object_decodes_ref() {
        let asset: AssetReference =
            serde_json::from_str(r#"{"_type": "reference", "_ref": "image-abc-png"}"#).unwrap();
        assert_eq!(
            asset.resolve("https://cdn").as_deref(),
            Some("https://cdn/abc.png")
        );
    }

    #[test]
    fn test_reference_unresolvable() {
        let empty: AssetReference = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.resolve(CDN), None);

        let malformed = AssetReference::Plain("image-broken".to_owned());
        assert_eq!(malformed.resolve(CDN), None);

        let blank_url: AssetReference = serde_json::from_str(r#"{"url": ""}"#).unwrap();
        assert_eq!(blank_url.resolve(CDN), None);
    }
}
