//! Video URL parsing.

use std::sync::LazyLock;

use regex::Regex;

/// Matches the video id in `/watch?v=`, `youtu.be/` and `/embed/` URLs.
static VIDEO_ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:/watch\?(?:[^#]*&)?v=|youtu\.be/|/embed/)([A-Za-z0-9_-]+)").unwrap()
});

/// Base URL of the embeddable player.
pub(crate) const EMBED_BASE: &str = "https://www.youtube.com/embed/";

/// Extract the video id from a video page, short link or embed URL.
///
/// # Examples
///
/// ```
/// use lontar_renderer::extract_video_id;
///
/// assert_eq!(extract_video_id("https://youtu.be/dQw4w9WgXcQ?t=42"), Some("dQw4w9WgXcQ"));
/// assert_eq!(extract_video_id("https://vimeo.com/1234"), None);
/// ```
#[must_use]
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_RE
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_watch_url_with_other_params() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?feature=share&v=abc_DEF-123&t=5"),
            Some("abc_DEF-123")
        );
    }

    #[test]
    fn test_short_url() {
        assert_eq!(
            extract_video_id("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0"),
            Some("dQw4w9WgXcQ")
        );
    }

    #[test]
    fn test_unsupported_urls() {
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("https://vimeo.com/1234"), None);
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?list=PL1"),
            None
        );
        assert_eq!(extract_video_id("not a url"), None);
    }
}
