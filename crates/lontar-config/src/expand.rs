//! `${VAR}` expansion in configuration strings.

use crate::ConfigError;

/// Expand `${VAR}` and `${VAR:-default}` references in `value`.
///
/// Strings without `${` are returned unchanged, so a lone `$` in a URL is
/// left alone.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

/// Expand an optional field in place.
pub(crate) fn expand_opt(value: &mut Option<String>, field: &str) -> Result<(), ConfigError> {
    if let Some(raw) = value.as_deref() {
        *value = Some(expand_env(raw, field)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_expand_var_in_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("LONTAR_TEST_CDN_HOST", "cdn.example.com");
        }
        let result = expand_env("https://${LONTAR_TEST_CDN_HOST}/images", "cdn.base_url").unwrap();
        assert_eq!(result, "https://cdn.example.com/images");
        unsafe {
            std::env::remove_var("LONTAR_TEST_CDN_HOST");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LONTAR_TEST_UNSET_DATASET");
        }
        let result = expand_env("${LONTAR_TEST_UNSET_DATASET:-staging}", "cdn.dataset").unwrap();
        assert_eq!(result, "staging");
    }

    #[test]
    fn test_expand_missing_var_names_field() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("LONTAR_TEST_MISSING_PROJECT");
        }
        let err = expand_env("${LONTAR_TEST_MISSING_PROJECT}", "cdn.project_id").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let msg = err.to_string();
        assert!(msg.contains("LONTAR_TEST_MISSING_PROJECT"));
        assert!(msg.contains("cdn.project_id"));
    }

    #[test]
    fn test_dollar_without_braces_unchanged() {
        let result = expand_env("https://example.com/$path", "cdn.base_url").unwrap();
        assert_eq!(result, "https://example.com/$path");
    }

    #[test]
    fn test_expand_opt_none_stays_none() {
        let mut value = None;
        expand_opt(&mut value, "cdn.dataset").unwrap();
        assert_eq!(value, None);

        let mut value = Some("production".to_owned());
        expand_opt(&mut value, "cdn.dataset").unwrap();
        assert_eq!(value.as_deref(), Some("production"));
    }
}
