//! `lontar render` command implementation.

use std::path::PathBuf;

use clap::Args;
use lontar_config::{CliSettings, Config};
use lontar_renderer::{ContentBlock, GalleryIds, RenderResult, RichTextRenderer};
use lontar_resolver::{Language, Localized};
use serde_json::Value;

use crate::error::CliError;
use crate::input;
use crate::output::{Output, write_stdout};

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// JSON document to read (default: stdin).
    file: Option<PathBuf>,

    /// Dot-separated path of the body field within the document (e.g. `body`).
    ///
    /// Without it the document itself must be a block array or a bilingual
    /// body.
    #[arg(short, long)]
    field: Option<String>,

    /// Display language (overrides config).
    #[arg(short, long)]
    lang: Option<Language>,

    /// CDN base URL for asset references (overrides config).
    #[arg(long, env = "LONTAR_CDN_BASE")]
    cdn_base: Option<String>,

    /// Path to configuration file (default: auto-discover lontar.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output (list galleries, show info logs).
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or input cannot be loaded, or the body
    /// is not a block array.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            language: self.lang,
            cdn_base_url: self.cdn_base.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let document = input::read_json(self.file.as_deref())?;
        let body = match &self.field {
            Some(field) => {
                let value = input::select(&document, field);
                if value.is_none() {
                    output.warning(&format!("Warning: field {field} not found"));
                }
                value.map(parse_body).transpose()?
            }
            None => Some(parse_body(&document)?),
        };

        let result = renderer_for(&config).render_localized(body.as_ref());
        report(&output, &result, self.verbose);
        write_stdout(&result.html)?;

        Ok(())
    }
}

/// Build a renderer from the resolved configuration.
fn renderer_for(config: &Config) -> RichTextRenderer {
    let gallery_ids = if config.render.random_gallery_ids {
        GalleryIds::Random
    } else {
        GalleryIds::Sequential
    };
    RichTextRenderer::new(config.language)
        .with_cdn_base(config.cdn_base.clone())
        .with_gallery_ids(gallery_ids)
}

/// Decode a block array or bilingual body.
fn parse_body(value: &Value) -> Result<Localized<Vec<ContentBlock>>, CliError> {
    if value.is_null() {
        return Ok(Localized::Scalar(Vec::new()));
    }
    serde_json::from_value(value.clone()).map_err(|_| {
        CliError::Validation(
            "body must be a block array or an object with \"id\"/\"en\" block arrays".to_owned(),
        )
    })
}

fn report(output: &Output, result: &RenderResult, verbose: bool) {
    for warning in &result.warnings {
        output.warning(&format!("Warning: {warning}"));
    }
    if verbose {
        for gallery in &result.galleries {
            output.info(&format!(
                "Gallery {} ({}, {} items)",
                gallery.id,
                gallery.layout.as_str(),
                gallery.len
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_body_array() {
        let body = parse_body(&json!([{"_type": "block", "children": [{"text": "Hai"}]}])).unwrap();
        let html = RichTextRenderer::new(Language::En)
            .render_localized(Some(&body))
            .html;
        assert_eq!(html, "<p>Hai</p>");
    }

    #[test]
    fn test_parse_body_bilingual() {
        let body = parse_body(&json!({
            "id": [{"_type": "block", "children": [{"text": "Hai"}]}],
            "en": [{"_type": "block", "children": [{"text": "Hi"}]}]
        }))
        .unwrap();
        let html = RichTextRenderer::new(Language::En)
            .render_localized(Some(&body))
            .html;
        assert_eq!(html, "<p>Hi</p>");
    }

    #[test]
    fn test_parse_body_null_is_empty() {
        let body = parse_body(&Value::Null).unwrap();
        assert_eq!(body, Localized::Scalar(Vec::new()));
    }

    #[test]
    fn test_parse_body_rejects_text() {
        let err = parse_body(&json!("just text")).unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }

    #[test]
    fn test_renderer_for_config() {
        let mut config = Config::default();
        config.language = Language::En;
        "https://cdn.example.com".clone_into(&mut config.cdn_base);
        let renderer = renderer_for(&config);
        assert_eq!(renderer.language(), Language::En);

        let body = parse_body(&json!([{"_type": "image", "asset": "image-a-png"}])).unwrap();
        let html = renderer.render_localized(Some(&body)).html;
        assert!(html.contains(r#"src="https://cdn.example.com/a.png""#));
    }
}
