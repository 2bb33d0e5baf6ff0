//! `lontar resolve` command implementation.

use std::path::PathBuf;

use clap::Args;
use lontar_config::{CliSettings, Config};
use lontar_resolver::{Language, Localized, resolve_list, resolve_text};
use serde_json::Value;

use crate::error::CliError;
use crate::input;
use crate::output::{Output, write_stdout};

/// Arguments for the resolve command.
#[derive(Args)]
pub(crate) struct ResolveArgs {
    /// JSON document to read (default: stdin).
    file: Option<PathBuf>,

    /// Dot-separated path of the field to resolve (e.g. `title`).
    #[arg(short, long)]
    field: String,

    /// Display language (overrides config).
    #[arg(short, long)]
    lang: Option<Language>,

    /// Path to configuration file (default: auto-discover lontar.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl ResolveArgs {
    /// Execute the resolve command.
    ///
    /// Text fields are printed as-is, list fields as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the config or input cannot be loaded, or the field
    /// is neither text nor a list.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            language: self.lang,
            ..CliSettings::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        let document = input::read_json(self.file.as_deref())?;
        let value = input::select(&document, &self.field);
        if value.is_none() {
            output.warning(&format!("Warning: field {} not found", self.field));
        }

        write_stdout(&resolve_field(value, config.language)?)?;
        Ok(())
    }
}

/// Resolve a text or list field to its printed form.
///
/// Missing and null fields resolve to an empty string.
fn resolve_field(value: Option<&Value>, lang: Language) -> Result<String, CliError> {
    let Some(value) = value.filter(|value| !value.is_null()) else {
        return Ok(String::new());
    };

    if let Ok(text) = serde_json::from_value::<Localized<String>>(value.clone()) {
        return Ok(resolve_text(Some(&text), lang));
    }
    if let Ok(list) = serde_json::from_value::<Localized<Vec<Value>>>(value.clone()) {
        let items = resolve_list(Some(&list), lang);
        return Ok(serde_json::to_string_pretty(&items)?);
    }

    Err(CliError::Validation(
        "field must be text, a list, or an object with \"id\"/\"en\" values".to_owned(),
    ))
}
