//! JSON document input.

use std::io::Read;
use std::path::Path;

use serde_json::Value;

use crate::error::CliError;

/// Read a JSON document from `path`, or from stdin when `path` is `None` or
/// `-`.
pub(crate) fn read_json(path: Option<&Path>) -> Result<Value, CliError> {
    let content = match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    Ok(serde_json::from_str(&content)?)
}

/// Look up a dot-separated field path such as `body` or `sections.0.title`.
///
/// Numeric segments index into arrays. Returns `None` if any segment is
/// missing.
pub(crate) fn select<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .try_fold(document, |value, segment| match value {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
}
