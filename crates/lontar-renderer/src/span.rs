//! Inline span rendering.

use std::fmt::Write;

use crate::block::{LINK_MARK_TYPE, MarkDefinition, Span};
use crate::state::escape_html;

/// Mark that renders a span as a pseudo-button.
const BUTTON_MARK: &str = "button";

/// URI schemes that can execute script when followed.
const UNSAFE_SCHEMES: [&str; 3] = ["javascript", "vbscript", "data"];

/// Inline element for a decorator mark.
fn decorator_element(mark: &str) -> Option<&'static str> {
    match mark {
        "bold" | "strong" => Some("strong"),
        "italic" | "em" => Some("em"),
        "underline" => Some("u"),
        "strike" | "strike-through" => Some("s"),
        "code" => Some("code"),
        _ => None,
    }
}

/// Render a span to HTML.
///
/// The text is escaped, then marks are applied in order, each wrapping the
/// result so far. Decorators wrap in a fixed element. `button` and link
/// annotations share one wrapper: whichever comes first wins and later ones
/// are ignored. A `button` mark on a span that also carries a link turns the
/// link into a button-styled anchor instead of wrapping on its own.
///
/// # Examples
///
/// ```
/// use lontar_renderer::{MarkDefinition, Span, render_span};
///
/// let span = Span::marked("Docs", &["strong", "l1"]);
/// let defs = [MarkDefinition::link("l1", "/docs")];
/// assert_eq!(render_span(&span, &defs), r#"<a href="/docs"><strong>Docs</strong></a>"#);
/// ```
#[must_use]
pub fn render_span(span: &Span, mark_defs: &[MarkDefinition]) -> String {
    render_span_with(span, mark_defs, &mut Vec::new())
}

/// Render a span, recording dropped links in `warnings`.
pub(crate) fn render_span_with(
    span: &Span,
    mark_defs: &[MarkDefinition],
    warnings: &mut Vec<String>,
) -> String {
    let mut html = escape_html(&span.text);

    let has_button_mark = span.marks.iter().any(|mark| mark == BUTTON_MARK);
    let has_link = span
        .marks
        .iter()
        .filter_map(|mark| link_href(mark_defs, mark))
        .any(|href| !is_unsafe_href(href));

    let mut wrapped = false;
    for mark in &span.marks {
        if let Some(element) = decorator_element(mark) {
            html = format!("<{element}>{html}</{element}>");
            continue;
        }

        if mark == BUTTON_MARK {
            if !wrapped && !has_link {
                html = format!(r#"<span class="btn-inline">{html}</span>"#);
                wrapped = true;
            }
            continue;
        }

        let Some(href) = link_href(mark_defs, mark) else {
            continue;
        };
        if is_unsafe_href(href) {
            tracing::warn!(href = %href, "Dropping link with unsafe scheme");
            warnings.push(format!("Dropped link with unsafe scheme: {href}"));
            continue;
        }
        if wrapped {
            continue;
        }

        let as_button = has_button_mark || is_button_link(mark_defs, mark);
        html = anchor(href, as_button, &html);
        wrapped = true;
    }

    html
}

/// Target of the link definition keyed by `mark`, if it is a usable link.
fn link_href<'a>(mark_defs: &'a [MarkDefinition], mark: &str) -> Option<&'a str> {
    mark_defs
        .iter()
        .find(|def| def.key == mark && def.mark_type == LINK_MARK_TYPE)
        .and_then(|def| def.href.as_deref())
        .map(str::trim)
        .filter(|href| !href.is_empty())
}

fn is_button_link(mark_defs: &[MarkDefinition], mark: &str) -> bool {
    mark_defs
        .iter()
        .any(|def| def.key == mark && def.is_button)
}

fn anchor(href: &str, as_button: bool, content: &str) -> String {
    let mut out = String::with_capacity(content.len() + href.len() + 64);
    let _ = write!(out, r#"<a href="{}""#, escape_html(href));
    if as_button {
        out.push_str(r#" class="btn-link""#);
    }
    if is_external(href) {
        out.push_str(r#" target="_blank" rel="noopener noreferrer""#);
    }
    let _ = write!(out, ">{content}</a>");
    out
}

/// URI scheme of `href`, if it has one.
fn scheme(href: &str) -> Option<&str> {
    let (scheme, _) = href.split_once(':')?;
    let mut chars = scheme.chars();
    let starts_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = chars.all(|c| c.is_ascii_alphanumeric() || "+-.".contains(c));
    (starts_alpha && rest_valid).then_some(scheme)
}

/// Links that leave the site: any URI scheme or a protocol-relative URL.
fn is_external(href: &str) -> bool {
    href.starts_with("//") || scheme(href).is_some()
}

fn is_unsafe_href(href: &str) -> bool {
    scheme(href).is_some_and(|scheme| {
        UNSAFE_SCHEMES
            .iter()
            .any(|unsafe_scheme| scheme.eq_ignore_ascii_case(unsafe_scheme))
    })
}
