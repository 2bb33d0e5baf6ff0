//! Per-render state and HTML escaping.

use crate::block::ListKind;

/// List element opened by consecutive list-item paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ListTag {
    Ordered,
    Unordered,
}

impl ListTag {
    fn element(self) -> &'static str {
        match self {
            Self::Ordered => "ol",
            Self::Unordered => "ul",
        }
    }
}

impl From<ListKind> for ListTag {
    fn from(kind: ListKind) -> Self {
        match kind {
            ListKind::Number => Self::Ordered,
            ListKind::Bullet | ListKind::Other => Self::Unordered,
        }
    }
}

/// Tracks whether the output is currently inside a list.
///
/// Lists never nest: entering a different list kind closes the open one.
#[derive(Debug, Default)]
pub(crate) struct ListState {
    open: Option<ListTag>,
}

impl ListState {
    /// Make sure `tag` is the open list, closing any other list first.
    pub(crate) fn enter(&mut self, tag: ListTag, out: &mut String) {
        if self.open == Some(tag) {
            return;
        }
        self.close(out);
        out.push('<');
        out.push_str(tag.element());
        out.push('>');
        self.open = Some(tag);
    }

    /// Close the open list, if any.
    pub(crate) fn close(&mut self, out: &mut String) {
        if let Some(tag) = self.open.take() {
            out.push_str("</");
            out.push_str(tag.element());
            out.push('>');
        }
    }
}

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
