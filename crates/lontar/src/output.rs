//! Colored terminal output on stderr.
//!
//! Rendered HTML and resolved values go to stdout via [`write_stdout`]; all
//! diagnostics go to stderr so output can be piped.

use std::io::Write;

use console::{Style, Term};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    yellow: Style,
    red: Style,
    dim: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
        }
    }

    /// Print an info message (dimmed).
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(&self.dim.apply_to(msg).to_string());
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }
}

/// Write a result line to stdout.
pub(crate) fn write_stdout(content: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{content}")?;
    stdout.flush()
}
