//! Terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Results go to stdout, diagnostics to stderr.
pub(crate) struct Output {
    out: Term,
    err: Term,
    dim: Style,
    red: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            out: Term::stdout(),
            err: Term::stderr(),
            dim: Style::new().dim(),
            red: Style::new().red(),
        }
    }

    /// Write a line of command output to stdout.
    pub(crate) fn print(&self, line: &str) -> std::io::Result<()> {
        self.out.write_line(line)
    }

    /// Write a line to stdout with a dimmed suffix.
    pub(crate) fn print_with_note(&self, line: &str, note: &str) -> std::io::Result<()> {
        if note.is_empty() {
            return self.print(line);
        }
        self.out
            .write_line(&format!("{line}  {}", self.dim.apply_to(note)))
    }

    /// Print an info message to stderr.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.err.write_line(msg);
    }

    /// Print an error message (red) to stderr.
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.err.write_line(&self.red.apply_to(msg).to_string());
    }
}
