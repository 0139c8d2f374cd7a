//! Colored terminal output utilities.

use console::{Style, Term};

/// Terminal output formatter.
///
/// Status messages go to stderr; command results go to stdout so they can be
/// piped.
pub(crate) struct Output {
    term: Term,
    out: Term,
    green: Style,
    yellow: Style,
    red: Style,
    dim: Style,
    cyan_bold: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            out: Term::stdout(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            dim: Style::new().dim(),
            cyan_bold: Style::new().cyan().bold(),
        }
    }

    /// Print an info message.
    pub(crate) fn info(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// Print a warning message (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        let _ = self.term.write_line(&self.yellow.apply_to(msg).to_string());
    }

    /// Print an error message (red).
    pub(crate) fn error(&self, msg: &str) {
        let _ = self.term.write_line(&self.red.apply_to(msg).to_string());
    }

    /// Print a line of command output.
    pub(crate) fn line(&self, msg: &str) {
        let _ = self.out.write_line(msg);
    }

    /// Print a line of command output (green).
    pub(crate) fn success_line(&self, msg: &str) {
        let _ = self.out.write_line(&self.green.apply_to(msg).to_string());
    }

    /// Print a line of command output (dim).
    pub(crate) fn dim_line(&self, msg: &str) {
        let _ = self.out.write_line(&self.dim.apply_to(msg).to_string());
    }

    /// Print a heading line of command output (cyan bold).
    pub(crate) fn heading(&self, msg: &str) {
        let _ = self.out.write_line(&self.cyan_bold.apply_to(msg).to_string());
    }

    /// Print a separator line.
    pub(crate) fn separator(&self) {
        let _ = self.out.write_line(&"=".repeat(70));
    }
}
