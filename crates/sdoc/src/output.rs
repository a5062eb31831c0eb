//! Console reporting. Progress and errors on stderr, results on stdout.

use console::{Style, Term};

pub(crate) struct Output {
    status: Term,
    results: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            status: Term::stderr(),
            results: Term::stdout(),
        }
    }

    fn status_line(&self, msg: &str, style: Option<Style>) {
        let line = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        let _ = self.status.write_line(&line);
    }

    pub(crate) fn info(&self, msg: &str) {
        self.status_line(msg, None);
    }

    pub(crate) fn success(&self, msg: &str) {
        self.status_line(msg, Some(Style::new().green()));
    }

    pub(crate) fn error(&self, msg: &str) {
        self.status_line(msg, Some(Style::new().red().bold()));
    }

    /// One line of command output, suitable for piping.
    pub(crate) fn data(&self, line: &str) {
        let _ = self.results.write_line(line);
    }
}
