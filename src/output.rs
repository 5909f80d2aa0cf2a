//! Console output
//!
//! Informational lines go to stdout and are silenced by `--quiet`;
//! warnings and errors always go to stderr.

use colored::Colorize;
use std::fmt::Display;

#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    quiet: bool,
}

impl Console {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn info(&self, msg: impl Display) {
        if !self.quiet {
            println!("{msg}");
        }
    }

    /// Blank separator line between sections.
    pub fn blank(&self) {
        self.info("");
    }

    pub fn warn(&self, msg: impl Display) {
        eprintln!("{} {}", "warning:".yellow(), msg);
    }

    pub fn error(&self, msg: impl Display) {
        eprintln!("{} {}", "error:".red(), msg);
    }
}
