//! Styled terminal output for hookshim
//!
//! Informational commands print through [`Output`]. Hook runs stay silent on
//! success; their failures are written verbatim with [`Output::diagnostic`].

use console::style;
use std::io::{self, Write};

/// Output handler for consistent CLI formatting
pub struct Output {
    verbose: bool,
    quiet: bool,
}

impl Output {
    /// Create a new output handler
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Print an error message
    pub fn error(&self, message: &str) {
        // Errors are always shown, even in quiet mode
        eprintln!("{} {}", style("Error:").red().bold(), message);
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            println!("{} {}", style("ℹ").blue(), message);
        }
    }

    /// Get verbose mode status
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Print a header/title
    pub fn header(&self, title: &str) {
        if !self.quiet {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    /// Print a table row
    pub fn table_row(&self, key: &str, value: &str) {
        println!("  {:<20} {}", style(key).dim(), value);
    }

    /// Print an indented message
    pub fn indent(&self, message: &str) {
        println!("    {}", message);
    }

    /// Print blank line
    pub fn blank_line(&self) {
        if !self.quiet {
            println!();
        }
    }

    /// Raw tool or shim report, byte for byte on stderr
    pub fn diagnostic(&self, report: &[u8]) {
        let mut stderr = io::stderr().lock();
        if let Err(err) = stderr.write_all(report).and_then(|()| stderr.flush()) {
            tracing::warn!("Failed to write diagnostics: {err}");
        }
    }
}
