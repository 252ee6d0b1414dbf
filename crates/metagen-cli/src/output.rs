//! Output management and formatting.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use metagen_core::application::{Messager, Severity};

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if args.output_format == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            args.output_format
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Machine-readable payload. Never suppressed.
    pub fn data(&self, payload: &str) -> io::Result<()> {
        self.term.write_line(payload)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// A [`Messager`] that shares this manager's quiet and colour settings.
    pub fn messager(&self) -> ConsoleMessager {
        ConsoleMessager {
            quiet: self.quiet,
            no_color: self.no_color,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

// ── Diagnostics ───────────────────────────────────────────────────────────────

/// Prints generation diagnostics to stderr.
///
/// Notes are dropped in quiet mode; warnings and errors always show.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleMessager {
    quiet: bool,
    no_color: bool,
}

impl ConsoleMessager {
    fn line(&self, severity: Severity, text: &str) -> Option<String> {
        let line = match severity {
            Severity::Note if self.quiet => return None,
            Severity::Note if self.no_color => format!("note: {text}"),
            Severity::Note => format!("{} {}", "note:".blue().bold(), text),
            Severity::Warning if self.no_color => format!("warning: {text}"),
            Severity::Warning => format!("{} {}", "warning:".yellow().bold(), text),
            Severity::Error if self.no_color => format!("error: {text}"),
            Severity::Error => format!("{} {}", "error:".red().bold(), text.red()),
        };
        Some(line)
    }
}

impl Messager for ConsoleMessager {
    fn report(&self, severity: Severity, text: &str) {
        tracing::debug!(%severity, "{text}");
        if let Some(line) = self.line(severity, text) {
            // stderr unavailable: nothing sensible left to do with the message
            let _ = Term::stderr().write_line(&line);
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
