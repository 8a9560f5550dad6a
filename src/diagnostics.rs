//! Human-readable progress and error lines. Everything here goes to stderr
//! so it never mixes with program output.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use nu_ansi_term::Color;

use crate::config::{ColorMode, Settings};
use crate::error::{LoadError, RuntimeError};

pub struct Diagnostics<E: Write> {
    sink: E,
    quiet: bool,
    color: bool,
}

impl Diagnostics<io::Stderr> {
    pub fn stderr(settings: &Settings) -> Self {
        let color = match settings.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => io::stderr().is_terminal(),
        };
        Self::new(io::stderr(), settings.quiet, color)
    }
}

impl<E: Write> Diagnostics<E> {
    pub fn new(sink: E, quiet: bool, color: bool) -> Self {
        Self { sink, quiet, color }
    }

    pub fn into_inner(self) -> E {
        self.sink
    }

    pub fn usage(&mut self, program: &str) {
        self.line(format_args!("usage: {program} <file>"));
    }

    pub fn loaded(&mut self, size: usize) {
        if !self.quiet {
            self.line(format_args!("loaded program, size: {size}"));
        }
    }

    pub fn running(&mut self) {
        if !self.quiet {
            self.line(format_args!("running, press ctrl+c to abort, press ctrl+d EOF"));
        }
    }

    pub fn done(&mut self, elapsed: Duration) {
        if !self.quiet {
            self.line(format_args!("\ndone, took: {}ms", elapsed.as_millis()));
        }
    }

    pub fn aborted(&mut self) {
        self.line(format_args!("\naborted"));
    }

    pub fn load_failed(&mut self, err: &LoadError) {
        let prefix = self.error_prefix();
        self.line(format_args!("{prefix} {err}"));
    }

    pub fn warn(&mut self, msg: &str) {
        self.line(format_args!("warning: {msg}"));
    }

    pub fn runtime_error(&mut self, err: &RuntimeError) {
        if let RuntimeError::Aborted = err {
            return self.aborted();
        }
        let prefix = self.error_prefix();
        self.line(format_args!("\n{prefix} {err}"));
    }

    fn error_prefix(&self) -> String {
        if self.color {
            Color::Red.bold().paint("error:").to_string()
        } else {
            "error:".to_string()
        }
    }

    fn line(&mut self, args: std::fmt::Arguments<'_>) {
        let _ = writeln!(self.sink, "{args}");
        let _ = self.sink.flush();
    }
}
