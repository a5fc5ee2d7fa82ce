//! Centralised error hierarchy for the interpreter.
//!
//! All subsystems (scanner, parser, runtime, CLI) convert their internal
//! failure modes into one of the variants defined here. This enables a
//! uniform `Result<T>` alias throughout the crate and ergonomic
//! inter‑operation with `anyhow` in the binary.
//!
//! The module **does not** print diagnostics itself. Scan and parse errors
//! are collected by an [`ErrorSink`], which the caller (runner, REPL, tests)
//! owns and drains; runtime errors travel up through `Result` and are then
//! recorded in the same sink.

use std::io;
use thiserror::Error;

use log::{debug, info};

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error. `location` is `" at end"` or `" at 'x'"`.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        location: String,
        line: usize,
    },

    /// Runtime evaluation error, carrying the token it was raised at.
    #[error("{message}\n[line {}]", .token.line)]
    Runtime { message: String, token: Token },

    /// Wrapper around `std::io::Error` (transparent). Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**; the location is derived from
    /// the offending token.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        let location: String = if matches!(token.token_type, TokenType::EOF) {
            " at end".to_string()
        } else {
            format!(" at '{}'", token.lexeme)
        };

        debug!(
            "Creating Parse error: line={}, location={}, msg={}",
            token.line, location, message
        );

        LoxError::Parse {
            message,
            location,
            line: token.line,
        }
    }

    /// Helper constructor for the **interpreter**.
    pub fn runtime<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Runtime error: line={}, msg={}", token.line, message);

        LoxError::Runtime {
            message,
            token: token.clone(),
        }
    }

    /// Source line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoxError::Lex { line, .. } | LoxError::Parse { line, .. } => Some(*line),
            LoxError::Runtime { token, .. } => Some(token.line),
            LoxError::Io(_) => None,
        }
    }

    /// Scan and parse failures; these stop a program from running at all.
    pub fn is_static(&self) -> bool {
        matches!(self, LoxError::Lex { .. } | LoxError::Parse { .. })
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

/// Accumulates every diagnostic produced while running one unit of source
/// (a script, or one REPL line).
///
/// `had_error` reflects scan/parse failures only; runtime failures are
/// tracked separately so the runner can map them to different exit codes.
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: Vec<LoxError>,
    had_error: bool,
    had_runtime_error: bool,
}

impl ErrorSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scan or parse error by its parts.
    pub fn report(&mut self, line: usize, location: &str, message: &str) {
        self.push(LoxError::Parse {
            message: message.to_string(),
            location: location.to_string(),
            line,
        });
    }

    /// Record an already-built error of any kind.
    pub fn push(&mut self, error: LoxError) {
        info!("Reporting error: {}", error);

        if let LoxError::Runtime { .. } = error {
            self.had_runtime_error = true;
        } else {
            self.had_error = true;
        }

        self.errors.push(error);
    }

    pub fn had_error(&self) -> bool {
        self.had_error
    }

    pub fn had_runtime_error(&self) -> bool {
        self.had_runtime_error
    }

    pub fn errors(&self) -> &[LoxError] {
        &self.errors
    }

    /// Hand over the collected diagnostics, leaving the flags untouched.
    pub fn drain(&mut self) -> std::vec::Drain<'_, LoxError> {
        self.errors.drain(..)
    }

    /// Forget everything; used between REPL lines.
    pub fn reset(&mut self) {
        debug!("Resetting error sink ({} pending)", self.errors.len());

        self.errors.clear();
        self.had_error = false;
        self.had_runtime_error = false;
    }
}
