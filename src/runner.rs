//! Glue between the pipeline stages.
//!
//! A [`Lox`] session owns one interpreter (so globals survive from one REPL
//! line to the next) and one [`ErrorSink`]. Nothing here prints; the caller
//! drains the sink and decides how to present diagnostics.

use std::io::{self, BufRead, Write};

use log::{debug, info};

use crate::ast::Stmt;
use crate::error::ErrorSink;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::scanner::Scanner;

/// How a unit of source fared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    /// Scan or parse errors; nothing was executed.
    StaticError,
    /// Execution started and was aborted by a runtime error.
    RuntimeError,
}

impl Status {
    /// Process exit code for script mode. Only static errors fail the
    /// process; a runtime error is reported but still exits 0.
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok | Status::RuntimeError => 0,
            Status::StaticError => 65,
        }
    }
}

/// Scan and parse `source`; all diagnostics go to `sink`.
pub fn parse_source(source: &str, sink: &mut ErrorSink) -> Vec<Stmt> {
    let tokens = Scanner::new(source).scan_tokens(sink);

    Parser::new(tokens).parse(sink)
}

pub struct Lox {
    interpreter: Interpreter,
    sink: ErrorSink,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    pub fn new() -> Self {
        Self {
            interpreter: Interpreter::new(),
            sink: ErrorSink::new(),
        }
    }

    pub fn with_output<W: Write + 'static>(out: W) -> Self {
        Self {
            interpreter: Interpreter::with_output(out),
            sink: ErrorSink::new(),
        }
    }

    /// Lex, parse and, if that produced no errors, execute `source`.
    pub fn run(&mut self, source: &str) -> Status {
        info!("Running {} bytes of source", source.len());

        let statements = parse_source(source, &mut self.sink);

        if self.sink.had_error() {
            debug!("Static errors present; skipping evaluation");

            return Status::StaticError;
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => Status::Ok,
            Err(e) => {
                debug!("Runtime error: {}", e);

                self.sink.push(e);

                Status::RuntimeError
            }
        }
    }

    pub fn sink(&self) -> &ErrorSink {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut ErrorSink {
        &mut self.sink
    }

    pub fn had_error(&self) -> bool {
        self.sink.had_error()
    }

    pub fn had_runtime_error(&self) -> bool {
        self.sink.had_runtime_error()
    }

    /// Clear the error state so the next line starts clean. Interpreter
    /// state is kept.
    pub fn reset(&mut self) {
        self.sink.reset();
    }
}

/// Read‑eval‑print loop over `input` against one persistent session.
///
/// Prompts go to `out` and diagnostics to `err`. A line that is not valid
/// UTF‑8 is reported and skipped; any other read failure ends the loop.
pub fn repl<R, W, E>(lox: &mut Lox, mut input: R, mut out: W, mut err: E) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    info!("Starting interactive prompt");

    let mut line = String::new();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();

        match input.read_line(&mut line) {
            Ok(0) => {
                writeln!(out)?;
                break;
            }

            Ok(_) => {
                let status = lox.run(&line);
                debug!("Line finished with {:?}", status);

                for error in lox.sink_mut().drain() {
                    writeln!(err, "{}", error)?;
                }

                lox.reset();
            }

            // `read_line` has already consumed the bad bytes.
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                debug!("Skipping undecodable line: {}", e);

                writeln!(err, "Error: {}", e)?;
            }

            Err(e) => return Err(e),
        }
    }

    Ok(())
}
