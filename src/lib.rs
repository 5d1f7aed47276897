//! A tree‑walking interpreter for Lox.
//!
//! Source flows through four stages: [`scanner`] → [`parser`] → [`resolver`] →
//! [`interpreter`].  [`Lox::run`] drives them in order and reports what went
//! wrong in a [`RunReport`] instead of printing or exiting.

pub mod ast;
pub mod ast_printer;
pub mod environment;
pub mod error;
pub mod function;
pub mod interpreter;
pub mod parser;
pub mod resolver;
pub mod scanner;
pub mod token;
pub mod value;

use std::io::Write;

use log::info;

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;

/// Exit status for a script with scan/parse/resolve errors.
pub const EXIT_STATIC_ERROR: i32 = 65;

/// Exit status for a script that failed at runtime.
pub const EXIT_RUNTIME_ERROR: i32 = 70;

/// Everything that went wrong during one [`Lox::run`].
#[derive(Debug, Default)]
pub struct RunReport {
    pub lex_errors: Vec<LoxError>,
    pub parse_errors: Vec<LoxError>,
    pub resolve_errors: Vec<LoxError>,
    pub runtime_error: Option<LoxError>,
}

impl RunReport {
    /// Any scan, parse or resolve error.
    pub fn had_error(&self) -> bool {
        !(self.lex_errors.is_empty() && self.parse_errors.is_empty() && self.resolve_errors.is_empty())
    }

    pub fn had_runtime_error(&self) -> bool {
        self.runtime_error.is_some()
    }

    /// Process exit code the driver should use, if the run failed.
    pub fn exit_code(&self) -> Option<i32> {
        if self.had_error() {
            Some(EXIT_STATIC_ERROR)
        } else if self.had_runtime_error() {
            Some(EXIT_RUNTIME_ERROR)
        } else {
            None
        }
    }

    /// All errors in pipeline order.
    pub fn errors(&self) -> impl Iterator<Item = &LoxError> {
        self.lex_errors
            .iter()
            .chain(&self.parse_errors)
            .chain(&self.resolve_errors)
            .chain(&self.runtime_error)
    }
}

/// Interpreter session.  Globals persist across calls to [`Lox::run`], which
/// is what the interactive prompt relies on.
pub struct Lox {
    interpreter: Interpreter,
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
        }
    }

    /// Session whose `print` output goes to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Self {
            interpreter: Interpreter::with_output(out),
        }
    }

    /// scan → parse → resolve → interpret.  Resolution and execution are
    /// skipped once any earlier stage reported an error.
    pub fn run(&mut self, source: &str) -> RunReport {
        let mut report = RunReport::default();

        let (tokens, lex_errors) = Scanner::new(source).scan_tokens();
        report.lex_errors = lex_errors;

        let statements = match Parser::new(tokens).parse() {
            Ok(statements) => statements,
            Err(errors) => {
                report.parse_errors = errors;
                return report;
            }
        };

        if report.had_error() {
            return report;
        }

        if let Err(errors) = Resolver::new(&mut self.interpreter).resolve(&statements) {
            report.resolve_errors = errors;
            return report;
        }

        if let Err(e) = self.interpreter.interpret(&statements) {
            report.runtime_error = Some(e);
        }

        info!(
            "Run finished: static errors={}, runtime error={}",
            report.had_error(),
            report.had_runtime_error()
        );

        report
    }
}
