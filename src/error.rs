//! Centralised error hierarchy for the **Spartie interpreter**.
//!
//! All subsystems (scanner, parser, runtime, CLI) convert their internal
//! failure modes into one of the variants defined here.  This enables a
//! uniform `Result<T>` alias throughout the crate and ergonomic
//! inter-operation with `anyhow`, while still preserving rich diagnostic
//! detail.  Nothing here prints or terminates the process; the caller picks
//! the recovery policy (abort with a status, report and continue, assert in
//! tests).
//!
//! The module **does not** print diagnostics itself

use std::io;
use thiserror::Error;

use log::info;

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SpartieError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human-readable description.
        message: String,

        /// 1-based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error: {message}")]
    Parse { message: String, line: usize },

    /// A name bound nowhere in the scope chain was read or assigned.
    #[error("Undefined variable '{name}'. [line {line}]")]
    UndefinedVariable { name: String, line: usize },

    /// An operator applied to operand(s) of an unsupported type.  The message
    /// names the operator lexeme and the offending operand(s).
    #[error("Invalid type on line {line}: {message}")]
    InvalidType { message: String, line: usize },

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF-8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

impl SpartieError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        SpartieError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Parse error: line={}, msg={}", line, message);

        SpartieError::Parse { message, line }
    }

    /// Helper constructor for runtime type mismatches.
    pub fn invalid_type<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating InvalidType error: line={}, msg={}", line, message);

        SpartieError::InvalidType { message, line }
    }

    /// Helper constructor for unbound-name failures.
    pub fn undefined_variable<S: Into<String>>(line: usize, name: S) -> Self {
        let name: String = name.into();

        info!(
            "Creating UndefinedVariable error: line={}, name={}",
            line, name
        );

        SpartieError::UndefinedVariable { name, line }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, SpartieError>;
