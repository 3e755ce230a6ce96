// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.
//
// Copyright (c) 2025 Pegasus Heavy Industries, LLC

//! # bindle-syntax
//!
//! JavaScript lexing, parsing, and tree traversal for the bindle bundler.
//!
//! The crate is the front half of a toolchain and stops at the syntax
//! tree: a scanner with enough context to tell regular expressions from
//! division, a recursive descent parser for the script grammar that
//! bundled CommonJS code actually uses, ESTree-flavored tree types, and
//! a visitor walk over them. There is no evaluator; consumers inspect
//! the tree and carry the original source text forward.
//!
//! ## Quick Start
//!
//! ```rust
//! let program = bindle_syntax::parse_program("var dep = require('./dep');")?;
//! assert_eq!(program.body.len(), 1);
//! # Ok::<(), bindle_syntax::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ast;
pub mod lexer;
pub mod parser;
pub mod visit;

// Re-exports
pub use ast::Program;
pub use parser::Parser;

/// Parses JavaScript source text into a [`Program`].
///
/// Wraps [`Parser`] for the parse-everything case. The first syntax
/// problem aborts the parse; there is no recovery.
pub fn parse_program(source: &str) -> Result<Program, Error> {
    Parser::new(source).parse_program()
}

/// Parse failure.
#[derive(Debug, Clone)]
pub enum Error {
    /// The source deviated from the supported grammar. The message names
    /// the construct or token that broke the parse.
    SyntaxError(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let Error::SyntaxError(msg) = self;
        write!(f, "SyntaxError: {}", msg)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_program_convenience() {
        let program = parse_program("var a = 1;").unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_parse_program_reports_syntax_errors() {
        let err = parse_program("var = ;").unwrap_err();
        assert!(matches!(err, Error::SyntaxError(_)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::SyntaxError("Unexpected token: Eof".to_string());
        assert_eq!(err.to_string(), "SyntaxError: Unexpected token: Eof");
    }
}
