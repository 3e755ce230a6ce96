//! Syntactic analysis.
//!
//! [`Parser`] consumes the lexer's token stream and produces the tree
//! types in [`crate::ast`].
//!
//! ```rust
//! use bindle_syntax::parser::Parser;
//!
//! let program = Parser::new("module.exports = 1;").parse_program().unwrap();
//! assert_eq!(program.body.len(), 1);
//! ```

mod parser;

pub use parser::Parser;
