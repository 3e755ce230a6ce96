//! Tokenizer for the supported JavaScript dialect.
//!
//! [`Scanner`] turns source text into [`Token`]s one at a time. It keeps
//! just enough state to settle the grammar's two context-sensitive calls:
//! whether `/` opens a regular expression or divides, and whether a line
//! terminator precedes the current token (which feeds semicolon insertion
//! upstream in the parser).
//!
//! ```rust
//! use bindle_syntax::lexer::{Scanner, TokenKind};
//!
//! let kinds: Vec<TokenKind> = Scanner::new("x = 42").map(|t| t.kind).collect();
//! assert_eq!(kinds.len(), 3);
//! assert!(matches!(kinds[2], TokenKind::Number(_)));
//! ```

mod scanner;
mod token;

pub use scanner::Scanner;
pub use token::{Span, Token, TokenKind};
