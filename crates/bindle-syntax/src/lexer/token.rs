//! Lexical tokens.
//!
//! The scanner hands the parser a flat stream of [`Token`]s. Each one
//! records the byte range it was read from and whether a line terminator
//! preceded it; the parser keys automatic semicolon insertion and the
//! restricted productions off that flag.

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// First byte of the range.
    pub start: usize,
    /// One past the last byte of the range.
    pub end: usize,
}

impl Span {
    /// Builds the span `[start, end)`.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Width of the range in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the range covers no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One lexical token.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What was recognized.
    pub kind: TokenKind,
    /// Where in the source it was recognized.
    pub span: Span,
    /// Set when at least one line terminator sits between this token and
    /// the previous one.
    pub newline_before: bool,
}

impl Token {
    /// Wraps a kind and span into a token. The newline flag starts out
    /// clear; the scanner raises it afterwards when it skipped past a
    /// line terminator.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            span,
            newline_before: false,
        }
    }
}

/// Everything the scanner can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Name that is not a reserved word.
    Identifier(String),
    /// Numeric literal, already converted to its value.
    Number(f64),
    /// String literal with escape sequences decoded.
    String(String),
    /// Template literal, carried as the raw text between the backticks.
    Template(String),
    /// Regular expression literal.
    RegExp {
        /// Text between the delimiting slashes.
        pattern: String,
        /// Flag letters after the closing slash.
        flags: String,
    },
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,

    // Reserved words, plus the contextual ones the parser cares about.
    // keyword_name must cover every entry here.
    Async,
    Await,
    Break,
    Case,
    Catch,
    Class,
    Const,
    Continue,
    Debugger,
    Default,
    Delete,
    Do,
    Else,
    Enum,
    Export,
    Extends,
    Finally,
    For,
    Function,
    If,
    Import,
    In,
    Instanceof,
    Let,
    New,
    Return,
    Static,
    Super,
    Switch,
    This,
    Throw,
    Try,
    Typeof,
    Var,
    Void,
    While,
    With,
    Yield,

    // Brackets, separators, and the arrow
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `{`
    LeftBrace,
    /// `}`
    RightBrace,
    /// `[`
    LeftBracket,
    /// `]`
    RightBracket,
    /// `;`
    Semicolon,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `...`
    Ellipsis,
    /// `:`
    Colon,
    /// `=>`
    Arrow,

    // Arithmetic and update operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `**`
    StarStar,
    /// `++`
    PlusPlus,
    /// `--`
    MinusMinus,

    // Comparison
    /// `<`
    LessThan,
    /// `<=`
    LessThanEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEqual,
    /// `==`
    EqualEqual,
    /// `!=`
    NotEqual,
    /// `===`
    StrictEqual,
    /// `!==`
    StrictNotEqual,

    // Bitwise and shift
    /// `&`
    Ampersand,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,
    /// `>>>`
    UnsignedRightShift,

    // Logical and conditional
    /// `!`
    Bang,
    /// `&&`
    AmpersandAmpersand,
    /// `||`
    PipePipe,
    /// `??`
    QuestionQuestion,
    /// `?`
    Question,

    // Assignment
    /// `=`
    Equal,
    /// `+=`
    PlusEqual,
    /// `-=`
    MinusEqual,
    /// `*=`
    StarEqual,
    /// `/=`
    SlashEqual,
    /// `%=`
    PercentEqual,
    /// `**=`
    StarStarEqual,
    /// `<<=`
    LeftShiftEqual,
    /// `>>=`
    RightShiftEqual,
    /// `>>>=`
    UnsignedRightShiftEqual,
    /// `&=`
    AmpersandEqual,
    /// `|=`
    PipeEqual,
    /// `^=`
    CaretEqual,
    /// `&&=`
    AmpersandAmpersandEqual,
    /// `||=`
    PipePipeEqual,
    /// `??=`
    QuestionQuestionEqual,

    // Stream control
    /// End of input.
    Eof,
    /// Byte sequence the scanner could not make sense of.
    Invalid,
}

impl TokenKind {
    /// The source spelling of a keyword token. Reserved words are legal
    /// property names (`promise.catch`, `exports.default`), so the parser
    /// needs a way back from the token to its text.
    pub fn keyword_name(&self) -> Option<&'static str> {
        let name = match self {
            TokenKind::Async => "async",
            TokenKind::Await => "await",
            TokenKind::Break => "break",
            TokenKind::Case => "case",
            TokenKind::Catch => "catch",
            TokenKind::Class => "class",
            TokenKind::Const => "const",
            TokenKind::Continue => "continue",
            TokenKind::Debugger => "debugger",
            TokenKind::Default => "default",
            TokenKind::Delete => "delete",
            TokenKind::Do => "do",
            TokenKind::Else => "else",
            TokenKind::Enum => "enum",
            TokenKind::Export => "export",
            TokenKind::Extends => "extends",
            TokenKind::Finally => "finally",
            TokenKind::For => "for",
            TokenKind::Function => "function",
            TokenKind::If => "if",
            TokenKind::Import => "import",
            TokenKind::In => "in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::Let => "let",
            TokenKind::New => "new",
            TokenKind::Return => "return",
            TokenKind::Static => "static",
            TokenKind::Super => "super",
            TokenKind::Switch => "switch",
            TokenKind::This => "this",
            TokenKind::Throw => "throw",
            TokenKind::Try => "try",
            TokenKind::Typeof => "typeof",
            TokenKind::Var => "var",
            TokenKind::Void => "void",
            TokenKind::While => "while",
            TokenKind::With => "with",
            TokenKind::Yield => "yield",
            _ => return None,
        };
        Some(name)
    }

    /// Whether this token is a reserved or contextual word.
    pub fn is_keyword(&self) -> bool {
        self.keyword_name().is_some()
    }

    /// Whether this token is a literal value.
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::Number(_)
                | TokenKind::String(_)
                | TokenKind::Template(_)
                | TokenKind::RegExp { .. }
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_extents() {
        let span = Span::new(3, 9);
        assert_eq!(span.len(), 6);
        assert!(!span.is_empty());
        assert!(Span::new(7, 7).is_empty());
    }

    #[test]
    fn test_token_starts_without_newline_flag() {
        let token = Token::new(TokenKind::Semicolon, Span::new(12, 13));
        assert!(!token.newline_before);
        assert_eq!(token.kind, TokenKind::Semicolon);
        assert_eq!(token.span, Span::new(12, 13));
    }

    #[test]
    fn test_keyword_names_match_their_spelling() {
        assert_eq!(TokenKind::Function.keyword_name(), Some("function"));
        assert_eq!(TokenKind::Typeof.keyword_name(), Some("typeof"));
        assert_eq!(TokenKind::Catch.keyword_name(), Some("catch"));
        assert_eq!(TokenKind::Async.keyword_name(), Some("async"));
        assert_eq!(
            TokenKind::Identifier("catch".to_string()).keyword_name(),
            None
        );
        assert_eq!(TokenKind::Arrow.keyword_name(), None);
    }

    #[test]
    fn test_reserved_words_are_keywords() {
        assert!(TokenKind::Return.is_keyword());
        assert!(TokenKind::Instanceof.is_keyword());
        assert!(TokenKind::Yield.is_keyword());
        assert!(TokenKind::With.is_keyword());
        // true, false, and null read like keywords but tokenize as literals.
        assert!(!TokenKind::True.is_keyword());
        assert!(!TokenKind::Null.is_keyword());
        assert!(!TokenKind::Identifier("request".to_string()).is_keyword());
        assert!(!TokenKind::Eof.is_keyword());
    }

    #[test]
    fn test_literal_classification() {
        assert!(TokenKind::Number(0.5).is_literal());
        assert!(TokenKind::String(String::new()).is_literal());
        assert!(TokenKind::Template("sum: ${a + b}".to_string()).is_literal());
        let regexp = TokenKind::RegExp {
            pattern: "\\d+".to_string(),
            flags: String::new(),
        };
        assert!(regexp.is_literal());
        assert!(TokenKind::Null.is_literal());
        assert!(!TokenKind::Identifier("undefined".to_string()).is_literal());
        assert!(!TokenKind::Void.is_literal());
        assert!(!TokenKind::Invalid.is_literal());
    }
}
