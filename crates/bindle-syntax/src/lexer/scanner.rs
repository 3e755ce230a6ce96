//! Hand-written scanner over raw source text.
//!
//! One token per call, with byte-accurate spans. A `/` is read as a regex
//! literal or as division depending on the previous significant token.

use super::{Span, Token, TokenKind};

/// Tokenizer for JavaScript source.
///
/// Cloning is cheap; [`Scanner::peek_token`] runs the real scan on a clone
/// so lookahead never disturbs the scanner's own position.
#[derive(Clone)]
pub struct Scanner<'a> {
    source: &'a str,
    cursor: std::iter::Peekable<std::str::CharIndices<'a>>,
    pos: usize,
    /// True when a `/` at the current position would open a regex literal.
    /// Updated after every token from what that token was.
    regex_allowed: bool,
}

impl<'a> Scanner<'a> {
    /// Sets up a scanner at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            cursor: source.char_indices().peekable(),
            pos: 0,
            regex_allowed: true,
        }
    }

    /// Reads the next token. At the end of input this returns
    /// [`TokenKind::Eof`] over and over.
    pub fn next_token(&mut self) -> Token {
        let newline_before = self.skip_whitespace_and_comments();
        let start = self.pos;

        let Some((_, ch)) = self.advance() else {
            let mut eof = Token::new(TokenKind::Eof, Span::new(start, start));
            eof.newline_before = newline_before;
            return eof;
        };

        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '~' => TokenKind::Tilde,

            '.' => {
                if self.eat('.') {
                    // Nothing in the grammar reads "..", only "...".
                    if self.eat('.') {
                        TokenKind::Ellipsis
                    } else {
                        TokenKind::Invalid
                    }
                } else if matches!(self.peek(), Some('0'..='9')) {
                    self.scan_number('.')
                } else {
                    TokenKind::Dot
                }
            }

            '+' => {
                if self.eat('+') {
                    TokenKind::PlusPlus
                } else if self.eat('=') {
                    TokenKind::PlusEqual
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.eat('-') {
                    TokenKind::MinusMinus
                } else if self.eat('=') {
                    TokenKind::MinusEqual
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.eat('*') {
                    if self.eat('=') {
                        TokenKind::StarStarEqual
                    } else {
                        TokenKind::StarStar
                    }
                } else if self.eat('=') {
                    TokenKind::StarEqual
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.regex_allowed {
                    self.scan_regex()
                } else if self.eat('=') {
                    TokenKind::SlashEqual
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.eat('=') {
                    TokenKind::PercentEqual
                } else {
                    TokenKind::Percent
                }
            }

            '<' => {
                if self.eat('<') {
                    if self.eat('=') {
                        TokenKind::LeftShiftEqual
                    } else {
                        TokenKind::LeftShift
                    }
                } else if self.eat('=') {
                    TokenKind::LessThanEqual
                } else {
                    TokenKind::LessThan
                }
            }
            '>' => {
                if self.eat('>') {
                    if self.eat('>') {
                        if self.eat('=') {
                            TokenKind::UnsignedRightShiftEqual
                        } else {
                            TokenKind::UnsignedRightShift
                        }
                    } else if self.eat('=') {
                        TokenKind::RightShiftEqual
                    } else {
                        TokenKind::RightShift
                    }
                } else if self.eat('=') {
                    TokenKind::GreaterThanEqual
                } else {
                    TokenKind::GreaterThan
                }
            }
            '=' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::StrictEqual
                    } else {
                        TokenKind::EqualEqual
                    }
                } else if self.eat('>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Equal
                }
            }
            '!' => {
                if self.eat('=') {
                    if self.eat('=') {
                        TokenKind::StrictNotEqual
                    } else {
                        TokenKind::NotEqual
                    }
                } else {
                    TokenKind::Bang
                }
            }

            '&' => {
                if self.eat('&') {
                    if self.eat('=') {
                        TokenKind::AmpersandAmpersandEqual
                    } else {
                        TokenKind::AmpersandAmpersand
                    }
                } else if self.eat('=') {
                    TokenKind::AmpersandEqual
                } else {
                    TokenKind::Ampersand
                }
            }
            '|' => {
                if self.eat('|') {
                    if self.eat('=') {
                        TokenKind::PipePipeEqual
                    } else {
                        TokenKind::PipePipe
                    }
                } else if self.eat('=') {
                    TokenKind::PipeEqual
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                if self.eat('=') {
                    TokenKind::CaretEqual
                } else {
                    TokenKind::Caret
                }
            }
            '?' => {
                if self.eat('?') {
                    if self.eat('=') {
                        TokenKind::QuestionQuestionEqual
                    } else {
                        TokenKind::QuestionQuestion
                    }
                } else {
                    TokenKind::Question
                }
            }

            '"' | '\'' => self.scan_string(ch),
            '`' => self.scan_template(),
            '0'..='9' => self.scan_number(ch),
            _ if is_id_start(ch) => self.scan_identifier(ch),
            _ => TokenKind::Invalid,
        };

        self.regex_allowed = regex_can_follow(&kind);

        let mut token = Token::new(kind, Span::new(start, self.pos));
        token.newline_before = newline_before;
        token
    }

    /// Reads the next token without consuming it.
    pub fn peek_token(&self) -> Token {
        self.clone().next_token()
    }

    fn advance(&mut self) -> Option<(usize, char)> {
        let next = self.cursor.next();
        if let Some((offset, ch)) = next {
            self.pos = offset + ch.len_utf8();
        }
        next
    }

    fn peek(&mut self) -> Option<char> {
        self.cursor.peek().map(|&(_, ch)| ch)
    }

    fn peek_next(&self) -> Option<char> {
        let mut ahead = self.cursor.clone();
        ahead.next();
        ahead.next().map(|(_, ch)| ch)
    }

    /// Consumes the next character if it is `expected`.
    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            return true;
        }
        false
    }

    /// Skips whitespace and comments. Returns true when a line terminator
    /// was crossed, including one buried in a block comment.
    fn skip_whitespace_and_comments(&mut self) -> bool {
        let mut saw_newline = false;

        // A shebang line can only sit at byte zero.
        if self.pos == 0 && self.source.starts_with("#!") {
            while let Some(ch) = self.peek() {
                if is_line_terminator(ch) {
                    break;
                }
                self.advance();
            }
        }

        loop {
            match self.peek() {
                Some(ch) if is_line_terminator(ch) => {
                    saw_newline = true;
                    self.advance();
                }
                Some(' ' | '\t' | '\u{000b}' | '\u{000c}' | '\u{00a0}' | '\u{feff}') => {
                    self.advance();
                }
                Some('/') if self.peek_next() == Some('/') => {
                    // Line comment. The slashes fall out of the same loop
                    // that discards the commented-out text.
                    while let Some(ch) = self.peek() {
                        if is_line_terminator(ch) {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_next() == Some('*') => {
                    self.advance();
                    self.advance();
                    let mut prev = ' ';
                    while let Some((_, ch)) = self.advance() {
                        if is_line_terminator(ch) {
                            saw_newline = true;
                        }
                        if prev == '*' && ch == '/' {
                            break;
                        }
                        prev = ch;
                    }
                }
                // A bare `/` is division or a regex, not ours to consume.
                _ => break,
            }
        }

        saw_newline
    }

    fn scan_string(&mut self, quote: char) -> TokenKind {
        let mut value = String::new();

        loop {
            match self.advance() {
                None => return TokenKind::Invalid,
                Some((_, ch)) if ch == quote => break,
                Some((_, '\\')) => {
                    match self.advance() {
                        None => return TokenKind::Invalid,
                        Some((_, escaped)) => match escaped {
                            'n' => value.push('\n'),
                            'r' => value.push('\r'),
                            't' => value.push('\t'),
                            'b' => value.push('\u{0008}'),
                            'f' => value.push('\u{000c}'),
                            'v' => value.push('\u{000b}'),
                            '\\' => value.push('\\'),
                            '\'' => value.push('\''),
                            '"' => value.push('"'),
                            '0' => value.push('\0'),
                            // Escaped line terminator: line continuation
                            ch if is_line_terminator(ch) => {}
                            _ => value.push(escaped),
                        },
                    }
                }
                Some((_, ch)) if is_line_terminator(ch) => return TokenKind::Invalid,
                Some((_, ch)) => value.push(ch),
            }
        }

        TokenKind::String(value)
    }

    /// Scans an entire template literal, interpolations included, as one
    /// opaque token holding the raw text between the backticks.
    ///
    /// `${ ... }` nesting is tracked by brace depth only; a backtick inside
    /// a string inside an interpolation will terminate the scan early.
    fn scan_template(&mut self) -> TokenKind {
        let mut value = String::new();
        let mut depth = 0usize;

        loop {
            match self.advance() {
                None => return TokenKind::Invalid,
                Some((_, '`')) if depth == 0 => break,
                Some((_, '\\')) => {
                    value.push('\\');
                    match self.advance() {
                        None => return TokenKind::Invalid,
                        Some((_, escaped)) => value.push(escaped),
                    }
                }
                Some((_, '$')) if self.peek() == Some('{') => {
                    self.advance();
                    depth += 1;
                    value.push_str("${");
                }
                Some((_, '}')) if depth > 0 => {
                    depth -= 1;
                    value.push('}');
                }
                Some((_, ch)) => value.push(ch),
            }
        }

        TokenKind::Template(value)
    }

    fn scan_regex(&mut self) -> TokenKind {
        let mut pattern = String::new();
        let mut in_class = false;

        loop {
            match self.advance() {
                // Regex literals cannot span lines or run off the input.
                None => return TokenKind::Invalid,
                Some((_, ch)) if is_line_terminator(ch) => return TokenKind::Invalid,
                Some((_, '\\')) => {
                    pattern.push('\\');
                    match self.advance() {
                        None => return TokenKind::Invalid,
                        Some((_, escaped)) if is_line_terminator(escaped) => {
                            return TokenKind::Invalid;
                        }
                        Some((_, escaped)) => pattern.push(escaped),
                    }
                }
                Some((_, '[')) => {
                    in_class = true;
                    pattern.push('[');
                }
                Some((_, ']')) => {
                    in_class = false;
                    pattern.push(']');
                }
                Some((_, '/')) if !in_class => break,
                Some((_, ch)) => pattern.push(ch),
            }
        }

        let mut flags = String::new();
        while let Some(ch) = self.peek() {
            if is_id_continue(ch) {
                flags.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        TokenKind::RegExp { pattern, flags }
    }

    fn scan_number(&mut self, first: char) -> TokenKind {
        if first == '0' {
            let radix = match self.peek() {
                Some('x' | 'X') => Some(16),
                Some('o' | 'O') => Some(8),
                Some('b' | 'B') => Some(2),
                _ => None,
            };
            if let Some(radix) = radix {
                self.advance();
                let mut digits = String::new();
                self.push_digits(&mut digits, radix);
                return match u64::from_str_radix(&digits, radix) {
                    Ok(n) => TokenKind::Number(n as f64),
                    Err(_) => TokenKind::Invalid,
                };
            }
        }

        let mut value = String::from(first);

        // Integer part; absent when the literal opened with '.'.
        if first != '.' {
            self.push_digits(&mut value, 10);
        }

        // Fractional part
        if first == '.' || self.peek() == Some('.') {
            if first != '.' {
                value.push('.');
                self.advance();
            }
            self.push_digits(&mut value, 10);
        }

        // Exponent part
        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            value.push('e');
            if matches!(self.peek(), Some('+' | '-')) {
                if let Some((_, sign)) = self.advance() {
                    value.push(sign);
                }
            }
            self.push_digits(&mut value, 10);
        }

        match value.parse::<f64>() {
            Ok(n) => TokenKind::Number(n),
            Err(_) => TokenKind::Invalid,
        }
    }

    /// Appends digits of the given radix to `value`, discarding `_`
    /// separators along the way.
    fn push_digits(&mut self, value: &mut String, radix: u32) {
        while let Some(ch) = self.peek() {
            if ch == '_' {
                self.advance();
            } else if ch.is_digit(radix) {
                value.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    fn scan_identifier(&mut self, first: char) -> TokenKind {
        let mut name = String::from(first);

        while let Some(ch) = self.peek() {
            if !is_id_continue(ch) {
                break;
            }
            name.push(ch);
            self.advance();
        }

        word_kind(name)
    }
}

/// Identifier head: `_`, `$`, or a Unicode XID_Start character.
fn is_id_start(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_xid::UnicodeXID::is_xid_start(ch)
}

/// Identifier tail: `_`, `$`, or a Unicode XID_Continue character.
fn is_id_continue(ch: char) -> bool {
    ch == '_' || ch == '$' || unicode_xid::UnicodeXID::is_xid_continue(ch)
}

/// ECMAScript line terminators: LF, CR, LS, PS.
fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Resolves a scanned word to its keyword token, or wraps it as an
/// identifier.
fn word_kind(name: String) -> TokenKind {
    match name.as_str() {
        "async" => TokenKind::Async,
        "await" => TokenKind::Await,
        "break" => TokenKind::Break,
        "case" => TokenKind::Case,
        "catch" => TokenKind::Catch,
        "class" => TokenKind::Class,
        "const" => TokenKind::Const,
        "continue" => TokenKind::Continue,
        "debugger" => TokenKind::Debugger,
        "default" => TokenKind::Default,
        "delete" => TokenKind::Delete,
        "do" => TokenKind::Do,
        "else" => TokenKind::Else,
        "enum" => TokenKind::Enum,
        "export" => TokenKind::Export,
        "extends" => TokenKind::Extends,
        "finally" => TokenKind::Finally,
        "for" => TokenKind::For,
        "function" => TokenKind::Function,
        "if" => TokenKind::If,
        "import" => TokenKind::Import,
        "in" => TokenKind::In,
        "instanceof" => TokenKind::Instanceof,
        "let" => TokenKind::Let,
        "new" => TokenKind::New,
        "return" => TokenKind::Return,
        "static" => TokenKind::Static,
        "super" => TokenKind::Super,
        "switch" => TokenKind::Switch,
        "this" => TokenKind::This,
        "throw" => TokenKind::Throw,
        "try" => TokenKind::Try,
        "typeof" => TokenKind::Typeof,
        "var" => TokenKind::Var,
        "void" => TokenKind::Void,
        "while" => TokenKind::While,
        "with" => TokenKind::With,
        "yield" => TokenKind::Yield,
        // Words that tokenize as literals rather than keywords.
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        _ => TokenKind::Identifier(name),
    }
}

/// Whether a `/` directly after a token of this kind starts a regex
/// literal. After anything that can end an expression it is division.
fn regex_can_follow(kind: &TokenKind) -> bool {
    !matches!(
        kind,
        TokenKind::Identifier(_)
            | TokenKind::Number(_)
            | TokenKind::String(_)
            | TokenKind::Template(_)
            | TokenKind::RegExp { .. }
            | TokenKind::True
            | TokenKind::False
            | TokenKind::Null
            | TokenKind::This
            | TokenKind::Super
            | TokenKind::RightParen
            | TokenKind::RightBracket
            | TokenKind::PlusPlus
            | TokenKind::MinusMinus
    )
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            token if token.kind == TokenKind::Eof => None,
            token => Some(token),
        }
    }
}
