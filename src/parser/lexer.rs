//! Lexer (tokenizer) for pseudocode source
//!
//! Converts raw source text into a lazy stream of [`Token`]s consumed by the
//! parser. [`Lexer`] implements [`Iterator`]: each call to `next` produces one
//! token or a [`LexError`], and the stream ends after the end-of-input token
//! or the first error.
//!
//! Newlines are significant (they terminate statements), but runs of them,
//! including blank lines holding only whitespace, collapse into a single
//! [`TokenKind::Newline`].

use rustc_hash::FxHashMap;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;
use std::sync::LazyLock;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Reserved words of the pseudocode language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Set,
    To,
    Print,
    If,
    Then,
    Else,
    End,
    While,
    Do,
    Function,
    Return,
    Call,
    Input,
}

impl Keyword {
    /// Canonical (lowercase) spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Set => "set",
            Keyword::To => "to",
            Keyword::Print => "print",
            Keyword::If => "if",
            Keyword::Then => "then",
            Keyword::Else => "else",
            Keyword::End => "end",
            Keyword::While => "while",
            Keyword::Do => "do",
            Keyword::Function => "function",
            Keyword::Return => "return",
            Keyword::Call => "call",
            Keyword::Input => "input",
        }
    }

    /// Look up a word in the keyword table, ignoring ASCII case.
    pub fn lookup(word: &str) -> Option<Keyword> {
        KEYWORDS.get(word.to_ascii_lowercase().as_str()).copied()
    }
}

const ALL_KEYWORDS: [Keyword; 13] = [
    Keyword::Set,
    Keyword::To,
    Keyword::Print,
    Keyword::If,
    Keyword::Then,
    Keyword::Else,
    Keyword::End,
    Keyword::While,
    Keyword::Do,
    Keyword::Function,
    Keyword::Return,
    Keyword::Call,
    Keyword::Input,
];

/// Keyword table, built on first use and read-only afterwards.
static KEYWORDS: LazyLock<FxHashMap<&'static str, Keyword>> =
    LazyLock::new(|| ALL_KEYWORDS.iter().map(|kw| (kw.as_str(), *kw)).collect());

/// Token classification. Literal and identifier variants carry their value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Literals
    /// Integer literal digits, leading zeros removed.
    Number(String),
    /// String literal, surrounding quotes included.
    Str(String),

    // Identifiers
    Ident(String),

    // Keywords
    Keyword(Keyword),

    // Arithmetic
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /

    // Comparison
    EqEq,  // ==
    NotEq, // !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Punctuation
    LParen, // (
    RParen, // )
    Comma,  // ,

    /// One or more line breaks
    Newline,

    // End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Str(s) => write!(f, "string {}", s),
            TokenKind::Ident(s) => write!(f, "identifier '{}'", s),
            TokenKind::Keyword(kw) => write!(f, "'{}'", kw.as_str()),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::NotEq => write!(f, "'!='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Newline => write!(f, "end of line"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}

/// A classified token and where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.kind.fmt(f)
    }
}

/// Unrecognized character in the input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Illegal character '{character}' at {location}")]
pub struct LexError {
    pub character: char,
    pub location: SourceLocation,
}

/// Lexer for pseudocode source
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
    line: usize,
    column: usize,
    /// Start of the line-break run just emitted, if nothing followed it yet
    pending_newline: Option<SourceLocation>,
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source string.
    pub fn new(input: &'a str) -> Self {
        Self {
            input: input.chars().peekable(),
            line: 1,
            column: 1,
            pending_newline: None,
            finished: false,
        }
    }

    /// Tokenize the entire input, stopping at the first error.
    pub fn tokenize(self) -> Result<Vec<Token>, LexError> {
        self.collect()
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_blanks();

        let loc = self.current_location();
        let Some(ch) = self.advance() else {
            // end of input belongs to the last line that has content
            let eof_loc = self.pending_newline.take().unwrap_or(loc);
            return Ok(Token::new(TokenKind::Eof, eof_loc));
        };
        self.pending_newline = None;

        let kind = match ch {
            '\n' => {
                self.skip_newline_run();
                self.pending_newline = Some(loc);
                TokenKind::Newline
            }

            '"' => self.string_literal(loc)?,

            '0'..='9' => self.number_literal(ch),

            'a'..='z' | 'A'..='Z' | '_' => self.identifier_or_keyword(ch),

            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '=' if self.match_char('=') => TokenKind::EqEq,
            '!' if self.match_char('=') => TokenKind::NotEq,
            '<' if self.match_char('=') => TokenKind::Le,
            '<' => TokenKind::Lt,
            '>' if self.match_char('=') => TokenKind::Ge,
            '>' => TokenKind::Gt,

            _ => {
                return Err(LexError {
                    character: ch,
                    location: loc,
                })
            }
        };

        Ok(Token::new(kind, loc))
    }

    /// Parse string literal. The opening quote has been consumed.
    fn string_literal(&mut self, loc: SourceLocation) -> Result<TokenKind, LexError> {
        let mut literal = String::from('"');

        while let Some(&ch) = self.input.peek() {
            match ch {
                '"' => {
                    self.advance();
                    literal.push('"');
                    return Ok(TokenKind::Str(literal));
                }
                '\n' => break,
                _ => {
                    literal.push(ch);
                    self.advance();
                }
            }
        }

        // No closing quote on this line: the quote itself is illegal
        Err(LexError {
            character: '"',
            location: loc,
        })
    }

    /// Parse numeric literal (integers only, any length)
    fn number_literal(&mut self, first_digit: char) -> TokenKind {
        let mut digits = String::from(first_digit);

        while let Some(&ch) = self.input.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            digits.push(ch);
            self.advance();
        }

        let value = digits.trim_start_matches('0');
        if value.is_empty() {
            TokenKind::Number("0".to_string())
        } else {
            TokenKind::Number(value.to_string())
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char) -> TokenKind {
        let mut ident = String::from(first_char);

        while let Some(&ch) = self.input.peek() {
            if !(ch.is_ascii_alphanumeric() || ch == '_') {
                break;
            }
            ident.push(ch);
            self.advance();
        }

        match Keyword::lookup(&ident) {
            Some(kw) => TokenKind::Keyword(kw),
            None => TokenKind::Ident(ident),
        }
    }

    /// Skip spaces, tabs and carriage returns. Newlines are tokens.
    fn skip_blanks(&mut self) {
        while matches!(self.input.peek(), Some(' ' | '\t' | '\r')) {
            self.advance();
        }
    }

    /// Swallow the rest of a run of line breaks, including blank lines.
    fn skip_newline_run(&mut self) {
        loop {
            self.skip_blanks();
            if self.input.peek() == Some(&'\n') {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.input.peek() == Some(&expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.input.next()?;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        if matches!(&result, Err(_) | Ok(Token { kind: TokenKind::Eof, .. })) {
            self.finished = true;
        }
        Some(result)
    }
}
