use crate::parser::lexer::{LexError, SourceLocation, TokenKind};
use thiserror::Error;

/// Result type for translation
pub type Result<T> = std::result::Result<T, TranslationError>;

/// Token sequence that violates the grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Syntax error at {location}: expected {expected}, found {found}")]
pub struct SyntaxError {
    /// What the grammar allowed at this point
    pub expected: String,
    /// The offending token
    pub found: TokenKind,
    pub location: SourceLocation,
}

impl SyntaxError {
    /// Whether the error was raised on the end-of-input token.
    pub fn at_end_of_input(&self) -> bool {
        self.found == TokenKind::Eof
    }
}

/// Failure of a translation call. Always fatal; no partial output exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}

impl TranslationError {
    /// Where the error was detected.
    pub fn location(&self) -> SourceLocation {
        match self {
            TranslationError::Lex(e) => e.location,
            TranslationError::Syntax(e) => e.location,
        }
    }

    pub fn line(&self) -> usize {
        self.location().line
    }

    /// Short label for the error kind, used in UI titles.
    pub fn kind(&self) -> &'static str {
        match self {
            TranslationError::Lex(_) => "Lexical error",
            TranslationError::Syntax(_) => "Syntax error",
        }
    }
}
