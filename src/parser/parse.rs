//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and the token-level helpers the
//! grammar rules are built on.
//!
//! # Parser Architecture
//!
//! The parser is a predictive LL(1) recursive descent parser with a single
//! token of lookahead pulled lazily from the [`Lexer`]. There is no syntax
//! tree: every rule returns its translation directly (a `String` for
//! expressions, a [`Block`] for statements), computed from the translations
//! of its children.
//!
//! - This module: Parser struct, helper methods, program entry point
//! - `statements`: statement dispatch and block-structured statements
//! - `expressions`: binary operators by precedence climbing, atoms
//!
//! Parser methods are split across these files using `impl Parser` blocks.

use crate::emitter::Block;
use crate::error::{Result, SyntaxError, TranslationError};
use crate::parser::lexer::{Keyword, Lexer, SourceLocation, Token, TokenKind};

/// Deepest nesting of blocks and parentheses a program may use.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Recursive descent translator for pseudocode
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a parser over `source`. Fails if the first token is not lexable.
    pub fn new(source: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let current = match lexer.next() {
            Some(token) => token?,
            None => Token::new(TokenKind::Eof, SourceLocation::new(1, 1)),
        };
        Ok(Self {
            lexer,
            current,
            depth: 0,
        })
    }

    /// Translate the whole program: one or more statements, then end of input.
    pub fn parse_program(mut self) -> Result<Block> {
        // a leading blank line is not a statement
        self.match_kind(&TokenKind::Newline)?;

        let program = self.parse_statement_list()?;

        if !self.is_at_end() {
            return Err(self.error("a statement"));
        }

        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &TokenKind {
        &self.current.kind
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        *self.peek() == TokenKind::Keyword(keyword)
    }

    /// Consume the current token and return it. End of input is never consumed.
    pub(crate) fn advance(&mut self) -> Result<Token> {
        if self.is_at_end() {
            return Ok(self.current.clone());
        }

        let next = match self.lexer.next() {
            Some(token) => token?,
            None => Token::new(TokenKind::Eof, self.current.location),
        };
        Ok(std::mem::replace(&mut self.current, next))
    }

    pub(crate) fn match_kind(&mut self, kind: &TokenKind) -> Result<bool> {
        if self.peek() == kind {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub(crate) fn match_keyword(&mut self, keyword: Keyword) -> Result<bool> {
        self.match_kind(&TokenKind::Keyword(keyword))
    }

    pub(crate) fn expect(&mut self, kind: &TokenKind) -> Result<()> {
        if self.match_kind(kind)? {
            Ok(())
        } else {
            Err(self.error(&kind.to_string()))
        }
    }

    pub(crate) fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        self.expect(&TokenKind::Keyword(keyword))
    }

    pub(crate) fn expect_newline(&mut self) -> Result<()> {
        self.expect(&TokenKind::Newline)
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String> {
        if let TokenKind::Ident(name) = self.peek() {
            let name = name.clone();
            self.advance()?;
            Ok(name)
        } else {
            Err(self.error("identifier"))
        }
    }

    /// Run `parse` one nesting level deeper, failing on the current token
    /// once [`MAX_NESTING_DEPTH`] is reached.
    pub(crate) fn descend<T>(&mut self, parse: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(&format!(
                "at most {} levels of nesting",
                MAX_NESTING_DEPTH
            )));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Syntax error on the current token.
    pub(crate) fn error(&self, expected: &str) -> TranslationError {
        SyntaxError {
            expected: expected.to_string(),
            found: self.current.kind.clone(),
            location: self.current.location,
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<String> {
        Parser::new(source)?.parse_program().map(|block| block.render())
    }

    #[test]
    fn test_parse_simple_statements() {
        let output = parse("set x to 5\nprint x\ninput name\ncall greet\n").unwrap();

        assert_eq!(output, "x = 5\nprint(x)\nname = input()\ngreet()");
    }

    #[test]
    fn test_leading_blank_line_is_ignored() {
        let output = parse("\n\nprint 1\n").unwrap();

        assert_eq!(output, "print(1)");
    }

    #[test]
    fn test_empty_program_is_error() {
        let err = parse("\n").unwrap_err();

        match err {
            TranslationError::Syntax(e) => assert!(e.at_end_of_input()),
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_end_at_top_level() {
        let err = parse("print 1\nend\n").unwrap_err();

        match err {
            TranslationError::Syntax(e) => {
                assert_eq!(e.found, TokenKind::Keyword(Keyword::End));
                assert_eq!(e.location.line, 2);
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_statement_terminator() {
        let err = parse("print x y\n").unwrap_err();

        assert_eq!(
            err.to_string(),
            "Syntax error at line 1, column 9: expected end of line, found identifier 'y'"
        );
    }

    #[test]
    fn test_lex_error_surfaces_through_parser() {
        let err = parse("print 1\nprint 2 & 3\n").unwrap_err();

        match err {
            TranslationError::Lex(e) => {
                assert_eq!(e.character, '&');
                assert_eq!(e.location.line, 2);
            }
            other => panic!("Expected lex error, got {:?}", other),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let nest = |depth: usize| {
            format!("{}print 1\n{}", "if 1 then\n".repeat(depth), "end\n".repeat(depth))
        };

        // the program itself is one level
        assert!(parse(&nest(MAX_NESTING_DEPTH - 1)).is_ok());

        match parse(&nest(20_000)).unwrap_err() {
            TranslationError::Syntax(e) => {
                assert_eq!(e.found, TokenKind::Keyword(Keyword::If));
                assert_eq!(e.location.line, MAX_NESTING_DEPTH + 1);
                assert!(e.expected.contains("levels of nesting"));
            }
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_syntax_error_before_later_lex_error() {
        // tokens are pulled lazily, so the earlier problem wins
        let err = parse("set 5 to x\nprint @\n").unwrap_err();

        assert!(matches!(err, TranslationError::Syntax(_)));
    }
}
