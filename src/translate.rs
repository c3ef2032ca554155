//! Translation driver
//!
//! The boundary between the core and its callers: owns lexer and parser
//! construction for a single call and returns either the complete Python
//! text or the first error. Every call is independent.

use crate::error::Result;
use crate::parser::lexer::{LexError, Lexer, Token};
use crate::parser::Parser;
use log::debug;

/// Translate pseudocode into Python source text.
///
/// A line terminator is appended to `source` first, so a final statement
/// without one still parses. The result has no trailing newline.
pub fn translate(source: &str) -> Result<String> {
    let mut text = String::with_capacity(source.len() + 1);
    text.push_str(source);
    text.push('\n');

    let block = Parser::new(&text)
        .and_then(Parser::parse_program)
        .inspect_err(|e| debug!("translation failed: {}", e))?;

    debug!("translated {} source bytes into {} lines", source.len(), block.lines().len());
    Ok(block.render())
}

/// Tokenize the whole source, for diagnostics.
pub fn tokenize(source: &str) -> std::result::Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TranslationError;

    #[test]
    fn test_final_line_without_newline() {
        assert_eq!(translate("set x to 5\nprint x").unwrap(), "x = 5\nprint(x)");
    }

    #[test]
    fn test_block_closed_at_end_of_file() {
        let output = translate("while x < 5 do\n    set x to x + 1\nend").unwrap();

        assert_eq!(output, "while (x < 5):\n    x = (x + 1)");
    }

    #[test]
    fn test_crlf_input() {
        let output = translate("set x to 1\r\nprint x\r\n").unwrap();

        assert_eq!(output, "x = 1\nprint(x)");
    }

    #[test]
    fn test_error_line() {
        let err = translate("print 1\n\nprint 2 ? 3").unwrap_err();

        assert!(matches!(err, TranslationError::Lex(_)));
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_end_of_input_error_stays_in_file() {
        let err = translate("if x > 1 then\n    print x\n").unwrap_err();
        assert_eq!(err.line(), 2);

        let err = translate("while x do\n    print x\n\n\n").unwrap_err();
        assert_eq!(err.line(), 2);
    }

    #[test]
    fn test_tokenize_ends_with_eof() {
        let tokens = tokenize("print 1").unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[2].kind, crate::parser::lexer::TokenKind::Eof);
    }
}
