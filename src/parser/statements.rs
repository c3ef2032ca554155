//! Statement translation
//!
//! # Grammar
//!
//! ```text
//! statement  ::= simple stmt_term | if_stmt | while_stmt | func_def
//! simple     ::= "set" ID "to" expr | "print" expr | "return" expr
//!              | "input" ID | "call" ID [ "(" ")" ]
//! if_stmt    ::= "if" expr "then" stmt_term block
//!                [ "else" stmt_term block ] "end" stmt_term
//! while_stmt ::= "while" expr "do" stmt_term block "end" stmt_term
//! func_def   ::= "function" ID "(" ")" stmt_term block "end" stmt_term
//! block      ::= statement+
//! ```
//!
//! Every statement translates to a [`Block`]. Bodies of compound statements
//! are nested one indent unit under their header line.

use crate::emitter::Block;
use crate::error::Result;
use crate::parser::lexer::{Keyword, TokenKind};
use crate::parser::parse::Parser;

/// Statement forms, keyed by their leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Set,
    Print,
    Return,
    Input,
    Call,
    If,
    While,
    Function,
}

impl StatementKind {
    /// The statement a keyword starts, if it starts one.
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::Set => Some(StatementKind::Set),
            Keyword::Print => Some(StatementKind::Print),
            Keyword::Return => Some(StatementKind::Return),
            Keyword::Input => Some(StatementKind::Input),
            Keyword::Call => Some(StatementKind::Call),
            Keyword::If => Some(StatementKind::If),
            Keyword::While => Some(StatementKind::While),
            Keyword::Function => Some(StatementKind::Function),
            Keyword::To | Keyword::Then | Keyword::Else | Keyword::End | Keyword::Do => None,
        }
    }
}

impl Parser<'_> {
    /// Parse `statement+` up to end of input or a block-closing keyword.
    pub(crate) fn parse_statement_list(&mut self) -> Result<Block> {
        self.descend(|parser| {
            let mut block = parser.parse_statement()?;

            while !parser.is_at_end()
                && !parser.check_keyword(Keyword::End)
                && !parser.check_keyword(Keyword::Else)
            {
                block.append(parser.parse_statement()?);
            }

            Ok(block)
        })
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Block> {
        let kind = match self.peek() {
            TokenKind::Keyword(keyword) => StatementKind::from_keyword(*keyword),
            _ => None,
        };
        let Some(kind) = kind else {
            return Err(self.error("a statement"));
        };
        self.advance()?;

        let line = match kind {
            StatementKind::Set => {
                let name = self.expect_identifier()?;
                self.expect_keyword(Keyword::To)?;
                let value = self.parse_expression()?;
                format!("{} = {}", name, value)
            }
            StatementKind::Print => format!("print({})", self.parse_expression()?),
            StatementKind::Return => format!("return {}", self.parse_expression()?),
            StatementKind::Input => format!("{} = input()", self.expect_identifier()?),
            StatementKind::Call => {
                let name = self.expect_identifier()?;
                // arguments are not supported, only an empty pair
                if self.match_kind(&TokenKind::LParen)? {
                    self.expect(&TokenKind::RParen)?;
                }
                format!("{}()", name)
            }
            StatementKind::If => return self.parse_if_statement(),
            StatementKind::While => return self.parse_while_statement(),
            StatementKind::Function => return self.parse_function_definition(),
        };

        self.expect_newline()?;
        Ok(Block::single(line))
    }

    /// Parse `if`, after the keyword
    fn parse_if_statement(&mut self) -> Result<Block> {
        let condition = self.parse_expression()?;
        self.expect_keyword(Keyword::Then)?;
        self.expect_newline()?;
        let then_body = self.parse_statement_list()?;

        let mut block = Block::single(format!("if {}:", condition));
        block.nested(&then_body);

        if self.match_keyword(Keyword::Else)? {
            self.expect_newline()?;
            let else_body = self.parse_statement_list()?;
            block.line("else:").nested(&else_body);
        }

        self.expect_block_end()?;
        Ok(block)
    }

    /// Parse `while`, after the keyword
    fn parse_while_statement(&mut self) -> Result<Block> {
        let condition = self.parse_expression()?;
        self.expect_keyword(Keyword::Do)?;
        self.expect_newline()?;
        let body = self.parse_statement_list()?;
        self.expect_block_end()?;

        let mut block = Block::single(format!("while {}:", condition));
        block.nested(&body);
        Ok(block)
    }

    /// Parse function definition, after the keyword
    fn parse_function_definition(&mut self) -> Result<Block> {
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LParen)?;
        self.expect(&TokenKind::RParen)?;
        self.expect_newline()?;
        let body = self.parse_statement_list()?;
        self.expect_block_end()?;

        let mut block = Block::single(format!("def {}():", name));
        block.nested(&body);
        Ok(block)
    }

    fn expect_block_end(&mut self) -> Result<()> {
        self.expect_keyword(Keyword::End)?;
        self.expect_newline()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::TranslationError;
    use crate::parser::lexer::{Keyword, TokenKind};
    use crate::parser::parse::Parser;

    fn parse(source: &str) -> Result<String, TranslationError> {
        Parser::new(source)?.parse_program().map(|block| block.render())
    }

    fn syntax_error(source: &str) -> crate::error::SyntaxError {
        match parse(source) {
            Err(TranslationError::Syntax(e)) => e,
            other => panic!("Expected syntax error, got {:?}", other),
        }
    }

    #[test]
    fn test_if_else() {
        let output = parse("if x == 1 then\nprint \"one\"\nelse\nprint \"other\"\nend\n").unwrap();

        assert_eq!(
            output,
            "if (x == 1):\n    print(\"one\")\nelse:\n    print(\"other\")"
        );
    }

    #[test]
    fn test_function_with_return() {
        let output = parse("function answer()\nreturn 42\nend\n").unwrap();

        assert_eq!(output, "def answer():\n    return 42");
    }

    #[test]
    fn test_call_with_empty_parens() {
        assert_eq!(parse("call greet()\n").unwrap(), "greet()");
        assert_eq!(parse("CALL greet\n").unwrap(), "greet()");
    }

    #[test]
    fn test_call_with_arguments_is_rejected() {
        let err = syntax_error("call greet(1)\n");

        assert_eq!(err.found, TokenKind::Number("1".to_string()));
        assert_eq!(err.expected, "')'");
    }

    #[test]
    fn test_nested_blocks_indent_per_level() {
        let source = "function f()\nwhile i < 3 do\nif i == 1 then\nprint i\nend\nset i to i + 1\nend\nend\n";
        let output = parse(source).unwrap();

        assert_eq!(
            output,
            "def f():\n    while (i < 3):\n        if (i == 1):\n            print(i)\n        i = (i + 1)"
        );
    }

    #[test]
    fn test_empty_body_is_rejected() {
        let err = syntax_error("while x do\nend\n");

        assert_eq!(err.found, TokenKind::Keyword(Keyword::End));
        assert_eq!(err.expected, "a statement");
    }

    #[test]
    fn test_else_in_while_is_rejected() {
        let err = syntax_error("while x do\nprint x\nelse\nprint 1\nend\n");

        assert_eq!(err.found, TokenKind::Keyword(Keyword::Else));
        assert_eq!(err.expected, "'end'");
    }

    #[test]
    fn test_unclosed_if_fails_at_end_of_input() {
        let err = syntax_error("if x > 1 then\nprint x\n");

        assert!(err.at_end_of_input());
        assert_eq!(err.expected, "'end'");
    }

    #[test]
    fn test_missing_then() {
        let err = syntax_error("if x > 1\nprint x\nend\n");

        assert_eq!(err.found, TokenKind::Newline);
        assert_eq!(err.expected, "'then'");
    }

    #[test]
    fn test_set_requires_to() {
        let err = syntax_error("set x 5\n");

        assert_eq!(err.found, TokenKind::Number("5".to_string()));
    }
}
