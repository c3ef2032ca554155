//! Expression translation
//!
//! Binary operators are parsed by precedence climbing. Every operator
//! application is wrapped in its own pair of parentheses in the output, so
//! the generated code never relies on Python's precedence table.
//!
//! # Precedence
//!
//! From loosest to tightest, all left-associative:
//!
//! 1. `==` `!=` `<` `<=` `>` `>=`
//! 2. `+` `-`
//! 3. `*` `/`
//!
//! There are no unary operators: `-5` is not an expression.

use crate::error::Result;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    // Comparison
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinOp {
    pub fn from_token(kind: &TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => BinOp::Add,
            TokenKind::Minus => BinOp::Sub,
            TokenKind::Star => BinOp::Mul,
            TokenKind::Slash => BinOp::Div,
            TokenKind::EqEq => BinOp::Eq,
            TokenKind::NotEq => BinOp::Ne,
            TokenKind::Lt => BinOp::Lt,
            TokenKind::Le => BinOp::Le,
            TokenKind::Gt => BinOp::Gt,
            TokenKind::Ge => BinOp::Ge,
            _ => return None,
        };
        Some(op)
    }

    /// Operator text in the generated Python. Identical to the source spelling.
    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        }
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 1,
            BinOp::Add | BinOp::Sub => 2,
            BinOp::Mul | BinOp::Div => 3,
        }
    }
}

impl Parser<'_> {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<String> {
        self.parse_binary(1)
    }

    /// Parse operators binding at least as tightly as `min_precedence`
    fn parse_binary(&mut self, min_precedence: u8) -> Result<String> {
        let mut left = self.parse_primary()?;

        while let Some(op) = BinOp::from_token(self.peek()) {
            if op.precedence() < min_precedence {
                break;
            }
            self.advance()?;

            // +1 makes every level left-associative
            let right = self.parse_binary(op.precedence() + 1)?;
            left = format!("({} {} {})", left, op.symbol(), right);
        }

        Ok(left)
    }

    /// Parse a literal, identifier or parenthesized expression
    fn parse_primary(&mut self) -> Result<String> {
        let text = match self.peek() {
            TokenKind::Number(digits) => digits.clone(),
            TokenKind::Str(s) => s.clone(),
            TokenKind::Ident(name) => name.clone(),
            TokenKind::LParen => {
                return self.descend(|parser| {
                    parser.advance()?;
                    let inner = parser.parse_expression()?;
                    parser.expect(&TokenKind::RParen)?;
                    Ok(format!("({})", inner))
                });
            }
            _ => return Err(self.error("an expression")),
        };

        self.advance()?;
        Ok(text)
    }
}
