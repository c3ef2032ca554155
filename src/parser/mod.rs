//! Pseudocode parser and translator
//!
//! This module turns pseudocode text into Python text in a single pass:
//! - [`lexer`]: Tokenization (source text → lazy token stream)
//! - [`parse`]: Parser struct, token helpers, program entry point
//! - `statements`: statement rules and block structure
//! - `expressions`: operator precedence and atoms
//!
//! # Supported Pseudocode
//!
//! - Statements: `set`, `print`, `input`, `call`, `return`
//! - Blocks: `if … then … [else …] end`, `while … do … end`,
//!   `function name() … end`
//! - Expressions: integers, double-quoted strings, identifiers, parentheses,
//!   `+ - * /` and `== != < <= > >=`
//! - Keywords are case-insensitive; identifiers are not
//!
//! # Parser Implementation
//!
//! Hand-written LL(1) recursive descent with precedence climbing for binary
//! operators. Translation is synthesized during parsing; there is no AST.

pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;

pub use parse::Parser;
