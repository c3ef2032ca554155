//! # Introduction
//!
//! pseudopy translates a small structured pseudocode language into Python
//! source text. Translation is syntax-directed: the parser produces the Python
//! text of each construct directly as it recognizes it, with no syntax tree in
//! between.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser (+ Emitter) → Python text → Runner → Output
//! ```
//!
//! 1. [`parser`] — tokenises the source lazily and translates it rule by rule.
//! 2. [`emitter`] — line-based builder that owns all indentation.
//! 3. [`translate`] — the driver: one call, one complete result or one error.
//! 4. [`runner`] — executes generated code in a separate Python process.
//! 5. [`ui`] — ratatui-based viewer; not part of the stable library API.
//!
//! ## Example
//!
//! ```
//! let python = pseudopy::translate("set x to 5\nprint x").unwrap();
//! assert_eq!(python, "x = 5\nprint(x)");
//! ```
//!
//! ## Pseudocode
//!
//! Statements: `set X to E`, `print E`, `input X`, `call F`, `return E`.
//! Blocks: `if C then … [else …] end`, `while C do … end`,
//! `function F() … end`. One statement per line.

pub mod emitter;
pub mod error;
pub mod parser;
pub mod runner;
pub mod translate;
pub mod ui;

pub use error::{SyntaxError, TranslationError};
pub use parser::lexer::LexError;
pub use translate::{tokenize, translate};
