//! Line-based code builder for generated Python
//!
//! A [`Block`] is an ordered list of complete lines with no trailing line
//! terminator. Nested bodies are produced by [`indent`], which prefixes each
//! line of an already-built block with one indent unit. Since a nested block
//! is indented again by every enclosing block, nesting depth never has to be
//! tracked explicitly.

/// One level of indentation in the generated code.
pub const INDENT_UNIT: &str = "    ";

/// Prefix every line with exactly one indent unit.
pub fn indent(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .map(|line| format!("{INDENT_UNIT}{line}"))
        .collect()
}

/// Ordered sequence of generated lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    lines: Vec<String>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// A block holding a single line.
    pub fn single(line: impl Into<String>) -> Self {
        Self {
            lines: vec![line.into()],
        }
    }

    /// Append one line.
    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    /// Append all lines of `other`, keeping their order.
    pub fn append(&mut self, other: Block) -> &mut Self {
        self.lines.extend(other.lines);
        self
    }

    /// Append `body` one indent unit deeper than this block's own lines.
    pub fn nested(&mut self, body: &Block) -> &mut Self {
        self.lines.extend(indent(&body.lines));
        self
    }

    /// Copy of this block shifted right by one indent unit.
    pub fn indented(&self) -> Block {
        Block {
            lines: indent(&self.lines),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join lines with `\n`. No trailing terminator.
    pub fn render(&self) -> String {
        self.lines.join("\n")
    }
}

impl From<Vec<String>> for Block {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_prefixes_each_line() {
        let lines = vec!["a = 1".to_string(), "print(a)".to_string()];

        assert_eq!(indent(&lines), vec!["    a = 1", "    print(a)"]);
    }

    #[test]
    fn test_indent_is_cumulative() {
        let mut inner = Block::single("if (x > 1):");
        inner.nested(&Block::single("print(x)"));

        let mut outer = Block::single("while (x < 5):");
        outer.nested(&inner);

        assert_eq!(
            outer.render(),
            "while (x < 5):\n    if (x > 1):\n        print(x)"
        );
    }

    #[test]
    fn test_indented_leaves_original() {
        let block = Block::from(vec!["x = 1".to_string(), "    y = 2".to_string()]);

        assert_eq!(block.indented().lines(), ["    x = 1", "        y = 2"]);
        assert_eq!(block.lines(), ["x = 1", "    y = 2"]);
    }

    #[test]
    fn test_render_has_no_trailing_newline() {
        let mut block = Block::new();
        block.line("x = 5").line("print(x)");

        assert_eq!(block.render(), "x = 5\nprint(x)");
        assert!(Block::new().render().is_empty());
    }

    #[test]
    fn test_append_keeps_order() {
        let mut block = Block::single("a = 1");
        block.append(Block::from(vec!["b = 2".to_string(), "c = 3".to_string()]));

        assert_eq!(block.lines(), ["a = 1", "b = 2", "c = 3"]);
    }
}
