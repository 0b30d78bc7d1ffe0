//! Layout options for synthesized text.

/// Options controlling how a compiled class is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecompilerOptions {
    /// Number of spaces per indentation level
    pub indent_width: usize,
    /// Emit the leading comment naming the class file
    pub header_comment: bool,
    /// Text placed inside every function and constructor body
    pub body_marker: String,
}

impl Default for DecompilerOptions {
    fn default() -> Self {
        Self {
            indent_width: 4,
            header_comment: true,
            body_marker: "/* compiled code */".to_string(),
        }
    }
}

impl DecompilerOptions {
    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        " ".repeat(self.indent_width * level)
    }
}
