// Parser configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Maximum nesting depth for blockquote interiors, emphasis and link
    /// text re-entry. Exceeding it yields `ParseError::NestingLimit`
    /// instead of exhausting the stack.
    pub max_depth: usize,

    /// When set, a reference link whose label has no definition is an
    /// inline error instead of literal text.
    pub strict_references: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: 128,
            strict_references: false,
        }
    }
}
