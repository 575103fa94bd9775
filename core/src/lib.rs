// Nib Core Library - nom-based CommonMark parser

// Core modules: grammar → parser → AST
pub mod grammar;
pub mod logging;
pub mod parser;

// Re-export main API
pub use parser::ast::{
    Alignment, Block, HeadingLevel, HtmlNode, Inline, ListItem, TableCell, Task,
};
pub use parser::error::{error_to_string, ParseError};
pub use parser::options::ParseOptions;
pub use parser::{parse, parse_with_options};

// Re-export commonly used helpers
pub use logging::safe_preview;
