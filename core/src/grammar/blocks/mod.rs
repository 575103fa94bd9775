// Block-level grammar modules
//
// Each module recognizes one raw-block construct. A recognizer either
// consumes a full line group (leaving the cursor just past the trailing
// newline, or at end of input) or fails without consuming, so the
// assembler can try the next alternative.

pub mod blank_line;
pub mod blockquote;
pub mod fenced_code_block;
pub mod heading;
pub mod html_block;
pub mod indented_code_block;
pub mod link_reference;
pub mod list;
pub mod paragraph;
pub mod table;
pub mod thematic_break;

pub use blank_line::blank_line;
pub use blockquote::blockquote_line;
pub use fenced_code_block::{fenced_code_block, FencedCodeBlock};
pub use heading::heading;
pub use html_block::{html_block, HtmlKind};
pub use indented_code_block::indented_code_line;
pub use link_reference::link_reference_definition;
pub use list::{ordered_list, unordered_list};
pub use paragraph::{autolink_guard, paragraph_line};
pub use table::{table_header, ColumnAlign, TableColumn};
pub use thematic_break::thematic_break;
