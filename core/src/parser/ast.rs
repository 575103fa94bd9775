// AST node definitions: the public output of the parser

use serde::{Deserialize, Serialize};

/// Heading level, H1 through H6. Hash runs of seven or more never reach
/// this type; the conversion from the raw level is checked in the tree
/// mapper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    pub fn from_raw(level: u8) -> Option<Self> {
        match level {
            1 => Some(HeadingLevel::H1),
            2 => Some(HeadingLevel::H2),
            3 => Some(HeadingLevel::H3),
            4 => Some(HeadingLevel::H4),
            5 => Some(HeadingLevel::H5),
            6 => Some(HeadingLevel::H6),
            _ => None,
        }
    }

}

/// Block-level node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Block {
    Heading {
        level: HeadingLevel,
        inlines: Vec<Inline>,
    },
    Paragraph(Vec<Inline>),
    BlockQuote(Vec<Block>),
    /// Fenced and indented code; indented code has `language: None`
    CodeBlock {
        language: Option<String>,
        body: String,
    },
    ThematicBreak,
    UnorderedList(Vec<ListItem>),
    OrderedList {
        start: u32,
        items: Vec<Vec<Inline>>,
    },
    /// Header cells with alignment; body rows are deferred and always empty
    Table {
        header: Vec<TableCell>,
        rows: Vec<Vec<Vec<Inline>>>,
    },
    Html(HtmlNode),
}

/// Inline-level node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Inline {
    Text(String),
    CodeSpan(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Link {
        destination: String,
        title: Option<String>,
        inlines: Vec<Inline>,
    },
    Image {
        source: String,
        title: Option<String>,
        alt: Vec<Inline>,
    },
    HardLineBreak,
    Html(HtmlNode),
}

/// One item of an unordered list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListItem {
    pub task: Task,
    pub inlines: Vec<Inline>,
}

/// Task checkbox state of a list item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Task {
    /// Plain item, no checkbox
    None,
    /// `[ ]`
    Incomplete,
    /// `[x]` or `[X]`
    Complete,
}

/// One header cell of a table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
    pub label: Vec<Inline>,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alignment {
    None,
    Left,
    Center,
    Right,
}

/// A node produced by the raw HTML subparser; payloads are the raw source
/// text including markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HtmlNode {
    Element(String),
    Comment(String),
    Cdata(String),
    ProcessingInstruction(String),
    Declaration(String),
}

impl Inline {
    /// Plain text content of this inline, links flattened and markers
    /// dropped.
    pub fn text_content(&self) -> String {
        match self {
            Inline::Text(text) | Inline::CodeSpan(text) => text.clone(),
            Inline::Emphasis(inner) | Inline::Strong(inner) => collect_text(inner),
            Inline::Link { inlines, .. } => collect_text(inlines),
            Inline::Image { alt, .. } => collect_text(alt),
            Inline::HardLineBreak => "\n".to_string(),
            Inline::Html(_) => String::new(),
        }
    }
}

fn collect_text(inlines: &[Inline]) -> String {
    inlines.iter().map(Inline::text_content).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_heading_level_from_raw() {
        assert_eq!(HeadingLevel::from_raw(1), Some(HeadingLevel::H1));
        assert_eq!(HeadingLevel::from_raw(6), Some(HeadingLevel::H6));
        assert_eq!(HeadingLevel::from_raw(0), None);
        assert_eq!(HeadingLevel::from_raw(7), None);
    }

    #[test]
    fn smoke_test_text_content_flattens_nesting() {
        let inline = Inline::Strong(vec![
            Inline::Text("a ".into()),
            Inline::Emphasis(vec![Inline::Text("b".into())]),
        ]);
        assert_eq!(inline.text_content(), "a b");
    }

    #[test]
    fn smoke_test_ast_serializes() {
        let block = Block::Paragraph(vec![Inline::Text("hi".into())]);
        let json = serde_json::to_string(&block).unwrap();
        let back: Block = serde_json::from_str(&json).unwrap();
        assert_eq!(block, back);
    }
}
