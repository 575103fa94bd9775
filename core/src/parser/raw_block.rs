// Raw blocks: the intermediate, inline-unparsed representation produced by
// the block pass. Raw blocks are ephemeral; the tree mapper consumes them.

use std::collections::HashMap;

use crate::parser::ast::{Alignment, HtmlNode, Task};

/// A raw substring that still needs inline tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UnparsedInlines(String);

impl UnparsedInlines {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// Merge a following source line into this one.
    pub fn append_line(&mut self, line: &str) {
        self.0.push('\n');
        self.0.push_str(line);
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RawBlock {
    /// One or more blank lines, collapsed to one
    BlankLine,
    Heading(u8, UnparsedInlines),
    /// One or more merged paragraph lines
    Body(UnparsedInlines),
    /// Interior text of a blockquote, lines joined with `\n`
    BlockQuote(UnparsedInlines),
    CodeBlock {
        language: Option<String>,
        body: String,
    },
    IndentedCodeBlock(String),
    ThematicBreak,
    UnorderedList(Vec<RawListItem>),
    OrderedList(u32, Vec<UnparsedInlines>),
    Html(HtmlNode),
    Table(Vec<RawTableCell>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawListItem {
    pub task: Task,
    pub body: UnparsedInlines,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RawTableCell {
    pub text: UnparsedInlines,
    pub alignment: Alignment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LinkReferenceDefinition {
    pub label: String,
    pub destination: String,
    pub title: Option<String>,
}

/// Block-pass accumulator: raw blocks in document order plus the link
/// reference definitions encountered along the way.
#[derive(Debug, Default)]
pub(crate) struct State {
    pub link_defs: Vec<LinkReferenceDefinition>,
    pub raw_blocks: Vec<RawBlock>,
}

impl State {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a raw block, applying the merge rules against the top of the
    /// stack:
    /// - consecutive bodies join with `\n`;
    /// - a body after a blockquote is absorbed into it (lazy continuation);
    /// - consecutive blockquotes and consecutive code blocks of the same
    ///   kind concatenate;
    /// - consecutive blank lines collapse.
    pub fn push(&mut self, incoming: RawBlock) {
        let unmerged = match (self.raw_blocks.last_mut(), incoming) {
            (Some(RawBlock::Body(top)), RawBlock::Body(text)) => {
                top.append_line(text.as_str());
                None
            }
            (Some(RawBlock::BlockQuote(top)), RawBlock::Body(text)) => {
                top.append_line(text.as_str());
                None
            }
            (Some(RawBlock::BlockQuote(top)), RawBlock::BlockQuote(text)) => {
                top.append_line(text.as_str());
                None
            }
            (
                Some(RawBlock::CodeBlock { body: top, .. }),
                RawBlock::CodeBlock { body, .. },
            ) => {
                // The merged block keeps the first language tag
                top.push('\n');
                top.push_str(&body);
                None
            }
            (Some(RawBlock::IndentedCodeBlock(top)), RawBlock::IndentedCodeBlock(body)) => {
                top.push('\n');
                top.push_str(&body);
                None
            }
            (Some(RawBlock::BlankLine), RawBlock::BlankLine) => None,
            (_, incoming) => Some(incoming),
        };

        if let Some(block) = unmerged {
            self.raw_blocks.push(block);
        }
    }

    /// Push a body that starts a fresh paragraph even when the top of the
    /// stack is a body (the rejected-ordered-list fallthrough).
    pub fn push_unmerged_body(&mut self, text: &str) {
        self.raw_blocks.push(RawBlock::Body(UnparsedInlines::new(text)));
    }

    /// Record a link reference definition; the first definition of a
    /// normalized label wins.
    pub fn define_link(&mut self, label: &str, destination: String, title: Option<String>) {
        let label = normalize_label(label);
        if self.link_defs.iter().any(|def| def.label == label) {
            log::debug!("Duplicate link reference [{}] ignored", label);
            return;
        }
        self.link_defs.push(LinkReferenceDefinition {
            label,
            destination,
            title,
        });
    }
}

/// Frozen label table consulted by the inline pass.
#[derive(Debug, Clone, Default)]
pub(crate) struct LinkTable {
    entries: HashMap<String, (String, Option<String>)>,
}

impl LinkTable {
    pub fn from_defs(defs: &[LinkReferenceDefinition]) -> Self {
        let mut table = Self::default();
        table.extend(defs);
        table
    }

    /// Add definitions that do not collide with existing labels. Used to
    /// layer blockquote-interior definitions over the outer table.
    pub fn extend(&mut self, defs: &[LinkReferenceDefinition]) {
        for def in defs {
            self.entries
                .entry(def.label.clone())
                .or_insert_with(|| (def.destination.clone(), def.title.clone()));
        }
    }

    pub fn lookup(&self, label: &str) -> Option<&(String, Option<String>)> {
        self.entries.get(&normalize_label(label))
    }
}

/// Normalize a link label: lowercase, internal whitespace runs collapsed
/// to a single space, trimmed.
pub(crate) fn normalize_label(label: &str) -> String {
    label
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split a task checkbox marker off the front of a list item body.
pub(crate) fn split_task_marker(body: &str) -> (Task, &str) {
    let task = if body.starts_with("[ ]") {
        Task::Incomplete
    } else if body.starts_with("[x]") || body.starts_with("[X]") {
        Task::Complete
    } else {
        return (Task::None, body);
    };

    // The checkbox must end the body or be followed by a space
    let rest = &body[3..];
    match rest.chars().next() {
        None => (task, rest),
        Some(' ') => (task, &rest[1..]),
        Some(_) => (Task::None, body),
    }
}
