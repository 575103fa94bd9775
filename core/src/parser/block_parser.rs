// Block-level parser: first stage of two-stage parsing
//
// Drives the block grammar alternatives in order over the input, one line
// group at a time, and accumulates raw blocks and link reference
// definitions in `State`. Merge rules run on every push, so the pass stays
// O(input) and never rescans.

use crate::grammar::blocks as grammar;
use crate::grammar::blocks::{ColumnAlign, HtmlKind};
use crate::grammar::Span;
use crate::parser::ast::{Alignment, HtmlNode};
use crate::parser::error::ParseError;
use crate::parser::raw_block::{
    split_task_marker, RawBlock, RawListItem, RawTableCell, State, UnparsedInlines,
};

/// Run the raw-block pass over the whole input.
pub(crate) fn assemble(input: &str) -> Result<State, ParseError> {
    log::debug!("Block parser input: {} bytes", input.len());

    let mut state = State::new();
    let mut remaining = Span::new(input);

    while !remaining.fragment().is_empty() {
        // Lines like "<https://…>" or "<user@host>" are paragraph
        // material for the inline pass; this must pre-empt HTML blocks.
        if grammar::autolink_guard(remaining) {
            let (rest, line) = grammar::paragraph_line(remaining).map_err(|_| {
                ParseError::Lex {
                    row: remaining.location_line() as usize,
                }
            })?;
            state.push(RawBlock::Body(UnparsedInlines::new(*line.fragment())));
            remaining = rest;
            continue;
        }

        // Link reference definitions feed the table and produce no block
        if let Ok((rest, (label, destination, title))) =
            grammar::link_reference_definition(remaining)
        {
            state.define_link(&label, destination, title);
            remaining = rest;
            continue;
        }

        if let Ok((rest, _)) = grammar::blank_line(remaining) {
            state.push(RawBlock::BlankLine);
            remaining = rest;
            continue;
        }

        if let Ok((rest, interior)) = grammar::blockquote_line(remaining) {
            state.push(RawBlock::BlockQuote(UnparsedInlines::new(
                *interior.fragment(),
            )));
            remaining = rest;
            continue;
        }

        if let Ok((rest, block)) = grammar::fenced_code_block(remaining) {
            state.push(RawBlock::CodeBlock {
                language: block.language.map(|l| l.fragment().to_string()),
                body: block.body.fragment().to_string(),
            });
            remaining = rest;
            continue;
        }

        // A 4-space line directly after a paragraph is a lazy
        // continuation, not code
        if !matches!(state.raw_blocks.last(), Some(RawBlock::Body(_))) {
            if let Ok((rest, body)) = grammar::indented_code_line(remaining) {
                state.push(RawBlock::IndentedCodeBlock(body.fragment().to_string()));
                remaining = rest;
                continue;
            }
        }

        if let Ok((rest, _)) = grammar::thematic_break(remaining) {
            state.push(RawBlock::ThematicBreak);
            remaining = rest;
            continue;
        }

        if let Ok((rest, items)) = grammar::unordered_list(remaining) {
            let items = items
                .into_iter()
                .map(|body| {
                    let (task, body) = split_task_marker(body.fragment());
                    RawListItem {
                        task,
                        body: UnparsedInlines::new(body),
                    }
                })
                .collect();
            state.push(RawBlock::UnorderedList(items));
            remaining = rest;
            continue;
        }

        if let Ok((rest, (start, items))) = grammar::ordered_list(remaining) {
            // Inside a paragraph an ordered list may only start at 1;
            // otherwise the marker line becomes a fresh paragraph of its
            // own (it does not merge into the preceding body).
            let in_paragraph = matches!(state.raw_blocks.last(), Some(RawBlock::Body(_)));
            if in_paragraph && start != 1 {
                let (rest, line) = grammar::paragraph_line(remaining).map_err(|_| {
                    ParseError::Lex {
                        row: remaining.location_line() as usize,
                    }
                })?;
                state.push_unmerged_body(line.fragment());
                remaining = rest;
                continue;
            }

            let items = items
                .into_iter()
                .map(|body| UnparsedInlines::new(*body.fragment()))
                .collect();
            state.push(RawBlock::OrderedList(start, items));
            remaining = rest;
            continue;
        }

        if let Ok((rest, (level, body))) = grammar::heading(remaining) {
            state.push(RawBlock::Heading(
                level,
                UnparsedInlines::new(*body.fragment()),
            ));
            remaining = rest;
            continue;
        }

        if let Ok((rest, columns)) = grammar::table_header(remaining) {
            let cells = columns
                .into_iter()
                .map(|column| RawTableCell {
                    text: UnparsedInlines::new(*column.text.fragment()),
                    alignment: map_alignment(column.align),
                })
                .collect();
            state.push(RawBlock::Table(cells));
            remaining = rest;
            continue;
        }

        if let Ok((rest, (kind, raw))) = grammar::html_block(remaining) {
            state.push(RawBlock::Html(html_node(kind, raw.fragment())));
            remaining = rest;
            continue;
        }

        if let Ok((rest, line)) = grammar::paragraph_line(remaining) {
            state.push(RawBlock::Body(UnparsedInlines::new(*line.fragment())));
            remaining = rest;
            continue;
        }

        // No alternative matched and we are not at the end
        return Err(ParseError::Lex {
            row: remaining.location_line() as usize,
        });
    }

    log::debug!(
        "Parsed {} raw blocks, {} link definitions",
        state.raw_blocks.len(),
        state.link_defs.len()
    );
    Ok(state)
}

fn map_alignment(align: ColumnAlign) -> Alignment {
    match align {
        ColumnAlign::None => Alignment::None,
        ColumnAlign::Left => Alignment::Left,
        ColumnAlign::Center => Alignment::Center,
        ColumnAlign::Right => Alignment::Right,
    }
}

pub(crate) fn html_node(kind: HtmlKind, raw: &str) -> HtmlNode {
    match kind {
        HtmlKind::Element => HtmlNode::Element(raw.to_string()),
        HtmlKind::Comment => HtmlNode::Comment(raw.to_string()),
        HtmlKind::Cdata => HtmlNode::Cdata(raw.to_string()),
        HtmlKind::ProcessingInstruction => HtmlNode::ProcessingInstruction(raw.to_string()),
        HtmlKind::Declaration => HtmlNode::Declaration(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Task;

    fn blocks(input: &str) -> Vec<RawBlock> {
        assemble(input).expect("block pass failed").raw_blocks
    }

    fn body(text: &str) -> RawBlock {
        RawBlock::Body(UnparsedInlines::new(text))
    }

    #[test]
    fn smoke_test_assemble_merges_paragraph_lines() {
        assert_eq!(blocks("Line 1\nLine 2\n"), vec![body("Line 1\nLine 2")]);
    }

    #[test]
    fn smoke_test_assemble_blank_line_separates_paragraphs() {
        assert_eq!(
            blocks("one\n\ntwo\n"),
            vec![body("one"), RawBlock::BlankLine, body("two")]
        );
    }

    #[test]
    fn smoke_test_assemble_blockquote_lazy_continuation() {
        assert_eq!(
            blocks("> a\nb\n"),
            vec![RawBlock::BlockQuote(UnparsedInlines::new("a\nb"))]
        );
    }

    #[test]
    fn smoke_test_assemble_indented_code_after_paragraph_is_continuation() {
        assert_eq!(blocks("text\n    more\n"), vec![body("text\n    more")]);
    }

    #[test]
    fn smoke_test_assemble_indented_code_block() {
        assert_eq!(
            blocks("    code\n    more\n"),
            vec![RawBlock::IndentedCodeBlock("code\nmore".into())]
        );
    }

    #[test]
    fn smoke_test_assemble_ordered_list_in_paragraph_requires_one() {
        assert_eq!(
            blocks("paragraph\n2. item\n"),
            vec![body("paragraph"), body("2. item")]
        );
        assert_eq!(
            blocks("paragraph\n1. item\n"),
            vec![
                body("paragraph"),
                RawBlock::OrderedList(1, vec![UnparsedInlines::new("item")]),
            ]
        );
    }

    #[test]
    fn smoke_test_assemble_task_items() {
        let blocks = blocks("- [x] done\n- [ ] open\n- plain\n");
        let RawBlock::UnorderedList(items) = &blocks[0] else {
            panic!("expected unordered list, got {:?}", blocks);
        };
        assert_eq!(items[0].task, Task::Complete);
        assert_eq!(items[0].body, UnparsedInlines::new("done"));
        assert_eq!(items[1].task, Task::Incomplete);
        assert_eq!(items[2].task, Task::None);
    }

    #[test]
    fn smoke_test_assemble_link_definition_produces_no_block() {
        let state = assemble("[ref]: /url \"title\"\n").unwrap();
        assert!(state.raw_blocks.is_empty());
        assert_eq!(state.link_defs.len(), 1);
    }

    #[test]
    fn smoke_test_assemble_autolink_guard_line_is_paragraph() {
        assert_eq!(
            blocks("<https://example.com>\n"),
            vec![body("<https://example.com>")]
        );
    }

    #[test]
    fn smoke_test_assemble_html_block() {
        let blocks = blocks("<div>\ncontent\n</div>\n");
        assert_eq!(
            blocks,
            vec![RawBlock::Html(HtmlNode::Element(
                "<div>\ncontent\n</div>".into()
            ))]
        );
    }

    #[test]
    fn smoke_test_assemble_indented_break_is_code() {
        assert_eq!(
            blocks("    ---\n"),
            vec![RawBlock::IndentedCodeBlock("---".into())]
        );
    }
}
