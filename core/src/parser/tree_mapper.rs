// Tree mapper: third stage, raw blocks to the final block tree
//
// Walks the raw-block list in document order, runs the inline tokenizer on
// every body that carries inlines, and lifts blockquote interiors by
// re-running the block pass on them. Blank lines and empty paragraphs are
// dropped here.

use crate::parser::ast::{Block, HeadingLevel, ListItem, TableCell};
use crate::parser::block_parser;
use crate::parser::error::ParseError;
use crate::parser::inline_parser::tokenize;
use crate::parser::options::ParseOptions;
use crate::parser::raw_block::{LinkTable, RawBlock, State};

/// Map an assembled state into the public tree. The definition table is
/// frozen here, before any inline parsing, so forward references resolve.
pub(crate) fn map_document(
    state: State,
    options: &ParseOptions,
) -> Result<Vec<Block>, ParseError> {
    let table = LinkTable::from_defs(&state.link_defs);
    map_blocks(state.raw_blocks, &table, options, 0)
}

pub(crate) fn map_blocks(
    raw_blocks: Vec<RawBlock>,
    table: &LinkTable,
    options: &ParseOptions,
    depth: usize,
) -> Result<Vec<Block>, ParseError> {
    let mut blocks = Vec::new();

    for raw in raw_blocks {
        match raw {
            RawBlock::BlankLine => {}
            RawBlock::Body(text) => {
                let inlines = tokenize(text.as_str(), table, options, depth)?;
                // Paragraphs never carry an empty inline list
                if !inlines.is_empty() {
                    blocks.push(Block::Paragraph(inlines));
                }
            }
            RawBlock::Heading(level, text) => {
                let level = HeadingLevel::from_raw(level)
                    .ok_or(ParseError::HeadingLevel { level })?;
                let inlines = tokenize(text.as_str(), table, options, depth)?;
                blocks.push(Block::Heading { level, inlines });
            }
            RawBlock::BlockQuote(text) => {
                if depth + 1 >= options.max_depth {
                    return Err(ParseError::NestingLimit {
                        limit: options.max_depth,
                    });
                }
                let interior = block_parser::assemble(text.as_str())?;
                // Definitions inside the quote extend the outer table for
                // the interior's own inline pass; the outer table wins on
                // collisions because it was defined first
                let mut interior_table = table.clone();
                interior_table.extend(&interior.link_defs);
                let children =
                    map_blocks(interior.raw_blocks, &interior_table, options, depth + 1)?;
                blocks.push(Block::BlockQuote(children));
            }
            RawBlock::CodeBlock { language, body } => {
                blocks.push(Block::CodeBlock { language, body });
            }
            RawBlock::IndentedCodeBlock(body) => {
                blocks.push(Block::CodeBlock {
                    language: None,
                    body,
                });
            }
            RawBlock::ThematicBreak => blocks.push(Block::ThematicBreak),
            RawBlock::UnorderedList(items) => {
                let items = items
                    .into_iter()
                    .map(|item| {
                        Ok(ListItem {
                            task: item.task,
                            inlines: tokenize(item.body.as_str(), table, options, depth)?,
                        })
                    })
                    .collect::<Result<Vec<_>, ParseError>>()?;
                blocks.push(Block::UnorderedList(items));
            }
            RawBlock::OrderedList(start, bodies) => {
                let items = bodies
                    .iter()
                    .map(|body| tokenize(body.as_str(), table, options, depth))
                    .collect::<Result<Vec<_>, ParseError>>()?;
                blocks.push(Block::OrderedList { start, items });
            }
            RawBlock::Html(node) => blocks.push(Block::Html(node)),
            RawBlock::Table(cells) => {
                let header = cells
                    .into_iter()
                    .map(|cell| {
                        Ok(TableCell {
                            label: tokenize(cell.text.as_str(), table, options, depth)?,
                            alignment: cell.alignment,
                        })
                    })
                    .collect::<Result<Vec<_>, ParseError>>()?;
                blocks.push(Block::Table {
                    header,
                    rows: Vec::new(),
                });
            }
        }
    }

    Ok(blocks)
}
