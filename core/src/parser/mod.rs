// Parser layer: two-phase document parsing
//
// Phase one (block pass) scans raw blocks and collects link reference
// definitions. Phase two (tree mapping + inline pass) resolves inlines
// against the frozen definition table and emits the final tree. The block
// pass must finish first so forward references resolve.

pub mod ast;
pub mod error;
pub mod options;

pub(crate) mod block_parser;
pub(crate) mod inline_parser;
pub(crate) mod inlines;
pub(crate) mod raw_block;
pub(crate) mod tree_mapper;

use ast::Block;
use error::ParseError;
use options::ParseOptions;

/// Parse a Markdown document into its block tree.
///
/// Returns either the complete tree or a non-empty error list; partial
/// trees are never returned. The input is expected to use `\n` line
/// separators.
pub fn parse(input: &str) -> Result<Vec<Block>, Vec<ParseError>> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse with an explicit nesting limit and reference strictness.
pub fn parse_with_options(
    input: &str,
    options: &ParseOptions,
) -> Result<Vec<Block>, Vec<ParseError>> {
    log::info!("Starting parse: {} bytes", input.len());

    let state = block_parser::assemble(input).map_err(|error| vec![error])?;
    let blocks = tree_mapper::map_document(state, options).map_err(|error| vec![error])?;

    log::debug!("Parsed {} blocks", blocks.len());
    Ok(blocks)
}
