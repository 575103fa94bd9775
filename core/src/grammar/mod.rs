// Grammar layer: nom recognizers for block and inline constructs
//
// Block grammars run over `nom_locate::LocatedSpan` so the assembler can
// report 1-based rows in errors. Inline grammars run over plain `&str`
// because inline bodies are re-parsed from sliced substrings and their
// positions are advisory.

pub mod blocks;
pub mod inlines;
pub mod shared;

pub use shared::Span;
