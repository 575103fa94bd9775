// Indented code line grammar
//
// Exactly four spaces or a single tab at the start of the line, then the
// rest of the line verbatim. The assembler only tries this alternative when
// the previous raw block is not a paragraph body (a 4-space line after a
// paragraph is a lazy continuation), and merges consecutive code lines.

use crate::grammar::shared::{line_text, Span};
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::IResult;

pub fn indented_code_line(input: Span) -> IResult<Span, Span> {
    let (input, _) = alt((tag("    "), tag("\t")))(input)?;
    line_text(input)
}
