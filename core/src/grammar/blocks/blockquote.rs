// Blockquote line grammar
//
// Recognizes a single `>` line: 0-3 leading spaces, the marker, an optional
// space, then the rest of the line as the captured interior. Consecutive
// blockquote lines and lazy paragraph continuations are merged by the
// assembler; the interior is re-parsed as its own document by the tree
// mapper.

use crate::grammar::shared::{leading_spaces_max3, line_text, Span};
use nom::character::complete::char;
use nom::combinator::opt;
use nom::IResult;

pub fn blockquote_line(input: Span) -> IResult<Span, Span> {
    log::debug!(
        "Trying blockquote line at: {:?}",
        crate::logging::safe_preview(input.fragment(), 40)
    );

    let (input, _) = leading_spaces_max3(input)?;
    let (input, _) = char('>')(input)?;
    let (input, _) = opt(char(' '))(input)?;
    line_text(input)
}
