// Blank line grammar
//
// A blank line is any run of spaces and tabs followed by a newline (or by
// the end of input when at least one character was consumed). Runs of blank
// lines are collapsed by the assembler, not here.

use crate::grammar::shared::{is_space_or_tab, Span};
use nom::bytes::complete::take_while;
use nom::character::complete::char;
use nom::IResult;

pub fn blank_line(input: Span) -> IResult<Span, ()> {
    let start = input;

    let (input, ws) = take_while(is_space_or_tab)(input)?;

    // Newline terminates the blank line; a whitespace-only final line
    // without a newline also counts.
    if let Ok((rest, _)) = char::<_, nom::error::Error<Span>>('\n')(input) {
        return Ok((rest, ()));
    }
    if input.fragment().is_empty() && !ws.fragment().is_empty() {
        return Ok((input, ()));
    }

    Err(nom::Err::Error(nom::error::Error::new(
        start,
        nom::error::ErrorKind::Char,
    )))
}
