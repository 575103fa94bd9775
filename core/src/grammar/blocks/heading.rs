// ATX heading grammar
//
// 1-6 `#` characters at the start of the line, then a space, tab or end of
// line, then the heading body. A trailing run of `#` and any surrounding
// whitespace is stripped from the body. Seven or more hashes are not a
// heading; the line falls through to the paragraph alternative.

use crate::grammar::shared::{is_space_or_tab, trim_trailing_space_or_tab, Span};
use nom::bytes::complete::take_while;
use nom::combinator::opt;
use nom::character::complete::char;
use nom::IResult;
use nom::Slice;

pub fn heading(input: Span) -> IResult<Span, (u8, Span)> {
    let start = input;

    let (input, _) = char('#')(input)?;
    let (input, more) = take_while(|c| c == '#')(input)?;
    let level = more.fragment().len() + 1;
    if level > 6 {
        return Err(nom::Err::Error(nom::error::Error::new(
            start,
            nom::error::ErrorKind::Tag,
        )));
    }

    // A space, tab, newline or end of input must follow the hashes
    // ("#hashtag" is a paragraph, not a heading).
    match input.fragment().chars().next() {
        None | Some(' ') | Some('\t') | Some('\n') => {}
        Some(_) => {
            return Err(nom::Err::Error(nom::error::Error::new(
                start,
                nom::error::ErrorKind::Char,
            )));
        }
    }

    let (input, _) = take_while(is_space_or_tab)(input)?;
    let (input, content) = take_while(|c| c != '\n')(input)?;
    let (input, _) = opt(char('\n'))(input)?;

    // Strip trailing whitespace, then a trailing hash run, then whitespace
    // left in front of that run.
    let trimmed = trim_trailing_space_or_tab(content.fragment());
    let trimmed = trimmed.trim_end_matches('#');
    let trimmed = trim_trailing_space_or_tab(trimmed);
    let body = content.slice(..trimmed.len());

    log::debug!("Parsed heading level {}: {:?}", level, body.fragment());
    Ok((input, (level as u8, body)))
}
