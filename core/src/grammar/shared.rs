// Shared types, character classes and cursor helpers for grammar modules

use nom::bytes::complete::take_while;
use nom::character::complete::char;
use nom::combinator::opt;
use nom::IResult;
use nom_locate::LocatedSpan;

/// Span type used throughout the block grammar modules
/// Wraps a string slice with location information for error reporting
pub type Span<'a> = LocatedSpan<&'a str>;

/// `' '` or `'\t'`
#[inline]
pub fn is_space_or_tab(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// `' '` only
#[inline]
pub fn is_spacebar(c: char) -> bool {
    c == ' '
}

/// `'\n'` (carriage returns are normalized away upstream)
#[inline]
pub fn is_newline(c: char) -> bool {
    c == '\n'
}

/// ASCII whitespace plus vertical tab and form feed, as GFM defines it
#[inline]
pub fn is_gfm_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0B' | '\x0C')
}

/// Chomp the rest of the current line and its trailing newline (if any).
/// Returns the line content without the newline.
pub fn line_text(input: Span) -> IResult<Span, Span> {
    let (input, text) = take_while(|c| !is_newline(c))(input)?;
    let (input, _) = opt(char('\n'))(input)?;
    Ok((input, text))
}

/// Skip 0-3 leading spaces. Fails when 4+ spaces are present, because that
/// much indentation belongs to indented code, not to the caller's construct.
pub fn leading_spaces_max3(input: Span) -> IResult<Span, usize> {
    let start = input;
    let (input, spaces) = take_while(is_spacebar)(input)?;
    let count = spaces.fragment().len();
    if count > 3 {
        return Err(nom::Err::Error(nom::error::Error::new(
            start,
            nom::error::ErrorKind::Space,
        )));
    }
    Ok((input, count))
}

/// Strip trailing spaces and tabs from a captured line.
pub fn trim_trailing_space_or_tab(s: &str) -> &str {
    s.trim_end_matches([' ', '\t'])
}
