// Paragraph line grammar and the autolink guard
//
// A paragraph line is any non-empty line, captured verbatim except for
// trailing space/tab stripping. Consecutive paragraph lines are merged by
// the assembler with "\n".

use crate::grammar::shared::{line_text, trim_trailing_space_or_tab, Span};
use nom::IResult;
use nom::Slice;

/// Capture one paragraph line. Fails on an empty line (that is a blank
/// line) and at end of input.
pub fn paragraph_line(input: Span) -> IResult<Span, Span> {
    if input.fragment().is_empty() || input.fragment().starts_with('\n') {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TakeWhile1,
        )));
    }

    let (input, text) = line_text(input)?;
    let trimmed = trim_trailing_space_or_tab(text.fragment());
    Ok((input, text.slice(..trimmed.len())))
}

/// Decide whether a line starting with `<` must be treated as a paragraph
/// line instead of a raw HTML block.
///
/// A `<` followed by a space or `>` cannot open a tag, and a `<` followed
/// by an alphabetic run and one of `:` `@` `\` `+` `.` is an autolink or
/// email for the inline pass to resolve. Both pre-empt HTML parsing.
pub fn autolink_guard(input: Span) -> bool {
    let fragment = input.fragment();
    let mut chars = fragment.chars();
    if chars.next() != Some('<') {
        return false;
    }

    match chars.next() {
        None => false,
        Some(' ') | Some('>') => true,
        Some(c) if c.is_ascii_alphabetic() => {
            let rest = &fragment[1..];
            let run_len = rest.chars().take_while(|c| c.is_ascii_alphabetic()).count();
            matches!(
                rest[run_len..].chars().next(),
                Some(':') | Some('@') | Some('\\') | Some('+') | Some('.')
            )
        }
        Some(_) => false,
    }
}
