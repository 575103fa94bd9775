// Fenced code block grammar
//
// An opening fence of three or more backticks or tildes, an optional info
// string whose first word becomes the language tag, then lines consumed
// until a closing fence of at least the opener's length (same character) or
// end of input. The fence lines are excluded from the body.

use crate::grammar::shared::{is_space_or_tab, Span};
use nom::bytes::complete::{take, take_while};
use nom::character::complete::{char, one_of};
use nom::combinator::opt;
use nom::IResult;
use nom::Slice;

#[derive(Debug, Clone, PartialEq)]
pub struct FencedCodeBlock<'a> {
    pub language: Option<Span<'a>>,
    pub body: Span<'a>,
}

pub fn fenced_code_block(input: Span) -> IResult<Span, FencedCodeBlock> {
    let start = input;

    // Opening fence
    let (input, fence_char) = one_of("`~")(input)?;
    let (input, more) = take_while(|c| c == fence_char)(input)?;
    let fence_len = more.fragment().len() + 1;
    if fence_len < 3 {
        return Err(nom::Err::Error(nom::error::Error::new(
            start,
            nom::error::ErrorKind::Many1Count,
        )));
    }

    // Info string: first whitespace-separated word is the language tag
    let (input, info) = take_while(|c| c != '\n')(input)?;
    let language = match info.fragment().split_whitespace().next() {
        Some(word) => {
            let lead = info.fragment().len() - info.fragment().trim_start().len();
            Some(info.slice(lead..lead + word.len()))
        }
        None => None,
    };

    let (input, newline) = opt(char('\n'))(input)?;
    if newline.is_none() {
        // Fence line at end of input: empty body
        let body = input.slice(0..0);
        return Ok((input, FencedCodeBlock { language, body }));
    }

    // Consume lines until a closing fence or end of input
    let body_start = input;
    let mut remaining = input;
    let close_offset;
    loop {
        if remaining.fragment().is_empty() {
            close_offset = remaining.location_offset();
            break;
        }

        let fragment = remaining.fragment();
        let line_end = fragment.find('\n').unwrap_or(fragment.len());
        let line = &fragment[..line_end];

        if is_closing_fence(line, fence_char, fence_len) {
            close_offset = remaining.location_offset();
            let consumed = if line_end < fragment.len() {
                line_end + 1
            } else {
                line_end
            };
            let (rest, _) = take(consumed)(remaining)?;
            remaining = rest;
            break;
        }

        let consumed = if line_end < fragment.len() {
            line_end + 1
        } else {
            line_end
        };
        let (rest, _) = take(consumed)(remaining)?;
        remaining = rest;
    }

    // Body runs from past the info line to the closing fence, without the
    // final newline.
    let mut body_len = close_offset - body_start.location_offset();
    if body_start.fragment()[..body_len].ends_with('\n') {
        body_len -= 1;
    }
    let body = body_start.slice(..body_len);

    log::debug!(
        "Fenced code block: language {:?}, {} byte body",
        language.map(|l| *l.fragment()),
        body.fragment().len()
    );
    Ok((remaining, FencedCodeBlock { language, body }))
}

fn is_closing_fence(line: &str, fence_char: char, min_len: usize) -> bool {
    let run = line.chars().take_while(|&c| c == fence_char).count();
    run >= min_len && line[run..].chars().all(is_space_or_tab)
}
