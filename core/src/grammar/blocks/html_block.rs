// Raw HTML block grammar
//
// Recognizes the constructs of the HTML subparser contract: comments,
// CDATA sections, processing instructions, declarations and elements.
// Comments/CDATA/instructions/declarations run to their terminator, even
// across lines; element blocks run to the next blank line or end of input.

use crate::grammar::shared::Span;
use nom::bytes::complete::{tag, take, take_until};
use nom::character::complete::char;
use nom::combinator::opt;
use nom::IResult;
use nom::Slice;

/// The kind of construct an HTML recognizer matched. Shared with the
/// inline HTML grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlKind {
    Element,
    Comment,
    Cdata,
    ProcessingInstruction,
    Declaration,
}

/// Parse one raw HTML block, returning its kind and raw text.
pub fn html_block(input: Span) -> IResult<Span, (HtmlKind, Span)> {
    log::debug!(
        "Trying HTML block at: {:?}",
        crate::logging::safe_preview(input.fragment(), 40)
    );

    if let Ok(result) = delimited_block(input, "<!--", "-->", HtmlKind::Comment) {
        return Ok(result);
    }
    if let Ok(result) = delimited_block(input, "<![CDATA[", "]]>", HtmlKind::Cdata) {
        return Ok(result);
    }
    if let Ok(result) = delimited_block(input, "<?", "?>", HtmlKind::ProcessingInstruction) {
        return Ok(result);
    }
    if let Ok(result) = declaration(input) {
        return Ok(result);
    }
    element(input)
}

/// A block delimited by fixed open/close markers (`<!-- -->`, `<? ?>`,
/// `<![CDATA[ ]]>`), possibly spanning lines.
fn delimited_block<'a>(
    input: Span<'a>,
    open: &str,
    close: &str,
    kind: HtmlKind,
) -> IResult<Span<'a>, (HtmlKind, Span<'a>)> {
    let start = input;
    let (input, _) = tag(open)(input)?;
    let (input, _) = take_until(close)(input)?;
    let (input, _) = tag(close)(input)?;

    let raw_len = input.location_offset() - start.location_offset();
    let raw = start.slice(..raw_len);

    let (input, _) = opt(char('\n'))(input)?;
    Ok((input, (kind, raw)))
}

/// `<!` followed by an ASCII letter, running to the closing `>`.
fn declaration(input: Span) -> IResult<Span, (HtmlKind, Span)> {
    let start = input;
    let (input, _) = tag("<!")(input)?;
    match input.fragment().chars().next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                start,
                nom::error::ErrorKind::Tag,
            )))
        }
    }
    let (input, _) = take_until(">")(input)?;
    let (input, _) = char('>')(input)?;

    let raw_len = input.location_offset() - start.location_offset();
    let raw = start.slice(..raw_len);

    let (input, _) = opt(char('\n'))(input)?;
    Ok((input, (HtmlKind::Declaration, raw)))
}

/// An element block: `<tag ...>` or `</tag>` opening the line, consumed up
/// to the next blank line. The blank line itself is left for the next
/// alternative.
fn element(input: Span) -> IResult<Span, (HtmlKind, Span)> {
    let start = input;

    let (after_angle, _) = char('<')(input)?;
    let (after_slash, _) = opt(char('/'))(after_angle)?;
    match after_slash.fragment().chars().next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                start,
                nom::error::ErrorKind::Tag,
            )))
        }
    }

    // Consume lines until a blank line or end of input
    let mut remaining = input;
    let mut raw_end = input.location_offset();
    loop {
        let fragment = remaining.fragment();
        if fragment.is_empty() {
            break;
        }
        let line_end = fragment.find('\n').unwrap_or(fragment.len());
        if fragment[..line_end].trim().is_empty() {
            break;
        }

        raw_end = remaining.location_offset() + line_end;
        let consumed = if line_end < fragment.len() {
            line_end + 1
        } else {
            line_end
        };
        let (rest, _) = take(consumed)(remaining)?;
        remaining = rest;
    }

    let raw = start.slice(..raw_end - start.location_offset());
    Ok((remaining, (HtmlKind::Element, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_html_block_comment() {
        let (rest, (kind, raw)) = html_block(Span::new("<!-- note -->\nnext")).unwrap();
        assert_eq!(kind, HtmlKind::Comment);
        assert_eq!(*raw.fragment(), "<!-- note -->");
        assert_eq!(*rest.fragment(), "next");
    }

    #[test]
    fn smoke_test_html_block_multiline_comment() {
        let (_, (kind, raw)) = html_block(Span::new("<!-- one\ntwo -->\n")).unwrap();
        assert_eq!(kind, HtmlKind::Comment);
        assert_eq!(*raw.fragment(), "<!-- one\ntwo -->");
    }

    #[test]
    fn smoke_test_html_block_processing_instruction() {
        let (_, (kind, raw)) = html_block(Span::new("<?php echo 1; ?>\n")).unwrap();
        assert_eq!(kind, HtmlKind::ProcessingInstruction);
        assert_eq!(*raw.fragment(), "<?php echo 1; ?>");
    }

    #[test]
    fn smoke_test_html_block_cdata() {
        let (_, (kind, _)) = html_block(Span::new("<![CDATA[x < y]]>\n")).unwrap();
        assert_eq!(kind, HtmlKind::Cdata);
    }

    #[test]
    fn smoke_test_html_block_declaration() {
        let (_, (kind, raw)) = html_block(Span::new("<!DOCTYPE html>\n")).unwrap();
        assert_eq!(kind, HtmlKind::Declaration);
        assert_eq!(*raw.fragment(), "<!DOCTYPE html>");
    }

    #[test]
    fn smoke_test_html_block_element_until_blank_line() {
        let (rest, (kind, raw)) =
            html_block(Span::new("<div>\n<p>text</p>\n</div>\n\nafter")).unwrap();
        assert_eq!(kind, HtmlKind::Element);
        assert_eq!(*raw.fragment(), "<div>\n<p>text</p>\n</div>");
        assert_eq!(*rest.fragment(), "\nafter");
    }

    #[test]
    fn smoke_test_html_block_closing_tag_line() {
        let (_, (kind, raw)) = html_block(Span::new("</div>\n")).unwrap();
        assert_eq!(kind, HtmlKind::Element);
        assert_eq!(*raw.fragment(), "</div>");
    }

    #[test]
    fn smoke_test_html_block_rejects_non_tag() {
        assert!(html_block(Span::new("<5x>\n")).is_err());
        assert!(html_block(Span::new("plain\n")).is_err());
    }
}
