// Inline HTML grammar
//
// Recognizes the single-span forms of the HTML subparser contract inside a
// line of inline content: open/close tags, comments, CDATA, processing
// instructions and declarations. Returns the raw text including brackets.

use crate::grammar::blocks::html_block::HtmlKind;
use nom::bytes::complete::{tag, take_until, take_while};
use nom::character::complete::char;
use nom::combinator::opt;
use nom::IResult;

pub fn inline_html(input: &str) -> IResult<&str, (HtmlKind, &str)> {
    if let Ok((rest, raw)) = delimited_span(input, "<!--", "-->") {
        return Ok((rest, (HtmlKind::Comment, raw)));
    }
    if let Ok((rest, raw)) = delimited_span(input, "<![CDATA[", "]]>") {
        return Ok((rest, (HtmlKind::Cdata, raw)));
    }
    if let Ok((rest, raw)) = delimited_span(input, "<?", "?>") {
        return Ok((rest, (HtmlKind::ProcessingInstruction, raw)));
    }
    if let Ok((rest, raw)) = declaration(input) {
        return Ok((rest, (HtmlKind::Declaration, raw)));
    }
    let (rest, raw) = html_tag(input)?;
    Ok((rest, (HtmlKind::Element, raw)))
}

fn delimited_span<'a>(input: &'a str, open: &str, close: &str) -> IResult<&'a str, &'a str> {
    let (rest, _) = tag(open)(input)?;
    let (rest, _) = take_until(close)(rest)?;
    let (rest, _) = tag(close)(rest)?;
    Ok((rest, &input[..input.len() - rest.len()]))
}

fn declaration(input: &str) -> IResult<&str, &str> {
    let (rest, _) = tag("<!")(input)?;
    match rest.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Tag,
            )))
        }
    }
    let (rest, _) = take_until(">")(rest)?;
    let (rest, _) = char('>')(rest)?;
    Ok((rest, &input[..input.len() - rest.len()]))
}

/// `<tag ...>`, `<tag ... />` or `</tag>`; attribute content is consumed
/// loosely up to the closing angle bracket.
fn html_tag(input: &str) -> IResult<&str, &str> {
    let (rest, _) = char('<')(input)?;
    let (rest, _) = opt(char('/'))(rest)?;
    match rest.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Tag,
            )))
        }
    }
    let (rest, _) = take_while(|c: char| c.is_ascii_alphanumeric() || c == '-')(rest)?;
    let (rest, _) = take_while(|c| c != '>' && c != '<')(rest)?;
    let (rest, _) = char('>')(rest)?;
    Ok((rest, &input[..input.len() - rest.len()]))
}
