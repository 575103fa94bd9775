// Link suffix grammar - what may follow the `]` of link text
//
// The inline form `(destination "title")` and the reference form
// `[label]`. Destinations are either angle-bracketed (percent-encoded on
// capture, like reference definitions) or bare runs with balanced
// parentheses and backslash escapes.

use crate::grammar::shared::is_gfm_whitespace;
use nom::bytes::complete::{take_till, take_while};
use nom::character::complete::char;
use nom::IResult;

/// Parse `(dest "title")` following a close bracket. Returns the captured
/// destination and optional title.
pub fn inline_suffix(input: &str) -> IResult<&str, (String, Option<String>)> {
    let (rest, _) = char('(')(input)?;
    let (rest, _) = take_while(is_gfm_whitespace)(rest)?;

    let (rest, destination) = if rest.starts_with('<') {
        let (rest, _) = char('<')(rest)?;
        let (rest, dest) = take_till(|c| c == '>' || c == '\n')(rest)?;
        let (rest, _) = char('>')(rest)?;
        (rest, urlencoding::encode(dest).into_owned())
    } else {
        bare_destination(rest)?
    };

    let (rest, _) = take_while(is_gfm_whitespace)(rest)?;
    let (rest, title) = match quoted_title(rest) {
        Ok((rest, title)) => (rest, Some(title)),
        Err(_) => (rest, None),
    };
    let (rest, _) = take_while(is_gfm_whitespace)(rest)?;
    let (rest, _) = char(')')(rest)?;

    Ok((rest, (destination, title)))
}

/// Parse `[label]` following a close bracket. Returns `None` for the
/// collapsed form `[]`.
pub fn reference_suffix(input: &str) -> IResult<&str, Option<&str>> {
    let (rest, _) = char('[')(input)?;
    let (rest, label) = take_while(|c| c != ']' && c != '[')(rest)?;
    let (rest, _) = char(']')(rest)?;

    if label.trim().is_empty() {
        Ok((rest, None))
    } else {
        Ok((rest, Some(label)))
    }
}

/// A bare destination: no whitespace, parentheses balanced, backslash
/// escapes resolved. Stops (without consuming) at an unmatched `)`.
fn bare_destination(input: &str) -> IResult<&str, String> {
    let mut destination = String::new();
    let mut depth = 0usize;
    let mut rest = input;

    loop {
        let mut chars = rest.chars();
        match chars.next() {
            None => break,
            Some(c) if is_gfm_whitespace(c) => break,
            Some('\\') => match chars.next() {
                Some(next) if next.is_ascii_punctuation() => {
                    destination.push(next);
                    rest = &rest[1 + next.len_utf8()..];
                }
                _ => {
                    destination.push('\\');
                    rest = &rest[1..];
                }
            },
            Some('(') => {
                depth += 1;
                destination.push('(');
                rest = &rest[1..];
            }
            Some(')') => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                destination.push(')');
                rest = &rest[1..];
            }
            Some(c) => {
                destination.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if depth != 0 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::Verify,
        )));
    }
    Ok((rest, destination))
}

fn quoted_title(input: &str) -> IResult<&str, String> {
    let quote = match input.chars().next() {
        Some(c @ ('"' | '\'')) => c,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )))
        }
    };
    let (rest, _) = char(quote)(input)?;
    let (rest, title) = take_till(|c| c == quote)(rest)?;
    let (rest, _) = char(quote)(rest)?;
    Ok((rest, title.to_string()))
}
