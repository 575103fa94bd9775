// Link reference definition grammar
//
// `[label]: destination "optional title"`. The destination may follow on
// the next line; it is either angle-bracketed (percent-encoded on capture)
// or a bare run of non-whitespace. A successful match feeds the definition
// table and produces no raw block.

use crate::grammar::shared::{is_gfm_whitespace, is_space_or_tab, leading_spaces_max3, Span};
use nom::bytes::complete::{take_till, take_while, take_while1};
use nom::character::complete::char;
use nom::IResult;

pub fn link_reference_definition(input: Span) -> IResult<Span, (String, String, Option<String>)> {
    log::debug!(
        "Trying link reference definition at: {:?}",
        crate::logging::safe_preview(input.fragment(), 40)
    );

    let start = input;

    let (input, _) = leading_spaces_max3(input)?;

    // [label]:
    let (input, _) = char('[')(input)?;
    let (input, label) = take_till(|c| c == ']' || c == '\n')(input)?;
    if label.fragment().trim().is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            start,
            nom::error::ErrorKind::Tag,
        )));
    }
    let (input, _) = char(']')(input)?;
    let (input, _) = char(':')(input)?;

    // Whitespace, optionally across one line ending
    let (input, _) = take_while(is_space_or_tab)(input)?;
    let input = match char::<_, nom::error::Error<Span>>('\n')(input) {
        Ok((rest, _)) => take_while::<_, _, nom::error::Error<Span>>(is_space_or_tab)(rest)?.0,
        Err(_) => input,
    };

    // Destination: <...> is percent-encoded on capture, bare runs are kept
    // verbatim
    let (input, destination) = if input.fragment().starts_with('<') {
        let (input, _) = char('<')(input)?;
        let (input, dest) = take_till(|c| c == '>' || c == '\n')(input)?;
        let (input, _) = char('>')(input)?;
        (input, urlencoding::encode(dest.fragment()).into_owned())
    } else {
        let (input, dest) = take_while1(|c| !is_gfm_whitespace(c))(input)?;
        (input, dest.fragment().to_string())
    };

    // Optional title, quoted with " or ', preceded by whitespace
    let (input, title) = match take_while1::<_, _, nom::error::Error<Span>>(is_space_or_tab)(input)
    {
        Ok((after_ws, _)) => match quoted_title(after_ws) {
            Ok((rest, title)) => (rest, Some(title)),
            Err(_) => (input, None),
        },
        Err(_) => (input, None),
    };

    // Nothing else may follow on the line
    let (input, _) = take_while(is_space_or_tab)(input)?;
    let input = if input.fragment().is_empty() {
        input
    } else {
        char::<_, nom::error::Error<Span>>('\n')(input)
            .map_err(|_| {
                nom::Err::Error(nom::error::Error::new(start, nom::error::ErrorKind::Char))
            })?
            .0
    };

    let label = label.fragment().to_string();
    log::debug!("Parsed link reference: [{}] -> {}", label, destination);
    Ok((input, (label, destination, title)))
}

fn quoted_title(input: Span) -> IResult<Span, String> {
    let quote = match input.fragment().chars().next() {
        Some(c @ ('"' | '\'')) => c,
        _ => {
            return Err(nom::Err::Error(nom::error::Error::new(
                input,
                nom::error::ErrorKind::Char,
            )))
        }
    };
    let (input, _) = char(quote)(input)?;
    let (input, title) = take_till(|c| c == quote || c == '\n')(input)?;
    let (input, _) = char(quote)(input)?;
    Ok((input, title.fragment().to_string()))
}
