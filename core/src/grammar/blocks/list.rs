// List grammar: ordered and unordered flavors
//
// An opener is a marker (`-`/`*`/`+`, or 1-9 digits followed by `.` or `)`)
// with at least one space before the item body. Subsequent items repeat a
// marker of the same flavor; the list closes on the first line that does
// not. Item bodies are single lines; a subsequent marker directly followed
// by a newline yields an empty body.
//
// The "ordered list may only start a paragraph context with 1" rule lives
// in the assembler, which sees the previous raw block.

use crate::grammar::shared::{is_spacebar, line_text, Span};
use nom::bytes::complete::take_while1;
use nom::character::complete::{char, one_of};
use nom::IResult;
use nom::Slice;

/// Parse an unordered list: one or more `-`/`*`/`+` items with the same
/// bullet. Returns the raw item bodies.
pub fn unordered_list(input: Span) -> IResult<Span, Vec<Span>> {
    let (mut remaining, (bullet, first)) = unordered_opener(input)?;
    let mut items = vec![first];

    while let Ok((rest, body)) = unordered_next(remaining, bullet) {
        items.push(body);
        remaining = rest;
    }

    log::debug!("Unordered list with {} items", items.len());
    Ok((remaining, items))
}

fn unordered_opener(input: Span) -> IResult<Span, (char, Span)> {
    let (input, bullet) = one_of("-*+")(input)?;
    let (input, _) = take_while1(is_spacebar)(input)?;
    let (input, body) = line_text(input)?;
    Ok((input, (bullet, body)))
}

fn unordered_next(input: Span, bullet: char) -> IResult<Span, Span> {
    let (input, _) = char(bullet)(input)?;
    item_body(input)
}

/// Parse an ordered list: `N.` or `N)` items sharing the delimiter.
/// Returns the first item's number and the raw item bodies.
pub fn ordered_list(input: Span) -> IResult<Span, (u32, Vec<Span>)> {
    let (mut remaining, (number, delimiter, first)) = ordered_opener(input)?;
    let mut items = vec![first];

    while let Ok((rest, body)) = ordered_next(remaining, delimiter) {
        items.push(body);
        remaining = rest;
    }

    log::debug!("Ordered list from {} with {} items", number, items.len());
    Ok((remaining, (number, items)))
}

fn ordered_opener(input: Span) -> IResult<Span, (u32, char, Span)> {
    let (input, number) = marker_number(input)?;
    let (input, delimiter) = one_of(".)")(input)?;
    let (input, _) = take_while1(is_spacebar)(input)?;
    let (input, body) = line_text(input)?;
    Ok((input, (number, delimiter, body)))
}

fn ordered_next(input: Span, delimiter: char) -> IResult<Span, Span> {
    let (input, _) = marker_number(input)?;
    let (input, _) = char(delimiter)(input)?;
    item_body(input)
}

/// Up to nine digits, so the starting index always fits a u32.
fn marker_number(input: Span) -> IResult<Span, u32> {
    let (rest, digits) = take_while1(|c: char| c.is_ascii_digit())(input)?;
    if digits.fragment().len() > 9 {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::TooLarge,
        )));
    }
    let number = digits.fragment().parse().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    Ok((rest, number))
}

/// Body of a non-opening item: either spaces and a line of text, or an
/// immediate newline for an empty item.
fn item_body(input: Span) -> IResult<Span, Span> {
    if let Ok((rest, _)) = char::<_, nom::error::Error<Span>>('\n')(input) {
        return Ok((rest, input.slice(0..0)));
    }
    let (input, _) = take_while1(is_spacebar)(input)?;
    line_text(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_unordered_list_single_item() {
        let (rest, items) = unordered_list(Span::new("- item\nnext")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(*items[0].fragment(), "item");
        assert_eq!(*rest.fragment(), "next");
    }

    #[test]
    fn smoke_test_unordered_list_multiple_items() {
        let (_, items) = unordered_list(Span::new("- one\n- two\n- three\n")).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(*items[2].fragment(), "three");
    }

    #[test]
    fn smoke_test_unordered_list_star_and_plus_bullets() {
        assert!(unordered_list(Span::new("* item\n")).is_ok());
        assert!(unordered_list(Span::new("+ item\n")).is_ok());
    }

    #[test]
    fn smoke_test_unordered_list_closes_on_other_bullet() {
        let (rest, items) = unordered_list(Span::new("- one\n* other\n")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(*rest.fragment(), "* other\n");
    }

    #[test]
    fn smoke_test_unordered_list_empty_subsequent_item() {
        let (_, items) = unordered_list(Span::new("- one\n-\n- three\n")).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(*items[1].fragment(), "");
    }

    #[test]
    fn smoke_test_unordered_opener_requires_space() {
        assert!(unordered_list(Span::new("-item\n")).is_err());
    }

    #[test]
    fn smoke_test_ordered_list_basic() {
        let (_, (start, items)) = ordered_list(Span::new("1. a\n2. b\n")).unwrap();
        assert_eq!(start, 1);
        assert_eq!(items.len(), 2);
        assert_eq!(*items[1].fragment(), "b");
    }

    #[test]
    fn smoke_test_ordered_list_arbitrary_start() {
        let (_, (start, items)) = ordered_list(Span::new("5. a\n6. b\n")).unwrap();
        assert_eq!(start, 5);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn smoke_test_ordered_list_paren_delimiter() {
        let (_, (start, items)) = ordered_list(Span::new("3) a\n4) b\n")).unwrap();
        assert_eq!(start, 3);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn smoke_test_ordered_list_closes_on_delimiter_change() {
        let (rest, (_, items)) = ordered_list(Span::new("1. a\n2) b\n")).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(*rest.fragment(), "2) b\n");
    }

    #[test]
    fn smoke_test_ordered_list_ten_digits_fails() {
        assert!(ordered_list(Span::new("1234567890. a\n")).is_err());
    }

    #[test]
    fn smoke_test_ordered_opener_requires_space() {
        assert!(ordered_list(Span::new("1.a\n")).is_err());
    }
}
