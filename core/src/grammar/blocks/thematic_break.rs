// Thematic break grammar
//
// 0-3 leading spaces, a contiguous run of at least three identical `-`, `*`
// or `_` characters, optional trailing spaces/tabs, then newline or end of
// input.

use crate::grammar::shared::{is_space_or_tab, leading_spaces_max3, Span};
use nom::bytes::complete::take_while;
use nom::character::complete::{char, one_of};
use nom::combinator::opt;
use nom::IResult;

pub fn thematic_break(input: Span) -> IResult<Span, ()> {
    let start = input;

    let (input, _) = leading_spaces_max3(input)?;
    let (input, break_char) = one_of("-*_")(input)?;
    let (input, run) = take_while(|c| c == break_char)(input)?;

    if run.fragment().len() + 1 < 3 {
        return Err(nom::Err::Error(nom::error::Error::new(
            start,
            nom::error::ErrorKind::Many1Count,
        )));
    }

    // Only trailing whitespace may follow the run
    let (input, _) = take_while(is_space_or_tab)(input)?;
    let (input, newline) = opt(char('\n'))(input)?;
    if newline.is_none() && !input.fragment().is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            start,
            nom::error::ErrorKind::Char,
        )));
    }

    log::debug!("Thematic break of '{}'", break_char);
    Ok((input, ()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoke_test_thematic_break_hyphens() {
        let (rest, _) = thematic_break(Span::new("---\nnext")).unwrap();
        assert_eq!(*rest.fragment(), "next");
    }

    #[test]
    fn smoke_test_thematic_break_asterisks_and_underscores() {
        assert!(thematic_break(Span::new("***\n")).is_ok());
        assert!(thematic_break(Span::new("___\n")).is_ok());
    }

    #[test]
    fn smoke_test_thematic_break_long_run() {
        assert!(thematic_break(Span::new("----------\n")).is_ok());
    }

    #[test]
    fn smoke_test_thematic_break_leading_and_trailing_spaces() {
        assert!(thematic_break(Span::new("  ***  \n")).is_ok());
    }

    #[test]
    fn smoke_test_thematic_break_at_end_of_input() {
        assert!(thematic_break(Span::new("---")).is_ok());
    }

    #[test]
    fn smoke_test_thematic_break_two_chars_fails() {
        assert!(thematic_break(Span::new("--\n")).is_err());
    }

    #[test]
    fn smoke_test_thematic_break_mixed_chars_fails() {
        assert!(thematic_break(Span::new("-*-\n")).is_err());
    }

    #[test]
    fn smoke_test_thematic_break_interior_spaces_fail() {
        // the run must be contiguous
        assert!(thematic_break(Span::new("- - -\n")).is_err());
    }

    #[test]
    fn smoke_test_thematic_break_trailing_text_fails() {
        assert!(thematic_break(Span::new("--- text\n")).is_err());
    }

    #[test]
    fn smoke_test_thematic_break_four_space_indent_fails() {
        assert!(thematic_break(Span::new("    ---\n")).is_err());
    }
}
