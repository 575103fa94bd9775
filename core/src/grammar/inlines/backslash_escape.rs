// Backslash escape grammar - \ + ASCII punctuation becomes the literal
// character. A backslash before anything else stays literal text.

use nom::character::complete::{char, satisfy};
use nom::IResult;

pub fn backslash_escape(input: &str) -> IResult<&str, char> {
    let (input, _) = char('\\')(input)?;
    satisfy(|c| c.is_ascii_punctuation())(input)
}
